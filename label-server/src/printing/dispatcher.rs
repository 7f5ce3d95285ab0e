//! Print dispatch
//!
//! Fire-and-forget: `submit` hands a job to a spawned task and returns. The
//! task renders, prints and logs the outcome; nothing flows back to the
//! HTTP caller. Jobs are chained so the printer sees them one at a time, in
//! the order they were submitted.

use std::sync::Arc;

use label_printer::PrintError;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::backend::PrinterBackend;
use super::renderer::LabelRenderer;
use crate::labels::LabelDocument;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The job could not be handed off at all
    #[error("Dispatcher unavailable: {0}")]
    Unavailable(String),

    /// The printer rejected the job (logged, never returned to callers)
    #[error(transparent)]
    Print(#[from] PrintError),
}

/// One label on its way to the printer
#[derive(Debug, Clone)]
pub struct PrintJob {
    pub id: Uuid,
    pub document: LabelDocument,
}

impl PrintJob {
    pub fn new(document: LabelDocument) -> Self {
        Self {
            id: Uuid::new_v4(),
            document,
        }
    }
}

/// Accepts print jobs without waiting for them to finish
pub trait PrintDispatcher: Send + Sync {
    /// Hand off a job. `Ok` means dispatch started, not that it printed.
    fn submit(&self, job: PrintJob) -> Result<(), DispatchError>;

    /// Human-readable print target
    fn target(&self) -> String;
}

/// Dispatcher that runs each job on its own tokio task
///
/// Each job waits for the one submitted before it, so labels reach the
/// printer whole and in submission order ("1 of 3" before "2 of 3").
pub struct TaskDispatcher {
    printer: Arc<PrinterBackend>,
    renderer: Arc<LabelRenderer>,
    /// Completion signal of the most recently submitted job
    last_job: Mutex<Option<oneshot::Receiver<()>>>,
}

impl TaskDispatcher {
    pub fn new(printer: PrinterBackend, renderer: LabelRenderer) -> Self {
        Self {
            printer: Arc::new(printer),
            renderer: Arc::new(renderer),
            last_job: Mutex::new(None),
        }
    }
}

impl PrintDispatcher for TaskDispatcher {
    fn submit(&self, job: PrintJob) -> Result<(), DispatchError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| DispatchError::Unavailable(e.to_string()))?;

        let (done, done_rx) = oneshot::channel();
        let previous = self.last_job.lock().replace(done_rx);

        info!(job_id = %job.id, kind = %job.document.kind(), "Print job queued");

        let printer = Arc::clone(&self.printer);
        let renderer = Arc::clone(&self.renderer);
        runtime.spawn(async move {
            if let Err(e) = run_job(&job, &printer, &renderer, previous).await {
                error!(job_id = %job.id, error = %e, "Failed to print label");
            }
            // Dropped senders also release the next job
            let _ = done.send(());
        });

        Ok(())
    }

    fn target(&self) -> String {
        self.printer.describe()
    }
}

#[instrument(skip_all, fields(job_id = %job.id, kind = %job.document.kind()))]
async fn run_job(
    job: &PrintJob,
    printer: &PrinterBackend,
    renderer: &LabelRenderer,
    previous: Option<oneshot::Receiver<()>>,
) -> Result<(), DispatchError> {
    let data = renderer.render(&job.document);
    debug!(label = %renderer.render_text(&job.document), "Rendered label");

    if let Some(previous) = previous {
        let _ = previous.await;
    }
    printer.print(&data).await?;

    info!(bytes = data.len(), "Label sent to printer");
    Ok(())
}
