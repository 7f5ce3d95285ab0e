//! Label printing
//!
//! - [`LabelRenderer`]: LabelDocument → ESC/POS bytes
//! - [`PrinterBackend`]: configured printer adapter
//! - [`PrintDispatcher`]: fire-and-forget job submission

pub mod backend;
pub mod dispatcher;
pub mod renderer;

pub use backend::PrinterBackend;
pub use dispatcher::{DispatchError, PrintDispatcher, PrintJob, TaskDispatcher};
pub use renderer::LabelRenderer;
