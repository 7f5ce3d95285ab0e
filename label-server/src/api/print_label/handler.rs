//! Print Label API Handler
//!
//! Validate → compose → dispatch each label → answer with the label count.
//! Dispatch is fire-and-forget; the response never waits for the printer.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{Result, ServerState};
use crate::labels::{Submission, ValidationError, compose, label_count, validate};
use crate::printing::PrintJob;
use crate::utils::time::format_submitted_at;

/// Response for a successful submission
#[derive(Debug, Serialize, Deserialize)]
pub struct PrintLabelResponse {
    pub message: String,
}

impl PrintLabelResponse {
    pub fn queued(count: usize) -> Self {
        Self {
            message: format!("{} label(s) being processed for printing.", count),
        }
    }
}

/// POST /print-label - compose and print drop-off labels
pub async fn print_label(
    State(state): State<ServerState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PrintLabelResponse>> {
    let Json(body) = payload.map_err(|e| ValidationError::Malformed(e.body_text()))?;
    let submission = Submission::from_json(body)?;

    tracing::info!(
        shop = ?submission.shop_name,
        drop_off_type = ?submission.drop_off_type,
        "Received print request"
    );
    tracing::debug!(?submission, "Print request payload");

    let submission = validate(submission)?;

    let requested = label_count(&submission);
    let limit = state.config().max_labels;
    if requested > u64::from(limit) {
        return Err(ValidationError::TooManyLabels { requested, limit }.into());
    }

    let submitted_at = format_submitted_at(&Local::now());
    let labels = compose(&submission, &submitted_at);
    let count = labels.len();

    for label in labels {
        state.dispatcher().submit(PrintJob::new(label))?;
    }

    tracing::info!(
        shop = submission.shop_name(),
        labels = count,
        "Labels dispatched"
    );

    Ok(Json(PrintLabelResponse::queued(count)))
}
