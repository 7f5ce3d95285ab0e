//! Drop-off label domain
//!
//! Submission → validation → composition. Everything here is pure; printing
//! lives in [`crate::printing`].

pub mod composer;
pub mod counts;
pub mod document;
pub mod submission;
pub mod validator;

pub use composer::{DropOffKind, PartCounts, compose, label_count};
pub use counts::{count_or_zero, parse_count_or_zero};
pub use document::{LabelBody, LabelDocument, LabelField, LabelHeader, LabelKind, PartLine};
pub use submission::Submission;
pub use validator::{ValidSubmission, ValidationError, validate};
