//! Label composition
//!
//! Pure mapping from a validated submission to the labels it needs:
//! - vehicle: exactly one label
//! - part: one label per module, plus one aggregate label when any
//!   stage/buckle count is positive
//! - anything else: nothing

use super::counts::count_or_zero;
use super::document::{
    LabelBody, LabelDocument, LabelHeader, NOTES_PLACEHOLDER, PHONE_PLACEHOLDER, PartLine,
};
use super::submission::non_empty;
use super::validator::ValidSubmission;

/// Drop-off type as understood by the composer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOffKind {
    Vehicle,
    Part,
    Unknown,
}

impl DropOffKind {
    /// Exact, case-sensitive match
    pub fn parse(value: &str) -> Self {
        match value {
            "vehicle" => DropOffKind::Vehicle,
            "part" => DropOffKind::Part,
            _ => DropOffKind::Unknown,
        }
    }
}

/// Stage/buckle counts of a part drop-off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartCounts {
    pub single_stage: u32,
    pub dual_stage: u32,
    pub triple_stage: u32,
    pub buckles: u32,
}

impl PartCounts {
    pub fn from_submission(submission: &ValidSubmission) -> Self {
        Self {
            single_stage: count_or_zero(submission.single_stage_count.as_ref()),
            dual_stage: count_or_zero(submission.dual_stage_count.as_ref()),
            triple_stage: count_or_zero(submission.three_stage_count.as_ref()),
            buckles: count_or_zero(submission.buckle_count.as_ref()),
        }
    }

    /// Positive counts only, in print order
    pub fn lines(&self) -> Vec<PartLine> {
        [
            ("Single Stage", self.single_stage),
            ("Dual Stage", self.dual_stage),
            ("Triple Stage", self.triple_stage),
            ("Buckles", self.buckles),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| PartLine { label, count })
        .collect()
    }
}

/// Compose every label for one submission
///
/// `submitted_at` is captured once by the caller so all labels of a batch
/// carry the same timestamp. Same input, same output.
pub fn compose(submission: &ValidSubmission, submitted_at: &str) -> Vec<LabelDocument> {
    let header = LabelHeader {
        shop_name: submission.shop_name().to_string(),
        phone: non_empty(submission.phone_number.as_deref())
            .unwrap_or(PHONE_PLACEHOLDER)
            .to_string(),
        submitted_at: submitted_at.to_string(),
    };

    match DropOffKind::parse(submission.drop_off_type()) {
        DropOffKind::Vehicle => vec![vehicle_label(header, submission)],
        DropOffKind::Part => part_labels(header, submission),
        DropOffKind::Unknown => Vec::new(),
    }
}

/// Number of labels [`compose`] would produce, without building them
pub fn label_count(submission: &ValidSubmission) -> u64 {
    match DropOffKind::parse(submission.drop_off_type()) {
        DropOffKind::Vehicle => 1,
        DropOffKind::Part => {
            let modules = u64::from(count_or_zero(submission.module_count.as_ref()));
            let aggregate = PartCounts::from_submission(submission).lines().is_empty();
            modules + u64::from(!aggregate)
        }
        DropOffKind::Unknown => 0,
    }
}

fn vehicle_label(header: LabelHeader, submission: &ValidSubmission) -> LabelDocument {
    let vehicle = format!(
        "{} {} {}",
        submission.vehicle_year.as_deref().unwrap_or_default(),
        submission.vehicle_make.as_deref().unwrap_or_default(),
        submission.vehicle_model.as_deref().unwrap_or_default(),
    );
    let notes = submission.notes().unwrap_or(NOTES_PLACEHOLDER).to_string();

    LabelDocument {
        header,
        body: LabelBody::Vehicle { vehicle, notes },
    }
}

fn part_labels(header: LabelHeader, submission: &ValidSubmission) -> Vec<LabelDocument> {
    let total = count_or_zero(submission.module_count.as_ref());
    let lines = PartCounts::from_submission(submission).lines();

    let mut labels: Vec<LabelDocument> = (1..=total)
        .map(|index| LabelDocument {
            header: header.clone(),
            body: LabelBody::Module { index, total },
        })
        .collect();

    if !lines.is_empty() {
        labels.push(LabelDocument {
            header,
            body: LabelBody::Parts { lines },
        });
    }

    labels
}
