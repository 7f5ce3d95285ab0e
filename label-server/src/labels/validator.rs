//! Request validation

use std::ops::Deref;

use thiserror::Error;

use super::submission::{Submission, non_empty};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing shop name")]
    MissingShopName,

    #[error("Missing drop-off type")]
    MissingDropOffType,

    #[error("Malformed request body: {0}")]
    Malformed(String),

    #[error("Submission needs {requested} labels, limit is {limit}")]
    TooManyLabels { requested: u64, limit: u32 },
}

/// A submission that carries both required fields
///
/// Only [`validate`] constructs this, so the composer never sees a
/// submission without a shop name or drop-off type.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSubmission(Submission);

impl ValidSubmission {
    pub fn shop_name(&self) -> &str {
        self.0.shop_name.as_deref().unwrap_or_default()
    }

    /// Raw drop-off type; not checked against the known values
    pub fn drop_off_type(&self) -> &str {
        self.0.drop_off_type.as_deref().unwrap_or_default()
    }
}

impl Deref for ValidSubmission {
    type Target = Submission;

    fn deref(&self) -> &Submission {
        &self.0
    }
}

/// Check that shop name and drop-off type are present and non-empty
///
/// The submission passes through unchanged. An unknown drop-off type is
/// accepted here and yields zero labels later.
pub fn validate(submission: Submission) -> Result<ValidSubmission, ValidationError> {
    if non_empty(submission.shop_name.as_deref()).is_none() {
        return Err(ValidationError::MissingShopName);
    }
    if non_empty(submission.drop_off_type.as_deref()).is_none() {
        return Err(ValidationError::MissingDropOffType);
    }
    Ok(ValidSubmission(submission))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(shop: Option<&str>, kind: Option<&str>) -> Submission {
        Submission {
            shop_name: shop.map(str::to_string),
            drop_off_type: kind.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_passes_through_unchanged() {
        let input = Submission {
            phone_number: Some("555-0100".to_string()),
            ..submission(Some("Main Street Auto"), Some("part"))
        };

        let valid = validate(input.clone()).unwrap();
        assert_eq!(valid.shop_name(), "Main Street Auto");
        assert_eq!(valid.drop_off_type(), "part");
        assert_eq!(*valid, input);
    }

    #[test]
    fn test_missing_or_empty_shop_name() {
        assert_eq!(
            validate(submission(None, Some("vehicle"))),
            Err(ValidationError::MissingShopName)
        );
        assert_eq!(
            validate(submission(Some(""), Some("vehicle"))),
            Err(ValidationError::MissingShopName)
        );
    }

    #[test]
    fn test_missing_or_empty_drop_off_type() {
        assert_eq!(
            validate(submission(Some("Shop"), None)),
            Err(ValidationError::MissingDropOffType)
        );
        assert_eq!(
            validate(submission(Some("Shop"), Some(""))),
            Err(ValidationError::MissingDropOffType)
        );
    }

    #[test]
    fn test_unknown_drop_off_type_is_accepted() {
        let valid = validate(submission(Some("Shop"), Some("boat"))).unwrap();
        assert_eq!(valid.drop_off_type(), "boat");
    }
}
