//! Drop-off submission payload

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::validator::ValidationError;

/// One drop-off event as posted by the intake form
///
/// Every field is optional at the type level; required fields are enforced
/// by [`validate`](super::validate) so that a missing field is a 400, not a
/// JSON rejection. Counts stay loosely typed and are interpreted by
/// [`count_or_zero`](super::count_or_zero).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default, deserialize_with = "lenient_string")]
    pub shop_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub drop_off_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone_number: Option<String>,

    // Vehicle drop-off
    #[serde(default, deserialize_with = "lenient_string")]
    pub vehicle_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vehicle_make: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vehicle_model: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub additional_notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vehicle_issue_description: Option<String>,

    // Part drop-off
    #[serde(default)]
    pub module_count: Option<Value>,
    #[serde(default)]
    pub single_stage_count: Option<Value>,
    #[serde(default)]
    pub dual_stage_count: Option<Value>,
    #[serde(default)]
    pub three_stage_count: Option<Value>,
    #[serde(default)]
    pub buckle_count: Option<Value>,
}

impl Submission {
    /// Read a submission from a request body
    ///
    /// Only JSON objects are accepted; arrays would otherwise bind to the
    /// fields positionally.
    pub fn from_json(value: Value) -> Result<Self, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::Malformed(
                "expected a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    /// Notes text: `additionalNotes`, falling back to `vehicleIssueDescription`
    pub fn notes(&self) -> Option<&str> {
        non_empty(self.additional_notes.as_deref())
            .or_else(|| non_empty(self.vehicle_issue_description.as_deref()))
    }
}

/// Treat an empty string the same as a missing value
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Accept strings, numbers and booleans for text fields
///
/// Form clients post `"vehicleYear": 2019` as often as `"2019"`.
/// `null`, arrays and objects read as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case_vehicle() {
        let submission: Submission = serde_json::from_value(json!({
            "shopName": "Main Street Auto",
            "dropOffType": "vehicle",
            "phoneNumber": "555-0100",
            "vehicleYear": 2019,
            "vehicleMake": "Honda",
            "vehicleModel": "Civic",
            "additionalNotes": "Airbag light on",
        }))
        .unwrap();

        assert_eq!(submission.shop_name.as_deref(), Some("Main Street Auto"));
        assert_eq!(submission.vehicle_year.as_deref(), Some("2019"));
        assert_eq!(submission.notes(), Some("Airbag light on"));
    }

    #[test]
    fn test_counts_stay_raw() {
        let submission: Submission = serde_json::from_value(json!({
            "moduleCount": "abc",
            "buckleCount": 2,
            "unknownField": true,
        }))
        .unwrap();

        assert_eq!(submission.module_count, Some(json!("abc")));
        assert_eq!(submission.buckle_count, Some(json!(2)));
        assert_eq!(submission.single_stage_count, None);
    }

    #[test]
    fn test_null_and_objects_read_as_absent() {
        let submission: Submission = serde_json::from_value(json!({
            "shopName": null,
            "phoneNumber": {"area": "555"},
        }))
        .unwrap();

        assert_eq!(submission.shop_name, None);
        assert_eq!(submission.phone_number, None);
    }

    #[test]
    fn test_from_json_requires_object() {
        assert!(matches!(
            Submission::from_json(json!(["Main Street Auto", "Vehicle"])),
            Err(ValidationError::Malformed(_))
        ));
        assert!(Submission::from_json(json!("Vehicle")).is_err());

        let submission = Submission::from_json(json!({ "shopName": "Shop" })).unwrap();
        assert_eq!(submission.shop_name.as_deref(), Some("Shop"));
    }

    #[test]
    fn test_notes_fall_back_to_issue_description() {
        let submission = Submission {
            additional_notes: Some(String::new()),
            vehicle_issue_description: Some("Seat belt locked".to_string()),
            ..Default::default()
        };
        assert_eq!(submission.notes(), Some("Seat belt locked"));

        let empty = Submission::default();
        assert_eq!(empty.notes(), None);
    }
}
