//! Label documents produced by the composer

use std::fmt;

/// Phone text when the submission has none
pub const PHONE_PLACEHOLDER: &str = "N/A";
/// Notes text when the submission has none
pub const NOTES_PLACEHOLDER: &str = "None";

/// Header shared by every label of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelHeader {
    pub shop_name: String,
    pub phone: String,
    pub submitted_at: String,
}

/// One line of the aggregate parts label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartLine {
    pub label: &'static str,
    pub count: u32,
}

impl fmt::Display for PartLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.count)
    }
}

/// Variant-specific label content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelBody {
    /// One per vehicle drop-off
    Vehicle { vehicle: String, notes: String },
    /// One per module, numbered `index` of `total`
    Module { index: u32, total: u32 },
    /// Non-module parts, only positive counts
    Parts { lines: Vec<PartLine> },
}

/// Label variant, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Vehicle,
    Module,
    Parts,
}

impl LabelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelKind::Vehicle => "vehicle",
            LabelKind::Module => "module",
            LabelKind::Parts => "parts",
        }
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named text field of a label, in print order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelField {
    pub name: &'static str,
    pub value: String,
}

impl LabelField {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// One self-contained printable label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDocument {
    pub header: LabelHeader,
    pub body: LabelBody,
}

impl LabelDocument {
    pub fn kind(&self) -> LabelKind {
        match self.body {
            LabelBody::Vehicle { .. } => LabelKind::Vehicle,
            LabelBody::Module { .. } => LabelKind::Module,
            LabelBody::Parts { .. } => LabelKind::Parts,
        }
    }

    /// Ordered text fields: `Shop`, `Phone`, `Date`, then the body fields
    ///
    /// Multi-line values (the parts list) are newline-joined.
    pub fn fields(&self) -> Vec<LabelField> {
        let mut fields = vec![
            LabelField::new("Shop", self.header.shop_name.as_str()),
            LabelField::new("Phone", self.header.phone.as_str()),
            LabelField::new("Date", self.header.submitted_at.as_str()),
        ];

        match &self.body {
            LabelBody::Vehicle { vehicle, notes } => {
                fields.push(LabelField::new("Vehicle", vehicle.as_str()));
                fields.push(LabelField::new("Notes", notes.as_str()));
            }
            LabelBody::Module { index, total } => {
                fields.push(LabelField::new("Module", format!("{} of {}", index, total)));
            }
            LabelBody::Parts { lines } => {
                let text = lines
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n");
                fields.push(LabelField::new("Parts Drop-off", text));
            }
        }

        fields
    }

    /// Look up a field value by name
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields()
            .into_iter()
            .find(|f| f.name == name)
            .map(|f| f.value)
    }
}
