use serde::{Deserialize, Serialize};

/// Outcome of comparing a measured value against its reference bounds.
///
/// Serialized as `true` / `false` / `null` so that clients see the familiar
/// `isAbnormal` field while Rust callers never confuse "in range" with
/// "not classified".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Classification {
    Normal,
    Abnormal,
    /// No rule applies, or the value text is not a number.
    #[default]
    Indeterminate,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Abnormal => "abnormal",
            Self::Indeterminate => "indeterminate",
        }
    }

    pub fn is_abnormal(&self) -> Option<bool> {
        (*self).into()
    }
}

impl From<Classification> for Option<bool> {
    fn from(c: Classification) -> Self {
        match c {
            Classification::Normal => Some(false),
            Classification::Abnormal => Some(true),
            Classification::Indeterminate => None,
        }
    }
}

impl From<Option<bool>> for Classification {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Abnormal,
            Some(false) => Self::Normal,
            None => Self::Indeterminate,
        }
    }
}

/// A single measurement recognized in document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthParameter {
    /// Canonical catalogue name, e.g. "Hemoglobin".
    pub parameter: String,
    /// Numeric text exactly as it appeared in the document.
    pub value: String,
    pub unit: String,
    pub normal_range: String,
    #[serde(rename = "isAbnormal")]
    pub classification: Classification,
}
