use crate::models::Classification;

/// Inclusive reference bounds for a parameter, in its default unit.
/// A missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ReferenceBounds {
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Values sitting exactly on a bound are normal.
    pub fn classify(&self, value: f64) -> Classification {
        let below = self.min.is_some_and(|min| value < min);
        let above = self.max.is_some_and(|max| value > max);
        if below || above {
            Classification::Abnormal
        } else {
            Classification::Normal
        }
    }
}

/// Classify raw value text against optional bounds.
///
/// Unparseable text and parameters without bounds are indeterminate. Values
/// too large for `f64` parse to infinity and are compared like any other.
pub fn classify_value(value_text: &str, bounds: Option<&ReferenceBounds>) -> Classification {
    let Some(bounds) = bounds else {
        return Classification::Indeterminate;
    };
    match value_text.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => bounds.classify(value),
        _ => Classification::Indeterminate,
    }
}
