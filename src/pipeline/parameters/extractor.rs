use crate::models::HealthParameter;

use super::catalogue::{catalogue, ParameterDefinition};
use super::classify::classify_value;
use super::ParameterError;

/// Raw captures for one definition, before unit resolution and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterMatch<'t> {
    pub value: &'t str,
    /// Empty when the text carries no recognized unit token.
    pub unit: &'t str,
    /// Byte offset of the label in the source text.
    pub offset: usize,
}

/// Extract health parameters from document text using the built-in catalogue.
///
/// Returns at most one record per catalogue entry, in catalogue order.
/// Text without any recognizable parameter yields an empty vector.
pub fn extract(text: &str) -> Vec<HealthParameter> {
    extract_with(catalogue(), text)
}

/// Same as [`extract`] for raw bytes. Bytes that are not UTF-8 text are
/// rejected as invalid input.
pub fn extract_from_bytes(bytes: &[u8]) -> Result<Vec<HealthParameter>, ParameterError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ParameterError::InvalidInput(e.to_string()))?;
    Ok(extract(text))
}

/// Extract against an explicit list of definitions.
pub fn extract_with(definitions: &[ParameterDefinition], text: &str) -> Vec<HealthParameter> {
    let parameters: Vec<HealthParameter> = definitions
        .iter()
        .filter_map(|def| {
            let found = find_first(def, text)?;
            Some(build_parameter(def, &found))
        })
        .collect();

    tracing::debug!(
        text_len = text.len(),
        count = parameters.len(),
        "Health parameters extracted"
    );

    parameters
}

/// Leftmost occurrence of `def` in `text` that has a non-empty value and is
/// not claimed by a more specific parameter.
pub fn find_first<'t>(def: &ParameterDefinition, text: &'t str) -> Option<ParameterMatch<'t>> {
    for caps in def.matcher.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if def.is_excluded_occurrence(text, whole.start()) {
            tracing::trace!(
                parameter = def.name,
                offset = whole.start(),
                "Skipping occurrence qualified for another parameter"
            );
            continue;
        }

        let value = caps.name("value").map_or("", |m| m.as_str());
        if value.is_empty() {
            // A label without a number is not a measurement; first match only.
            return None;
        }

        return Some(ParameterMatch {
            value,
            unit: caps.name("unit").map_or("", |m| m.as_str()),
            offset: whole.start(),
        });
    }
    None
}

fn build_parameter(def: &ParameterDefinition, found: &ParameterMatch<'_>) -> HealthParameter {
    let unit = if found.unit.is_empty() {
        def.default_unit
    } else {
        found.unit
    };
    let classification = classify_value(found.value, def.bounds.as_ref());

    tracing::debug!(
        parameter = def.name,
        value = found.value,
        unit,
        offset = found.offset,
        classification = classification.as_str(),
        "Matched parameter"
    );

    HealthParameter {
        parameter: def.name.to_string(),
        value: found.value.to_string(),
        unit: unit.to_string(),
        normal_range: def.normal_range.to_string(),
        classification,
    }
}
