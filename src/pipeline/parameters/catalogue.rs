use std::sync::LazyLock;

use regex::Regex;

use super::classify::ReferenceBounds;

/// Separator allowed between a label and its value ("Glucose: 95", "Hb 13").
const SEPARATOR: &str = r"[\s:=]*";

/// Numeric value capture. No sign, no thousands separators.
const VALUE: &str = r"(?P<value>\d+(?:\.\d+)?)";

/// Unit alternatives shared by several entries.
const MASS_UNITS: &str = r"mg/dl|mmol/l";
const WHITE_COUNT_UNITS: &str = r"k/[uµ]l|(?:x\s*)?10\^3/[uµ]l|(?:x\s*)?10\^9/l|thou/[uµ]l";
const RED_COUNT_UNITS: &str = r"m/[uµ]l|(?:x\s*)?10\^6/[uµ]l|(?:x\s*)?10\^12/l|mill?/[uµ]l";

/// One entry of the parameter catalogue.
///
/// The matcher exposes two named groups: `value` (required) and `unit`
/// (optional). Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct ParameterDefinition {
    pub name: &'static str,
    pub matcher: Regex,
    pub normal_range: &'static str,
    pub bounds: Option<ReferenceBounds>,
    pub default_unit: &'static str,
    /// Lowercase tokens that, directly preceding a label occurrence, mean the
    /// occurrence belongs to a more specific parameter.
    pub excluded_qualifiers: &'static [&'static str],
}

impl ParameterDefinition {
    /// Build a definition from a label alternation and a unit alternation.
    ///
    /// Labels are anchored on a leading word boundary so that `ldl` does not
    /// fire inside `vldl` and `hb` does not fire inside `mchb`.
    pub fn new(
        name: &'static str,
        labels: &str,
        units: &str,
        normal_range: &'static str,
        bounds: Option<ReferenceBounds>,
        default_unit: &'static str,
    ) -> Result<Self, regex::Error> {
        let pattern = format!(r"(?i)\b(?:{labels}){SEPARATOR}{VALUE}\s*(?P<unit>{units})?");
        Self::from_pattern(name, &pattern, normal_range, bounds, default_unit)
    }

    /// Build a definition from a full pattern. The pattern must define a
    /// `value` group and may define a `unit` group.
    pub fn from_pattern(
        name: &'static str,
        pattern: &str,
        normal_range: &'static str,
        bounds: Option<ReferenceBounds>,
        default_unit: &'static str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            matcher: Regex::new(pattern)?,
            normal_range,
            bounds,
            default_unit,
            excluded_qualifiers: &[],
        })
    }

    pub fn excluding_qualifiers(mut self, qualifiers: &'static [&'static str]) -> Self {
        self.excluded_qualifiers = qualifiers;
        self
    }

    /// True when the occurrence at `start` belongs to something else: the
    /// word right before it names a more specific parameter ("HDL
    /// Cholesterol" for Cholesterol), or the label is the second term of a
    /// ratio ("Cholesterol/HDL").
    pub fn is_excluded_occurrence(&self, text: &str, start: usize) -> bool {
        if text.get(..start).is_some_and(|head| head.ends_with('/')) {
            return true;
        }
        if self.excluded_qualifiers.is_empty() {
            return false;
        }
        let token = preceding_token(text, start);
        !token.is_empty() && self.excluded_qualifiers.contains(&token.as_str())
    }
}

/// Last whitespace-separated token before `start`, lowercased, with any
/// trailing hyphen removed ("HDL-" → "hdl", "Non-HDL " → "non-hdl").
fn preceding_token(text: &str, start: usize) -> String {
    let Some(head) = text.get(..start) else {
        return String::new();
    };
    head.trim_end_matches(|c: char| c.is_whitespace() || c == '-')
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .to_lowercase()
}

static CATALOGUE: LazyLock<Vec<ParameterDefinition>> = LazyLock::new(|| {
    vec![
        entry(
            "Hemoglobin",
            r"ha?emoglobin|hgb|hb",
            r"g/dl|g/l|mmol/l",
            "12.0-15.5 g/dL",
            Some(ReferenceBounds::between(12.0, 15.5)),
            "g/dL",
        ),
        entry(
            "Glucose",
            r"glucose|blood\s+sugar|sugar",
            MASS_UNITS,
            "70-100 mg/dL",
            Some(ReferenceBounds::between(70.0, 100.0)),
            "mg/dL",
        ),
        entry(
            "Cholesterol",
            r"cholesterol|chol",
            MASS_UNITS,
            "<200 mg/dL",
            Some(ReferenceBounds::at_most(200.0)),
            "mg/dL",
        )
        .excluding_qualifiers(&["hdl", "ldl", "vldl", "non-hdl"]),
        entry(
            "HDL Cholesterol",
            r"hdl(?:[\s-]+cholesterol|[\s-]+chol|-c)?",
            MASS_UNITS,
            ">40 mg/dL",
            Some(ReferenceBounds::at_least(40.0)),
            "mg/dL",
        )
        .excluding_qualifiers(&["non"]),
        entry(
            "LDL Cholesterol",
            r"ldl(?:[\s-]+cholesterol|[\s-]+chol|-c)?",
            MASS_UNITS,
            "<100 mg/dL",
            Some(ReferenceBounds::at_most(100.0)),
            "mg/dL",
        ),
        entry(
            "Triglycerides",
            r"triglycerides?|trig",
            MASS_UNITS,
            "<150 mg/dL",
            Some(ReferenceBounds::at_most(150.0)),
            "mg/dL",
        ),
        entry(
            "White Blood Cells",
            r"wbc|white\s+blood\s+cells?(?:\s+count)?|white\s+cell\s+count",
            WHITE_COUNT_UNITS,
            "4.5-11.0 K/uL",
            Some(ReferenceBounds::between(4.5, 11.0)),
            "K/uL",
        ),
        entry(
            "Red Blood Cells",
            r"rbc|red\s+blood\s+cells?(?:\s+count)?|red\s+cell\s+count",
            RED_COUNT_UNITS,
            "4.2-5.4 M/uL",
            Some(ReferenceBounds::between(4.2, 5.4)),
            "M/uL",
        ),
        entry(
            "Platelets",
            r"platelets?(?:\s+count)?|plt",
            WHITE_COUNT_UNITS,
            "150-400 K/uL",
            Some(ReferenceBounds::between(150.0, 400.0)),
            "K/uL",
        ),
        entry(
            "Creatinine",
            r"creatinine|creat",
            r"mg/dl|[uµ]mol/l",
            "0.6-1.2 mg/dL",
            Some(ReferenceBounds::between(0.6, 1.2)),
            "mg/dL",
        ),
    ]
});

fn entry(
    name: &'static str,
    labels: &str,
    units: &str,
    normal_range: &'static str,
    bounds: Option<ReferenceBounds>,
    default_unit: &'static str,
) -> ParameterDefinition {
    ParameterDefinition::new(name, labels, units, normal_range, bounds, default_unit)
        .expect("valid catalogue pattern")
}

/// The process-wide parameter catalogue, in evaluation order.
pub fn catalogue() -> &'static [ParameterDefinition] {
    &CATALOGUE
}

/// Look up a definition by canonical name (case-insensitive).
pub fn find_definition(name: &str) -> Option<&'static ParameterDefinition> {
    catalogue()
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(name))
}
