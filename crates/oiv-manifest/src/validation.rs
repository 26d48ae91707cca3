use std::fmt;

use oiv_command_core::ValidationError;

/// Spellings closer than this are offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.5;

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug, Default)]
pub struct ManifestValidationErrors(pub Vec<ManifestValidationError>);

impl ManifestValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ManifestValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, error: ManifestValidationError) {
        self.0.push(error);
    }
}

impl fmt::Display for ManifestValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

/// One invalid manifest entry, located by its TOML path (`content[1].edits[0]`).
#[derive(Clone, Debug)]
pub struct ManifestValidationError {
    pub context: String,
    pub message: String,
    /// Operation family (`file`, `text`, `xml`) for command rule failures.
    pub operation: Option<&'static str>,
    /// Offending field, in its markup spelling.
    pub field: Option<&'static str>,
    pub suggestion: Option<&'static str>,
}

impl ManifestValidationError {
    pub(crate) fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        ManifestValidationError {
            context: context.into(),
            message: message.into(),
            operation: None,
            field: None,
            suggestion: None,
        }
    }

    pub(crate) fn from_command(context: impl Into<String>, err: &ValidationError) -> Self {
        let suggestion = match err {
            ValidationError::InvalidMode { value, .. }
            | ValidationError::InvalidEnumValue { value, .. } => {
                closest_keyword(value, err.expected())
            }
            _ => None,
        };
        ManifestValidationError {
            context: context.into(),
            message: err.to_string(),
            operation: Some(err.kind().as_str()),
            field: Some(err.field()),
            suggestion,
        }
    }
}

impl fmt::Display for ManifestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)?;
        if let Some(suggestion) = self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

fn closest_keyword(value: &str, expected: &'static [&'static str]) -> Option<&'static str> {
    let lowered = value.to_ascii_lowercase();
    expected
        .iter()
        .map(|candidate| {
            let score = strsim::normalized_levenshtein(&lowered, &candidate.to_ascii_lowercase());
            (*candidate, score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}
