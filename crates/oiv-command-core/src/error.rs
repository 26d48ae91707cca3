use std::fmt;

use thiserror::Error;

/// Leaf operation family named by a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    File,
    Text,
    Xml,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::File => "file",
            OperationKind::Text => "text",
            OperationKind::Xml => "xml",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{kind} operation: invalid mode '{value}', expected one of {}", .expected.join(", "))]
    InvalidMode {
        kind: OperationKind,
        value: String,
        expected: &'static [&'static str],
    },

    #[error("{kind} operation in '{mode}' mode requires `{field}`")]
    MissingRequiredField {
        kind: OperationKind,
        mode: &'static str,
        field: &'static str,
    },

    #[error("{kind} operation in '{mode}' mode does not accept `{field}`")]
    ForbiddenFieldPresent {
        kind: OperationKind,
        mode: &'static str,
        field: &'static str,
    },

    #[error("{kind} operation: invalid {field} '{value}', expected one of {}", .expected.join(", "))]
    InvalidEnumValue {
        kind: OperationKind,
        field: &'static str,
        value: String,
        expected: &'static [&'static str],
    },
}

impl ValidationError {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::InvalidMode { kind, .. }
            | Self::MissingRequiredField { kind, .. }
            | Self::ForbiddenFieldPresent { kind, .. }
            | Self::InvalidEnumValue { kind, .. } => *kind,
        }
    }

    /// Field the failure refers to, using its markup attribute spelling.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidMode { .. } => "mode",
            Self::MissingRequiredField { field, .. }
            | Self::ForbiddenFieldPresent { field, .. }
            | Self::InvalidEnumValue { field, .. } => field,
        }
    }

    /// Accepted spellings for mode and enumerated fields, empty otherwise.
    pub fn expected(&self) -> &'static [&'static str] {
        match self {
            Self::InvalidMode { expected, .. } | Self::InvalidEnumValue { expected, .. } => {
                expected
            }
            _ => &[],
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_kind_mode_and_field() {
        let err = ValidationError::MissingRequiredField {
            kind: OperationKind::File,
            mode: "add",
            field: "source",
        };
        assert_eq!(
            err.to_string(),
            "file operation in 'add' mode requires `source`"
        );
        assert_eq!(err.field(), "source");
    }

    #[test]
    fn enumerated_failures_list_expected_values() {
        let err = ValidationError::InvalidEnumValue {
            kind: OperationKind::Text,
            field: "condition",
            value: "Contains".into(),
            expected: &["Equal", "StartsWith", "Mask"],
        };
        assert_eq!(
            err.to_string(),
            "text operation: invalid condition 'Contains', expected one of Equal, StartsWith, Mask"
        );
        assert_eq!(err.kind(), OperationKind::Text);
        assert_eq!(err.expected(), &["Equal", "StartsWith", "Mask"]);
    }

    #[test]
    fn non_enumerated_failures_have_no_expected_values() {
        let err = ValidationError::ForbiddenFieldPresent {
            kind: OperationKind::Xml,
            mode: "remove",
            field: "append",
        };
        assert!(err.expected().is_empty());
    }
}
