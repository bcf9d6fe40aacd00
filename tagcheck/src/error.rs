use std::fmt;
use std::ops::Deref;

use crate::value::Kind;

/// A single entry in the list returned by [`crate::Validator::validate`].
///
/// Variants other than [`ValidationError::Violation`] and
/// [`ValidationError::Custom`] describe a mistake in the rule expression
/// rather than in the record's data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A field failed a named rule.
    #[error("{message}")]
    Violation {
        field: String,
        rule: String,
        message: String,
    },
    /// A parameterised rule received a parameter it cannot use.
    #[error("field {field}: invalid parameter `{parameter}` for rule `{rule}`: {reason}")]
    MalformedParameter {
        field: String,
        rule: String,
        parameter: String,
        reason: String,
    },
    /// A cross-field rule names a field the record does not describe.
    #[error("field {field}: rule `{rule}` refers to unknown field `{target}`")]
    UnknownField {
        field: String,
        rule: String,
        target: String,
    },
    /// The rule cannot check values of this kind.
    #[error("field {field}: rule `{rule}` does not apply to {kind} values")]
    UnsupportedKind {
        field: String,
        rule: String,
        kind: Kind,
    },
    /// Free-form failure raised by a user registered rule.
    #[error("{0}")]
    Custom(String),
}

impl ValidationError {
    pub fn custom(message: impl Into<String>) -> Self {
        ValidationError::Custom(message.into())
    }

    /// Name of the offending field, when the error carries one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Violation { field, .. }
            | ValidationError::MalformedParameter { field, .. }
            | ValidationError::UnknownField { field, .. }
            | ValidationError::UnsupportedKind { field, .. } => Some(field),
            ValidationError::Custom(_) => None,
        }
    }

    /// Name of the rule that produced the error, when the error carries one.
    pub fn rule(&self) -> Option<&str> {
        match self {
            ValidationError::Violation { rule, .. }
            | ValidationError::MalformedParameter { rule, .. }
            | ValidationError::UnknownField { rule, .. }
            | ValidationError::UnsupportedKind { rule, .. } => Some(rule),
            ValidationError::Custom(_) => None,
        }
    }

    /// Whether the error points at the rule expression instead of the data.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ValidationError::MalformedParameter { .. }
                | ValidationError::UnknownField { .. }
                | ValidationError::UnsupportedKind { .. }
        )
    }
}

/// Ordered collection of everything wrong with a record under one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Deref for ValidationErrors {
    type Target = [ValidationError];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors raised while loading a [`crate::config::ValidatorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid validator configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("schema names must not be empty")]
    EmptySchemaName,
}
