//! Validation entry point.
//!
//! [`validate`] is the only place a [`ValidationFailure`] becomes a [`ValidationResult`]; grammar
//! productions propagate failures with `?` and never panic on malformed input.

use serde::{Deserialize, Serialize};

use crate::diagnostics;
use crate::errors::{ErrorKind, ValidationFailure};
use crate::symbols::ValidationContext;
use crate::syntax::parser;

/// Outcome of validating one environment string.
///
/// `error_kind` and `position` are present exactly when `success` is false. Deserializing
/// enforces that, so a JSON result that breaks it is an error rather than a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawValidationResult")]
pub struct ValidationResult {
    success: bool,
    error_kind: Option<ErrorKind>,
    position: Option<usize>,
    raw_diagnostic: Option<String>,
}

impl ValidationResult {
    pub fn accepted() -> Self {
        Self {
            success: true,
            error_kind: None,
            position: None,
            raw_diagnostic: None,
        }
    }

    /// A rejection of `input`, carrying its `<phonEnv>` wire fragment.
    pub fn rejected(input: &str, failure: ValidationFailure) -> Self {
        Self {
            success: false,
            error_kind: Some(failure.kind),
            position: Some(failure.position),
            raw_diagnostic: Some(diagnostics::to_wire(input, &failure)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn raw_diagnostic(&self) -> Option<&str> {
        self.raw_diagnostic.as_deref()
    }

    pub fn failure(&self) -> Option<ValidationFailure> {
        match (self.error_kind, self.position) {
            (Some(kind), Some(position)) => Some(ValidationFailure::new(kind, position)),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<(), ValidationFailure> {
        match self.failure() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

#[derive(Deserialize)]
struct RawValidationResult {
    success: bool,
    #[serde(default)]
    error_kind: Option<ErrorKind>,
    #[serde(default)]
    position: Option<usize>,
    #[serde(default)]
    raw_diagnostic: Option<String>,
}

impl TryFrom<RawValidationResult> for ValidationResult {
    type Error = String;

    fn try_from(raw: RawValidationResult) -> Result<Self, Self::Error> {
        let has_failure = raw.error_kind.is_some() && raw.position.is_some();
        if raw.success {
            if raw.error_kind.is_some() || raw.position.is_some() || raw.raw_diagnostic.is_some() {
                return Err("a successful result carries no error fields".to_string());
            }
        } else if !has_failure {
            return Err("a failed result needs both error_kind and position".to_string());
        }
        Ok(Self {
            success: raw.success,
            error_kind: raw.error_kind,
            position: raw.position,
            raw_diagnostic: raw.raw_diagnostic,
        })
    }
}

/// Validates `input` against the symbol tables in `ctx`.
///
/// Pure: the same context and input always give the same result.
pub fn validate(ctx: &ValidationContext, input: &str) -> ValidationResult {
    match parser::check(ctx, input) {
        Ok(()) => ValidationResult::accepted(),
        Err(failure) => ValidationResult::rejected(input, failure),
    }
}

impl ValidationContext {
    /// Method form of [`validate`].
    pub fn validate(&self, input: &str) -> ValidationResult {
        validate(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ValidationContext {
        ValidationContext::with_symbols(["a", "b"], ["C"])
    }

    #[test]
    fn accepted_result_has_no_failure_fields() {
        let result = validate(&ctx(), "/ [C] _ a");
        assert!(result.is_success());
        assert_eq!(result.error_kind(), None);
        assert_eq!(result.position(), None);
        assert_eq!(result.raw_diagnostic(), None);
        assert_eq!(result.into_result(), Ok(()));
    }

    #[test]
    fn rejected_result_carries_kind_position_and_wire() {
        let result = validate(&ctx(), "/ [V] _ a");
        assert!(!result.is_success());
        assert_eq!(result.error_kind(), Some(ErrorKind::UnknownClass));
        assert_eq!(result.position(), Some(3));
        assert_eq!(
            result.raw_diagnostic(),
            Some(r#"<phonEnv status="class" pos="3">/ [V] _ a</phonEnv>"#)
        );
    }

    #[test]
    fn result_serialises_to_json() {
        let result = validate(&ctx(), "/ q _");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error_kind"], "UnknownSegment");
        assert_eq!(json["position"], 2);
    }

    #[test]
    fn result_reads_back_from_json() {
        let result = validate(&ctx(), "/ q _");
        let json = serde_json::to_string(&result).unwrap();
        let back: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);

        let ok: ValidationResult = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(ok, ValidationResult::accepted());
    }

    #[test]
    fn inconsistent_json_is_rejected() {
        let success_with_kind =
            r#"{"success":true,"error_kind":"Syntax","position":0,"raw_diagnostic":null}"#;
        assert!(serde_json::from_str::<ValidationResult>(success_with_kind).is_err());

        let failure_without_position = r#"{"success":false,"error_kind":"Syntax"}"#;
        assert!(serde_json::from_str::<ValidationResult>(failure_without_position).is_err());
    }
}
