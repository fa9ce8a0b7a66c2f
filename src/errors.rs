//! Error types for environment validation and inventory configuration.
//!
//! Two families live here and must not be confused:
//!
//! - [`ValidationFailure`] describes a malformed *input* expression. It is an expected outcome,
//!   returned by every grammar production and folded into a
//!   [`ValidationResult`](crate::validation::ValidationResult) at the single entry point.
//! - [`ConfigError`] describes a broken inventory file. It is a host configuration problem and is
//!   reported through `miette` like any other I/O failure.
//!
//! All [`ValidationFailure`] construction outside this module goes through the helpers on the
//! type (`ValidationFailure::syntax`, `ValidationFailure::unknown_class`, ...).

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::messages::MessageTemplate;
use crate::syntax::Span;

// Type alias shared with the report builder
pub type SourceArc = Arc<NamedSource<String>>;

// ============================================================================
// ERROR KIND
// ============================================================================

/// What went wrong in an environment expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Unexpected token, trailing input, a second focus marker, or `#` in an illegal slot.
    Syntax,
    /// `[...]` names no known natural class.
    UnknownClass,
    /// A literal cannot be decomposed into known segments.
    UnknownSegment,
    /// `)` with no matching `(`.
    MissingOpeningParen,
    /// `(` with no matching `)`.
    MissingClosingParen,
    /// `]` with no matching `[`.
    MissingOpeningSquareBracket,
    /// `[` with no matching `]`.
    MissingClosingSquareBracket,
    /// A status that could not be recognised when reading a diagnostic back.
    Unknown,
}

impl ErrorKind {
    /// Wire status used in the `<phonEnv status="...">` fragment.
    pub fn as_status(&self) -> &'static str {
        match self {
            ErrorKind::UnknownClass => "class",
            ErrorKind::UnknownSegment => "segment",
            ErrorKind::MissingClosingParen => "missingClosingParen",
            ErrorKind::MissingOpeningParen => "missingOpeningParen",
            ErrorKind::MissingClosingSquareBracket => "missingClosingSquareBracket",
            ErrorKind::MissingOpeningSquareBracket => "missingOpeningSquareBracket",
            ErrorKind::Syntax | ErrorKind::Unknown => "syntax",
        }
    }

    /// Inverse of [`ErrorKind::as_status`]. Anything unrecognised maps to `Unknown`.
    pub fn from_status(status: &str) -> Self {
        match status {
            "class" => ErrorKind::UnknownClass,
            "segment" => ErrorKind::UnknownSegment,
            "missingClosingParen" => ErrorKind::MissingClosingParen,
            "missingOpeningParen" => ErrorKind::MissingOpeningParen,
            "missingClosingSquareBracket" => ErrorKind::MissingClosingSquareBracket,
            "missingOpeningSquareBracket" => ErrorKind::MissingOpeningSquareBracket,
            "syntax" => ErrorKind::Syntax,
            _ => ErrorKind::Unknown,
        }
    }

    /// The message template used to render this kind.
    pub fn template(&self) -> MessageTemplate {
        match self {
            ErrorKind::UnknownClass => MessageTemplate::BadClass,
            ErrorKind::UnknownSegment => MessageTemplate::BadSegment,
            ErrorKind::MissingOpeningParen => MessageTemplate::MissingOpeningParen,
            ErrorKind::MissingClosingParen => MessageTemplate::MissingClosingParen,
            ErrorKind::MissingOpeningSquareBracket => MessageTemplate::MissingOpeningSquareBracket,
            ErrorKind::MissingClosingSquareBracket => MessageTemplate::MissingClosingSquareBracket,
            ErrorKind::Syntax | ErrorKind::Unknown => MessageTemplate::Syntax,
        }
    }

    /// Short description used in `Display` and diagnostic labels.
    pub fn describe(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::UnknownClass => "unknown natural class",
            ErrorKind::UnknownSegment => "unknown segment",
            ErrorKind::MissingOpeningParen => "missing opening parenthesis",
            ErrorKind::MissingClosingParen => "missing closing parenthesis",
            ErrorKind::MissingOpeningSquareBracket => "missing opening square bracket",
            ErrorKind::MissingClosingSquareBracket => "missing closing square bracket",
            ErrorKind::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

// ============================================================================
// VALIDATION FAILURE
// ============================================================================

/// A rejected environment expression: what failed and at which character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[error("{kind} at position {position}")]
pub struct ValidationFailure {
    pub kind: ErrorKind,
    pub position: usize,
}

impl ValidationFailure {
    pub fn new(kind: ErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn syntax(position: usize) -> Self {
        Self::new(ErrorKind::Syntax, position)
    }

    pub fn unknown_class(position: usize) -> Self {
        Self::new(ErrorKind::UnknownClass, position)
    }

    pub fn unknown_segment(position: usize) -> Self {
        Self::new(ErrorKind::UnknownSegment, position)
    }

    /// `(` at `open` was never closed.
    pub fn missing_closing_paren(open: usize) -> Self {
        Self::new(ErrorKind::MissingClosingParen, open)
    }

    /// `)` at `close` was never opened.
    pub fn missing_opening_paren(close: usize) -> Self {
        Self::new(ErrorKind::MissingOpeningParen, close)
    }

    /// `[` at `open` was never closed.
    pub fn missing_closing_bracket(open: usize) -> Self {
        Self::new(ErrorKind::MissingClosingSquareBracket, open)
    }

    /// `]` at `close` was never opened.
    pub fn missing_opening_bracket(close: usize) -> Self {
        Self::new(ErrorKind::MissingOpeningSquareBracket, close)
    }
}

// ============================================================================
// RENDERABLE DIAGNOSTIC
// ============================================================================

/// A [`ValidationFailure`] bound to the text it was found in, renderable by `miette`.
#[derive(Debug)]
pub struct EnvironmentDiagnostic {
    pub failure: ValidationFailure,
    pub message: String,
    pub source: SourceArc,
    /// Byte span inside `source`, as `miette` expects.
    pub span: Span,
}

impl EnvironmentDiagnostic {
    pub fn new(failure: ValidationFailure, message: String, input: &str) -> Self {
        let char_span = Span::new(failure.position, failure.position + 1);
        let bytes = char_span.to_byte_range(input);
        Self {
            failure,
            message,
            source: Arc::new(NamedSource::new("environment", input.to_string())),
            span: Span::new(bytes.start, bytes.end),
        }
    }
}

impl fmt::Display for EnvironmentDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EnvironmentDiagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.failure)
    }
}

impl Diagnostic for EnvironmentDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("phonenv::{}", self.failure.kind.as_status())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.failure.kind {
            ErrorKind::UnknownClass => "add the class to the inventory or fix its name",
            ErrorKind::UnknownSegment => "every literal must be spelled with known segments",
            ErrorKind::MissingClosingParen | ErrorKind::MissingOpeningParen => {
                "optional items are written as `(segment)`"
            }
            ErrorKind::MissingClosingSquareBracket | ErrorKind::MissingOpeningSquareBracket => {
                "natural classes are written as `[name]`"
            }
            ErrorKind::Syntax | ErrorKind::Unknown => {
                "environments look like `/ left _ right`, with `#` only at the outer edges"
            }
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(self.source.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let text = if self.span.is_empty() {
            format!("{} at end of input", self.failure.kind.describe())
        } else {
            self.failure.kind.describe().to_string()
        };
        let label = LabeledSpan::new(
            Some(text),
            self.span.start,
            self.span.len(),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

/// Failure to load a symbol inventory.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read inventory file '{path}'")]
    #[diagnostic(code(phonenv::config::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML inventory")]
    #[diagnostic(
        code(phonenv::config::yaml),
        help("expected a mapping with `segments` and `classes` lists")
    )]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON inventory")]
    #[diagnostic(
        code(phonenv::config::json),
        help("expected an object with `segments` and `classes` arrays")
    )]
    Json(#[from] serde_json::Error),
}
