//! The `<phonEnv>` diagnostic fragment and `miette` reports.
//!
//! A failed validation is transmitted as
//!
//! ```text
//! <phonEnv status="STATUS" pos="N">ORIGINAL_INPUT</phonEnv>
//! ```
//!
//! with only `&`, `<` and `>` escaped in the input. Existing consumers read this format, so it is
//! produced byte for byte. Reading a fragment back never fails: anything that is not a
//! well-formed fragment comes back as position 0 with an empty status.
//!
//! `pos` counts Unicode scalar values (Rust `char`s), not UTF-16 code units. The two agree for
//! every character in the Basic Multilingual Plane. A character outside it, such as `𝑎`
//! (U+1D44E), counts once here but twice in a UTF-16 string, so a host that indexes UTF-16 text
//! must convert `pos` before using it.

use miette::Report;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{EnvironmentDiagnostic, ErrorKind, ValidationFailure};
use crate::messages;
use crate::validation::ValidationResult;

static FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\A<phonEnv status="([^"<&]*)" pos="([0-9]+)">(.*)</phonEnv>\z"#)
        .expect("fragment pattern is valid")
});

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(amp|lt|gt|quot|apos);").expect("entity pattern is valid"));

// ============================================================================
// WRITING
// ============================================================================

/// Escapes `&`, `<` and `>`. Nothing else is touched.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Serialises a failure of `input` as a `<phonEnv>` fragment.
pub fn to_wire(input: &str, failure: &ValidationFailure) -> String {
    format!(
        r#"<phonEnv status="{}" pos="{}">{}</phonEnv>"#,
        failure.kind.as_status(),
        failure.position,
        escape_text(input)
    )
}

// ============================================================================
// READING
// ============================================================================

/// A `<phonEnv>` fragment read back from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDiagnostic {
    /// The `pos` attribute as written, or 0 for a malformed fragment.
    pub position: usize,
    /// The `status` attribute as written, or empty for a malformed fragment.
    pub status: String,
    /// The unescaped input, or empty for a malformed fragment.
    pub original: String,
}

impl ParsedDiagnostic {
    fn degraded() -> Self {
        Self {
            position: 0,
            status: String::new(),
            original: String::new(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_status(&self.status)
    }

    /// `position` clamped into the character range of `original`.
    pub fn clamped_position(&self) -> usize {
        messages::clamp_position(&self.original, self.position)
    }
}

/// Reverses the five predefined XML entities.
pub fn unescape_text(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| match &caps[1] {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            _ => "'",
        })
        .into_owned()
}

/// Reads a `<phonEnv>` fragment. Never fails; see the module docs for the degraded form.
pub fn parse_wire(fragment: &str) -> ParsedDiagnostic {
    let Some(caps) = FRAGMENT.captures(fragment) else {
        return ParsedDiagnostic::degraded();
    };
    let content = &caps[3];
    if !is_well_formed_text(content) {
        return ParsedDiagnostic::degraded();
    }
    let Ok(position) = caps[2].parse::<usize>() else {
        return ParsedDiagnostic::degraded();
    };

    ParsedDiagnostic {
        position,
        status: caps[1].to_string(),
        original: unescape_text(content),
    }
}

/// Character data may not hold a raw `<`, and every `&` must start an entity.
fn is_well_formed_text(content: &str) -> bool {
    let stripped = ENTITY.replace_all(content, "");
    !stripped.contains('<') && !stripped.contains('&')
}

// ============================================================================
// REPORTS
// ============================================================================

/// A `miette` report for a failed validation of `input`, or `None` on success.
///
/// Print it with `{:?}` for the graphical rendering.
pub fn report(input: &str, result: &ValidationResult) -> Option<Report> {
    let failure = result.failure()?;
    let message = messages::format_message(input, result);
    Some(Report::new(EnvironmentDiagnostic::new(failure, message, input)))
}
