//! User-facing messages for rejected environments.
//!
//! Each template quotes the input from the reported position onward. The position is clamped
//! into the input first, since it may have been computed against a differently escaped copy.

use crate::diagnostics;
use crate::validation::ValidationResult;

/// Message families; several error kinds may share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageTemplate {
    BadClass,
    BadSegment,
    MissingOpeningParen,
    MissingClosingParen,
    MissingOpeningSquareBracket,
    MissingClosingSquareBracket,
    Syntax,
}

/// Locale-specific wording. `rest` is the input from the failure position onward.
pub trait MessageCatalog {
    fn render(&self, template: MessageTemplate, rest: &str) -> String;
}

/// The built-in English catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl MessageCatalog for EnglishMessages {
    fn render(&self, template: MessageTemplate, rest: &str) -> String {
        match template {
            MessageTemplate::BadClass => {
                format!("There is an unknown natural class in the environment at: {rest}")
            }
            MessageTemplate::BadSegment => {
                format!("There is an unknown segment in the environment at: {rest}")
            }
            MessageTemplate::MissingOpeningParen => {
                format!("There is a missing opening parenthesis before: {rest}")
            }
            MessageTemplate::MissingClosingParen => {
                format!("There is a missing closing parenthesis for the optional item at: {rest}")
            }
            MessageTemplate::MissingOpeningSquareBracket => {
                format!("There is a missing opening square bracket before: {rest}")
            }
            MessageTemplate::MissingClosingSquareBracket => {
                format!("There is a missing closing square bracket for the class at: {rest}")
            }
            MessageTemplate::Syntax => {
                format!("There is a syntax error in the environment at: {rest}")
            }
        }
    }
}

/// Clamps `position` into `[0, len - 1]` of `text`'s characters (0 for empty text).
pub fn clamp_position(text: &str, position: usize) -> usize {
    position.min(text.chars().count().saturating_sub(1))
}

/// `original` from character `position` onward, after clamping.
fn rest_of(original: &str, position: usize) -> &str {
    let start = clamp_position(original, position);
    let byte = original
        .char_indices()
        .nth(start)
        .map_or(original.len(), |(byte, _)| byte);
    &original[byte..]
}

/// Renders `result` for `original` with the English catalog.
///
/// An accepted result renders as an empty string.
pub fn format_message(original: &str, result: &ValidationResult) -> String {
    format_message_with(&EnglishMessages, original, result)
}

pub fn format_message_with(
    catalog: &impl MessageCatalog,
    original: &str,
    result: &ValidationResult,
) -> String {
    match result.failure() {
        Some(failure) => catalog.render(
            failure.kind.template(),
            rest_of(original, failure.position),
        ),
        None => String::new(),
    }
}

/// Renders a `<phonEnv>` fragment received from elsewhere, quoting the input it carries.
pub fn format_wire_message(fragment: &str) -> String {
    let parsed = diagnostics::parse_wire(fragment);
    EnglishMessages.render(
        parsed.kind().template(),
        rest_of(&parsed.original, parsed.position),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_position_inside_text() {
        assert_eq!(clamp_position("/ a _", 2), 2);
        assert_eq!(clamp_position("/ a _", 5), 4);
        assert_eq!(clamp_position("/ a _", 99), 4);
        assert_eq!(clamp_position("", 3), 0);
    }

    #[test]
    fn rest_handles_multibyte_and_empty_text() {
        assert_eq!(rest_of("/ ʃq _", 3), "q _");
        assert_eq!(rest_of("", 7), "");
    }
}
