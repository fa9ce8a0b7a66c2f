//! Golden master tests for messages and the `<phonEnv>` wire fragment.
//!
//! These pin the exact text consumers see, so wording or format drift shows up here.

mod common;

use common::minimal_context;
use phonenv::diagnostics::{parse_wire, report, to_wire};
use phonenv::messages::{clamp_position, format_message_with, format_wire_message};
use phonenv::{
    format_message, validate, ErrorKind, MessageCatalog, MessageTemplate, ValidationFailure,
    ValidationContext, ValidationResult,
};

fn message_for(input: &str) -> String {
    let result = validate(&minimal_context(), input);
    format_message(input, &result)
}

// ---
// Messages
// ---

#[test]
fn test_bad_class_message() {
    assert_eq!(
        message_for("/ [V] _ a"),
        "There is an unknown natural class in the environment at: V] _ a"
    );
}

#[test]
fn test_bad_segment_message() {
    assert_eq!(
        message_for("/ [C] _ q"),
        "There is an unknown segment in the environment at: q"
    );
}

#[test]
fn test_paren_messages() {
    assert_eq!(
        message_for("/ (a _"),
        "There is a missing closing parenthesis for the optional item at: (a _"
    );
    assert_eq!(
        message_for("/ a) _"),
        "There is a missing opening parenthesis before: ) _"
    );
}

#[test]
fn test_bracket_messages() {
    assert_eq!(
        message_for("/ [C _"),
        "There is a missing closing square bracket for the class at: [C _"
    );
    assert_eq!(
        message_for("/ a] _"),
        "There is a missing opening square bracket before: ] _"
    );
}

#[test]
fn test_syntax_message_at_end_of_input_is_clamped() {
    // The failure is reported at the input length, one past the last character.
    let result = validate(&minimal_context(), "/ a");
    assert_eq!(result.position(), Some(3));
    assert_eq!(
        format_message("/ a", &result),
        "There is a syntax error in the environment at: a"
    );
}

#[test]
fn test_position_from_another_copy_is_clamped() {
    let result = validate(&minimal_context(), "/ [C] _ a b q");
    assert_eq!(result.position(), Some(12));
    // Rendered against a shorter copy of the text
    assert_eq!(
        format_message("/ [C] _", &result),
        "There is an unknown segment in the environment at: _"
    );
}

#[test]
fn test_accepted_result_has_no_message() {
    assert_eq!(format_message("/ _", &ValidationResult::accepted()), "");
}

#[test]
fn test_custom_catalog() {
    struct Terse;
    impl MessageCatalog for Terse {
        fn render(&self, template: MessageTemplate, rest: &str) -> String {
            format!("{template:?}@{rest}")
        }
    }

    let result = validate(&minimal_context(), "/ a) _");
    assert_eq!(
        format_message_with(&Terse, "/ a) _", &result),
        "MissingOpeningParen@) _"
    );
}

// ---
// Wire fragment
// ---

#[test]
fn test_wire_fragment_is_exact() {
    let result = validate(&minimal_context(), "/ [C] _ q");
    assert_eq!(
        result.raw_diagnostic(),
        Some(r#"<phonEnv status="segment" pos="8">/ [C] _ q</phonEnv>"#)
    );
}

#[test]
fn test_wire_position_counts_astral_character_once() {
    // U+1D44E is one scalar value but two UTF-16 code units
    let ctx = ValidationContext::with_symbols(["\u{1D44E}"], ["C"]);
    let input = "/ \u{1D44E} [V] _";
    let result = validate(&ctx, input);
    assert_eq!(result.position(), Some(5));
    assert_eq!(
        result.raw_diagnostic(),
        Some("<phonEnv status=\"class\" pos=\"5\">/ \u{1D44E} [V] _</phonEnv>")
    );
}

#[test]
fn test_wire_escapes_markup_in_input() {
    let input = "/ a<b> & _";
    let result = validate(&minimal_context(), input);
    assert_eq!(
        result.raw_diagnostic(),
        Some(r#"<phonEnv status="segment" pos="3">/ a&lt;b&gt; &amp; _</phonEnv>"#)
    );
}

#[test]
fn test_wire_status_names() {
    let cases = [
        (ErrorKind::UnknownClass, "class"),
        (ErrorKind::UnknownSegment, "segment"),
        (ErrorKind::MissingClosingParen, "missingClosingParen"),
        (ErrorKind::MissingOpeningParen, "missingOpeningParen"),
        (ErrorKind::MissingClosingSquareBracket, "missingClosingSquareBracket"),
        (ErrorKind::MissingOpeningSquareBracket, "missingOpeningSquareBracket"),
        (ErrorKind::Syntax, "syntax"),
    ];
    for (kind, status) in cases {
        let wire = to_wire("/ _", &ValidationFailure::new(kind, 1));
        assert_eq!(wire, format!(r#"<phonEnv status="{status}" pos="1">/ _</phonEnv>"#));
    }
}

#[test]
fn test_wire_round_trip_recovers_position_and_template() {
    let ctx = minimal_context();
    let inputs = [
        "/ [V] _ a",
        "/ [C] _ q",
        "/ (a _",
        "/ a) _",
        "/ [C _",
        "/ a] _",
        "/ a",
        "",
        "/ a<b _",
        "/ & _",
    ];
    for input in inputs {
        let result = validate(&ctx, input);
        let failure = result.failure().expect("input is invalid");
        let parsed = parse_wire(result.raw_diagnostic().expect("failure has a fragment"));

        assert_eq!(parsed.original, input);
        assert_eq!(parsed.position, failure.position);
        assert_eq!(
            parsed.clamped_position(),
            clamp_position(input, failure.position)
        );
        assert_eq!(parsed.kind().template(), failure.kind.template());
    }
}

#[test]
fn test_malformed_fragment_still_renders() {
    let message = format_wire_message(r#"<phonEnv status="class" pos="3">/ a<b _</phonEnv>"#);
    assert_eq!(message, "There is a syntax error in the environment at: ");
}

#[test]
fn test_wire_message_matches_direct_message() {
    let input = "/ [V] _ a";
    let result = validate(&minimal_context(), input);
    let fragment = result.raw_diagnostic().unwrap();
    assert_eq!(format_wire_message(fragment), format_message(input, &result));
}

// ---
// miette reports
// ---

#[test]
fn test_report_carries_message_code_and_label() {
    let input = "/ [V] _ a";
    let result = validate(&minimal_context(), input);
    let report = report(input, &result).expect("failure produces a report");

    assert_eq!(report.to_string(), format_message(input, &result));
    assert_eq!(
        report.code().map(|c| c.to_string()),
        Some("phonenv::class".to_string())
    );
    let labels: Vec<_> = report.labels().into_iter().flatten().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].offset(), 3);
    assert_eq!(labels[0].label(), Some("unknown natural class"));
}

#[test]
fn test_report_renders_graphically() {
    let input = "/ (a _";
    let result = validate(&minimal_context(), input);
    let report = report(input, &result).unwrap();

    let handler = miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    handler.render_report(&mut out, &*report).unwrap();
    assert!(out.contains("phonenv::missingClosingParen"));
    assert!(out.contains("missing closing parenthesis"));
    assert!(out.contains("/ (a _"));
}

#[test]
fn test_no_report_for_success() {
    let result = validate(&minimal_context(), "/ _");
    assert!(report("/ _", &result).is_none());
}
