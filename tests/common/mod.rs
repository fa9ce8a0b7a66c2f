//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use phonenv::{validate, ErrorKind, ValidationContext};

/// A small inventory: plain segments, a digraph, and single and multi-word classes.
pub fn context() -> ValidationContext {
    ValidationContext::with_symbols(
        ["a", "b", "i", "p", "t", "s", "ts", "ʃ"],
        ["C", "V", "C 1", "front vowel"],
    )
}

/// The inventory used by the examples in the crate documentation.
pub fn minimal_context() -> ValidationContext {
    ValidationContext::with_symbols(["a", "b"], ["C"])
}

pub fn assert_valid(ctx: &ValidationContext, input: &str) {
    let result = validate(ctx, input);
    assert!(
        result.is_success(),
        "expected {input:?} to validate, got {:?} at {:?}",
        result.error_kind(),
        result.position()
    );
}

pub fn assert_fails(ctx: &ValidationContext, input: &str, kind: ErrorKind, position: usize) {
    let result = validate(ctx, input);
    assert_eq!(
        (result.error_kind(), result.position()),
        (Some(kind), Some(position)),
        "unexpected outcome for {input:?}"
    );
}
