//! Token layer: runs the pest grammar and yields delimiter and identifier tokens with
//! character-offset spans. Whitespace is dropped here; the parser never sees it.

use pest::{iterators::Pair, Parser};
use pest_derive::Parser;

use crate::errors::ValidationFailure;
use crate::syntax::Span;

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct EnvironmentLexer;

/// Kinds of token in an environment expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Slash,
    Focus,
    Boundary,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Ident(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Splits `source` into tokens.
///
/// The grammar accepts any text, so failure here means pest itself gave up; that is still
/// reported as a syntax failure at the offset pest names.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ValidationFailure> {
    let pairs = EnvironmentLexer::parse(Rule::environment, source).map_err(|e| {
        let byte = match e.location {
            pest::error::InputLocation::Pos(pos) => pos,
            pest::error::InputLocation::Span((start, _)) => start,
        };
        ValidationFailure::syntax(source[..byte].chars().count())
    })?;

    let mut offsets = CharOffsets::new(source);
    let mut tokens = Vec::new();
    for pair in pairs.flatten() {
        if let Some(kind) = token_kind(&pair) {
            let span = pair.as_span();
            let start = offsets.char_at(span.start());
            let end = offsets.char_at(span.end());
            tokens.push(Token {
                kind,
                span: Span::new(start, end),
            });
        }
    }
    Ok(tokens)
}

fn token_kind(pair: &Pair<Rule>) -> Option<TokenKind> {
    let kind = match pair.as_rule() {
        Rule::slash => TokenKind::Slash,
        Rule::focus => TokenKind::Focus,
        Rule::boundary => TokenKind::Boundary,
        Rule::lparen => TokenKind::LParen,
        Rule::rparen => TokenKind::RParen,
        Rule::lbracket => TokenKind::LBracket,
        Rule::rbracket => TokenKind::RBracket,
        Rule::ident => TokenKind::Ident(pair.as_str().to_string()),
        _ => return None,
    };
    Some(kind)
}

/// Converts monotonically increasing byte offsets into character offsets.
struct CharOffsets<'a> {
    source: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            byte: 0,
            chars: 0,
        }
    }

    fn char_at(&mut self, byte: usize) -> usize {
        if byte >= self.byte {
            self.chars += self.source[self.byte..byte].chars().count();
        } else {
            self.chars = self.source[..byte].chars().count();
        }
        self.byte = byte;
        self.chars
    }
}
