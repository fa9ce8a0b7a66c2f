//! Environment Parser - single-pass recursive descent
//!
//! Recognises
//!
//! ```text
//! Environment   = [LeftContext] "/" [LeftContext] "_" [RightContext]
//! LeftContext   = ["#"] TermSequence
//! RightContext  = TermSequence ["#"]
//! TermSequence  = { Term }
//! Term          = Segment | "(" Segment ")"
//! Segment       = Literal | Class
//! Class         = "[" Ident { Ident } "]"
//! Literal       = Ident
//! ```
//!
//! and checks literals and classes against a [`ValidationContext`] as it goes. The first
//! problem found, scanning left to right, is the one reported. Unbalanced delimiters are
//! reported at the delimiter that *is* present: a `(` that is never closed is reported at the
//! `(`, a stray `)` at the `)`. Message rendering downstream depends on that convention.

use crate::errors::ValidationFailure;
use crate::symbols::ValidationContext;
use crate::syntax::lexer::{tokenize, Token, TokenKind};
use crate::syntax::Span;

/// Most words a natural-class name may span inside `[...]`.
pub const MAX_CLASS_WORDS: usize = 4;

/// Most `#` markers an environment may carry.
pub const MAX_BOUNDARIES: usize = 2;

type ParseResult<T> = Result<T, ValidationFailure>;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Checks `source` against the grammar and the symbol tables in `ctx`.
pub fn check(ctx: &ValidationContext, source: &str) -> ParseResult<()> {
    let tokens = tokenize(source)?;
    EnvironmentParser::new(ctx, tokens, source.chars().count()).parse_environment()
}

// ============================================================================
// PARSER
// ============================================================================

struct EnvironmentParser<'a> {
    ctx: &'a ValidationContext,
    tokens: Vec<Token>,
    cursor: usize,
    // character length of the input, reported when input runs out
    end: usize,
    boundaries: usize,
}

impl<'a> EnvironmentParser<'a> {
    fn new(ctx: &'a ValidationContext, tokens: Vec<Token>, end: usize) -> Self {
        Self {
            ctx,
            tokens,
            cursor: 0,
            end,
            boundaries: 0,
        }
    }

    fn parse_environment(&mut self) -> ParseResult<()> {
        if !self.at(&TokenKind::Slash) {
            self.parse_left_context()?;
        }
        self.expect(&TokenKind::Slash)?;
        self.parse_left_context()?;
        self.expect(&TokenKind::Focus)?;
        self.parse_right_context()?;

        match self.peek() {
            None => Ok(()),
            Some(token) => Err(ValidationFailure::syntax(token.span.start)),
        }
    }

    fn parse_left_context(&mut self) -> ParseResult<()> {
        if self.at(&TokenKind::Boundary) {
            self.take_boundary()?;
        }
        self.parse_term_sequence()
    }

    fn parse_right_context(&mut self) -> ParseResult<()> {
        self.parse_term_sequence()?;
        if self.at(&TokenKind::Boundary) {
            self.take_boundary()?;
        }
        Ok(())
    }

    fn parse_term_sequence(&mut self) -> ParseResult<()> {
        while matches!(
            self.peek().map(|t| &t.kind),
            Some(
                TokenKind::LParen
                    | TokenKind::RParen
                    | TokenKind::LBracket
                    | TokenKind::RBracket
                    | TokenKind::Ident(_)
            )
        ) {
            self.parse_term()?;
        }
        Ok(())
    }

    fn parse_term(&mut self) -> ParseResult<()> {
        let start = self.current_span().start;
        if self.at(&TokenKind::LParen) {
            self.advance();
            self.parse_optional_segment(start)
        } else if self.at(&TokenKind::RParen) {
            Err(ValidationFailure::missing_opening_paren(start))
        } else {
            self.parse_segment()
        }
    }

    /// The body of `( Segment )`; the `(` at `open` is already consumed.
    fn parse_optional_segment(&mut self, open: usize) -> ParseResult<()> {
        let starts_segment = matches!(
            self.peek().map(|t| &t.kind),
            Some(TokenKind::Ident(_) | TokenKind::LBracket | TokenKind::RBracket)
        );
        if !starts_segment {
            return Err(self.syntax_here());
        }
        self.parse_segment()?;

        if self.at(&TokenKind::RParen) {
            self.advance();
            Ok(())
        } else {
            Err(ValidationFailure::missing_closing_paren(open))
        }
    }

    fn parse_segment(&mut self) -> ParseResult<()> {
        let Some(token) = self.peek() else {
            return Err(self.syntax_here());
        };
        let span = token.span;

        match &token.kind {
            TokenKind::Ident(literal) => {
                self.ctx
                    .segments
                    .spell(literal)
                    .map_err(|offset| ValidationFailure::unknown_segment(span.start + offset))?;
                self.advance();
                Ok(())
            }
            TokenKind::LBracket => {
                self.advance();
                self.parse_class(span.start)
            }
            TokenKind::RBracket => Err(ValidationFailure::missing_opening_bracket(span.start)),
            _ => Err(ValidationFailure::syntax(span.start)),
        }
    }

    /// The body of `[ Ident+ ]`; the `[` at `open` is already consumed.
    fn parse_class(&mut self, open: usize) -> ParseResult<()> {
        let mut words: Vec<(&str, usize)> = Vec::new();
        while let Some(Token {
            kind: TokenKind::Ident(word),
            span,
        }) = self.tokens.get(self.cursor)
        {
            words.push((word.as_str(), span.start));
            self.cursor += 1;
        }

        let Some(close) = self.peek().filter(|t| t.kind == TokenKind::RBracket) else {
            return Err(ValidationFailure::missing_closing_bracket(open));
        };
        let Some(&(_, first)) = words.first() else {
            return Err(ValidationFailure::syntax(close.span.start));
        };

        // Names join their words with single spaces, so "[C  1]" names "C 1".
        let mut name = String::new();
        let mut known = false;
        for (count, (word, _)) in words.iter().enumerate().take(MAX_CLASS_WORDS) {
            if count > 0 {
                name.push(' ');
            }
            name.push_str(word);
            if count + 1 == words.len() {
                known = self.ctx.contains_class(&name);
            }
        }
        if !known {
            return Err(ValidationFailure::unknown_class(first));
        }
        self.advance();
        Ok(())
    }

    fn take_boundary(&mut self) -> ParseResult<()> {
        let start = self.current_span().start;
        self.boundaries += 1;
        if self.boundaries > MAX_BOUNDARIES {
            return Err(ValidationFailure::syntax(start));
        }
        self.advance();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Token stream helpers
    // ------------------------------------------------------------------------

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.peek().is_some_and(|t| &t.kind == kind)
    }

    fn advance(&mut self) {
        self.cursor += 1;
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<()> {
        if self.at(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.syntax_here())
        }
    }

    /// Span of the next token, or an empty span at the end of the input.
    fn current_span(&self) -> Span {
        self.peek().map_or(Span::point(self.end), |t| t.span)
    }

    /// Syntax failure at the current token, or at the end of input.
    fn syntax_here(&self) -> ValidationFailure {
        ValidationFailure::syntax(self.current_span().start)
    }
}
