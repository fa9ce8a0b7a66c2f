//! Edit-position predicates.
//!
//! These decide whether an editor may insert an optional group `( )` or a boundary marker `#` at
//! a caret. They look only at the raw text, which may be half-typed and invalid, and never run
//! the grammar. All offsets are character offsets; an offset past the end of the text makes both
//! predicates answer `false`.

use serde::{Deserialize, Serialize};

/// A caret selection: `anchor` is where it started, `end` where it is now. Either may be larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaretSpan {
    pub anchor: usize,
    pub end: usize,
}

impl CaretSpan {
    pub fn new(anchor: usize, end: usize) -> Self {
        Self { anchor, end }
    }

    pub fn collapsed(at: usize) -> Self {
        Self::new(at, at)
    }

    /// The same span with `anchor <= end`.
    pub fn normalized(&self) -> Self {
        Self {
            anchor: self.anchor.min(self.end),
            end: self.anchor.max(self.end),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.end
    }

    /// True when the span covers the character at `index`.
    fn straddles(&self, index: usize) -> bool {
        let span = self.normalized();
        span.anchor <= index && index < span.end
    }

    fn all(&self, predicate: impl Fn(usize) -> bool) -> bool {
        predicate(self.anchor) && predicate(self.end)
    }

    pub fn can_insert_optional_group(&self, env: &str) -> bool {
        can_insert_optional_group(env, self.end, self.anchor)
    }

    pub fn can_insert_boundary_marker(&self, env: &str) -> bool {
        can_insert_boundary_marker(env, self.end, self.anchor)
    }
}

/// Character positions of the markers the predicates care about.
struct Markers {
    len: usize,
    slash: Option<usize>,
    focus: Option<usize>,
    hashes: Vec<usize>,
}

impl Markers {
    fn scan(env: &[char]) -> Self {
        let find = |marker: char| env.iter().position(|&c| c == marker);
        Self {
            len: env.len(),
            slash: find('/'),
            focus: find('_'),
            hashes: env
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c == '#')
                .map(|(i, _)| i)
                .collect(),
        }
    }

    /// Both ends of the caret lie inside the text and after the `/`.
    fn caret_after_slash(&self, caret: &CaretSpan) -> bool {
        let Some(slash) = self.slash else {
            return false;
        };
        caret.all(|offset| offset <= self.len && offset > slash)
    }

    /// Whether `offset` lies on the left of the focus marker. Without one, everything does.
    fn left_of_focus(&self, offset: usize) -> bool {
        self.focus.map_or(true, |focus| offset <= focus)
    }
}

/// May a new optional group be inserted at the caret?
///
/// With two `#` markers only the stretch between them qualifies. With one, the caret must sit on
/// the same side of `_` as that `#` and inside it (after a leading `#`, up to a trailing one),
/// unless the selection covers the `#` itself.
pub fn can_insert_optional_group(env: &str, caret_end: usize, caret_anchor: usize) -> bool {
    let chars: Vec<char> = env.chars().collect();
    let markers = Markers::scan(&chars);
    let caret = CaretSpan::new(caret_anchor, caret_end).normalized();
    if !markers.caret_after_slash(&caret) {
        return false;
    }

    match markers.hashes.as_slice() {
        [] => true,
        [hash] => {
            if caret.straddles(*hash) {
                return true;
            }
            let hash_on_left = markers.left_of_focus(*hash);
            caret.all(|offset| {
                let inside = if hash_on_left {
                    offset > *hash
                } else {
                    offset <= *hash
                };
                inside && markers.left_of_focus(offset) == hash_on_left
            })
        }
        [first, second, ..] => caret.all(|offset| *first < offset && offset <= *second),
    }
}

/// May a new `#` be inserted at the caret?
///
/// Only at the very start (just after `/`, ignoring whitespace) or very end of the expression,
/// at most two in all, and a second one only at the edge opposite the first. A selection that
/// covers a lone existing `#` may always replace it.
pub fn can_insert_boundary_marker(env: &str, caret_end: usize, caret_anchor: usize) -> bool {
    let chars: Vec<char> = env.chars().collect();
    let markers = Markers::scan(&chars);
    let caret = CaretSpan::new(caret_anchor, caret_end).normalized();
    if !markers.caret_after_slash(&caret) {
        return false;
    }
    let Some(slash) = markers.slash else {
        return false;
    };

    let at_start = is_only_whitespace(&chars, slash + 1, caret.anchor);
    let at_end = is_only_whitespace(&chars, caret.end, chars.len());

    match markers.hashes.as_slice() {
        [] => at_start || at_end,
        [hash] => {
            if caret.straddles(*hash) {
                return true;
            }
            if markers.left_of_focus(*hash) {
                at_end
            } else {
                at_start
            }
        }
        _ => false,
    }
}

/// True when `chars[start..end]` is empty or all whitespace.
pub(crate) fn is_only_whitespace(chars: &[char], start: usize, end: usize) -> bool {
    if start >= end {
        return true;
    }
    chars
        .get(start..end.min(chars.len()))
        .map_or(true, |run| run.iter().all(|c| c.is_whitespace()))
}
