//! Symbol tables: the segment inventory and natural-class names an environment is checked against.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A case-sensitive set of symbol strings with constant-time membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    items: HashSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole table with `items`. Duplicates collapse.
    pub fn reset<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.items.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The symbols in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let mut items: Vec<&str> = self.items.iter().map(String::as_str).collect();
        items.sort_unstable();
        items.into_iter()
    }

    /// Checks that `literal` is a concatenation of symbols in this table.
    ///
    /// The whole literal is tried first, then the longest known prefix, recursing on the rest.
    /// On failure the error is the furthest character offset into `literal` that any
    /// decomposition reached.
    pub fn spell(&self, literal: &str) -> Result<(), usize> {
        let chars: Vec<char> = literal.chars().collect();
        let mut search = Spelling {
            table: self,
            chars: &chars,
            dead_ends: vec![false; chars.len()],
            furthest: 0,
        };
        if search.spell_from(0) {
            Ok(())
        } else {
            Err(search.furthest)
        }
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = SymbolTable::new();
        table.reset(iter);
        table
    }
}

struct Spelling<'a> {
    table: &'a SymbolTable,
    chars: &'a [char],
    // Offsets already shown not to start a valid spelling.
    dead_ends: Vec<bool>,
    furthest: usize,
}

impl Spelling<'_> {
    fn spell_from(&mut self, start: usize) -> bool {
        if start == self.chars.len() {
            return true;
        }
        if self.dead_ends[start] {
            return false;
        }
        self.furthest = self.furthest.max(start);

        for end in (start + 1..=self.chars.len()).rev() {
            let candidate: String = self.chars[start..end].iter().collect();
            if self.table.contains(&candidate) && self.spell_from(end) {
                return true;
            }
        }

        self.dead_ends[start] = true;
        false
    }
}

/// Supplies the current inventory. Hosts implement this over whatever holds their phonemes.
pub trait SymbolInventory {
    fn segments(&self) -> Vec<String>;
    fn classes(&self) -> Vec<String>;
}

/// The two symbol tables a validation session runs against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationContext {
    pub segments: SymbolTable,
    pub classes: SymbolTable,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context from segment and class lists.
    pub fn with_symbols<I, J, S, T>(segments: I, classes: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            segments: segments.into_iter().collect(),
            classes: classes.into_iter().collect(),
        }
    }

    pub fn reset_segments<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments.reset(items);
    }

    pub fn reset_classes<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.reset(items);
    }

    /// Replaces both tables from a provider.
    pub fn reset_from(&mut self, inventory: &impl SymbolInventory) {
        self.reset_segments(inventory.segments());
        self.reset_classes(inventory.classes());
    }

    pub fn contains_segment(&self, segment: &str) -> bool {
        self.segments.contains(segment)
    }

    pub fn contains_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}
