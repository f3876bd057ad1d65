//! Symbol-keyed selection set.

use std::collections::HashSet;

/// Membership-only set of selected symbols.
///
/// Symbols may outlive the visible view: filtering never prunes the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    symbols: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include or exclude one symbol. Idempotent.
    pub fn set(&mut self, symbol: &str, included: bool) {
        if included {
            self.symbols.insert(symbol.to_string());
        } else {
            self.symbols.remove(symbol);
        }
    }

    /// Replace the whole set with exactly `symbols`.
    pub fn replace<'a, I>(&mut self, symbols: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.symbols = symbols.into_iter().map(str::to_string).collect();
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_is_idempotent() {
        let mut sel = SelectionSet::new();
        sel.set("AAPL", true);
        sel.set("AAPL", true);
        assert_eq!(sel.len(), 1);
        sel.set("MSFT", false);
        assert_eq!(sel.len(), 1);
        sel.set("AAPL", false);
        assert!(sel.is_empty());
    }

    #[test]
    fn replace_discards_previous_members() {
        let mut sel = SelectionSet::new();
        sel.set("OLD", true);
        sel.replace(["A", "B"]);
        assert!(!sel.contains("OLD"));
        assert!(sel.contains("A") && sel.contains("B"));
    }
}
