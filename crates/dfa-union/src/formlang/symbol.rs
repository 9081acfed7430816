//! Symbol types for automata transitions.

use indexmap::IndexSet;

/// A symbol identifier: the position of the symbol in its alphabet.
pub type SymbolId = u32;

/// An ordered alphabet without duplicates.
///
/// Symbols keep their insertion order, which fixes the order of the
/// serialized alphabet and of the product construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: IndexSet<String>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol, returning its id and whether it was newly inserted.
    pub fn insert(&mut self, symbol: &str) -> (SymbolId, bool) {
        if let Some(idx) = self.symbols.get_index_of(symbol) {
            return (idx as SymbolId, false);
        }
        let (idx, _) = self.symbols.insert_full(symbol.to_owned());
        (idx as SymbolId, true)
    }

    pub fn id(&self, symbol: &str) -> Option<SymbolId> {
        self.symbols.get_index_of(symbol).map(|idx| idx as SymbolId)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get_index(id as usize).map(String::as_str)
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

    /// Iterate over `(id, symbol)` in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .map(|(idx, symbol)| (idx as SymbolId, symbol.as_str()))
    }
}

impl<'a> FromIterator<&'a str> for Alphabet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut alphabet = Self::new();
        for symbol in iter {
            alphabet.insert(symbol);
        }
        alphabet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_keeps_first_position() {
        let mut alphabet: Alphabet = ["a", "b"].into_iter().collect();
        assert_eq!(alphabet.insert("c"), (2, true));
        assert_eq!(alphabet.insert("a"), (0, false));

        let symbols: Vec<_> = alphabet.iter().map(|(_, s)| s).collect();
        assert_eq!(symbols, vec!["a", "b", "c"]);
        assert_eq!(alphabet.id("b"), Some(1));
        assert_eq!(alphabet.symbol(2), Some("c"));
        assert_eq!(alphabet.id("z"), None);
    }
}
