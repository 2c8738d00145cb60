//! The alphabet model: a finite symbol set with one reserved blank symbol.
//!
//! Membership is checked eagerly wherever symbols enter the system (rule
//! parsing, initial tapes, input words), so execution never encounters a
//! symbol outside the declared set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::types::{MachineError, DEFAULT_BLANK_SYMBOL};

/// A finite, ordered symbol set with a distinguished blank symbol.
///
/// The blank symbol is always a member, even when the declaration omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    symbols: BTreeSet<char>,
    blank: char,
}

impl Alphabet {
    /// Creates an alphabet with the default blank symbol.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Self {
        Self::with_blank(symbols, DEFAULT_BLANK_SYMBOL)
    }

    /// Creates an alphabet with a custom blank symbol. The blank is inserted
    /// as a member if the declaration left it out.
    pub fn with_blank(symbols: impl IntoIterator<Item = char>, blank: char) -> Self {
        let mut symbols: BTreeSet<char> = symbols.into_iter().collect();
        symbols.insert(blank);
        Self { symbols, blank }
    }

    /// Returns the blank symbol.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Checks whether a symbol belongs to the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Returns true if the alphabet holds only the blank symbol, i.e. no
    /// symbol was actually declared.
    pub fn is_blank_only(&self) -> bool {
        self.symbols.len() == 1
    }

    /// Iterates the symbols in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    /// Validates every symbol of `word` against the alphabet. `context` is
    /// quoted verbatim in the error so the fault is locatable.
    pub fn check_word(&self, word: &str, context: &str) -> Result<(), MachineError> {
        for symbol in word.chars() {
            self.check_symbol(symbol, context)?;
        }
        Ok(())
    }

    /// Validates a single symbol against the alphabet.
    pub fn check_symbol(&self, symbol: char, context: &str) -> Result<(), MachineError> {
        if self.contains(symbol) {
            Ok(())
        } else {
            Err(MachineError::InvalidSymbol {
                symbol,
                context: context.to_string(),
            })
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{symbol}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_implicit_member() {
        let alphabet = Alphabet::new(['1', '+']);
        assert!(alphabet.contains(DEFAULT_BLANK_SYMBOL));
        assert_eq!(alphabet.blank(), DEFAULT_BLANK_SYMBOL);
        assert_eq!(alphabet.symbols().count(), 3);
    }

    #[test]
    fn test_blank_only_alphabet_is_flagged() {
        let empty: [char; 0] = [];
        assert!(Alphabet::new(empty).is_blank_only());
        assert!(!Alphabet::new(['1']).is_blank_only());
    }

    #[test]
    fn test_custom_blank_is_implicit_member() {
        let alphabet = Alphabet::with_blank(['a', 'b'], '_');
        assert!(alphabet.contains('_'));
        assert_eq!(alphabet.blank(), '_');
    }

    #[test]
    fn test_check_word_accepts_declared_symbols() {
        let alphabet = Alphabet::new(['1', '+']);
        assert!(alphabet.check_word("11+111", "11+111").is_ok());
        // The blank may appear on a tape even though the declaration omits it.
        assert!(alphabet.check_word("1λ1", "1λ1").is_ok());
    }

    #[test]
    fn test_check_word_rejects_foreign_symbols() {
        let alphabet = Alphabet::new(['1', '+']);
        let error = alphabet.check_word("11x1", "11x1").unwrap_err();
        assert_eq!(
            error,
            MachineError::InvalidSymbol {
                symbol: 'x',
                context: "11x1".to_string(),
            }
        );
    }

    #[test]
    fn test_display_is_sorted() {
        let alphabet = Alphabet::with_blank(['c', 'a', 'b'], '-');
        assert_eq!(alphabet.to_string(), "{-, a, b, c}");
    }
}
