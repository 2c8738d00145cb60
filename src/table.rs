//! The transition table: a flat mapping from a composite (state, symbol) key
//! to a rule, shared by both machine variants.
//!
//! The table also carries the variant's undefined-transition policy as an
//! optional fallback rule. The tape machine builds its table without one, so
//! a missing key surfaces to the engine (which treats it as fatal); the
//! transducer installs its error-sink rule, so lookups always resolve.

use std::collections::HashMap;

use crate::alphabet::Alphabet;
use crate::parser;
use crate::types::{MachineError, OutputRule, TapeRule, COMMENT_MARKER};

/// A transition table keyed by (state, symbol).
///
/// Inserting a second rule for an existing key silently overwrites the first
/// (last wins); this is a deliberate simplification of the rule format, not
/// an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransitionTable<R> {
    rules: HashMap<(String, char), R>,
    fallback: Option<R>,
}

impl<R> TransitionTable<R> {
    /// Creates an empty table with no fallback: an undefined key resolves to
    /// `None`.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            fallback: None,
        }
    }

    /// Creates an empty table whose undefined keys resolve to `fallback`.
    pub fn with_fallback(fallback: R) -> Self {
        Self {
            rules: HashMap::new(),
            fallback: Some(fallback),
        }
    }

    /// Inserts a rule, returning the rule it displaced if the key was
    /// already mapped.
    pub fn insert(&mut self, state: impl Into<String>, symbol: char, rule: R) -> Option<R> {
        self.rules.insert((state.into(), symbol), rule)
    }

    /// Looks up the rule for (state, symbol), falling back to the table's
    /// undefined-transition rule when one is configured.
    pub fn resolve(&self, state: &str, symbol: char) -> Option<&R> {
        self.rules
            .get(&(state.to_string(), symbol))
            .or(self.fallback.as_ref())
    }

    /// Looks up the rule for (state, symbol) without consulting the
    /// fallback.
    pub fn get(&self, state: &str, symbol: char) -> Option<&R> {
        self.rules.get(&(state.to_string(), symbol))
    }

    /// Returns the fallback rule, if any.
    pub fn fallback(&self) -> Option<&R> {
        self.fallback.as_ref()
    }

    /// Installs the rule undefined keys resolve to from now on.
    pub fn set_fallback(&mut self, rule: R) {
        self.fallback = Some(rule);
    }

    /// Returns the number of explicitly defined rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are explicitly defined.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates the defined (state, symbol) keys and their rules, in
    /// arbitrary order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, char, &R)> + '_ {
        self.rules
            .iter()
            .map(|((state, symbol), rule)| (state.as_str(), *symbol, rule))
    }
}

/// Returns the significant lines of a rule file: non-empty, non-comment,
/// trimmed.
fn significant_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
}

/// Builds a tape-machine table from rule-definition lines.
///
/// Every read and write symbol is validated against `alphabet`; construction
/// aborts on the first malformed line or foreign symbol, so no partially
/// built table escapes.
pub fn parse_tape_rules(
    alphabet: &Alphabet,
    source: &str,
) -> Result<TransitionTable<TapeRule>, MachineError> {
    let mut table = TransitionTable::new();

    for line in significant_lines(source) {
        let (state, read, rule) = parser::parse_tape_rule(line)?;
        alphabet.check_symbol(read, line)?;
        alphabet.check_symbol(rule.write, line)?;
        table.insert(state, read, rule);
    }

    Ok(table)
}

/// Builds a transducer table from rule-definition lines, validating input
/// symbols against `inputs` and output symbols against `outputs`.
pub fn parse_output_rules(
    inputs: &[char],
    outputs: &[char],
    source: &str,
) -> Result<TransitionTable<OutputRule>, MachineError> {
    let mut table = TransitionTable::new();

    for line in significant_lines(source) {
        let (state, input, rule) = parser::parse_output_rule(line)?;
        if !inputs.contains(&input) {
            return Err(MachineError::InvalidSymbol {
                symbol: input,
                context: line.to_string(),
            });
        }
        if !outputs.contains(&rule.output) {
            return Err(MachineError::InvalidSymbol {
                symbol: rule.output,
                context: line.to_string(),
            });
        }
        table.insert(state, input, rule);
    }

    Ok(table)
}
