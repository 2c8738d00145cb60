//! Core data structures shared by both simulators: transition rules, head
//! directions, execution outcomes, the program description for the tape
//! machine, and the error taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::alphabet::Alphabet;
use crate::table::TransitionTable;

/// The reserved blank symbol, implicitly a member of every alphabet.
pub const DEFAULT_BLANK_SYMBOL: char = 'λ';
/// The state a machine starts in unless the program overrides it.
pub const INITIAL_STATE: &str = "q0";
/// The state whose reach halts the tape machine.
pub const FINAL_STATE: &str = "qz";
/// Rule lines starting with this marker are ignored.
pub const COMMENT_MARKER: char = '#';
/// The maximum number of steps to execute before assuming non-termination.
pub const MAX_EXECUTION_STEPS: usize = 10_000;

/// Represents the possible directions a tape head can move.
///
/// The textual rule format spells these `L`, `R` and `E` (stay in place).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Returns the cursor offset this direction applies.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => 'E',
        };
        write!(f, "{token}")
    }
}

/// The outcome of a single tape-machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine applied a rule and continues execution.
    Continue,
    /// The machine was already in its terminal state; nothing happened.
    Halted,
}

/// The right-hand side of a tape-machine rule: `(state, symbol) -> (state,
/// symbol, direction)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeRule {
    /// The state the machine transitions to.
    pub next_state: String,
    /// The symbol written at the cursor.
    pub write: char,
    /// Where the cursor moves afterwards.
    pub direction: Direction,
}

impl fmt::Display for TapeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.next_state, self.write, self.direction)
    }
}

/// The right-hand side of a transducer rule: `(state, symbol) -> (state,
/// output-symbol)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRule {
    /// The state the transducer transitions to.
    pub next_state: String,
    /// The symbol emitted while taking the transition.
    pub output: char,
}

impl fmt::Display for OutputRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.next_state, self.output)
    }
}

/// A complete tape-machine program: alphabet, validated rule table and the
/// initial tape, plus the reserved state labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Human-readable program name, used in trace headers.
    pub name: String,
    /// The declared alphabet (blank symbol included).
    pub alphabet: Alphabet,
    /// The validated transition table.
    pub rules: TransitionTable<TapeRule>,
    /// The initial tape contents, one symbol per character.
    pub tape: String,
    /// The state the machine starts in.
    pub initial_state: String,
    /// The state the machine halts in.
    pub final_state: String,
}

impl Program {
    /// Creates a program with the conventional `q0`/`qz` state labels.
    pub fn new(
        name: impl Into<String>,
        alphabet: Alphabet,
        rules: TransitionTable<TapeRule>,
        tape: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            alphabet,
            rules,
            tape: tape.into(),
            initial_state: INITIAL_STATE.to_string(),
            final_state: FINAL_STATE.to_string(),
        }
    }
}

/// Represents the errors that can occur while building or running a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// A symbol outside the declared alphabet appeared in a rule, tape or
    /// input word. Raised at construction or parse time, never during
    /// execution.
    #[error("Symbol '{symbol}' is not in the declared alphabet (in \"{context}\")")]
    InvalidSymbol {
        /// The offending symbol.
        symbol: char,
        /// The rule line or word it appeared in, verbatim.
        context: String,
    },
    /// A rule line did not match the required shape.
    #[error("Malformed rule: {line}")]
    MalformedRule {
        /// The offending line, verbatim.
        line: String,
    },
    /// The tape machine reached a (state, symbol) pair with no rule defined.
    #[error("No transition defined for state '{state}' and symbol '{symbol}'")]
    NoTransition {
        /// The state the machine was in.
        state: String,
        /// The symbol under the cursor.
        symbol: char,
    },
    /// The tape machine did not reach its terminal state within the step
    /// ceiling; the program most likely loops forever.
    #[error("Step limit of {0} exceeded; the machine may never halt")]
    StepLimitExceeded(usize),
    /// A problem reading machine definition files.
    #[error("File error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Right.offset(), 1);
        assert_eq!(Direction::Stay.offset(), 0);
    }

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        let stay_json = serde_json::to_string(&Direction::Stay).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(stay_json, "\"Stay\"");

        let left: Direction = serde_json::from_str(&left_json).unwrap();
        let stay: Direction = serde_json::from_str(&stay_json).unwrap();

        assert_eq!(left, Direction::Left);
        assert_eq!(stay, Direction::Stay);
    }

    #[test]
    fn test_rule_display_matches_rule_file_syntax() {
        let rule = TapeRule {
            next_state: "q1".to_string(),
            write: '1',
            direction: Direction::Right,
        };
        assert_eq!(rule.to_string(), "q1 1 R");

        let rule = OutputRule {
            next_state: "qe".to_string(),
            output: '0',
        };
        assert_eq!(rule.to_string(), "qe 0");
    }

    #[test]
    fn test_error_display_names_the_fault() {
        let error = MachineError::NoTransition {
            state: "q1".to_string(),
            symbol: '+',
        };
        let message = error.to_string();
        assert!(message.contains("q1"));
        assert!(message.contains('+'));

        let error = MachineError::MalformedRule {
            line: "q0 1 -> q1".to_string(),
        };
        assert!(error.to_string().contains("q0 1 -> q1"));
    }

    #[test]
    fn test_invalid_symbol_quotes_its_context_without_a_cause_chain() {
        let error = MachineError::InvalidSymbol {
            symbol: 'x',
            context: "11x1".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains('x'));
        assert!(message.contains("11x1"));
        // The context is plain data, not an underlying error.
        assert!(std::error::Error::source(&error).is_none());
    }
}
