//! This module defines the `Transducer` struct, a Mealy finite-state
//! transducer over a finite input word.
//!
//! Unlike the tape machine, this engine never fails at runtime: an undefined
//! transition or a symbol outside the input alphabet routes deterministically
//! to an absorbing error-sink state with a fixed default output, and
//! rejection of a word is an ordinary return value.

use std::collections::{BTreeMap, BTreeSet};

use crate::table::{parse_output_rules, TransitionTable};
use crate::trace::{Trace, TraceEntry};
use crate::types::{MachineError, OutputRule};

/// Fixed rule table of the reference sequence detector for the grammar
/// `(n|<b|d>)(h|k)<z|m>c`.
const SEQUENCE_DETECTOR_RULES: &str = include_str!("../demos/sequence-detector.rules");

/// A Mealy finite-state transducer.
///
/// A word is accepted iff the machine sits in the accepting state exactly
/// after consuming the entire word; reaching it mid-word and leaving again
/// still rejects, since the accepting state has no outgoing rules and any
/// further symbol falls through to the error sink.
pub struct Transducer {
    inputs: BTreeSet<char>,
    initial_state: String,
    accepting_state: String,
    error_state: String,
    default_output: char,
    table: TransitionTable<OutputRule>,
    state: String,
    trace: Trace,
}

impl Transducer {
    /// Creates a transducer. The table's undefined-transition policy is set
    /// to route to `error_state` with `default_output`, making the sink
    /// absorbing as long as no rule leaves it.
    pub fn new(
        inputs: impl IntoIterator<Item = char>,
        initial_state: &str,
        accepting_state: &str,
        error_state: &str,
        default_output: char,
        mut table: TransitionTable<OutputRule>,
    ) -> Self {
        table.set_fallback(OutputRule {
            next_state: error_state.to_string(),
            output: default_output,
        });

        Self {
            inputs: inputs.into_iter().collect(),
            initial_state: initial_state.to_string(),
            accepting_state: accepting_state.to_string(),
            error_state: error_state.to_string(),
            default_output,
            table,
            state: initial_state.to_string(),
            trace: Vec::new(),
        }
    }

    /// Builds the reference detector for `(n|<b|d>)(h|k)<z|m>c` over the
    /// input alphabet {n, b, d, h, k, z, m, c} and output alphabet {0, 1}.
    pub fn sequence_detector() -> Result<Self, MachineError> {
        let inputs = ['n', 'b', 'd', 'h', 'k', 'z', 'm', 'c'];
        let outputs = ['0', '1'];
        let table = parse_output_rules(&inputs, &outputs, SEQUENCE_DETECTOR_RULES)?;
        Ok(Self::new(inputs, "q0", "qf", "qe", '0', table))
    }

    /// Resets the transducer to its initial state and clears the trace.
    pub fn reset(&mut self) {
        self.state = self.initial_state.clone();
        self.trace.clear();
    }

    /// Consumes one input symbol and returns the state entered and the
    /// symbol emitted. Symbols outside the input alphabet, and pairs with no
    /// rule, take the error-sink transition.
    pub fn step(&mut self, symbol: char) -> (String, char) {
        let rule = if self.inputs.contains(&symbol) {
            self.table.resolve(&self.state, symbol).cloned()
        } else {
            None
        }
        .unwrap_or_else(|| OutputRule {
            next_state: self.error_state.clone(),
            output: self.default_output,
        });

        self.state = rule.next_state.clone();
        (rule.next_state, rule.output)
    }

    /// Processes a whole input word from the initial state, recording one
    /// trace entry per symbol, and returns true iff the word is accepted.
    pub fn process(&mut self, word: &str) -> bool {
        self.reset();

        for (column, symbol) in word.chars().enumerate() {
            let before = self.state.clone();
            let (next, output) = self.step(symbol);
            self.trace.push(TraceEntry::new(
                word,
                column,
                format!("{before} {symbol} -> {next} {output}"),
            ));
        }

        self.state == self.accepting_state
    }

    /// Returns the current state label.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the recorded trace of the last `process` call.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Returns the input alphabet in sorted order.
    pub fn inputs(&self) -> impl Iterator<Item = char> + '_ {
        self.inputs.iter().copied()
    }

    /// Returns the accepting state label.
    pub fn accepting_state(&self) -> &str {
        &self.accepting_state
    }

    /// Returns the error-sink state label.
    pub fn error_state(&self) -> &str {
        &self.error_state
    }

    /// All state labels: every state a rule mentions plus the reserved ones,
    /// sorted.
    pub fn states(&self) -> BTreeSet<String> {
        let mut states: BTreeSet<String> = BTreeSet::new();
        for (state, _, rule) in self.table.entries() {
            states.insert(state.to_string());
            states.insert(rule.next_state.clone());
        }
        states.insert(self.initial_state.clone());
        states.insert(self.accepting_state.clone());
        states.insert(self.error_state.clone());
        states
    }

    /// The complete transition function Δ as a dense table over
    /// (state × input symbol); undefined cells hold the error-sink state.
    pub fn transition_matrix(&self) -> BTreeMap<String, BTreeMap<char, String>> {
        self.dense(|rule| rule.next_state.clone(), || self.error_state.clone())
    }

    /// The complete output function Λ as a dense table over
    /// (state × input symbol); undefined cells hold the default output.
    pub fn output_matrix(&self) -> BTreeMap<String, BTreeMap<char, char>> {
        self.dense(|rule| rule.output, || self.default_output)
    }

    fn dense<T>(
        &self,
        cell: impl Fn(&OutputRule) -> T,
        empty: impl Fn() -> T,
    ) -> BTreeMap<String, BTreeMap<char, T>> {
        self.states()
            .into_iter()
            .map(|state| {
                let row = self
                    .inputs
                    .iter()
                    .map(|&symbol| {
                        let value = self
                            .table
                            .get(&state, symbol)
                            .map(&cell)
                            .unwrap_or_else(&empty);
                        (symbol, value)
                    })
                    .collect();
                (state, row)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> Transducer {
        Transducer::sequence_detector().unwrap()
    }

    #[test]
    fn test_accepts_reference_word() {
        let mut machine = detector();
        assert!(machine.process("nhzc"));
        assert_eq!(machine.state(), "qf");
    }

    #[test]
    fn test_accepts_words_with_optional_groups_skipped() {
        let mut machine = detector();
        // <b|d> and <z|m> are optional.
        for word in ["nhc", "hc", "kzc", "dhmc", "bkc", "kmc"] {
            assert!(machine.process(word), "word {word:?} should be accepted");
            assert_eq!(machine.state(), "qf");
        }
    }

    #[test]
    fn test_rejects_invalid_words() {
        let mut machine = detector();
        for word in ["nc", "xyz", "nhcc", "nh", "", "c", "nzc"] {
            assert!(!machine.process(word), "word {word:?} should be rejected");
        }
    }

    #[test]
    fn test_accepting_state_must_hold_at_end_of_input() {
        let mut machine = detector();
        // "nhc" is accepted, so "nhcc" passes through qf mid-word; the extra
        // symbol must push it into the sink, not stay accepted.
        assert!(!machine.process("nhcc"));
        assert_eq!(machine.state(), "qe");
    }

    #[test]
    fn test_unknown_symbol_routes_to_sink_without_error() {
        let mut machine = detector();
        machine.reset();
        let (state, output) = machine.step('x');
        assert_eq!(state, "qe");
        assert_eq!(output, '0');
    }

    #[test]
    fn test_error_sink_is_absorbing() {
        let mut machine = detector();
        machine.reset();
        machine.step('x');
        assert_eq!(machine.state(), "qe");

        for symbol in ['n', 'b', 'd', 'h', 'k', 'z', 'm', 'c'] {
            let (state, output) = machine.step(symbol);
            assert_eq!(state, "qe");
            assert_eq!(output, '0');
        }
    }

    #[test]
    fn test_trace_records_one_entry_per_symbol() {
        let mut machine = detector();
        machine.process("nhzc");

        let trace = machine.trace();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace[0].window, "nhzc");
        assert_eq!(trace[0].marker, "^");
        assert_eq!(trace[0].rule, "q0 n -> q1 0");
        assert_eq!(trace[3].marker, "   ^");
        assert_eq!(trace[3].rule, "q3 c -> qf 1");
    }

    #[test]
    fn test_process_resets_between_words() {
        let mut machine = detector();
        assert!(machine.process("nhzc"));
        assert!(!machine.process("nc"));
        assert_eq!(machine.trace().len(), 2);
    }

    #[test]
    fn test_transition_matrix_is_dense() {
        let machine = detector();
        let matrix = machine.transition_matrix();

        assert_eq!(matrix.len(), 6); // q0, q1, q2, q3, qe, qf
        for row in matrix.values() {
            assert_eq!(row.len(), 8);
        }

        assert_eq!(matrix["q0"][&'n'], "q1");
        assert_eq!(matrix["q0"][&'z'], "qe");
        assert_eq!(matrix["q3"][&'c'], "qf");
        // The accepting and sink states have no outgoing rules.
        assert!(matrix["qf"].values().all(|next| next == "qe"));
        assert!(matrix["qe"].values().all(|next| next == "qe"));
    }

    #[test]
    fn test_output_matrix_marks_the_accepting_transitions() {
        let machine = detector();
        let matrix = machine.output_matrix();

        assert_eq!(matrix["q2"][&'c'], '1');
        assert_eq!(matrix["q3"][&'c'], '1');
        assert_eq!(matrix["q0"][&'n'], '0');
        assert!(matrix["qe"].values().all(|&output| output == '0'));
    }
}
