//! Pre-execution diagnostics for tape-machine programs.
//!
//! These checks are advisory: an undefined transition is, per the execution
//! contract, a runtime error and a missing state may be intentional in a
//! half-written exercise, so the analyzer reports findings instead of
//! failing construction.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;

use crate::types::Program;

/// A suspicious property of a program, found before execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// The initial state has no outgoing rules: the very first step will
    /// fail with a missing transition.
    InitialStateUndefined(String),
    /// Rules transition into these states, but the states have no outgoing
    /// rules and are not the terminal state.
    DeadEndStates(Vec<String>),
    /// These states have rules but cannot be reached from the initial state.
    UnreachableStates(Vec<String>),
    /// The initial tape contains symbols no rule ever reads.
    UnhandledTapeSymbols(Vec<char>),
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::InitialStateUndefined(state) => {
                write!(f, "initial state '{state}' has no rules")
            }
            Finding::DeadEndStates(states) => {
                write!(f, "non-terminal states with no rules: {states:?}")
            }
            Finding::UnreachableStates(states) => {
                write!(f, "states unreachable from the initial state: {states:?}")
            }
            Finding::UnhandledTapeSymbols(symbols) => {
                write!(f, "tape symbols no rule reads: {symbols:?}")
            }
        }
    }
}

/// Inspects a program's rule set and returns everything that looks like a
/// mistake. An empty result means no finding, not a proof of termination.
pub fn analyze(program: &Program) -> Vec<Finding> {
    let mut findings = Vec::new();

    let sources: HashSet<&str> = program.rules.entries().map(|(state, _, _)| state).collect();

    if !sources.contains(program.initial_state.as_str()) {
        findings.push(Finding::InitialStateUndefined(
            program.initial_state.clone(),
        ));
    }

    let dead_ends: BTreeSet<String> = program
        .rules
        .entries()
        .map(|(_, _, rule)| rule.next_state.clone())
        .filter(|next| next != &program.final_state && !sources.contains(next.as_str()))
        .collect();
    if !dead_ends.is_empty() {
        findings.push(Finding::DeadEndStates(dead_ends.into_iter().collect()));
    }

    let reachable = reachable_states(program);
    let unreachable: BTreeSet<String> = sources
        .iter()
        .filter(|state| !reachable.contains(**state))
        .map(|state| state.to_string())
        .collect();
    if !unreachable.is_empty() {
        findings.push(Finding::UnreachableStates(
            unreachable.into_iter().collect(),
        ));
    }

    let read_symbols: HashSet<char> = program.rules.entries().map(|(_, symbol, _)| symbol).collect();
    let unhandled: BTreeSet<char> = program
        .tape
        .chars()
        .filter(|symbol| !read_symbols.contains(symbol))
        .collect();
    if !unhandled.is_empty() {
        findings.push(Finding::UnhandledTapeSymbols(
            unhandled.into_iter().collect(),
        ));
    }

    findings
}

/// States reachable from the initial state by following rule targets.
fn reachable_states(program: &Program) -> HashSet<&str> {
    let mut reachable: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    reachable.insert(program.initial_state.as_str());
    queue.push_back(program.initial_state.as_str());

    while let Some(state) = queue.pop_front() {
        for (source, _, rule) in program.rules.entries() {
            if source == state && reachable.insert(rule.next_state.as_str()) {
                queue.push_back(rule.next_state.as_str());
            }
        }
    }

    reachable
}
