//! Abstract-machine simulators for automata theory: a single-tape Turing
//! machine and a Mealy finite-state transducer. Both read a declarative
//! transition table, execute it step by step and record a trace of every
//! transition taken.

pub mod alphabet;
pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod mealy;
pub mod parser;
pub mod programs;
pub mod table;
pub mod tape;
pub mod trace;
pub mod types;

/// Re-exports the `Rule` enum generated by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the alphabet model.
pub use alphabet::Alphabet;
/// Re-exports the `analyze` function and `Finding` enum from the analyzer.
pub use analyzer::{analyze, Finding};
/// Re-exports the `MachineLoader` struct.
pub use loader::MachineLoader;
/// Re-exports the `TuringMachine` execution engine.
pub use machine::TuringMachine;
/// Re-exports the Mealy `Transducer` engine.
pub use mealy::Transducer;
/// Re-exports the transition table and its rule-text builders.
pub use table::{parse_output_rules, parse_tape_rules, TransitionTable};
/// Re-exports the tape store.
pub use tape::Tape;
/// Re-exports the trace recorder types.
pub use trace::{Trace, TraceEntry};
/// Re-exports the core machine types and constants.
pub use types::{
    Direction, MachineError, OutputRule, Program, Step, TapeRule, DEFAULT_BLANK_SYMBOL,
    MAX_EXECUTION_STEPS,
};
