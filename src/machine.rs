//! This module defines the `TuringMachine` struct, the single-tape execution
//! engine: it applies one transition per step, grows the tape on demand,
//! enforces the halting and step-limit policy, and records every transition
//! into its trace.

use crate::tape::Tape;
use crate::trace::{Trace, TraceEntry};
use crate::types::{MachineError, Program, Step};

/// A single-tape Turing machine.
///
/// The engine owns its tape and trace exclusively. An undefined transition
/// is treated as a programming error in the rule table and fails fatally;
/// the trace accumulated up to that point stays inspectable.
#[derive(Debug)]
pub struct TuringMachine {
    state: String,
    tape: Tape,
    cursor: i64,
    program: Program,
    trace: Trace,
    step_count: usize,
}

impl TuringMachine {
    /// Creates a machine from a program, validating the initial tape against
    /// the program's alphabet.
    ///
    /// # Errors
    ///
    /// `InvalidSymbol` if the tape holds a symbol outside the alphabet.
    pub fn new(program: Program) -> Result<Self, MachineError> {
        program
            .alphabet
            .check_word(&program.tape, &program.tape)?;

        Ok(Self {
            state: program.initial_state.clone(),
            tape: Tape::new(&program.tape, program.alphabet.blank()),
            cursor: 0,
            program,
            trace: Vec::new(),
            step_count: 0,
        })
    }

    /// Executes a single step.
    ///
    /// If the machine already sits in its terminal state this is a no-op
    /// returning [`Step::Halted`]. Otherwise the engine reads the symbol
    /// under the cursor (growing the tape if needed), records the pre-step
    /// snapshot, applies the rule and moves the cursor.
    ///
    /// # Errors
    ///
    /// `NoTransition` if the rule table defines nothing for the current
    /// (state, symbol) pair. Entries recorded before the failure are kept.
    pub fn step(&mut self) -> Result<Step, MachineError> {
        if self.is_halted() {
            return Ok(Step::Halted);
        }

        let symbol = self.tape.read(self.cursor);
        let rule = self
            .program
            .rules
            .resolve(&self.state, symbol)
            .cloned()
            .ok_or_else(|| MachineError::NoTransition {
                state: self.state.clone(),
                symbol,
            })?;

        // Snapshot before the rule takes effect.
        let (window, column) = self.tape.window(self.cursor);
        let description = format!("{} {} -> {}", self.state, symbol, rule);
        self.trace.push(TraceEntry::new(window, column, description));

        self.tape.write(self.cursor, rule.write);
        self.state = rule.next_state;
        self.cursor += rule.direction.offset();
        self.step_count += 1;

        Ok(Step::Continue)
    }

    /// Runs the machine until it reaches its terminal state, then appends
    /// the final trace entry and returns the tape contents with outer blanks
    /// stripped.
    ///
    /// # Errors
    ///
    /// `StepLimitExceeded` if the terminal state is not reached within
    /// `step_limit` steps, and `NoTransition` as for [`step`](Self::step).
    /// In both cases the accumulated trace stays inspectable.
    pub fn run(&mut self, step_limit: usize) -> Result<String, MachineError> {
        let mut steps = 0;
        while !self.is_halted() {
            if steps >= step_limit {
                return Err(MachineError::StepLimitExceeded(step_limit));
            }
            self.step()?;
            steps += 1;
        }

        let (window, column) = self.tape.window(self.cursor);
        let label = format!("Final state: {}", self.program.final_state);
        self.trace.push(TraceEntry::new(window, column, label));

        Ok(self.tape.trimmed())
    }

    /// Resets the machine to its initial configuration: state, tape, cursor,
    /// trace and step count.
    pub fn reset(&mut self) {
        self.state = self.program.initial_state.clone();
        self.tape = Tape::new(&self.program.tape, self.program.alphabet.blank());
        self.cursor = 0;
        self.trace.clear();
        self.step_count = 0;
    }

    /// Returns the current state label.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the current cursor position (may be negative).
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Returns true if the machine sits in its terminal state.
    pub fn is_halted(&self) -> bool {
        self.state == self.program.final_state
    }

    /// Returns the number of rules applied so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the recorded trace.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Returns the tape contents with outer blanks stripped; an all-blank
    /// tape renders as the single blank symbol.
    pub fn result(&self) -> String {
        self.tape.trimmed()
    }

    /// Returns the program this machine executes.
    pub fn program(&self) -> &Program {
        &self.program
    }
}
