//! Built-in demo programs, embedded at compile time.

use crate::alphabet::Alphabet;
use crate::table::parse_tape_rules;
use crate::types::{MachineError, Program};

/// Rule text of the unary-arithmetic demo `f(x1, x2) = x1 + x2 - 1`.
pub const ADD_SUB_ONE_RULES: &str = include_str!("../demos/add-sub-one.rules");

/// Builds the unary-arithmetic demo program over the alphabet {1, +}.
///
/// `tape` holds the two arguments in unary notation separated by `+`, for
/// example `11+111` for f(2, 3).
pub fn add_sub_one(tape: &str) -> Result<Program, MachineError> {
    let alphabet = Alphabet::new(['1', '+']);
    let rules = parse_tape_rules(&alphabet, ADD_SUB_ONE_RULES)?;
    Ok(Program::new("f(x1, x2) = x1 + x2 - 1", alphabet, rules, tape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::machine::TuringMachine;
    use crate::types::MAX_EXECUTION_STEPS;

    #[test]
    fn test_embedded_program_parses_cleanly() {
        let program = add_sub_one("11+111").unwrap();
        assert_eq!(program.rules.len(), 6);
        assert!(analyze(&program).is_empty());
    }

    #[test]
    fn test_add_sub_one_computes_the_function() {
        for (tape, expected) in [
            ("11+111", "1111"), // f(2, 3) = 4
            ("1+1", "1"),       // f(1, 1) = 1
            ("111+1", "111"),   // f(3, 1) = 3
        ] {
            let mut machine = TuringMachine::new(add_sub_one(tape).unwrap()).unwrap();
            assert_eq!(machine.run(MAX_EXECUTION_STEPS).unwrap(), expected);
        }
    }
}
