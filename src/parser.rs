//! Line parser for the declarative machine-table format, built on `pest`.
//!
//! Each line is parsed on its own against the grammar in `grammar.pest`;
//! any deviation from the required shape fails with
//! [`MachineError::MalformedRule`] quoting the offending line verbatim.

use crate::types::{Direction, MachineError, OutputRule, TapeRule};
use pest::iterators::Pairs;
use pest::Parser as PestParser;
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the line grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TableParser;

/// Parses an alphabet declaration line: whitespace-separated symbol tokens.
pub fn parse_alphabet_line(line: &str) -> Result<Vec<char>, MachineError> {
    let root = TableParser::parse(Rule::alphabet_line, line.trim())
        .map_err(|_| malformed(line))?
        .next()
        .ok_or_else(|| malformed(line))?;

    let mut symbols = Vec::new();
    for pair in root.into_inner() {
        if pair.as_rule() == Rule::symbol {
            symbols.push(first_char(pair.as_str(), line)?);
        }
    }

    Ok(symbols)
}

/// Parses a tape-machine rule line: `<state> <symbol> -> <state> <symbol>
/// <direction>`. Returns the lookup key parts and the rule body.
pub fn parse_tape_rule(line: &str) -> Result<(String, char, TapeRule), MachineError> {
    let root = TableParser::parse(Rule::tape_rule, line.trim())
        .map_err(|_| malformed(line))?
        .next()
        .ok_or_else(|| malformed(line))?;
    let mut pairs = root.into_inner();

    let state = next_token(&mut pairs, line)?;
    let read = next_symbol(&mut pairs, line)?;
    let next_state = next_token(&mut pairs, line)?;
    let write = next_symbol(&mut pairs, line)?;
    let direction = parse_direction(&next_token(&mut pairs, line)?, line)?;

    Ok((
        state,
        read,
        TapeRule {
            next_state,
            write,
            direction,
        },
    ))
}

/// Parses a transducer rule line: `<state> <symbol> -> <state> <symbol>`.
pub fn parse_output_rule(line: &str) -> Result<(String, char, OutputRule), MachineError> {
    let root = TableParser::parse(Rule::output_rule, line.trim())
        .map_err(|_| malformed(line))?
        .next()
        .ok_or_else(|| malformed(line))?;
    let mut pairs = root.into_inner();

    let state = next_token(&mut pairs, line)?;
    let input = next_symbol(&mut pairs, line)?;
    let next_state = next_token(&mut pairs, line)?;
    let output = next_symbol(&mut pairs, line)?;

    Ok((state, input, OutputRule { next_state, output }))
}

/// Parses a single direction token: `L`, `R` or `E` (stay).
fn parse_direction(token: &str, line: &str) -> Result<Direction, MachineError> {
    match token {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        "E" => Ok(Direction::Stay),
        _ => Err(malformed(line)),
    }
}

fn malformed(line: &str) -> MachineError {
    MachineError::MalformedRule {
        line: line.trim().to_string(),
    }
}

fn next_token(pairs: &mut Pairs<Rule>, line: &str) -> Result<String, MachineError> {
    Ok(pairs
        .next()
        .ok_or_else(|| malformed(line))?
        .as_str()
        .to_string())
}

fn next_symbol(pairs: &mut Pairs<Rule>, line: &str) -> Result<char, MachineError> {
    let token = next_token(pairs, line)?;
    first_char(&token, line)
}

fn first_char(token: &str, line: &str) -> Result<char, MachineError> {
    token.chars().next().ok_or_else(|| malformed(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tape_rule() {
        let (state, read, rule) = parse_tape_rule("q0 1 -> q1 + R").unwrap();
        assert_eq!(state, "q0");
        assert_eq!(read, '1');
        assert_eq!(
            rule,
            TapeRule {
                next_state: "q1".to_string(),
                write: '+',
                direction: Direction::Right,
            }
        );
    }

    #[test]
    fn test_parse_tape_rule_with_blank_and_stay() {
        let (state, read, rule) = parse_tape_rule("q3 1 -> qz λ E").unwrap();
        assert_eq!(state, "q3");
        assert_eq!(read, '1');
        assert_eq!(rule.write, 'λ');
        assert_eq!(rule.direction, Direction::Stay);
    }

    #[test]
    fn test_parse_tape_rule_rejects_unknown_direction() {
        let error = parse_tape_rule("q0 1 -> q1 1 X").unwrap_err();
        assert_eq!(
            error,
            MachineError::MalformedRule {
                line: "q0 1 -> q1 1 X".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_tape_rule_rejects_wrong_token_counts() {
        for line in [
            "q0 -> q1 1 R",    // one token on the left
            "q0 1 -> q1 R",    // two tokens on the right
            "q0 1 -> q1 1",    // missing direction
            "q0 1 q1 1 R",     // no delimiter
            "q0 1 -> q1 1 R R",
            "",
        ] {
            let error = parse_tape_rule(line).unwrap_err();
            assert_eq!(
                error,
                MachineError::MalformedRule {
                    line: line.trim().to_string(),
                },
                "line {line:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_output_rule() {
        let (state, input, rule) = parse_output_rule("q2 c -> qf 1").unwrap();
        assert_eq!(state, "q2");
        assert_eq!(input, 'c');
        assert_eq!(
            rule,
            OutputRule {
                next_state: "qf".to_string(),
                output: '1',
            }
        );
    }

    #[test]
    fn test_parse_output_rule_rejects_direction_token_count() {
        assert!(parse_output_rule("q2 c -> qf 1 R").is_err());
        assert!(parse_output_rule("q2 c -> qf").is_err());
    }

    #[test]
    fn test_parse_alphabet_line() {
        assert_eq!(parse_alphabet_line("1 +").unwrap(), vec!['1', '+']);
        assert_eq!(
            parse_alphabet_line("  n b d h k z m c ").unwrap(),
            vec!['n', 'b', 'd', 'h', 'k', 'z', 'm', 'c']
        );
    }

    #[test]
    fn test_parse_alphabet_line_rejects_empty() {
        assert!(parse_alphabet_line("   ").is_err());
    }
}
