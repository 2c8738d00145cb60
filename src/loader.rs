//! This module provides the `MachineLoader` struct, responsible for loading
//! tape-machine definitions from the three input files: an alphabet
//! declaration, a rule program and an initial tape.

use std::fs;
use std::path::Path;

use crate::alphabet::Alphabet;
use crate::parser;
use crate::table::parse_tape_rules;
use crate::types::{MachineError, Program, COMMENT_MARKER};

/// `MachineLoader` builds a validated [`Program`] out of plain-text inputs.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a program from three files: the alphabet declaration (first
    /// significant line), the rule definitions (whole file) and the initial
    /// tape (first line). The program is named after the rule file's stem.
    ///
    /// # Errors
    ///
    /// `FileError` if any file cannot be read, plus every parse/validation
    /// error [`Self::from_strings`] can produce.
    pub fn load(
        alphabet_path: &Path,
        rules_path: &Path,
        tape_path: &Path,
    ) -> Result<Program, MachineError> {
        let alphabet = read_file(alphabet_path)?;
        let rules = read_file(rules_path)?;
        let tape = read_file(tape_path)?;

        let name = rules_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "machine".to_string());

        Self::from_strings(&name, &alphabet, &rules, &tape)
    }

    /// Builds a program from in-memory text, using the same line conventions
    /// as the files: the alphabet is the first significant line of
    /// `alphabet`, the tape is the first line of `tape` (which may be
    /// empty), and `rules` is parsed in full.
    pub fn from_strings(
        name: &str,
        alphabet: &str,
        rules: &str,
        tape: &str,
    ) -> Result<Program, MachineError> {
        let declaration = first_significant_line(alphabet).unwrap_or("");
        let symbols = parser::parse_alphabet_line(declaration)?;
        let alphabet = Alphabet::new(symbols);

        let table = parse_tape_rules(&alphabet, rules)?;
        let tape = tape.lines().next().unwrap_or("").trim_end();

        Ok(Program::new(name, alphabet, table, tape))
    }
}

fn read_file(path: &Path) -> Result<String, MachineError> {
    fs::read_to_string(path).map_err(|e| {
        MachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
    })
}

fn first_significant_line(content: &str) -> Option<&str> {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
}
