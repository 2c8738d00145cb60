//! The bi-infinite tape, materialized lazily.
//!
//! Storage is a growable cell arena plus an integer origin that translates
//! logical (possibly negative) cursor positions into arena indices. Cells
//! only come into existence when the cursor reaches them and are filled with
//! the blank symbol; the tape never shrinks.

/// A single-tape store with blank-filled growth on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<char>,
    /// Logical position of `cells[0]`.
    origin: i64,
    blank: char,
}

impl Tape {
    /// Creates a tape whose cell at logical position 0 holds the first
    /// symbol of `content`. An empty content materializes nothing until the
    /// first access.
    pub fn new(content: &str, blank: char) -> Self {
        Self {
            cells: content.chars().collect(),
            origin: 0,
            blank,
        }
    }

    /// Returns the blank symbol of this tape.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Reads the symbol at `position`, growing the tape if the position lies
    /// outside the materialized bounds.
    pub fn read(&mut self, position: i64) -> char {
        let index = self.ensure(position);
        self.cells[index]
    }

    /// Writes `symbol` at `position`, growing the tape as needed.
    pub fn write(&mut self, position: i64, symbol: char) {
        let index = self.ensure(position);
        self.cells[index] = symbol;
    }

    /// Materializes `position` and returns its arena index. Left growth
    /// splices the missing run of blanks in one operation and shifts the
    /// origin; right growth resizes with blank fill.
    fn ensure(&mut self, position: i64) -> usize {
        if self.cells.is_empty() {
            self.origin = position;
            self.cells.push(self.blank);
            return 0;
        }

        if position < self.origin {
            let missing = (self.origin - position) as usize;
            self.cells
                .splice(0..0, std::iter::repeat(self.blank).take(missing));
            self.origin = position;
        } else {
            let end = self.origin + self.cells.len() as i64;
            if position >= end {
                let len = (position - self.origin) as usize + 1;
                self.cells.resize(len, self.blank);
            }
        }

        (position - self.origin) as usize
    }

    /// Returns the materialized contents with leading and trailing blanks
    /// stripped. An all-blank (or empty) tape renders as the single blank
    /// symbol, never as an empty string.
    pub fn trimmed(&self) -> String {
        match self.significant_span() {
            Some((left, right)) => self.cells[left..=right].iter().collect(),
            None => self.blank.to_string(),
        }
    }

    /// Renders the window spanning the non-blank contents, extended so that
    /// `cursor` is always inside it. Returns the window string and the
    /// cursor's column within it.
    pub fn window(&mut self, cursor: i64) -> (String, usize) {
        let cursor_index = self.ensure(cursor);

        let (mut left, mut right) = self
            .significant_span()
            .unwrap_or((cursor_index, cursor_index));
        left = left.min(cursor_index);
        right = right.max(cursor_index);

        let window: String = self.cells[left..=right].iter().collect();
        (window, cursor_index - left)
    }

    /// Index range of the leftmost and rightmost non-blank cells, if any.
    fn significant_span(&self) -> Option<(usize, usize)> {
        let left = self.cells.iter().position(|&c| c != self.blank)?;
        let right = self.cells.iter().rposition(|&c| c != self.blank)?;
        Some((left, right))
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell has been materialized yet.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
