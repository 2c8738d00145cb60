//! The trace recorder: an append-only log of per-step snapshots.
//!
//! Each entry is taken immediately before a rule is applied (plus one final
//! entry after halting) and is immutable once recorded. Formatting the log
//! into a report is left to the consumer.

use serde::{Deserialize, Serialize};

/// The ordered sequence of snapshots recorded by an engine.
pub type Trace = Vec<TraceEntry>;

/// One recorded snapshot: the rendered tape/input window, a caret line
/// locating the cursor within it, and the description of the rule applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// The rendered window of the tape or input word.
    pub window: String,
    /// A line with a single `^` aligned under the cursor's column.
    pub marker: String,
    /// Textual description of the rule applied, or the halt label for the
    /// final entry.
    pub rule: String,
}

impl TraceEntry {
    /// Creates an entry with the marker caret placed at `column` (counted in
    /// symbols, not bytes).
    pub fn new(window: impl Into<String>, column: usize, rule: impl Into<String>) -> Self {
        let mut marker = " ".repeat(column);
        marker.push('^');
        Self {
            window: window.into(),
            marker,
            rule: rule.into(),
        }
    }
}
