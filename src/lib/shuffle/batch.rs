//! Fixed-capacity record buffer for the batching phase.

use anyhow::{Context, Result};
use std::io::BufRead;

/// A reusable, fixed-capacity buffer of text records.
///
/// The buffer allocates its record slots once and reuses them across fills:
/// a fill clears and overwrites slots rather than reallocating, so the
/// batching loop runs at a steady memory footprint. Slots beyond the live
/// count hold stale contents from earlier fills and must not be read.
pub struct RecordBatch {
    slots: Vec<String>,
    len: usize,
}

impl RecordBatch {
    /// Create a batch buffer holding up to `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: vec![String::new(); capacity], len: 0 }
    }

    /// Number of live records from the most recent fill.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the most recent fill read no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of records per fill.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live records from the most recent fill.
    #[must_use]
    pub fn records(&self) -> &[String] {
        &self.slots[..self.len]
    }

    /// Live records as a mutable slice, for in-place shuffling.
    #[must_use]
    pub fn records_mut(&mut self) -> &mut [String] {
        &mut self.slots[..self.len]
    }

    /// Refill the buffer from `reader`.
    ///
    /// Reads records until the buffer reaches capacity or the stream is
    /// exhausted, and returns the number of records read; 0 signals that the
    /// stream had no more data. Never reads past the first end-of-stream
    /// within a single call. Trailing `\n` (and a preceding `\r`, if any) are
    /// stripped; a final line without a trailing newline still counts as one
    /// record.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the stream fails (including invalid
    /// UTF-8 in the input).
    pub fn fill(&mut self, reader: &mut impl BufRead) -> Result<usize> {
        self.len = 0;
        while self.len < self.slots.len() {
            let slot = &mut self.slots[self.len];
            slot.clear();
            let n = reader.read_line(slot).context("Failed to read input record")?;
            if n == 0 {
                break;
            }
            if slot.ends_with('\n') {
                slot.pop();
                if slot.ends_with('\r') {
                    slot.pop();
                }
            }
            self.len += 1;
        }
        Ok(self.len)
    }
}
