//! Randomized k-way merge of spill files.

use anyhow::{Context, Result};
use rand::Rng;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::io::Write;

use crate::shuffle::cursor::SpillCursor;
use crate::shuffle::spill::SpillFile;

/// Merge the input spill files into `out` in randomized order.
///
/// Opens one primed [`SpillCursor`] per input, then repeatedly emits the
/// record of the cursor holding the greatest priority key and advances that
/// cursor, until every cursor is exhausted. Each input record appears exactly
/// once in the output; since every spill file was already internally
/// shuffled, the random interleaving yields a fully randomized stream while
/// holding only one buffered record per open input and reading each file
/// exactly once.
///
/// On an exact key tie the cursor opened first wins; with 64-bit keys this is
/// not an observable bias.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns an error if any input cannot be opened or read, or if writing to
/// `out` fails.
pub fn merge_spills<W: Write>(
    inputs: &[SpillFile],
    out: &mut W,
    rng: &mut impl Rng,
) -> Result<u64> {
    let mut cursors = Vec::with_capacity(inputs.len());
    for file in inputs {
        cursors.push(SpillCursor::open(file, rng)?);
    }

    let mut heap: BinaryHeap<MergeEntry> = BinaryHeap::with_capacity(cursors.len());
    for (idx, cursor) in cursors.iter().enumerate() {
        if !cursor.is_exhausted() {
            heap.push(MergeEntry { key: cursor.key(), cursor: idx });
        }
    }

    let mut written = 0u64;
    while let Some(entry) = heap.pop() {
        let cursor = &mut cursors[entry.cursor];
        out.write_all(cursor.record().as_bytes()).context("Failed to write merged record")?;
        out.write_all(b"\n").context("Failed to write merged record")?;
        written += 1;

        cursor.advance(rng)?;
        if !cursor.is_exhausted() {
            heap.push(MergeEntry { key: cursor.key(), cursor: entry.cursor });
        }
    }

    Ok(written)
}

/// Entry in the merge heap.
///
/// The heap pops its greatest entry, so ordering is by key with the lower
/// cursor index winning exact ties (first opened wins).
struct MergeEntry {
    key: u64,
    cursor: usize,
}

impl PartialEq for MergeEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.cursor == other.cursor
    }
}

impl Eq for MergeEntry {}

impl PartialOrd for MergeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MergeEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key).then_with(|| other.cursor.cmp(&self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use crate::shuffle::spill::SpillDir;

    fn spill_with_lines(dir: &mut SpillDir, lines: &[&str]) -> SpillFile {
        let spill = dir.create();
        let contents: String = lines.iter().map(|l| format!("{l}\n")).collect();
        std::fs::write(spill.path(), contents).unwrap();
        spill
    }

    fn merged_lines(inputs: &[SpillFile], seed: u64) -> Vec<String> {
        let mut rng = create_rng(Some(seed));
        let mut out = Vec::new();
        merge_spills(inputs, &mut out, &mut rng).unwrap();
        String::from_utf8(out).unwrap().lines().map(String::from).collect()
    }

    #[test]
    fn test_merge_no_inputs() {
        let mut rng = create_rng(Some(5));
        let mut out = Vec::new();
        assert_eq!(merge_spills(&[], &mut out, &mut rng).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_merge_single_input_preserves_its_order() {
        let mut dir = SpillDir::new(None).unwrap();
        let spill = spill_with_lines(&mut dir, &["a", "b", "c"]);

        // One cursor is always the maximum, so its internal order survives.
        let lines = merged_lines(&[spill], 5);
        assert_eq!(lines, ["a", "b", "c"]);
    }

    #[test]
    fn test_merge_preserves_multiset() {
        let mut dir = SpillDir::new(None).unwrap();
        let a = spill_with_lines(&mut dir, &["a1", "a2", "a3"]);
        let b = spill_with_lines(&mut dir, &["b1", "b2"]);
        let c = spill_with_lines(&mut dir, &["c1", "c2", "c3", "c4"]);

        let mut lines = merged_lines(&[a, b, c], 5);
        assert_eq!(lines.len(), 9);
        lines.sort();
        assert_eq!(lines, ["a1", "a2", "a3", "b1", "b2", "c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn test_merge_keeps_each_inputs_internal_order() {
        let mut dir = SpillDir::new(None).unwrap();
        let a = spill_with_lines(&mut dir, &["a1", "a2", "a3"]);
        let b = spill_with_lines(&mut dir, &["b1", "b2", "b3"]);

        let lines = merged_lines(&[a, b], 9);

        let a_positions: Vec<usize> =
            ["a1", "a2", "a3"].iter().map(|r| lines.iter().position(|l| l == r).unwrap()).collect();
        let b_positions: Vec<usize> =
            ["b1", "b2", "b3"].iter().map(|r| lines.iter().position(|l| l == r).unwrap()).collect();
        assert!(a_positions.windows(2).all(|w| w[0] < w[1]));
        assert!(b_positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_merge_deterministic_under_fixed_seed() {
        let mut dir = SpillDir::new(None).unwrap();
        let a1 = spill_with_lines(&mut dir, &["a1", "a2"]);
        let b1 = spill_with_lines(&mut dir, &["b1", "b2"]);
        let a2 = spill_with_lines(&mut dir, &["a1", "a2"]);
        let b2 = spill_with_lines(&mut dir, &["b1", "b2"]);

        assert_eq!(merged_lines(&[a1, b1], 21), merged_lines(&[a2, b2], 21));
    }

    #[test]
    fn test_merge_with_empty_input_file() {
        let mut dir = SpillDir::new(None).unwrap();
        let a = spill_with_lines(&mut dir, &["a1", "a2"]);
        let empty = spill_with_lines(&mut dir, &[]);

        let mut lines = merged_lines(&[a, empty], 13);
        lines.sort();
        assert_eq!(lines, ["a1", "a2"]);
    }

    #[test]
    fn test_merge_actually_interleaves() {
        // With many records per input, a seeded merge that never interleaves
        // would mean keys are being ignored.
        let mut dir = SpillDir::new(None).unwrap();
        let a_records: Vec<String> = (0..50).map(|i| format!("a{i}")).collect();
        let b_records: Vec<String> = (0..50).map(|i| format!("b{i}")).collect();
        let a_refs: Vec<&str> = a_records.iter().map(String::as_str).collect();
        let b_refs: Vec<&str> = b_records.iter().map(String::as_str).collect();
        let a = spill_with_lines(&mut dir, &a_refs);
        let b = spill_with_lines(&mut dir, &b_refs);

        let lines = merged_lines(&[a, b], 17);
        let from_a_first_half =
            lines[..50].iter().filter(|l| l.starts_with('a')).count();
        assert!(from_a_first_half > 0 && from_a_first_half < 50);
    }

    #[test]
    fn test_merge_entry_ordering() {
        let high = MergeEntry { key: 10, cursor: 3 };
        let low = MergeEntry { key: 2, cursor: 0 };
        assert!(high > low);

        // Exact key tie: the first-opened (lower index) cursor wins.
        let first = MergeEntry { key: 7, cursor: 1 };
        let second = MergeEntry { key: 7, cursor: 2 };
        assert!(first > second);
    }
}
