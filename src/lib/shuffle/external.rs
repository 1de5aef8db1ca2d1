//! External-memory shuffle orchestration.
//!
//! Drives the full pipeline: batch the input, shuffle and spill each batch,
//! merge spill files in bounded groups until one fully randomized file
//! remains, then stream it to the output.
//!
//! # Resource bounds
//!
//! - Memory: one batch of records plus one buffered record per open spill
//!   file during a merge round.
//! - File descriptors: at most `merge_width` spill files open at once.
//! - Disk: merge inputs are deleted as soon as their round completes; the
//!   spill directory itself is removed on every exit path.

use anyhow::{Context, Result, ensure};
use log::info;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use crate::progress::ProgressTracker;
use crate::rng::create_rng;
use crate::shuffle::batch::RecordBatch;
use crate::shuffle::merge::merge_spills;
use crate::shuffle::spill::{SpillDir, SpillFile};

/// Default number of records held in memory per batch.
pub const DEFAULT_BATCH_CAPACITY: usize = 1024;

/// Default maximum number of spill files merged per round.
pub const DEFAULT_MERGE_WIDTH: usize = 32;

/// Buffer size for writing merged spill files.
const MERGE_BUFFER_SIZE: usize = 64 * 1024;

/// External shuffler for newline-delimited record streams.
///
/// Configuration uses builder-style setters:
///
/// ```no_run
/// use linekit_lib::shuffle::ExternalShuffler;
/// use std::io::{stdin, stdout};
///
/// # fn main() -> anyhow::Result<()> {
/// let stats = ExternalShuffler::new()
///     .batch_capacity(4096)
///     .merge_width(16)
///     .seed(42)
///     .shuffle(stdin().lock(), stdout().lock())?;
/// # Ok(())
/// # }
/// ```
pub struct ExternalShuffler {
    /// Records held in memory per batch.
    batch_capacity: usize,
    /// Maximum spill files merged per round.
    merge_width: usize,
    /// Base directory for spill files.
    temp_dir: Option<PathBuf>,
    /// Fixed seed for reproducible runs.
    seed: Option<u64>,
}

impl Default for ExternalShuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalShuffler {
    /// Create a shuffler with default batch capacity and merge width.
    #[must_use]
    pub fn new() -> Self {
        Self {
            batch_capacity: DEFAULT_BATCH_CAPACITY,
            merge_width: DEFAULT_MERGE_WIDTH,
            temp_dir: None,
            seed: None,
        }
    }

    /// Set the number of records held in memory per batch.
    #[must_use]
    pub fn batch_capacity(mut self, capacity: usize) -> Self {
        self.batch_capacity = capacity;
        self
    }

    /// Set the maximum number of spill files merged per round.
    #[must_use]
    pub fn merge_width(mut self, width: usize) -> Self {
        self.merge_width = width;
        self
    }

    /// Set the base directory for spill files.
    #[must_use]
    pub fn temp_dir(mut self, path: PathBuf) -> Self {
        self.temp_dir = Some(path);
        self
    }

    /// Fix the random seed for reproducible output.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Shuffle `input` into `output`.
    ///
    /// The output record count and multiset equal the input's; only the order
    /// changes. The output is written once, at the end, in one pass.
    ///
    /// # Errors
    ///
    /// Any read, spill, or write failure aborts the run. Spill files already
    /// on disk are removed by the spill directory guard during unwinding.
    pub fn shuffle<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<ShuffleStats> {
        ensure!(self.batch_capacity > 0, "batch capacity must be greater than 0");
        ensure!(self.merge_width >= 2, "merge width must be at least 2");

        let mut rng = create_rng(self.seed);
        let mut spill_dir = SpillDir::new(self.temp_dir.as_deref())?;
        let mut stats = ShuffleStats::default();

        // Phase 1: read, shuffle, and spill fixed-size batches.
        info!("Phase 1: batching and shuffling records...");
        let mut batch = RecordBatch::with_capacity(self.batch_capacity);
        let mut pending: Vec<SpillFile> = Vec::new();
        let mut progress = ProgressTracker::new("Read records").with_interval(1_000_000);

        loop {
            let count = batch.fill(&mut input)?;
            if count == 0 {
                break;
            }
            stats.records += count as u64;
            pending.push(spill_dir.spill_shuffled(batch.records_mut(), &mut rng)?);
            progress.log_if_needed(count as u64);
        }
        progress.log_final();
        stats.spill_files = pending.len();

        if pending.is_empty() {
            info!("No records read; output is empty");
            output.flush().context("Failed to flush output")?;
            return Ok(stats);
        }

        // Decorrelate merge-group composition from input order.
        pending.shuffle(&mut rng);

        // Phase 2: merge bounded groups of spill files until one remains.
        if pending.len() > 1 {
            info!("Phase 2: merging {} spill files...", pending.len());
        }
        while pending.len() > 1 {
            let take = self.merge_width.min(pending.len());
            let group: Vec<SpillFile> = pending.drain(..take).collect();

            let merged = spill_dir.create();
            let file = File::create(merged.path()).with_context(|| {
                format!("Failed to create merged spill file: {}", merged.path().display())
            })?;
            let mut writer = BufWriter::with_capacity(MERGE_BUFFER_SIZE, file);
            merge_spills(&group, &mut writer, &mut rng)?;
            writer.flush().context("Failed to flush merged spill file")?;
            drop(writer);

            for spent in group {
                spent.remove()?;
            }
            pending.push(merged);
            stats.merge_rounds += 1;
        }

        // Phase 3: stream the sole remaining file to the output.
        let last = pending.pop().expect("work queue holds the final spill file");
        let mut final_file = File::open(last.path()).with_context(|| {
            format!("Failed to open final spill file: {}", last.path().display())
        })?;
        io::copy(&mut final_file, &mut output).context("Failed to stream shuffled records")?;
        drop(final_file);
        last.remove()?;
        output.flush().context("Failed to flush output")?;

        Ok(stats)
    }
}

/// Statistics from a shuffle run.
#[derive(Default, Debug)]
pub struct ShuffleStats {
    /// Total records read (and written).
    pub records: u64,
    /// Number of batch spill files written during the batching phase.
    pub spill_files: usize,
    /// Number of merge rounds executed.
    pub merge_rounds: usize,
}
