//! Randomize the order of records (lines) of text.
//!
//! Uses an external-memory shuffle so that inputs far larger than available
//! RAM are handled: lines are batched, shuffled in memory, spilled to
//! temporary files, and recombined by a randomized k-way merge a bounded
//! number of files at a time.

use anyhow::Result;
use clap::Parser;
use linekit_lib::io::{open_input, open_output};
use linekit_lib::logging::OperationTimer;
use linekit_lib::shuffle::{DEFAULT_BATCH_CAPACITY, DEFAULT_MERGE_WIDTH, ExternalShuffler};
use linekit_lib::validation::{validate_at_least, validate_positive};
use log::info;
use std::path::PathBuf;

use crate::commands::command::Command;
use crate::commands::common::TextIoOptions;

/// Randomize the order of lines in a text stream.
#[derive(Debug, Parser)]
#[command(
    name = "randomize",
    about = "Randomize the order of records (lines) of text",
    long_about = r#"
Produce a uniformly random permutation of the input lines.

The input is read once, in fixed-size batches; each batch is shuffled in
memory and spilled to a temporary file. Spill files are then combined by a
randomized k-way merge, a bounded number of files at a time, until a single
fully randomized file remains, which is streamed to the output. Peak memory
is one batch plus one buffered record per open spill file, and at most
--merge-width spill files are open at once, so inputs of any size that fits
on disk are handled.

EXAMPLES:

  # Shuffle a file to stdout
  linekit randomize -i lines.txt

  # Shuffle stdin to a file, keeping spill files on a fast disk
  cat lines.txt | linekit randomize -o shuffled.txt -T /mnt/ssd/tmp

  # Reproducible shuffle
  linekit randomize -i lines.txt -o shuffled.txt --seed 42
"#
)]
pub struct Randomize {
    /// Input/output options
    #[command(flatten)]
    pub io: TextIoOptions,

    /// Temporary directory for spill files.
    ///
    /// If not specified, uses the system default temp directory.
    /// Created if it does not already exist.
    #[arg(short = 'T', long = "tmp-dir")]
    pub tmp_dir: Option<PathBuf>,

    /// Number of records held in memory per batch.
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_CAPACITY)]
    pub batch_size: usize,

    /// Maximum number of spill files merged per round.
    ///
    /// Bounds the number of simultaneously open files; must be at least 2.
    #[arg(long = "merge-width", default_value_t = DEFAULT_MERGE_WIDTH)]
    pub merge_width: usize,

    /// Random seed for reproducible output.
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

impl Command for Randomize {
    fn execute(&self) -> Result<()> {
        self.io.validate()?;
        validate_positive(self.batch_size, "batch-size")?;
        validate_at_least(self.merge_width, 2, "merge-width")?;

        let timer = OperationTimer::new("Randomizing records");

        info!("Input: {}", self.io.input_label());
        info!("Output: {}", self.io.output_label());
        info!("Batch size: {}", self.batch_size);
        info!("Merge width: {}", self.merge_width);
        if let Some(seed) = self.seed {
            info!("Random seed: {seed}");
        }
        if let Some(ref tmp) = self.tmp_dir {
            info!("Temp directory: {}", tmp.display());
        }

        let mut shuffler = ExternalShuffler::new()
            .batch_capacity(self.batch_size)
            .merge_width(self.merge_width);
        if let Some(ref tmp) = self.tmp_dir {
            shuffler = shuffler.temp_dir(tmp.clone());
        }
        if let Some(seed) = self.seed {
            shuffler = shuffler.seed(seed);
        }

        let input = open_input(self.io.input.as_deref())?;
        let output = open_output(self.io.output.as_deref())?;
        let stats = shuffler.shuffle(input, output)?;

        info!("=== Summary ===");
        info!("Records shuffled: {}", stats.records);
        info!("Spill files written: {}", stats.spill_files);
        info!("Merge rounds: {}", stats.merge_rounds);

        timer.log_completion(stats.records);
        Ok(())
    }
}
