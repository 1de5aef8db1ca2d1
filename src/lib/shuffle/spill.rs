//! Spill file lifecycle and shuffled batch persistence.
//!
//! All spill files for a run live in one uniquely-named temporary directory
//! owned by a [`SpillDir`]. Files consumed by a merge round are deleted
//! eagerly to bound peak disk usage; the directory guard removes anything
//! still outstanding when the run ends, on success and on error unwinds
//! alike.

use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Buffer size for spill file writes.
const SPILL_BUFFER_SIZE: usize = 64 * 1024;

/// Owner of the per-run spill directory and allocator of spill file names.
pub struct SpillDir {
    dir: TempDir,
    next_id: usize,
}

impl SpillDir {
    /// Create the spill directory, under `base` if given, otherwise under the
    /// platform temp directory. The directory name is unique per process
    /// invocation, so concurrent runs never collide.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base: Option<&Path>) -> Result<Self> {
        let dir = match base {
            Some(base) => {
                std::fs::create_dir_all(base).with_context(|| {
                    format!("Failed to create temp directory: {}", base.display())
                })?;
                TempDir::new_in(base).context("Failed to create spill directory")?
            }
            None => TempDir::new().context("Failed to create spill directory")?,
        };
        Ok(Self { dir, next_id: 0 })
    }

    /// Path of the spill directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Allocate the next uniquely named spill file handle.
    ///
    /// The file itself is created when first written.
    #[must_use]
    pub fn create(&mut self) -> SpillFile {
        let path = self.dir.path().join(format!("spill_{:06}.txt", self.next_id));
        self.next_id += 1;
        SpillFile { path }
    }

    /// Shuffle the records uniformly in place and persist them as a new
    /// spill file, one record per line, flushed and closed before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written; the caller
    /// is expected to abort the run (no partial-batch retry).
    pub fn spill_shuffled(
        &mut self,
        records: &mut [String],
        rng: &mut impl Rng,
    ) -> Result<SpillFile> {
        records.shuffle(rng);

        let spill = self.create();
        let file = File::create(spill.path())
            .with_context(|| format!("Failed to create spill file: {}", spill.path().display()))?;
        let mut writer = BufWriter::with_capacity(SPILL_BUFFER_SIZE, file);
        for record in records.iter() {
            writer.write_all(record.as_bytes()).context("Failed to write spill record")?;
            writer.write_all(b"\n").context("Failed to write spill record")?;
        }
        writer.flush().context("Failed to flush spill file")?;

        Ok(spill)
    }
}

/// Handle to one ephemeral spill file.
///
/// Once written and closed, contents are immutable until removal.
#[derive(Debug)]
pub struct SpillFile {
    path: PathBuf,
}

impl SpillFile {
    /// Location of the file on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file. Consuming `self` makes double removal
    /// unrepresentable.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    pub fn remove(self) -> Result<()> {
        std::fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove spill file: {}", self.path.display()))
    }
}
