//! External-memory uniform shuffling of newline-delimited records.
//!
//! Produces a uniformly random permutation of a line stream of arbitrary
//! size while bounding peak memory and open-file usage.
//!
//! # Algorithm
//!
//! 1. **Batch phase**: Read records into a fixed-capacity buffer
//! 2. **Spill phase**: Shuffle each batch in memory and write it to a temp file
//! 3. **Merge phase**: Combine spill files by a randomized k-way merge, a
//!    bounded group at a time, until a single fully randomized file remains
//! 4. **Stream phase**: Copy the final file to the output
//!
//! Records are never compared by content; merge order is decided by an
//! independently drawn random priority key per buffered record, so the merge
//! interleaving is itself random. Peak memory is one batch plus one buffered
//! record per open spill file.

pub mod batch;
pub mod cursor;
pub mod external;
pub mod merge;
pub mod spill;

pub use batch::RecordBatch;
pub use cursor::SpillCursor;
pub use external::{DEFAULT_BATCH_CAPACITY, DEFAULT_MERGE_WIDTH, ExternalShuffler, ShuffleStats};
pub use merge::merge_spills;
pub use spill::{SpillDir, SpillFile};
