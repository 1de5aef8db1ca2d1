#![deny(unsafe_code)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! # linekit - line-oriented text toolkit library
//!
//! This library provides the core functionality behind the `linekit` CLI:
//! external-memory randomization of newline-delimited records and per-line
//! field templating.
//!
//! ## Overview
//!
//! ### Core Functionality
//!
//! - **[`shuffle`]** - External-memory uniform shuffling (batch, spill,
//!   randomized k-way merge, chunked merge control)
//! - **[`fields`]** - Field splitting and template rendering
//!
//! ### Utilities
//!
//! - **[`io`]** - Buffered stdin/stdout-or-file stream helpers
//! - **[`rng`]** - Seeded-or-entropy random number generator construction
//! - **[`validation`]** - Input validation with consistent error messages
//! - **[`progress`]** - Progress tracking and logging
//! - **[`logging`]** - Formatting helpers and operation timing
//!
//! ## Quick Start
//!
//! ### Shuffling a stream
//!
//! ```
//! use linekit_lib::shuffle::ExternalShuffler;
//! use std::io::Cursor;
//!
//! # fn main() -> anyhow::Result<()> {
//! let input = Cursor::new(b"a\nb\nc\n".to_vec());
//! let mut output = Vec::new();
//!
//! let stats = ExternalShuffler::new().seed(42).shuffle(input, &mut output)?;
//! assert_eq!(stats.records, 3);
//! # Ok(())
//! # }
//! ```
//!
//! ### Rendering fields through a template
//!
//! ```
//! use linekit_lib::fields::{FieldSplitter, Template};
//!
//! # fn main() -> anyhow::Result<()> {
//! let template = Template::parse("$0-$-1")?;
//! let splitter = FieldSplitter::new(None);
//!
//! let fields = splitter.split("x y z");
//! assert_eq!(template.render(&fields), "x-z");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod fields;
pub mod io;
pub mod logging;
pub mod progress;
pub mod rng;
pub mod shuffle;
pub mod validation;

// Re-export the most commonly used entry points.
pub use rng::create_rng;
pub use shuffle::{ExternalShuffler, ShuffleStats};
