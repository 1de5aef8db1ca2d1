//! Buffered text stream helpers.
//!
//! Commands read and write newline-delimited text through these helpers so
//! that files and the standard streams are interchangeable: `None` or the
//! conventional `-` path selects stdin/stdout.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Buffer size for file-backed streams.
const STREAM_BUFFER_SIZE: usize = 64 * 1024;

/// Returns true if the path is the conventional `-` placeholder for a
/// standard stream.
#[must_use]
pub fn is_stdio_path(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Open a buffered reader over the given input file, or stdin when the path
/// is absent or `-`.
///
/// # Errors
///
/// Returns an error if the input file cannot be opened.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) if !is_stdio_path(p) => {
            let file = File::open(p)
                .with_context(|| format!("Failed to open input file: {}", p.display()))?;
            Ok(Box::new(BufReader::with_capacity(STREAM_BUFFER_SIZE, file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin().lock()))),
    }
}

/// Open a buffered writer over the given output file, or stdout when the path
/// is absent or `-`.
///
/// # Errors
///
/// Returns an error if the output file cannot be created.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) if !is_stdio_path(p) => {
            let file = File::create(p)
                .with_context(|| format!("Failed to create output file: {}", p.display()))?;
            Ok(Box::new(BufWriter::with_capacity(STREAM_BUFFER_SIZE, file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
