//! Common CLI options shared across commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use linekit_lib::io::is_stdio_path;
use linekit_lib::validation::validate_file_exists;

/// Common input/output options for commands that read and write line streams.
///
/// Both sides default to the standard streams; `-` is accepted as an explicit
/// alias for them.
#[derive(Debug, Clone, Default, Args)]
pub struct TextIoOptions {
    /// Input file (defaults to stdin; "-" also reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (defaults to stdout; "-" also writes stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

impl TextIoOptions {
    /// Validates that the input file exists (skipped for stdin).
    ///
    /// # Errors
    ///
    /// Returns an error if the input file does not exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(ref input) = self.input {
            if !is_stdio_path(input) {
                validate_file_exists(input, "Input file")?;
            }
        }
        Ok(())
    }

    /// Human-readable name of the input side, for log output.
    #[must_use]
    pub fn input_label(&self) -> String {
        match self.input {
            Some(ref path) if !is_stdio_path(path) => path.display().to_string(),
            _ => "<stdin>".to_string(),
        }
    }

    /// Human-readable name of the output side, for log output.
    #[must_use]
    pub fn output_label(&self) -> String {
        match self.output {
            Some(ref path) if !is_stdio_path(path) => path.display().to_string(),
            _ => "<stdout>".to_string(),
        }
    }
}
