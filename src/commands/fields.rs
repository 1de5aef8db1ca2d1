//! Reformat lines by substituting their fields into a template.
//!
//! Splits each input line into fields (on runs of whitespace, or on a literal
//! separator) and renders the template once per line. This is a pure per-line
//! transformation with no state carried across lines.

use anyhow::{Context, Result};
use clap::Parser;
use linekit_lib::fields::{FieldSplitter, Template};
use linekit_lib::io::{open_input, open_output};
use linekit_lib::logging::OperationTimer;
use linekit_lib::progress::ProgressTracker;
use log::info;
use std::io::{BufRead, Write};

use crate::commands::command::Command;
use crate::commands::common::TextIoOptions;

/// Extract and rearrange delimited fields of each input line.
#[derive(Debug, Parser)]
#[command(
    name = "fields",
    about = "Extract and rearrange whitespace- or separator-delimited fields",
    long_about = r#"
Treat the template as the output for each input line, substituting field
references with the corresponding fields of that line.

Field references:
  $0 ... $n    field 0 .. n (zero-based, left to right)
  $-1 ... $-n  field n .. 0 (one-based, right to left; $-1 is the last field)

References past either end of the line render as the empty string. Without
--separator, lines split on runs of whitespace; otherwise they split on each
literal occurrence of the separator string.

EXAMPLES:

  # Swap the first two whitespace-separated columns
  linekit fields '$1 $0' -i data.txt

  # First and last field of each colon-separated line
  cat /etc/passwd | linekit fields -s : '$0 $-1'
"#
)]
pub struct Fields {
    /// Output template containing literal text and field references.
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Field separator (defaults to runs of whitespace).
    #[arg(short = 's', long = "separator")]
    pub separator: Option<String>,

    /// Input/output options
    #[command(flatten)]
    pub io: TextIoOptions,
}

impl Command for Fields {
    fn execute(&self) -> Result<()> {
        self.io.validate()?;

        let template = Template::parse(&self.template)?;
        let splitter = FieldSplitter::new(self.separator.as_deref());

        let timer = OperationTimer::new("Formatting records");
        info!("Input: {}", self.io.input_label());
        info!("Output: {}", self.io.output_label());
        info!("Template: {}", self.template);
        if let Some(ref sep) = self.separator {
            info!("Separator: {sep:?}");
        }

        let mut input = open_input(self.io.input.as_deref())?;
        let mut output = open_output(self.io.output.as_deref())?;
        let mut progress = ProgressTracker::new("Formatted records").with_interval(1_000_000);

        let mut line = String::new();
        let mut count = 0u64;
        loop {
            line.clear();
            let n = input.read_line(&mut line).context("Failed to read input record")?;
            if n == 0 {
                break;
            }
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }

            let fields = splitter.split(&line);
            let rendered = template.render(&fields);
            output.write_all(rendered.as_bytes()).context("Failed to write output record")?;
            output.write_all(b"\n").context("Failed to write output record")?;

            count += 1;
            progress.log_if_needed(1);
        }
        progress.log_final();
        output.flush().context("Failed to flush output")?;

        timer.log_completion(count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn run_fields(template: &str, separator: Option<&str>, input: &str) -> String {
        let mut in_file = NamedTempFile::new().unwrap();
        write!(in_file, "{input}").unwrap();
        in_file.flush().unwrap();
        let out_file = NamedTempFile::new().unwrap();

        let cmd = Fields {
            template: template.to_string(),
            separator: separator.map(String::from),
            io: TextIoOptions {
                input: Some(in_file.path().to_path_buf()),
                output: Some(out_file.path().to_path_buf()),
            },
        };
        cmd.execute().unwrap();

        std::fs::read_to_string(out_file.path()).unwrap()
    }

    #[test]
    fn test_forward_and_backward_references() {
        let out = run_fields("$0-$-1", None, "x y z\n");
        assert_eq!(out, "x-z\n");
    }

    #[test]
    fn test_literal_separator() {
        let out = run_fields("$1,$0", Some(","), "a,b\nc,d\n");
        assert_eq!(out, "b,a\nd,c\n");
    }

    #[test]
    fn test_final_line_without_newline() {
        let out = run_fields("$0", None, "only one");
        assert_eq!(out, "only\n");
    }

    #[test]
    fn test_out_of_range_renders_empty() {
        let out = run_fields("[$5]", None, "a b\n");
        assert_eq!(out, "[]\n");
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let cmd = Fields {
            template: "$99999999999999999999".to_string(),
            separator: None,
            io: TextIoOptions::default(),
        };
        assert!(cmd.execute().is_err());
    }
}
