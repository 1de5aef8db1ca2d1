//! Template parsing and rendering for field substitution.

use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{LinekitError, Result};

/// Matches `$N` and `$-N` field references within a template.
static FIELD_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(-?[0-9]+)").expect("field reference pattern is valid"));

/// One parsed template segment.
///
/// A segment either copies literal text through or resolves to one field of
/// the split line; rendering a segment never fails, out-of-range references
/// simply resolve to the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal text copied through unchanged.
    Literal(String),
    /// Forward field reference, 0-based (`$0` is the first field).
    Field(usize),
    /// Backward field reference, 1-based from the end (`$-1` is the last field).
    FieldFromEnd(usize),
}

impl Segment {
    fn render<'a>(&'a self, fields: &[&'a str]) -> &'a str {
        match self {
            Self::Literal(text) => text,
            Self::Field(index) => fields.get(*index).copied().unwrap_or(""),
            Self::FieldFromEnd(back) => fields
                .len()
                .checked_sub(*back)
                .and_then(|index| fields.get(index))
                .copied()
                .unwrap_or(""),
        }
    }
}

/// A compiled line template: literal text interspersed with field references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if a field index does not fit in a machine integer.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut previous = 0;

        for caps in FIELD_REF.captures_iter(pattern) {
            let whole = caps.get(0).expect("capture group 0 is the whole match");
            if whole.start() > previous {
                segments.push(Segment::Literal(pattern[previous..whole.start()].to_string()));
            }

            let index: i64 = caps[1].parse().map_err(|_| LinekitError::InvalidTemplate {
                pattern: pattern.to_string(),
                reason: format!("field index out of range: {}", &caps[1]),
            })?;
            if index < 0 {
                segments.push(Segment::FieldFromEnd(index.unsigned_abs() as usize));
            } else {
                segments.push(Segment::Field(index as usize));
            }

            previous = whole.end();
        }

        if previous < pattern.len() {
            segments.push(Segment::Literal(pattern[previous..].to_string()));
        }

        Ok(Self { segments })
    }

    /// Render one line's fields through the template.
    #[must_use]
    pub fn render(&self, fields: &[&str]) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(segment.render(fields));
        }
        out
    }
}
