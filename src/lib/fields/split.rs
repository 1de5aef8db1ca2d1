//! Line splitting strategies for field extraction.

/// Strategy for splitting a line into fields.
///
/// An empty or absent separator splits on runs of whitespace, yielding no
/// empty fields; any other separator splits on each literal occurrence,
/// preserving empty fields between adjacent separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSplitter {
    /// Split on runs of whitespace.
    Whitespace,
    /// Split on each occurrence of a literal separator string.
    Literal(String),
}

impl FieldSplitter {
    /// Choose a splitter from an optional separator string.
    #[must_use]
    pub fn new(separator: Option<&str>) -> Self {
        match separator {
            Some(sep) if !sep.is_empty() => Self::Literal(sep.to_string()),
            _ => Self::Whitespace,
        }
    }

    /// Split one line into fields.
    #[must_use]
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Self::Whitespace => line.split_whitespace().collect(),
            Self::Literal(sep) => line.split(sep.as_str()).collect(),
        }
    }
}
