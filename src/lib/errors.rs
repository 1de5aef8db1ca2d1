//! Custom error types for linekit operations.

use thiserror::Error;

/// Result type alias for linekit operations
pub type Result<T> = std::result::Result<T, LinekitError>;

/// Error type for linekit operations
#[derive(Error, Debug)]
pub enum LinekitError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Missing or unusable path
    #[error("Invalid {file_type} '{path}': {reason}")]
    InvalidPath {
        /// What the path was supposed to be (e.g., "Input file")
        file_type: String,
        /// The offending path
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// Malformed field template
    #[error("Invalid template '{pattern}': {reason}")]
    InvalidTemplate {
        /// The template pattern as given
        pattern: String,
        /// Explanation of the problem
        reason: String,
    },
}
