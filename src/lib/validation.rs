//! Input validation utilities
//!
//! This module provides common validation functions for command-line parameters
//! and file paths with consistent error messages, built on the structured error
//! types from [`crate::errors`].

use crate::errors::{LinekitError, Result};
use std::fmt::Display;
use std::path::Path;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Input file")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use linekit_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/lines.txt", "Input file");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(LinekitError::InvalidPath {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that a value is positive (> 0)
///
/// # Arguments
/// * `value` - Value to validate
/// * `name` - Name of the parameter for error messages
///
/// # Errors
/// Returns an error if the value is not positive
///
/// # Example
/// ```
/// use linekit_lib::validation::validate_positive;
///
/// validate_positive(1024, "batch-size").unwrap();
///
/// let result = validate_positive(0, "batch-size");
/// assert!(result.is_err());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn validate_positive<T: Ord + Display + Default>(value: T, name: &str) -> Result<()> {
    if value <= T::default() {
        return Err(LinekitError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be positive (> 0), got: {value}"),
        });
    }
    Ok(())
}

/// Validate that a value is at least a given minimum
///
/// # Arguments
/// * `value` - Value to validate
/// * `min` - Smallest acceptable value
/// * `name` - Name of the parameter for error messages
///
/// # Errors
/// Returns an error if the value is below the minimum
///
/// # Example
/// ```
/// use linekit_lib::validation::validate_at_least;
///
/// validate_at_least(32, 2, "merge-width").unwrap();
///
/// let result = validate_at_least(1, 2, "merge-width");
/// assert!(result.is_err());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn validate_at_least<T: Ord + Display>(value: T, min: T, name: &str) -> Result<()> {
    if value < min {
        return Err(LinekitError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be at least {min}, got: {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_file_exists_valid() {
        let temp_file = NamedTempFile::new().unwrap();
        validate_file_exists(temp_file.path(), "Test file").unwrap();
    }

    #[test]
    fn test_validate_file_exists_invalid() {
        let result = validate_file_exists("/nonexistent/lines.txt", "Input file");
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Input file"));
        assert!(err_msg.contains("does not exist"));
    }

    #[rstest]
    #[case(1, true, "smallest positive value")]
    #[case(1024, true, "typical batch size")]
    #[case(0, false, "zero")]
    #[case(-5, false, "negative")]
    fn test_validate_positive(
        #[case] value: i64,
        #[case] should_succeed: bool,
        #[case] description: &str,
    ) {
        let result = validate_positive(value, "batch-size");
        if should_succeed {
            assert!(result.is_ok(), "Failed for: {description}");
        } else {
            assert!(result.is_err(), "Should have failed for: {description}");
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("Must be positive"), "Missing message for: {description}");
        }
    }

    #[rstest]
    #[case(2, true, "exactly at minimum")]
    #[case(32, true, "above minimum")]
    #[case(1, false, "below minimum")]
    #[case(0, false, "far below minimum")]
    fn test_validate_at_least(
        #[case] value: usize,
        #[case] should_succeed: bool,
        #[case] description: &str,
    ) {
        let result = validate_at_least(value, 2, "merge-width");
        if should_succeed {
            assert!(result.is_ok(), "Failed for: {description}");
        } else {
            assert!(result.is_err(), "Should have failed for: {description}");
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("at least 2"), "Missing message for: {description}");
        }
    }
}
