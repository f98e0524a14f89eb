//! Global error handling for repotxt
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

/// Global error type for repotxt operations
#[derive(Error, Debug)]
pub enum RepoTxtError {
    /// Configuration errors (missing credential, bad output directory, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote listing or read failures
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Payload could not be decoded into raw bytes
    #[error("Decode error: {0}")]
    Decode(String),

    /// The remote did not provide an encoded payload for a file
    #[error("Missing encoding for {0}")]
    MissingEncoding(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Interactive prompt errors
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Repository URL could not be parsed
    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for repotxt operations
pub type Result<T> = std::result::Result<T, RepoTxtError>;

impl From<reqwest::Error> for RepoTxtError {
    fn from(error: reqwest::Error) -> Self {
        RepoTxtError::Fetch(error.to_string())
    }
}

impl From<walkdir::Error> for RepoTxtError {
    fn from(error: walkdir::Error) -> Self {
        RepoTxtError::Io(error.into())
    }
}

/// Creates a RepoTxtError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::RepoTxtError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_positive(n: i32) -> Result<i32> {
        ensure!(n > 0, Config, "expected a positive value, got {}", n);
        Ok(n)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(check_positive(3).unwrap(), 3);
        let err = check_positive(-1).unwrap_err();
        assert!(matches!(err, RepoTxtError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: expected a positive value, got -1"
        );
    }

    #[test]
    fn test_walkdir_error_maps_to_io() {
        let err = walkdir::WalkDir::new("/definitely/not/here/repotxt")
            .into_iter()
            .find_map(|e| e.err())
            .expect("walking a missing directory yields an error");
        assert!(matches!(RepoTxtError::from(err), RepoTxtError::Io(_)));
    }
}
