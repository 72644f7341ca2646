//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - the session ended with `end` or end-of-input
//! - `1`: General error - unspecified failure
//! - `3-125`: Specific recoverable errors
//! - `126-255`: Reserved by shell

use crate::error::SearchError;

/// Standard exit codes for CLI operations.
///
/// These codes follow Unix conventions where 0 indicates success,
/// and non-zero values indicate various error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Session completed normally (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// Entity not found (code 3)
    NotFound = 3,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    /// Convert a `SearchError` to the appropriate exit code.
    ///
    /// Only startup-time errors ever reach process exit; command-level
    /// warnings are handled inside the loop and never escalate.
    pub fn from_error(error: &SearchError) -> Self {
        match error {
            SearchError::ArtifactMissing { .. } => ExitCode::GeneralError,
            SearchError::ArtifactCorrupted { .. } | SearchError::DimensionMismatch { .. } => {
                ExitCode::GeneralError
            }
            SearchError::CorpusRead { .. } => ExitCode::IoError,
            SearchError::ConfigError { .. } => ExitCode::ConfigError,
            SearchError::DocumentNotFound { .. } => ExitCode::NotFound,
            _ => ExitCode::GeneralError,
        }
    }

    /// Check if this exit code indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }

    /// Get a human-readable description of the exit code.
    pub fn description(&self) -> &str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::NotFound => "Not found",
            ExitCode::IoError => "I/O error",
            ExitCode::ConfigError => "Configuration error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success as u8, 0);
        assert_eq!(ExitCode::GeneralError as u8, 1);
        assert_eq!(ExitCode::NotFound as u8, 3);
        assert_eq!(ExitCode::IoError as u8, 5);
    }

    #[test]
    fn test_is_success() {
        assert!(ExitCode::Success.is_success());
        assert!(!ExitCode::NotFound.is_success());
        assert!(!ExitCode::GeneralError.is_success());
    }

    #[test]
    fn test_from_error() {
        let missing = SearchError::ArtifactMissing {
            path: PathBuf::from("doc_embeddings.json"),
        };
        assert_eq!(ExitCode::from_error(&missing), ExitCode::GeneralError);

        let corpus = SearchError::CorpusRead {
            path: PathBuf::from("corpus.csv"),
            source: "missing header".into(),
        };
        assert_eq!(ExitCode::from_error(&corpus), ExitCode::IoError);
    }
}
