//! Error types for the semantic search REPL.
//!
//! This module provides structured error types using thiserror for better
//! error handling and actionable error messages. The taxonomy mirrors how
//! errors surface to the user: only a missing embedding artifact is fatal,
//! everything else is rendered as a warning by the command loop.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for corpus and search operations
#[derive(Error, Debug)]
pub enum SearchError {
    /// The embedding artifact is absent. Fatal at startup: there is no
    /// regeneration path inside this program.
    #[error(
        "Embedding artifact not found at '{path}'. Run the preprocessing step to generate it first."
    )]
    ArtifactMissing { path: PathBuf },

    #[error("Embedding artifact at '{path}' is corrupted: {reason}")]
    ArtifactCorrupted { path: PathBuf, reason: String },

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Corpus file errors (missing file, malformed rows)
    #[error("Failed to read corpus from '{path}': {source}")]
    CorpusRead {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to initialize embedding model: {0}")]
    ModelInit(String),

    #[error("Failed to generate embedding: {0}")]
    Embedding(String),

    /// Empty or whitespace-only query text. The embedding model must not be
    /// invoked for these.
    #[error("Please enter a valid query.")]
    EmptyQuery,

    #[error("Document ID '{id}' not found.")]
    DocumentNotFound { id: String },

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },
}

impl SearchError {
    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::ArtifactMissing { .. } => vec![
                "Run the external preprocessing step to produce the embedding artifact",
                "Check artifact_path in .semquery/settings.toml points at the generated file",
            ],
            Self::ArtifactCorrupted { .. } | Self::DimensionMismatch { .. } => vec![
                "Regenerate the embedding artifact with the preprocessing step",
                "Make sure the artifact and the corpus come from the same run",
            ],
            Self::CorpusRead { .. } => vec![
                "Check that the corpus CSV exists and has id, title, text columns",
                "Ensure you have read permissions on the file",
            ],
            Self::ModelInit(_) => vec![
                "Ensure you have an internet connection for the first-time model download",
                "Check write permissions on the model cache directory",
            ],
            _ => vec![],
        }
    }

    /// Whether this error must terminate the process rather than be rendered
    /// as a command-level warning.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ArtifactMissing { .. }
                | Self::ArtifactCorrupted { .. }
                | Self::CorpusRead { .. }
                | Self::ModelInit(_)
                | Self::ConfigError { .. }
        )
    }
}

/// Result type alias for search operations
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_missing_message_mentions_not_found() {
        let err = SearchError::ArtifactMissing {
            path: PathBuf::from("doc_embeddings.json"),
        };
        assert!(err.to_string().contains("not found"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_warning_level_errors_are_not_fatal() {
        assert!(!SearchError::EmptyQuery.is_fatal());
        assert!(
            !SearchError::DocumentNotFound {
                id: "99999999".to_string()
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_document_not_found_message() {
        let err = SearchError::DocumentNotFound {
            id: "42.txt".to_string(),
        };
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("42.txt"));
    }
}
