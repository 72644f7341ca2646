//! Serialized embedding artifact produced by the external preprocessing
//! step.
//!
//! The artifact pairs an ordered sequence of document ids with an N x D
//! matrix of f32 vectors. Row i of the matrix corresponds to id i; the
//! table is read-only after load and nothing in this program may break that
//! positional correspondence.

use crate::error::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// On-disk embedding table: `doc_ids` paired 1:1 with `doc_embeddings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingArtifact {
    /// Version of the artifact format
    #[serde(default = "default_artifact_version")]
    pub version: u32,

    /// Name of the embedding model that produced the vectors
    pub model_name: String,

    /// Dimension of each embedding vector
    pub dimension: usize,

    /// Ordered document ids, length N
    pub doc_ids: Vec<String>,

    /// N x D matrix, row i belongs to `doc_ids[i]`
    pub doc_embeddings: Vec<Vec<f32>>,
}

fn default_artifact_version() -> u32 {
    EmbeddingArtifact::CURRENT_VERSION
}

impl EmbeddingArtifact {
    /// Current artifact format version
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(
        model_name: String,
        dimension: usize,
        doc_ids: Vec<String>,
        doc_embeddings: Vec<Vec<f32>>,
    ) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            model_name,
            dimension,
            doc_ids,
            doc_embeddings,
        }
    }

    /// Load and validate the artifact.
    ///
    /// An absent file is `ArtifactMissing`, which the binary treats as fatal
    /// before entering the command loop. There is no regeneration fallback.
    pub fn load(path: &Path) -> SearchResult<Self> {
        if !path.exists() {
            return Err(SearchError::ArtifactMissing {
                path: path.to_path_buf(),
            });
        }

        let json =
            std::fs::read_to_string(path).map_err(|e| SearchError::ArtifactCorrupted {
                path: path.to_path_buf(),
                reason: format!("failed to read file: {e}"),
            })?;

        let artifact: Self =
            serde_json::from_str(&json).map_err(|e| SearchError::ArtifactCorrupted {
                path: path.to_path_buf(),
                reason: format!("failed to parse JSON: {e}"),
            })?;

        artifact.validate(path)?;

        info!(
            embeddings = artifact.doc_ids.len(),
            dimension = artifact.dimension,
            model = %artifact.model_name,
            "embedding artifact loaded"
        );
        Ok(artifact)
    }

    /// Save the artifact as JSON. Used by the preprocessing tooling and by
    /// tests.
    pub fn save(&self, path: &Path) -> SearchResult<()> {
        let json =
            serde_json::to_string(self).map_err(|e| SearchError::ArtifactCorrupted {
                path: path.to_path_buf(),
                reason: format!("failed to serialize: {e}"),
            })?;
        std::fs::write(path, json).map_err(|e| SearchError::ArtifactCorrupted {
            path: path.to_path_buf(),
            reason: format!("failed to write file: {e}"),
        })?;
        Ok(())
    }

    fn validate(&self, path: &Path) -> SearchResult<()> {
        if self.version > Self::CURRENT_VERSION {
            return Err(SearchError::ArtifactCorrupted {
                path: path.to_path_buf(),
                reason: format!(
                    "artifact version {} is newer than supported version {}",
                    self.version,
                    Self::CURRENT_VERSION
                ),
            });
        }

        if self.doc_ids.len() != self.doc_embeddings.len() {
            return Err(SearchError::ArtifactCorrupted {
                path: path.to_path_buf(),
                reason: format!(
                    "{} doc_ids but {} embedding rows",
                    self.doc_ids.len(),
                    self.doc_embeddings.len()
                ),
            });
        }

        for (i, row) in self.doc_embeddings.iter().enumerate() {
            if row.len() != self.dimension {
                return Err(SearchError::ArtifactCorrupted {
                    path: path.to_path_buf(),
                    reason: format!(
                        "row {} has {} elements, expected dimension {}",
                        i,
                        row.len(),
                        self.dimension
                    ),
                });
            }
        }

        Ok(())
    }
}
