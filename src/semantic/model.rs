//! Query embedding via a local pretrained text-embedding model.
//!
//! The model is fixed and named: only fastembed's `AllMiniLML6V2` is
//! supported, matching the model the preprocessing step embeds the corpus
//! with. Same text always maps to the same vector.

use crate::config::Settings;
use crate::error::{SearchError, SearchResult};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::Mutex;

/// Trait for mapping query text to an embedding vector.
///
/// The command loop is generic over this seam so tests can run without
/// downloading the real model.
pub trait TextEmbedder {
    /// Generate the embedding for a single query string.
    fn embed_text(&self, text: &str) -> SearchResult<Vec<f32>>;

    /// Dimension of the vectors this embedder produces.
    #[must_use]
    fn dimension(&self) -> usize;
}

/// FastEmbed-backed embedder (CPU execution).
pub struct FastEmbedder {
    /// The embedding model (wrapped in Mutex for interior mutability)
    model: Mutex<TextEmbedding>,
    dimension: usize,
}

impl std::fmt::Debug for FastEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedder")
            .field("model", &"<TextEmbedding>")
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl FastEmbedder {
    /// Create an embedder for the named model.
    ///
    /// Downloads the model on first use; later runs load it from the cache
    /// under `~/.semquery/models`.
    pub fn new(model_name: &str) -> SearchResult<Self> {
        let model = parse_model_name(model_name)?;
        let cache_dir = Settings::models_dir();

        // Tell the user whether this run will hit the network
        let has_cached_models = cache_dir.exists()
            && cache_dir
                .read_dir()
                .is_ok_and(|mut entries| entries.any(|_| true));
        if has_cached_models {
            eprintln!("Loading embedding model from cache...");
        } else {
            eprintln!("Downloading embedding model (first time only)...");
        }

        let mut text_model = TextEmbedding::try_new(
            InitOptions::new(model)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(true),
        )
        .map_err(|e| SearchError::ModelInit(e.to_string()))?;

        // Probe dimensions with a test embedding
        let probe = text_model
            .embed(vec!["test"], None)
            .map_err(|e| SearchError::Embedding(e.to_string()))?;
        let dimension = probe
            .into_iter()
            .next()
            .map(|v| v.len())
            .ok_or_else(|| SearchError::Embedding("model returned no vectors".to_string()))?;

        Ok(Self {
            model: Mutex::new(text_model),
            dimension,
        })
    }
}

impl TextEmbedder for FastEmbedder {
    fn embed_text(&self, text: &str) -> SearchResult<Vec<f32>> {
        let embeddings = self
            .model
            .lock()
            .map_err(|_| {
                SearchError::Embedding("embedding model lock was poisoned".to_string())
            })?
            .embed(vec![text], None)
            .map_err(|e| SearchError::Embedding(e.to_string()))?;

        let embedding = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::Embedding("model returned no vectors".to_string()))?;

        if embedding.len() != self.dimension {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn parse_model_name(name: &str) -> SearchResult<EmbeddingModel> {
    match name {
        "AllMiniLML6V2" => Ok(EmbeddingModel::AllMiniLML6V2),
        other => Err(SearchError::ModelInit(format!(
            "unsupported embedding model '{other}', only AllMiniLML6V2 is supported"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_name() {
        assert!(parse_model_name("AllMiniLML6V2").is_ok());
        let err = parse_model_name("Word2Vec").unwrap_err();
        assert!(matches!(err, SearchError::ModelInit(_)));
    }

    #[test]
    #[ignore = "Downloads 86MB model - run with --ignored for semantic tests"]
    fn test_embed_is_deterministic() {
        let embedder = FastEmbedder::new("AllMiniLML6V2").unwrap();

        let a = embedder.embed_text("chicken soup with rice").unwrap();
        let b = embedder.embed_text("chicken soup with rice").unwrap();

        assert_eq!(a.len(), embedder.dimension());
        assert_eq!(a, b);
    }
}
