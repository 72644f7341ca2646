//! Cosine-similarity ranking over the fixed embedding table.
//!
//! A linear O(N * D) scan over every row, no index structure. N is assumed
//! small enough for interactive latency.

use crate::error::{SearchError, SearchResult};
use crate::semantic::artifact::EmbeddingArtifact;
use tracing::debug;

/// One ranked result: a document id with its similarity score.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f32,
}

/// Read-only ranker over the ordered id sequence and its N x D matrix.
///
/// Row i of `embeddings` corresponds to `doc_ids[i]`; the table is never
/// mutated after construction.
#[derive(Debug)]
pub struct SemanticRanker {
    doc_ids: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    dimension: usize,
}

impl SemanticRanker {
    /// Build the ranker from a validated artifact.
    pub fn from_artifact(artifact: EmbeddingArtifact) -> SearchResult<Self> {
        Ok(Self {
            doc_ids: artifact.doc_ids,
            embeddings: artifact.doc_embeddings,
            dimension: artifact.dimension,
        })
    }

    /// Rank every document against the query vector by cosine similarity.
    ///
    /// Scores are sorted descending; ties keep original row order (stable
    /// sort). Returns the top `min(limit, N)` hits.
    pub fn rank(&self, query: &[f32], limit: usize) -> Vec<SearchHit> {
        let start = std::time::Instant::now();

        let mut hits: Vec<SearchHit> = self
            .doc_ids
            .iter()
            .zip(self.embeddings.iter())
            .map(|(id, row)| SearchHit {
                doc_id: id.clone(),
                score: cosine_similarity(query, row),
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);

        debug!(
            candidates = self.doc_ids.len(),
            returned = hits.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "ranked query"
        );
        hits
    }

    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Verify that query vectors of `actual` dimension can be ranked
    /// against this table.
    ///
    /// An artifact built with a different-dimension model would otherwise
    /// load cleanly and produce plausible-looking but meaningless scores,
    /// since the dot product truncates to the shorter vector.
    pub fn check_query_dimension(&self, actual: usize) -> SearchResult<()> {
        if !self.is_empty() && actual != self.dimension {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimension,
                actual,
            });
        }
        Ok(())
    }
}

/// Calculate cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
