//! Semantic search: embedding artifact, query embedding model, and the
//! cosine-similarity ranker.

pub mod artifact;
pub mod model;
pub mod ranker;

pub use artifact::EmbeddingArtifact;
pub use model::{FastEmbedder, TextEmbedder};
pub use ranker::{SearchHit, SemanticRanker, cosine_similarity};
