//! semquery: interactive semantic search over a precomputed embedding corpus.
//!
//! The library is split along the two read-only tables the binary loads at
//! startup: the [`corpus::Corpus`] (document id -> title/text) and the
//! [`semantic::SemanticRanker`] (ordered doc ids paired with an N x D
//! embedding matrix). The [`repl`] module composes the two behind a blocking
//! line-oriented command loop.

pub mod config;
pub mod corpus;
pub mod error;
pub mod io;
pub mod repl;
pub mod semantic;

pub use config::Settings;
pub use corpus::{Corpus, Document};
pub use error::{SearchError, SearchResult};
pub use repl::{Command, ReplState, Session};
pub use semantic::{EmbeddingArtifact, FastEmbedder, SearchHit, SemanticRanker, TextEmbedder};
