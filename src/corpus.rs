//! In-memory corpus store built once at startup from tabular source data.
//!
//! Documents are immutable after load and keyed by their string id for the
//! lifetime of the process.

use crate::error::{SearchError, SearchResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Conventional filename-style suffix used by the `see` auto-completion
/// fallback.
const ID_SUFFIX: &str = ".txt";

/// A single corpus document. Immutable once loaded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub text: String,
}

/// Mapping from document id to its title and full text.
#[derive(Debug, Default)]
pub struct Corpus {
    docs: HashMap<String, Document>,
}

impl Corpus {
    /// Load the corpus from a CSV file with at least `id`, `title` and
    /// `text` columns. Extra columns are ignored; only the first `max_rows`
    /// rows are considered.
    pub fn load(path: &Path, max_rows: usize) -> SearchResult<Self> {
        let mut reader =
            csv::Reader::from_path(path).map_err(|e| SearchError::CorpusRead {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;

        let mut docs = HashMap::new();
        for row in reader.deserialize::<Document>().take(max_rows) {
            let doc = row.map_err(|e| SearchError::CorpusRead {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
            docs.insert(doc.id.clone(), doc);
        }

        info!(documents = docs.len(), path = %path.display(), "corpus loaded");
        Ok(Self { docs })
    }

    /// Exact-match lookup with an auto-completion fallback: an id lacking
    /// the conventional `.txt` suffix resolves to the suffixed form when
    /// that form exists in the store. The suffixed form wins if both are
    /// present.
    pub fn get(&self, id: &str) -> Option<&Document> {
        if !id.ends_with(ID_SUFFIX) {
            let suffixed = format!("{id}{ID_SUFFIX}");
            if let Some(doc) = self.docs.get(&suffixed) {
                return Some(doc);
            }
        }
        self.docs.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Build a corpus directly from documents. Used by tests and tools that
    /// bypass the CSV source.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let docs = documents
            .into_iter()
            .map(|doc| (doc.id.clone(), doc))
            .collect();
        Self { docs }
    }
}
