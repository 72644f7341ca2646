//! Configuration module for the semantic search REPL.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `SQ_` and use double
//! underscores to separate nested levels:
//! - `SQ_MAX_ROWS=5000` sets `max_rows`
//! - `SQ_SEARCH__TOP_K=10` sets `search.top_k`
//! - `SQ_SEARCH__MODEL=AllMiniLML6V2` sets `search.model`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Path to the tabular corpus (CSV with id, title, text columns)
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    /// Path to the precomputed embedding artifact
    #[serde(default = "default_artifact_path")]
    pub artifact_path: PathBuf,

    /// Maximum number of corpus rows loaded at startup
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Semantic search settings
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// Model to use for query embeddings
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Number of ranked results returned per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_corpus_path() -> PathBuf {
    PathBuf::from("corpus.csv")
}
fn default_artifact_path() -> PathBuf {
    PathBuf::from("doc_embeddings.json")
}
fn default_max_rows() -> usize {
    100_000
}
fn default_false() -> bool {
    false
}
fn default_embedding_model() -> String {
    "AllMiniLML6V2".to_string()
}
fn default_top_k() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            corpus_path: default_corpus_path(),
            artifact_path: default_artifact_path(),
            max_rows: default_max_rows(),
            debug: false,
            search: SearchConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
            top_k: default_top_k(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(".semquery/settings.toml"));

        Self::figment(&config_path).extract().map_err(Box::new)
    }

    /// Load configuration from an explicit settings file
    pub fn load_from(path: &std::path::Path) -> Result<Self, Box<figment::Error>> {
        Self::figment(path).extract().map_err(Box::new)
    }

    fn figment(config_path: &std::path::Path) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Layer in environment variables with SQ_ prefix.
            // Double underscore becomes a dot, single underscore stays.
            .merge(Env::prefixed("SQ_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
    }

    /// Find the workspace root by looking for a .semquery directory,
    /// searching from the current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(".semquery");
            if config_dir.exists() && config_dir.is_dir() {
                return Some(config_dir.join("settings.toml"));
            }
        }

        None
    }

    /// Directory where downloaded embedding models are cached
    pub fn models_dir() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".semquery").join("models"))
            .unwrap_or_else(|| PathBuf::from(".semquery/models"))
    }
}
