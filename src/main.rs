//! CLI entry point for the semantic search REPL.
//!
//! Loads the corpus and the precomputed embedding artifact, initializes the
//! query embedding model, then hands control to the interactive loop. A
//! missing artifact is fatal before the first prompt; everything after that
//! is handled inside the loop.

use clap::{
    Parser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use semquery::io::ExitCode;
use semquery::semantic::{EmbeddingArtifact, FastEmbedder, SemanticRanker, TextEmbedder};
use semquery::{Corpus, SearchError, Session, Settings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Semantic search over a precomputed document embedding corpus
#[derive(Parser)]
#[command(
    name = "semquery",
    version = env!("CARGO_PKG_VERSION"),
    about = "Semantic search over a precomputed document embedding corpus",
    long_about = "Loads a CSV corpus and its precomputed embedding artifact, then serves an \
                  interactive loop: query <text> | see <doc_id> | end.",
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = if let Some(config_path) = &cli.config {
        Settings::load_from(config_path).unwrap_or_else(|e| {
            eprintln!(
                "Configuration error loading from {}: {}",
                config_path.display(),
                e
            );
            std::process::exit(ExitCode::ConfigError.into());
        })
    } else {
        Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            Settings::default()
        })
    };

    let corpus = Corpus::load(&settings.corpus_path, settings.max_rows)
        .unwrap_or_else(|e| exit_with(e));

    // Fatal if the artifact is absent: regenerating embeddings is an
    // external preprocessing responsibility, not ours.
    let artifact =
        EmbeddingArtifact::load(&settings.artifact_path).unwrap_or_else(|e| exit_with(e));
    let ranker = SemanticRanker::from_artifact(artifact).unwrap_or_else(|e| exit_with(e));

    let embedder = FastEmbedder::new(&settings.search.model).unwrap_or_else(|e| exit_with(e));

    // The artifact must have been produced by a model of the same
    // dimension, or every ranking would be silently meaningless.
    ranker
        .check_query_dimension(embedder.dimension())
        .unwrap_or_else(|e| exit_with(e));

    eprintln!(
        "Loaded {} documents, {} embeddings (dimension {})",
        corpus.len(),
        ranker.len(),
        ranker.dimension()
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(&corpus, &ranker, embedder, settings.search.top_k);
    if let Err(e) = session.run(stdin.lock(), stdout.lock()) {
        eprintln!("Error: {e}");
        std::process::exit(ExitCode::IoError.into());
    }
}

fn exit_with(error: SearchError) -> ! {
    eprintln!("Error: {error}");
    for suggestion in error.recovery_suggestions() {
        eprintln!("Suggestion: {suggestion}");
    }
    std::process::exit(ExitCode::from_error(&error).into());
}
