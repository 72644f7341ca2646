//! End-to-end tests for the load-then-serve pipeline: CSV corpus plus JSON
//! embedding artifact in, scripted command session out. Uses a stub embedder
//! so no model download is required.

use semquery::error::{SearchError, SearchResult};
use semquery::semantic::{EmbeddingArtifact, SemanticRanker, TextEmbedder};
use semquery::{Corpus, Session};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

struct KeywordEmbedder;

impl TextEmbedder for KeywordEmbedder {
    fn embed_text(&self, text: &str) -> SearchResult<Vec<f32>> {
        let mut v = vec![0.1, 0.1, 0.1];
        if text.contains("bread") {
            v[0] = 1.0;
        }
        if text.contains("soup") {
            v[1] = 1.0;
        }
        if text.contains("salad") {
            v[2] = 1.0;
        }
        Ok(v)
    }

    fn dimension(&self) -> usize {
        3
    }
}

/// Write a three-document corpus and a matching artifact into `dir`.
fn write_fixtures(dir: &TempDir) -> (PathBuf, PathBuf) {
    let corpus_path = dir.path().join("corpus.csv");
    let mut file = std::fs::File::create(&corpus_path).unwrap();
    writeln!(file, "id,title,text").unwrap();
    writeln!(file, "10.txt,Sourdough Bread,Flour water salt and time").unwrap();
    writeln!(file, "20.txt,Minestrone Soup,Vegetables in broth").unwrap();
    writeln!(file, "30.txt,Caesar Salad,Romaine and croutons").unwrap();

    let artifact_path = dir.path().join("doc_embeddings.json");
    EmbeddingArtifact::new(
        "AllMiniLML6V2".to_string(),
        3,
        vec!["10.txt".to_string(), "20.txt".to_string(), "30.txt".to_string()],
        vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ],
    )
    .save(&artifact_path)
    .unwrap();

    (corpus_path, artifact_path)
}

fn run_script(script: &str) -> String {
    let dir = TempDir::new().unwrap();
    let (corpus_path, artifact_path) = write_fixtures(&dir);

    let corpus = Corpus::load(&corpus_path, 100_000).unwrap();
    let artifact = EmbeddingArtifact::load(&artifact_path).unwrap();
    let ranker = SemanticRanker::from_artifact(artifact).unwrap();

    let mut session = Session::new(&corpus, &ranker, KeywordEmbedder, 5);
    let mut out = Vec::new();
    session.run(script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn query_ranks_matching_document_first() {
    let out = run_script("query minestrone soup\nend\n");
    let soup_pos = out.find("20.txt | Minestrone Soup").unwrap();
    let first_rank = out.find("1. ").unwrap();
    assert!(out[first_rank..].starts_with("1. 20.txt"));
    assert!(soup_pos > first_rank);
    assert!(out.contains("Program terminated."));
}

#[test]
fn query_returns_all_documents_when_corpus_smaller_than_top_k() {
    let out = run_script("query soup\nend\n");
    assert!(out.contains("1. "));
    assert!(out.contains("2. "));
    assert!(out.contains("3. "));
    assert!(!out.contains("4. "));
}

#[test]
fn see_resolves_unsuffixed_id() {
    let out = run_script("see 10\nend\n");
    assert!(out.contains("[Title] Sourdough Bread"));
    assert!(out.contains("[Text] Flour water salt and time"));
}

#[test]
fn full_session_survives_every_warning_path() {
    let out = run_script("banana\nquery\nsee 99999999\nquery bread\nend\n");
    assert!(out.contains("Invalid command."));
    assert!(out.contains("Please enter a valid query."));
    assert!(out.contains("'99999999' not found"));
    assert!(out.contains("Query results for \"bread\":"));
    assert!(out.contains("Program terminated."));
}

#[test]
fn missing_artifact_is_fatal_with_not_found_message() {
    let dir = TempDir::new().unwrap();
    let err = EmbeddingArtifact::load(&dir.path().join("doc_embeddings.json")).unwrap_err();

    assert!(matches!(err, SearchError::ArtifactMissing { .. }));
    assert!(err.to_string().contains("not found"));
    assert!(err.is_fatal());
    assert!(!err.recovery_suggestions().is_empty());
}

#[test]
fn wrong_dimension_embedder_is_rejected_before_any_query() {
    let dir = TempDir::new().unwrap();
    let (_, artifact_path) = write_fixtures(&dir);

    let artifact = EmbeddingArtifact::load(&artifact_path).unwrap();
    let ranker = SemanticRanker::from_artifact(artifact).unwrap();

    // The fixture artifact is 3-dimensional; a 384-dim query model must be
    // refused at startup instead of producing skewed scores.
    match ranker.check_query_dimension(384) {
        Err(SearchError::DimensionMismatch { expected, actual }) => {
            assert_eq!(expected, 3);
            assert_eq!(actual, 384);
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
    assert!(ranker.check_query_dimension(KeywordEmbedder.dimension()).is_ok());
}

#[test]
fn artifact_round_trip_preserves_row_order() {
    let dir = TempDir::new().unwrap();
    let (_, artifact_path) = write_fixtures(&dir);

    let artifact = EmbeddingArtifact::load(&artifact_path).unwrap();
    assert_eq!(artifact.doc_ids, vec!["10.txt", "20.txt", "30.txt"]);
    // Row i must still correspond to doc_ids[i]
    assert_eq!(artifact.doc_embeddings[2], vec![0.0, 0.0, 1.0]);
}
