//! Blocking, line-oriented command loop.
//!
//! Three commands: `query <text>`, `see <doc_id>`, `end`. Every command-level
//! failure is rendered as a warning and the loop continues; only `end` (or
//! end of input) leaves the loop.

use crate::corpus::Corpus;
use crate::error::SearchError;
use crate::semantic::{SemanticRanker, TextEmbedder};
use std::io::{BufRead, Write};
use tracing::debug;

const USAGE: &str = "Invalid command. Use: query <text> | see <doc_id> | end";
const FAREWELL: &str = "Program terminated.";

/// A parsed input line. Keywords match case-insensitively, the remainder
/// keeps its original case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Query(&'a str),
    See(&'a str),
    End,
    Invalid,
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        if lower == "end" {
            Command::End
        } else if lower == "query" || lower.starts_with("query ") {
            Command::Query(trimmed[5..].trim())
        } else if lower.starts_with("see ") {
            Command::See(trimmed[4..].trim())
        } else {
            Command::Invalid
        }
    }
}

/// Loop states. `Processing` is transient within a single iteration;
/// `Terminated` is entered only on `end` or end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    AwaitingCommand,
    Processing,
    Terminated,
}

/// One interactive session over the two read-only tables loaded at startup.
pub struct Session<'a, E> {
    corpus: &'a Corpus,
    ranker: &'a SemanticRanker,
    embedder: E,
    top_k: usize,
}

impl<'a, E: TextEmbedder> Session<'a, E> {
    pub fn new(corpus: &'a Corpus, ranker: &'a SemanticRanker, embedder: E, top_k: usize) -> Self {
        Self {
            corpus,
            ranker,
            embedder,
            top_k,
        }
    }

    /// Run the read-evaluate-print cycle until `end` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> std::io::Result<()> {
        writeln!(out, "\nEnter command: query <text> | see <doc_id> | end")?;

        let mut state = ReplState::AwaitingCommand;
        let mut line = String::new();
        while state != ReplState::Terminated {
            write!(out, "\n>>> ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                // End of input behaves like `end`
                writeln!(out, "\n{FAREWELL}")?;
                break;
            }

            state = ReplState::Processing;
            debug!(?state, input = line.trim(), "dispatching");
            state = self.dispatch(&line, &mut out)?;
        }

        Ok(())
    }

    /// Handle one input line and return the next loop state.
    fn dispatch<W: Write>(&mut self, line: &str, out: &mut W) -> std::io::Result<ReplState> {
        match Command::parse(line) {
            Command::End => {
                writeln!(out, "{FAREWELL}")?;
                return Ok(ReplState::Terminated);
            }
            Command::Query(text) => self.handle_query(text, out)?,
            Command::See(id) => self.handle_see(id, out)?,
            Command::Invalid => {
                writeln!(out, "{USAGE}")?;
            }
        }
        Ok(ReplState::AwaitingCommand)
    }

    fn handle_query<W: Write>(&mut self, text: &str, out: &mut W) -> std::io::Result<()> {
        // Empty query text must not reach the embedding model
        if text.is_empty() {
            writeln!(out, "{}", SearchError::EmptyQuery)?;
            return Ok(());
        }

        let query = match self.embedder.embed_text(text) {
            Ok(vector) => vector,
            Err(e) => {
                writeln!(out, "Warning: {e}")?;
                return Ok(());
            }
        };

        debug!(query = text, "embedded query");
        let hits = self.ranker.rank(&query, self.top_k);

        writeln!(out, "\nQuery results for \"{text}\":")?;
        for (rank, hit) in hits.iter().enumerate() {
            let title = self
                .corpus
                .get(&hit.doc_id)
                .map_or("<not in corpus>", |doc| doc.title.as_str());
            writeln!(
                out,
                "{}. {} | {} | Score: {:.4}",
                rank + 1,
                hit.doc_id,
                title,
                hit.score
            )?;
        }
        Ok(())
    }

    fn handle_see<W: Write>(&self, id: &str, out: &mut W) -> std::io::Result<()> {
        match self.corpus.get(id) {
            Some(doc) => {
                writeln!(out, "\nDocument {} content:", doc.id)?;
                writeln!(out, "[Title] {}", doc.title)?;
                writeln!(out, "[Text] {}", doc.text)?;
            }
            None => {
                let err = SearchError::DocumentNotFound { id: id.to_string() };
                writeln!(out, "Warning: {err}")?;
            }
        }
        Ok(())
    }
}
