//! Terminal rendering of ranked phrases.

use phrase_core::{RankedResult, SearchOutcome, Source};
use phrase_ingest::IngestFailure;
use std::io::{self, Write};

pub const NO_DOCUMENTS: &str = "No documents/websites uploaded yet!";

/// Web results are attributed to their URL, files to their title.
pub fn source_label(result: &RankedResult) -> String {
    match &result.source {
        Source::Web { url } => format!("\u{1f310} {url}"),
        Source::File => format!("\u{1f4c4} {}", result.title),
    }
}

pub fn render_outcome<W: Write>(out: &mut W, outcome: &SearchOutcome) -> io::Result<()> {
    if outcome.results.is_empty() {
        writeln!(out, "No matching phrases ({} sentences searched)", outcome.sentences_indexed)?;
        return Ok(());
    }
    writeln!(out, "Top {} Matching Phrases", outcome.results.len())?;
    writeln!(out)?;
    for (idx, result) in outcome.results.iter().enumerate() {
        writeln!(out, "{}. Score: {:.2}%", idx + 1, result.score * 100.0)?;
        writeln!(out, "   Source: {}", source_label(result))?;
        writeln!(out, "   Matched Phrase: {}", result.sentence)?;
        writeln!(out, "---")?;
    }
    Ok(())
}

pub fn render_json<W: Write>(out: &mut W, outcome: &SearchOutcome) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, outcome)?;
    writeln!(out)
}

pub fn render_failures<W: Write>(out: &mut W, failures: &[IngestFailure]) -> io::Result<()> {
    for failure in failures {
        writeln!(out, "warning: could not ingest {}: {}", failure.origin, failure.reason)?;
    }
    Ok(())
}
