//! Sentence-level claim extraction.
//!
//! A lightweight sentence-boundary heuristic, not a language model: the
//! extracted "claims" are not guaranteed to be well-formed factual
//! assertions. That is a known limitation of the pipeline.

use lazy_static::lazy_static;
use regex::Regex;

/// Cap on claims per analysis
pub const MAX_CLAIMS: usize = 8;

/// Inclusive length bounds for a claim, in characters
pub const MIN_CLAIM_LEN: usize = 15;
pub const MAX_CLAIM_LEN: usize = 500;

/// Sentences starting with these are greetings or metadata, not claims
const REJECT_PREFIXES: &[&str] = &["hello", "hi ", "thanks", "note:"];

lazy_static! {
    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"[.!?]+").unwrap();
}

/// Split raw text into discrete claim candidates. Pure and deterministic.
///
/// Splits on runs of sentence-terminating punctuation, drops short
/// fragments and greeting/metadata sentences, and keeps at most
/// [`MAX_CLAIMS`] entries in their original order. Text with no sentence
/// boundary yields the whole trimmed input as a single candidate.
pub fn extract_claims(text: &str) -> Vec<String> {
    let sentences: Vec<&str> = SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > 10)
        .collect();

    sentences
        .into_iter()
        .filter(|sentence| is_claim_candidate(sentence))
        .take(MAX_CLAIMS)
        .map(str::to_string)
        .collect()
}

fn is_claim_candidate(sentence: &str) -> bool {
    let len = sentence.chars().count();
    if !(MIN_CLAIM_LEN..=MAX_CLAIM_LEN).contains(&len) {
        return false;
    }

    let lower = sentence.to_lowercase();
    !REJECT_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}
