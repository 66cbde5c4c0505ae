//! Domain-quality-weighted keyword-overlap scoring.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{Claim, ClaimStatus, EvidenceSnippet};
use uuid::Uuid;

use crate::evidence::{domains, RetrievedEvidence};

/// Score at or above which a claim counts as supported
pub const SUPPORTED_THRESHOLD: u8 = 70;

/// Score below which a claim counts as contradicted
pub const CONTRADICTED_THRESHOLD: u8 = 40;

/// A claim whose tokens are all too short to score is treated as
/// neutrally unclear-leaning rather than penalized to zero
const NO_KEYWORDS_SCORE: f64 = 50.0;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W+").unwrap();
}

/// Compute the keyword-overlap score for a claim against its evidence.
/// Pure given the evidence; always within [0, 100].
pub fn keyword_score(claim: &str, evidence: &[EvidenceSnippet]) -> f64 {
    if evidence.is_empty() {
        return 0.0;
    }

    let lowered = claim.to_lowercase();
    let keywords: Vec<&str> = NON_WORD
        .split(&lowered)
        .filter(|word| word.chars().count() > 3)
        .collect();

    if keywords.is_empty() {
        return NO_KEYWORDS_SCORE;
    }

    let mut total_match_score = 0.0;
    for snippet in evidence {
        let haystack = format!("{} {}", snippet.title, snippet.snippet).to_lowercase();
        let matches = keywords
            .iter()
            .filter(|word| haystack.contains(**word))
            .count();

        let match_ratio = matches as f64 / keywords.len() as f64;
        let weighted_relevance =
            f64::from(snippet.relevance_score) * domains::quality_weight(&snippet.url);
        total_match_score += match_ratio * weighted_relevance;
    }

    (total_match_score / evidence.len() as f64).clamp(0.0, 100.0)
}

/// Map a score to its tri-state verdict. Thresholds are fixed design
/// constants, not configurable.
pub fn status_for_score(score: u8) -> ClaimStatus {
    if score >= SUPPORTED_THRESHOLD {
        ClaimStatus::Supported
    } else if score >= CONTRADICTED_THRESHOLD {
        ClaimStatus::Unclear
    } else {
        ClaimStatus::Contradicted
    }
}

/// Assemble the immutable claim record from a claim text and the evidence
/// retrieved for it.
pub fn build_claim(text: String, retrieved: RetrievedEvidence) -> Claim {
    let score = keyword_score(&text, &retrieved.snippets).round() as u8;

    Claim {
        id: Uuid::new_v4().to_string(),
        text,
        score,
        status: status_for_score(score),
        evidence: retrieved.snippets,
        verification_method: retrieved.method.as_str().to_string(),
    }
}
