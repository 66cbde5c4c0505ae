//! Aggregation of per-claim scores into the overall trust verdict.

use shared_types::{Claim, ClaimStatus, TrustSummary};

/// Trust score at or above which content reads as mostly supported
pub const MOSTLY_SUPPORTED_THRESHOLD: u8 = 75;

/// Trust score at or above which content reads as mixed
pub const MIXED_RESULTS_THRESHOLD: u8 = 50;

/// Maximum penalty, applied when every claim is contradicted
const CONTRADICTION_PENALTY: f64 = 25.0;

/// Compute the overall trust score, status label, and explanation for a
/// set of scored claims. Pure.
pub fn aggregate(claims: &[Claim]) -> TrustSummary {
    if claims.is_empty() {
        return TrustSummary {
            trust_score: 0,
            status_text: "No Claims Found".to_string(),
            explanation: "No verifiable claims were found in the input text.".to_string(),
        };
    }

    let total = claims.len();
    let avg_score = claims.iter().map(|c| f64::from(c.score)).sum::<f64>() / total as f64;

    let supported = count_status(claims, ClaimStatus::Supported);
    let unclear = count_status(claims, ClaimStatus::Unclear);
    let contradicted = count_status(claims, ClaimStatus::Contradicted);

    let penalty = contradicted as f64 / total as f64 * CONTRADICTION_PENALTY;
    let trust_score = (avg_score - penalty).clamp(0.0, 100.0).round() as u8;

    let status_text = if trust_score >= MOSTLY_SUPPORTED_THRESHOLD {
        "Mostly Supported"
    } else if trust_score >= MIXED_RESULTS_THRESHOLD {
        "Mixed Results"
    } else {
        "Low Confidence"
    };

    let tail = if trust_score >= MOSTLY_SUPPORTED_THRESHOLD {
        "Content is mostly supported by available evidence."
    } else if trust_score >= MIXED_RESULTS_THRESHOLD {
        "Content has some unclear or contradicted claims."
    } else {
        "Content has significant unsupported or contradicted claims."
    };

    let plural = if total != 1 { "s" } else { "" };
    let explanation = format!(
        "Overall score: {trust_score}/100. \
         Analysis found {supported} supported, {unclear} unclear, \
         and {contradicted} contradicted claim{plural}. {tail}"
    );

    TrustSummary {
        trust_score,
        status_text: status_text.to_string(),
        explanation,
    }
}

fn count_status(claims: &[Claim], status: ClaimStatus) -> usize {
    claims.iter().filter(|c| c.status == status).count()
}
