use chrono::{DateTime, Utc};

/// One external reference item supporting or refuting a claim.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceSnippet {
    pub title: String,
    pub snippet: String,
    pub url: String,
    /// Relevance assigned at retrieval time, always within [0, 100]
    pub relevance_score: f32,
}

/// Verdict for a single claim, derived from its keyword score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClaimStatus {
    Supported,
    Unclear,
    Contradicted,
}

/// One extracted factual statement with its verification result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: String,
    pub text: String,
    /// Keyword-overlap score within [0, 100]
    pub score: u8,
    pub status: ClaimStatus,
    /// Kept in retrieval order for display
    pub evidence: Vec<EvidenceSnippet>,
    /// Which evidence strategy produced this result
    pub verification_method: String,
}

/// Aggregate trust result over all claims, without the claim list itself.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustSummary {
    pub trust_score: u8,
    pub status_text: String,
    pub explanation: String,
}

/// Full result of one analysis run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisVerdict {
    pub trust_score: u8,
    pub status_text: String,
    pub explanation: String,
    pub claims: Vec<Claim>,
}

/// A stored analysis. The API layer assigns `id` and `created_at`; the
/// pipeline itself is identifier- and timestamp-agnostic.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: String,
    pub input_text: String,
    pub trust_score: u8,
    pub status_text: String,
    pub explanation: String,
    pub claims: Vec<Claim>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snippet_uses_camel_case_wire_names() {
        let snippet = EvidenceSnippet {
            title: "Result".to_string(),
            snippet: "Body".to_string(),
            url: "https://en.wikipedia.org/wiki/Example".to_string(),
            relevance_score: 80.0,
        };
        let json = serde_json::to_value(&snippet).unwrap();
        assert_eq!(json["relevanceScore"], 80.0);
        assert!(json.get("relevance_score").is_none());
    }

    #[test]
    fn test_claim_status_serializes_as_display_string() {
        assert_eq!(
            serde_json::to_string(&ClaimStatus::Supported).unwrap(),
            "\"Supported\""
        );
        assert_eq!(
            serde_json::to_string(&ClaimStatus::Contradicted).unwrap(),
            "\"Contradicted\""
        );
    }

    #[test]
    fn test_claim_round_trips_through_json() {
        let claim = Claim {
            id: "c1".to_string(),
            text: "The Earth orbits the Sun".to_string(),
            score: 61,
            status: ClaimStatus::Unclear,
            evidence: vec![],
            verification_method: "web-search-fallback".to_string(),
        };
        let json = serde_json::to_string(&claim).unwrap();
        assert!(json.contains("verificationMethod"));
        let back: Claim = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, claim.score);
        assert_eq!(back.status, claim.status);
    }
}
