//! Claim verification pipeline.
//!
//! Decomposes free text into sentence-level claims, gathers allow-listed
//! evidence for each claim, scores claims by domain-quality-weighted
//! keyword overlap, and aggregates the results into a single trust
//! verdict with a human-readable explanation.
//!
//! Data flows one way: text -> claims -> (claim, evidence) pairs ->
//! scored claims -> aggregate verdict. The retriever's network boundary
//! is the only stateful edge; everything else is pure.

pub mod aggregate;
pub mod config;
pub mod evidence;
pub mod extractor;
pub mod scorer;

pub use config::{EngineConfig, SearchMode};
pub use evidence::{EvidenceRetriever, VerificationMethod};

use shared_types::{AnalysisVerdict, Claim};
use tokio::task::JoinSet;

/// Entry point for one analysis run. Cheap to clone; holds no state
/// across runs beyond the retriever's connection pool.
#[derive(Clone)]
pub struct TrustEngine {
    retriever: EvidenceRetriever,
}

impl TrustEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            retriever: EvidenceRetriever::new(config),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    /// Run the full pipeline over one input text.
    ///
    /// Claims are verified concurrently (at most [`extractor::MAX_CLAIMS`]
    /// tasks); each task carries its extraction index so the final claim
    /// order always matches extraction order, regardless of completion
    /// order. Always returns a verdict: a claim whose retrieval yields
    /// nothing scores zero rather than failing the run.
    pub async fn analyze(&self, text: &str) -> AnalysisVerdict {
        let claim_texts = extractor::extract_claims(text);
        let total = claim_texts.len();
        tracing::debug!(claims = total, "extracted claims");

        let mut tasks = JoinSet::new();
        for (index, claim_text) in claim_texts.into_iter().enumerate() {
            let retriever = self.retriever.clone();
            tasks.spawn(async move {
                let retrieved = retriever.retrieve(&claim_text).await;
                (index, scorer::build_claim(claim_text, retrieved))
            });
        }

        let mut slots: Vec<Option<Claim>> = std::iter::repeat_with(|| None).take(total).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, claim)) => slots[index] = Some(claim),
                Err(err) => tracing::error!("claim verification task failed: {err}"),
            }
        }
        let claims: Vec<Claim> = slots.into_iter().flatten().collect();

        let summary = aggregate::aggregate(&claims);
        AnalysisVerdict {
            trust_score: summary.trust_score,
            status_text: summary.status_text,
            explanation: summary.explanation,
            claims,
        }
    }
}
