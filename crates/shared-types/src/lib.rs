pub mod types;

pub use types::{AnalysisRecord, AnalysisVerdict, Claim, ClaimStatus, EvidenceSnippet, TrustSummary};
