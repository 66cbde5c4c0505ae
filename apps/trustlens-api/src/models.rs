//! Data models for the TrustLens API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{AnalysisRecord, Claim};
use sqlx::FromRow;

/// Request to analyze a block of text
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Minimum input length; shorter texts are rejected before the pipeline runs
pub const MIN_INPUT_LEN: usize = 10;

/// Registration / login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user account
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

/// Analysis row as stored in sqlite; claims are a JSON column
#[derive(Debug, Clone, FromRow)]
pub struct DbAnalysis {
    pub id: String,
    pub input_text: String,
    pub trust_score: i64,
    pub status_text: String,
    pub explanation: String,
    pub claims_json: String,
    pub created_at: DateTime<Utc>,
}

impl DbAnalysis {
    /// Decode the stored row back into the shared record type. A corrupt
    /// claims column degrades to an empty claim list rather than a 500.
    pub fn into_record(self) -> AnalysisRecord {
        let claims: Vec<Claim> = serde_json::from_str(&self.claims_json).unwrap_or_else(|e| {
            tracing::error!("undecodable claims column on analysis {}: {e}", self.id);
            Vec::new()
        });

        AnalysisRecord {
            id: self.id,
            input_text: self.input_text,
            trust_score: self.trust_score.clamp(0, 100) as u8,
            status_text: self.status_text,
            explanation: self.explanation,
            claims,
            created_at: self.created_at,
        }
    }
}

/// User row as stored in sqlite
#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    #[allow(dead_code)]
    pub created_at: DateTime<Utc>,
}
