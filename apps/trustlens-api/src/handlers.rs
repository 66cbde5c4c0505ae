//! HTTP handlers for the TrustLens API

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use shared_types::AnalysisRecord;

use crate::error::ApiError;
use crate::models::{AnalyzeRequest, DbAnalysis, MIN_INPUT_LEN};
use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "trustlens-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: POST /api/analyze
///
/// Runs the verification pipeline over the submitted text, persists the
/// verdict with a fresh id and timestamp, and returns the stored record.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisRecord>, ApiError> {
    let text = req.text.trim().to_string();
    if text.chars().count() < MIN_INPUT_LEN {
        return Err(ApiError::InvalidRequest(format!(
            "Text must be at least {MIN_INPUT_LEN} characters"
        )));
    }

    tracing::info!("Analyzing {} characters of input", text.chars().count());
    let verdict = state.engine.analyze(&text).await;

    let record = AnalysisRecord {
        id: Uuid::new_v4().to_string(),
        input_text: text,
        trust_score: verdict.trust_score,
        status_text: verdict.status_text,
        explanation: verdict.explanation,
        claims: verdict.claims,
        created_at: Utc::now(),
    };

    let claims_json =
        serde_json::to_string(&record.claims).map_err(|e| ApiError::Internal(e.into()))?;

    sqlx::query(
        r#"
        INSERT INTO analyses (id, input_text, trust_score, status_text, explanation, claims_json, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(&record.input_text)
    .bind(i64::from(record.trust_score))
    .bind(&record.status_text)
    .bind(&record.explanation)
    .bind(&claims_json)
    .bind(record.created_at.to_rfc3339())
    .execute(&state.db)
    .await?;

    tracing::info!(
        "Stored analysis {}: trust {} across {} claims",
        record.id,
        record.trust_score,
        record.claims.len()
    );

    Ok(Json(record))
}

/// Handler: GET /api/history — all analyses, newest first
pub async fn history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AnalysisRecord>>, ApiError> {
    let rows: Vec<DbAnalysis> = sqlx::query_as(
        r#"
        SELECT id, input_text, trust_score, status_text, explanation, claims_json, created_at
        FROM analyses
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(DbAnalysis::into_record).collect()))
}

/// Handler: GET /api/analysis/:id
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisRecord>, ApiError> {
    let row: Option<DbAnalysis> = sqlx::query_as(
        r#"
        SELECT id, input_text, trust_score, status_text, explanation, claims_json, created_at
        FROM analyses
        WHERE id = ?
        "#,
    )
    .bind(&id)
    .fetch_optional(&state.db)
    .await?;

    let row = row.ok_or_else(|| ApiError::AnalysisNotFound(id))?;
    Ok(Json(row.into_record()))
}
