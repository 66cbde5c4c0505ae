//! Application state for the TrustLens API

use anyhow::Result;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use trust_engine::TrustEngine;

use crate::auth::SessionKeys;

pub struct AppState {
    pub db: SqlitePool,
    pub engine: TrustEngine,
    pub sessions: SessionKeys,
}

impl AppState {
    pub async fn new(engine: TrustEngine) -> Result<Self> {
        // Get database path from env or use default
        let db_path = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            let data_dir = std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data"));
            std::fs::create_dir_all(&data_dir).ok();
            format!("sqlite:{}/trustlens.db?mode=rwc", data_dir.display())
        });

        tracing::info!("Connecting to database: {}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_path)
            .await?;

        Self::run_migrations(&pool).await?;

        Ok(Self {
            db: pool,
            engine,
            sessions: SessionKeys::from_env(),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS analyses (
                id TEXT PRIMARY KEY,
                input_text TEXT NOT NULL,
                trust_score INTEGER NOT NULL,
                status_text TEXT NOT NULL,
                explanation TEXT NOT NULL,
                claims_json TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(pool)
        .await?;

        // History is served newest first
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_analyses_created_at ON analyses(created_at)
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(pool)
        .await?;

        tracing::info!("Migrations complete");
        Ok(())
    }
}
