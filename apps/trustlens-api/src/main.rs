//! TrustLens API Server - Backend for text trust analysis
//!
//! Provides REST endpoints for:
//! - Submitting text for claim verification
//! - Browsing past analyses
//! - Session-based account management
//!
//! The verification pipeline itself lives in the `trust-engine` crate;
//! this server is the I/O shell around it: routing, rate limiting,
//! authentication, and persistence of analysis records.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trust_engine::TrustEngine;

mod auth;
mod error;
mod handlers;
mod models;
mod state;

use state::AppState;

/// Command-line arguments for the TrustLens server
#[derive(Parser, Debug)]
#[command(name = "trustlens-api")]
#[command(about = "TrustLens server for text trust analysis")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: seconds per replenished analyze request per IP
    #[arg(long, default_value = "6")]
    rate_limit_seconds: u64,

    /// Rate limit: analyze request burst per IP
    #[arg(long, default_value = "20")]
    rate_limit_burst: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize application state; search mode comes from the environment
    info!("Initializing TrustLens API...");
    let engine = TrustEngine::from_env();
    let state = Arc::new(AppState::new(engine).await?);

    // Rate limiter for the analyze endpoint (token bucket per client IP)
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit_seconds)
            .burst_size(args.rate_limit_burst)
            .finish()
            .expect("Failed to create rate limiter config"),
    );

    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Analysis is the only expensive route; it alone carries the limiter
    let analyze_route = Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route_layer(GovernorLayer {
            config: governor_conf,
        });

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(handlers::health))
        .merge(analyze_route)
        // Analysis history
        .route("/api/history", get(handlers::history))
        .route("/api/analysis/:id", get(handlers::get_analysis))
        // Account endpoints
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("TrustLens API listening on http://{}", addr);
    info!(
        "Analyze rate limit: burst {} / one per {}s per IP",
        args.rate_limit_burst, args.rate_limit_seconds
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
