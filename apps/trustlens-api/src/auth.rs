//! Session-based authentication.
//!
//! Passwords are hashed with Argon2id. Sessions are HMAC-SHA256 signed
//! tokens carried in an httpOnly cookie; no server-side session table.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CredentialsRequest, DbUser, UserResponse};
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Session lifetime (7 days)
const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

const SESSION_COOKIE: &str = "session";

/// Signs and verifies session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    secret: String,
}

impl SessionKeys {
    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .unwrap_or_else(|_| "dev-session-secret".to_string());
        if secret == "dev-session-secret" {
            tracing::warn!("SESSION_SECRET not set, using development default");
        }
        Self { secret }
    }

    #[cfg(test)]
    pub fn for_tests(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
        }
    }

    /// Token format: `base64(uid).exp.base64(hmac(uid_b64.exp))`
    pub fn sign(&self, user_id: &str) -> String {
        let expires_at = Utc::now().timestamp() + SESSION_TTL_SECS;
        let uid_b64 = URL_SAFE_NO_PAD.encode(user_id.as_bytes());
        let signing_input = format!("{uid_b64}.{expires_at}");
        let signature = URL_SAFE_NO_PAD.encode(self.mac(&signing_input));
        format!("{signing_input}.{signature}")
    }

    /// Validate signature and expiry; returns the user id on success.
    pub fn verify(&self, token: &str) -> Option<String> {
        let mut parts = token.split('.');
        let uid_b64 = parts.next()?;
        let expires_at: i64 = parts.next()?.parse().ok()?;
        let signature_b64 = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let signing_input = format!("{uid_b64}.{expires_at}");
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes()).ok()?;
        mac.update(signing_input.as_bytes());
        let expected = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
        mac.verify_slice(&expected).ok()?;

        if expires_at < Utc::now().timestamp() {
            return None;
        }

        let uid = URL_SAFE_NO_PAD.decode(uid_b64).ok()?;
        String::from_utf8(uid).ok()
    }

    fn mac(&self, input: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(input.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Hash a password with Argon2id and a random salt, in PHC string format.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
}

/// Verify a password against a stored PHC hash. Malformed hashes verify
/// as false rather than erroring.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Read the authenticated user id from the request's session cookie.
pub fn user_id_from_headers(keys: &SessionKeys, headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    let token = cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(&format!("{SESSION_COOKIE}=")))?;
    keys.verify(token)
}

fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECS}")
}

fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn with_session(state: &AppState, user: UserResponse) -> Response {
    let token = state.sessions.sign(&user.id);
    (
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(user),
    )
        .into_response()
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Response, ApiError> {
    let email = req.email.trim().to_string();
    if email.len() < 5 || req.password.len() < 6 {
        return Err(ApiError::InvalidRequest(
            "Email or password too short".to_string(),
        ));
    }

    let existing: Option<DbUser> =
        sqlx::query_as("SELECT id, email, password_hash, created_at FROM users WHERE email = ?")
            .bind(&email)
            .fetch_optional(&state.db)
            .await?;
    if existing.is_some() {
        return Err(ApiError::UserExists);
    }

    let user_id = Uuid::new_v4().to_string();
    let password_hash = hash_password(&req.password)?;

    sqlx::query("INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)")
        .bind(&user_id)
        .bind(&email)
        .bind(&password_hash)
        .bind(Utc::now().to_rfc3339())
        .execute(&state.db)
        .await?;

    tracing::info!("Registered user: {}", user_id);

    // Auto-login after registration
    Ok(with_session(&state, UserResponse { id: user_id, email }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Response, ApiError> {
    let user: Option<DbUser> =
        sqlx::query_as("SELECT id, email, password_hash, created_at FROM users WHERE email = ?")
            .bind(req.email.trim())
            .fetch_optional(&state.db)
            .await?;

    let user = user.ok_or(ApiError::InvalidCredentials)?;
    if !verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    Ok(with_session(
        &state,
        UserResponse {
            id: user.id,
            email: user.email,
        },
    ))
}

/// POST /api/auth/logout
pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({ "ok": true })),
    )
        .into_response()
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id =
        user_id_from_headers(&state.sessions, &headers).ok_or(ApiError::Unauthorized)?;

    let user: Option<DbUser> =
        sqlx::query_as("SELECT id, email, password_hash, created_at FROM users WHERE id = ?")
            .bind(&user_id)
            .fetch_optional(&state.db)
            .await?;

    let user = user.ok_or(ApiError::Unauthorized)?;
    Ok(Json(UserResponse {
        id: user.id,
        email: user.email,
    }))
}
