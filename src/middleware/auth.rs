// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT session authentication.
//!
//! The session token is read from the `gymbro_token` cookie first, then from
//! an `Authorization: Bearer` header.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "gymbro_token";

/// Session lifetime in seconds (7 days).
pub const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Token from the session cookie or the Authorization header.
fn session_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(headers).map(str::to_string))
}

/// Validate a token and return the session user.
pub fn verify_jwt(token: &str, signing_key: &[u8]) -> Result<AuthUser, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::InvalidToken
    })?;

    if token_data.claims.sub.is_empty() {
        return Err(AppError::InvalidToken);
    }

    Ok(AuthUser {
        username: token_data.claims.sub,
    })
}

/// Session user for routes where authentication is optional.
pub fn optional_session(
    jar: &CookieJar,
    headers: &HeaderMap,
    signing_key: &[u8],
) -> Option<AuthUser> {
    let token = session_token(jar, headers)?;
    verify_jwt(&token, signing_key).ok()
}

/// Middleware for API routes: 401 JSON without a valid session.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(&jar, request.headers()).ok_or(AppError::Unauthorized)?;
    let auth_user = verify_jwt(&token, &state.config.jwt_signing_key)?;

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

/// Middleware for page routes: redirect to the login page without a valid
/// session.
pub async fn require_page_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match optional_session(&jar, request.headers(), &state.config.jwt_signing_key) {
        Some(auth_user) => {
            request.extensions_mut().insert(auth_user);
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// Create a JWT for a user session.
pub fn create_jwt(username: &str, signing_key: &[u8]) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: username.to_string(),
        iat: usize::try_from(now)?,
        exp: usize::try_from(now + SESSION_TTL_SECS)?,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Session cookie carrying `token`.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS))
        .build()
}

/// Cookie used to remove the session from a jar.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
