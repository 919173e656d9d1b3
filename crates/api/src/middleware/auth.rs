//! # Authentication Module
//!
//! Admin authentication for the Coachbook API: Argon2 password hashing, JWT
//! access/refresh tokens, the session cookies that carry them, and the
//! [`AdminSession`] extractor that guards the admin routes.
//!
//! An access token is accepted from the `token` cookie or from an
//! `Authorization: Bearer` header. Refresh tokens are only read from the
//! `refreshToken` cookie, which is scoped to `/api/auth`.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use coachbook_core::errors::CoachError;
use eyre::{eyre, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::AuthSettings, middleware::error_handling::AppError, ApiState};

pub const ACCESS_COOKIE: &str = "token";
pub const REFRESH_COOKIE: &str = "refreshToken";
const ACCESS_COOKIE_PATH: &str = "/api";
const REFRESH_COOKIE_PATH: &str = "/api/auth";

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated for every call and the result is
/// returned in PHC string format (algorithm, parameters, salt and hash).
///
/// # Example
///
/// ```rust
/// use coachbook_api::middleware::auth::{hash_password, verify_password};
///
/// let hashed = hash_password("correct horse").unwrap();
/// assert!(verify_password("correct horse", &hashed).unwrap());
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a PHC hash produced by [`hash_password`].
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| eyre!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

fn secret_for(settings: &AuthSettings, kind: TokenKind) -> &[u8] {
    match kind {
        TokenKind::Access => settings.jwt_secret.as_bytes(),
        TokenKind::Refresh => settings.jwt_refresh_secret.as_bytes(),
    }
}

pub fn issue_token(settings: &AuthSettings, kind: TokenKind, admin_id: Uuid, email: &str) -> Result<String> {
    let now = Utc::now().timestamp();
    let ttl = match kind {
        TokenKind::Access => settings.access_token_ttl,
        TokenKind::Refresh => settings.refresh_token_ttl,
    };
    let claims = Claims {
        sub: admin_id,
        email: email.to_string(),
        kind,
        iat: now,
        exp: now + ttl,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret_for(settings, kind)),
    )?;
    Ok(token)
}

/// Decodes and checks a token of the expected kind. Expired, tampered or
/// mismatched tokens are all an authentication error.
pub fn verify_token(settings: &AuthSettings, kind: TokenKind, token: &str) -> Result<Claims, CoachError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret_for(settings, kind)),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("Rejected {:?} token: {}", kind, e);
        CoachError::Authentication("Invalid or expired session".into())
    })?;

    if data.claims.kind != kind {
        return Err(CoachError::Authentication("Invalid or expired session".into()));
    }
    Ok(data.claims)
}

fn session_cookie(name: &'static str, value: String, path: &'static str, max_age: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path(path)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

pub fn access_cookie(settings: &AuthSettings, token: String) -> Cookie<'static> {
    session_cookie(
        ACCESS_COOKIE,
        token,
        ACCESS_COOKIE_PATH,
        settings.access_token_ttl,
        settings.secure_cookies,
    )
}

pub fn refresh_cookie(settings: &AuthSettings, token: String) -> Cookie<'static> {
    session_cookie(
        REFRESH_COOKIE,
        token,
        REFRESH_COOKIE_PATH,
        settings.refresh_token_ttl,
        settings.secure_cookies,
    )
}

/// Removes both session cookies.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_COOKIE).path(ACCESS_COOKIE_PATH))
        .remove(Cookie::build(REFRESH_COOKIE).path(REFRESH_COOKIE_PATH))
}

/// An authenticated admin, extracted from the request's access token.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin_id: Uuid,
    pub email: String,
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<ApiState>) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| {
                CookieJar::from_headers(&parts.headers)
                    .get(ACCESS_COOKIE)
                    .map(|c| c.value().to_string())
            })
            .ok_or_else(|| CoachError::Authentication("Admin session required".into()))?;

        let claims = verify_token(&state.auth, TokenKind::Access, &token)?;
        Ok(AdminSession {
            admin_id: claims.sub,
            email: claims.email,
        })
    }
}
