use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use coachbook_core::{
    errors::CoachError,
    models::admin::{AdminProfile, ChangePasswordRequest, LoginRequest, LoginResponse},
    validation,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::{
    middleware::{
        auth::{self, AdminSession, TokenKind, REFRESH_COOKIE},
        error_handling::AppError,
    },
    ApiState,
};

fn invalid_credentials() -> CoachError {
    CoachError::Authentication("Invalid email or password".into())
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let email = validation::normalize_email(&payload.email).map_err(|_| invalid_credentials())?;

    let admin = state
        .store
        .get_admin_by_email(&email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !auth::verify_password(&payload.password, &admin.password_hash)? {
        warn!("Failed login attempt for {}", email);
        return Err(invalid_credentials().into());
    }

    let access = auth::issue_token(&state.auth, TokenKind::Access, admin.id, &admin.email)?;
    let refresh = auth::issue_token(&state.auth, TokenKind::Refresh, admin.id, &admin.email)?;
    let jar = jar
        .add(auth::access_cookie(&state.auth, access))
        .add(auth::refresh_cookie(&state.auth, refresh));

    info!("Admin {} logged in", admin.email);
    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            admin: AdminProfile::from(&admin),
        }),
    ))
}

#[axum::debug_handler]
pub async fn refresh(
    State(state): State<Arc<ApiState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| CoachError::Authentication("No refresh token".into()))?;

    let claims = auth::verify_token(&state.auth, TokenKind::Refresh, &token)?;

    // The account may have been removed since the refresh token was issued
    let admin = state
        .store
        .get_admin(claims.sub)
        .await?
        .ok_or_else(|| CoachError::Authentication("Invalid or expired session".into()))?;

    let access = auth::issue_token(&state.auth, TokenKind::Access, admin.id, &admin.email)?;
    let jar = jar.add(auth::access_cookie(&state.auth, access));

    Ok((jar, Json(json!({ "success": true }))))
}

#[axum::debug_handler]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (auth::clear_session(jar), StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn change_password(
    session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;

    let admin = state
        .store
        .get_admin(session.admin_id)
        .await?
        .ok_or_else(|| CoachError::not_found("Admin", session.admin_id))?;

    if !auth::verify_password(&payload.current_password, &admin.password_hash)? {
        return Err(CoachError::Authentication("Current password is incorrect".into()).into());
    }

    let password_hash = auth::hash_password(&payload.new_password)?;
    if !state.store.update_admin_password(admin.id, &password_hash).await? {
        return Err(CoachError::not_found("Admin", admin.id).into());
    }

    info!("Admin {} changed their password", admin.email);
    Ok(Json(json!({ "success": true })))
}
