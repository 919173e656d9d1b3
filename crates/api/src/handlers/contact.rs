use std::sync::Arc;

use axum::{extract::State, Json};
use coachbook_core::{
    errors::CoachError,
    models::contact::{ContactMessage, ContactResponse},
};
use tracing::error;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn submit(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ContactMessage>,
) -> Result<Json<ContactResponse>, AppError> {
    let message = payload.validate()?;

    state.relay.deliver(&message).await.map_err(|e| {
        error!("Failed to relay contact message from {}: {:?}", message.email, e);
        CoachError::Internal(e.into())
    })?;

    Ok(Json(ContactResponse { success: true }))
}
