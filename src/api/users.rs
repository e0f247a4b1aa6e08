use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::extract::JsonBody;
use super::AppState;
use crate::domain::{Credentials, User};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.register(credentials).await?))
}

/// Login is a GET carrying a JSON body; the body is parsed regardless of
/// its declared content type.
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TokenResponse>, AppError> {
    let credentials: Credentials = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid login body: {}", e)))?;
    let token = state.users.login(credentials).await?;
    Ok(Json(TokenResponse { token }))
}
