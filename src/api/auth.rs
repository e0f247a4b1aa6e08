//! Bearer-token guard for the read endpoints.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use super::AppState;
use crate::error::AppError;

/// Reject requests without a valid access token.
///
/// No `Authorization` header is 401; a header carrying a malformed, forged
/// or expired token is 403. The validated claims are stored in the request
/// extensions for downstream handlers.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;

    let token = header
        .to_str()
        .map_err(|_| AppError::Forbidden("invalid token".to_string()))?;

    let claims = state.tokens.validate(token).map_err(|e| {
        debug!(error = %e, "Rejected access token");
        AppError::Forbidden("invalid token".to_string())
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
