use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::domain::ProfitRecord;
use crate::error::AppError;

pub async fn get_all_clear_profit(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfitRecord>>, AppError> {
    Ok(Json(state.profits.list_all_profit().await?))
}
