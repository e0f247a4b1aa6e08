use axum::extract::State;
use axum::Json;

use super::extract::JsonBody;
use super::AppState;
use crate::domain::{Deal, NewDeal};
use crate::error::AppError;

pub async fn create_deal(
    State(state): State<AppState>,
    JsonBody(deal): JsonBody<NewDeal>,
) -> Result<Json<Deal>, AppError> {
    Ok(Json(state.deals.create_deal(deal).await?))
}

pub async fn get_all_deals(State(state): State<AppState>) -> Result<Json<Vec<Deal>>, AppError> {
    Ok(Json(state.deals.list_all().await?))
}

pub async fn get_processed_deals(
    State(state): State<AppState>,
) -> Result<Json<Vec<Deal>>, AppError> {
    Ok(Json(state.deals.list_processed().await?))
}

pub async fn get_not_processed_deals(
    State(state): State<AppState>,
) -> Result<Json<Vec<Deal>>, AppError> {
    Ok(Json(state.deals.list_unprocessed().await?))
}
