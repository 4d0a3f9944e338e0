use crate::{error::MarketError, services::HoldersService};
use axum::{extract::State, Json};
use std::sync::Arc;

/// Read-only, unauthenticated pass-through of the holder list.
pub async fn token_holders(
    State(holders): State<Arc<HoldersService>>,
) -> Result<Json<serde_json::Value>, MarketError> {
    Ok(Json(holders.holder_list().await?))
}
