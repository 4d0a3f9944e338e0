use crate::{
    models::HealthStatus,
    services::{EthereumService, SupabaseStore},
};
use axum::{extract::State, Json};
use chrono::Utc;
use std::{sync::Arc, time::Instant};

#[derive(Clone)]
pub struct HealthState {
    pub ethereum: Arc<EthereumService>,
    pub store: Arc<SupabaseStore>,
    pub started_at: Instant,
}

pub async fn health_check(State(state): State<HealthState>) -> Json<HealthStatus> {
    let rpc_ok = state.ethereum.block_number().await.is_ok();
    let store_ok = state.store.ping().await;

    let status = if rpc_ok && store_ok {
        "healthy"
    } else if rpc_ok || store_ok {
        "degraded"
    } else {
        "unhealthy"
    };

    Json(HealthStatus {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rpc: rpc_ok,
        store: store_ok,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now(),
    })
}
