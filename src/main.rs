use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use booster_market::{
    config::Config,
    handlers::{create_purchase, health_check, token_holders, HealthState},
    services::{EthereumService, HoldersService, PurchaseService, SupabaseStore},
};
use std::{sync::Arc, time::Instant};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting booster-market v{}", env!("CARGO_PKG_VERSION"));

    // Initialize services
    let store = Arc::new(SupabaseStore::new(
        &config.supabase_url,
        &config.supabase_service_key,
    ));
    let ethereum = Arc::new(EthereumService::new(&config.rpc_url)?);
    let holders = Arc::new(HoldersService::new(
        &config.holders_api_key,
        config.token_contract,
        config.holders_page_size,
    ));
    let purchases = Arc::new(PurchaseService::new(
        store.clone(),
        ethereum.clone(),
        config.token_contract,
        config.community_address,
        config.token_decimals,
    ));

    // Fail fast if the RPC endpoint is unreachable
    let block_number = ethereum.block_number().await?;
    tracing::info!("RPC connected, current block: {}", block_number);

    let health_state = HealthState {
        ethereum: ethereum.clone(),
        store: store.clone(),
        started_at: Instant::now(),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_check).with_state(health_state))
        .route(
            "/api/tokenholders",
            get(token_holders).with_state(holders),
        )
        .route("/api/purchase", post(create_purchase).with_state(purchases))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl+c");
    tracing::info!("Shutting down gracefully...");
}
