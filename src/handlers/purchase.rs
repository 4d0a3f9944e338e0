use crate::{
    error::MarketError,
    models::{ApiResponse, PurchaseRecord, PurchaseRequest},
    services::PurchaseService,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub async fn create_purchase(
    State(purchases): State<Arc<PurchaseService>>,
    payload: Result<Json<PurchaseRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PurchaseRecord>>, MarketError> {
    // A body with missing or malformed fields is the client's fault and gets
    // the same JSON error envelope as every other rejection.
    let Json(request) = payload.map_err(|e| MarketError::InvalidInput(e.body_text()))?;

    let record = purchases.process(request).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: record,
        timestamp: Utc::now(),
        request_id: Uuid::new_v4().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{EthereumService, SupabaseStore};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::post,
        Router,
    };
    use ethers::types::Address;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn app() -> Router {
        let purchases = Arc::new(PurchaseService::new(
            Arc::new(SupabaseStore::new("http://127.0.0.1:1", "service-key")),
            Arc::new(EthereumService::new("http://127.0.0.1:1").unwrap()),
            Address::from_str("0xCaC4904E1DB1589Aa17A2Ec742F5a6bCF4c4D037").unwrap(),
            Address::from_str("0x46914D5DC59598801e435AF2a08928Da87C60dF0").unwrap(),
            18,
        ));
        Router::new().route("/api/purchase", post(create_purchase).with_state(purchases))
    }

    async fn post_body(body: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/purchase")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_field_is_a_400_json_error() {
        let (status, json) = post_body(r#"{"booster":"turbo","target":"0xabc"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error_code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn unparsable_body_is_a_400_json_error() {
        let (status, json) = post_body("not json at all").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error_code"], "INVALID_INPUT");
    }
}
