use crate::models::PurchaseRecord;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown booster: {0}")]
    UnknownBooster(String),

    #[error("No transaction hash found in link")]
    NoHashFound,

    #[error("Transaction not mined")]
    NotMined,

    #[error("Payment verification failed: no matching transfer in receipt")]
    VerificationFailed { record: Box<PurchaseRecord> },

    #[error("RPC error: {0}")]
    Rpc(#[from] ethers::providers::ProviderError),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for MarketError {
    fn from(err: reqwest::Error) -> Self {
        MarketError::Upstream(err.to_string())
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub request_id: String,

    /// The persisted (unverified) purchase row, attached when verification
    /// failed so the caller keeps an audit handle on the attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<PurchaseRecord>,
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();

        let (status, error_code) = match &self {
            MarketError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            MarketError::UnknownBooster(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_BOOSTER"),
            MarketError::NoHashFound => (StatusCode::BAD_REQUEST, "NO_HASH_FOUND"),
            MarketError::NotMined => (StatusCode::PAYMENT_REQUIRED, "NOT_MINED"),
            MarketError::VerificationFailed { .. } => {
                (StatusCode::PAYMENT_REQUIRED, "VERIFICATION_FAILED")
            }
            MarketError::Rpc(_) | MarketError::Upstream(_) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            }
            MarketError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        tracing::error!(
            error = ?self,
            error_code = error_code,
            "Request failed"
        );

        let error = self.to_string();
        let record = match self {
            MarketError::VerificationFailed { record } => Some(*record),
            _ => None,
        };

        let body = ErrorResponse {
            success: false,
            error,
            error_code: error_code.to_string(),
            timestamp: Utc::now(),
            request_id,
            record,
        };

        (status, Json(body)).into_response()
    }
}
