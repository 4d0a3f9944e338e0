use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inbound purchase submission. `tx_link` is free-form text, typically a
/// block-explorer URL containing the payment transaction hash.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRequest {
    pub booster: String,
    pub target: String,
    #[serde(rename = "txLink")]
    pub tx_link: String,
}

/// Verdict of the transfer scan. Serialized with the store's column names:
/// `processed` is the verified flag, `verified_at`/`verified_by` are set
/// only when a matching transfer was found.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationOutcome {
    #[serde(rename = "processed")]
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
}

impl VerificationOutcome {
    pub fn auto_verified() -> Self {
        Self {
            verified: true,
            verified_at: Some(Utc::now()),
            verified_by: Some("auto".to_string()),
        }
    }

    pub fn unverified() -> Self {
        Self::default()
    }
}

/// Insert-only purchase row. Created exactly once per request; a resubmitted
/// link creates a new row rather than updating an old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub booster_id: String,
    pub target_wallet: String,
    pub tx_link: String,
    pub price: u64,
    #[serde(flatten)]
    pub outcome: VerificationOutcome,
}
