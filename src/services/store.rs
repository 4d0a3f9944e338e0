use crate::{
    error::MarketError,
    models::{Booster, PurchaseRecord},
};
use reqwest::Client;

/// Supabase REST collaborator: booster price lookup and the insert-only
/// purchase recorder. The service key stays server-side; requests carry it
/// in both the `apikey` header and the bearer token, which is how the REST
/// gateway expects it.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    /// Resolves a booster id to its row. The table is the only authority on
    /// price; an unknown id is the client's fault, not a server fault.
    pub async fn booster(&self, id: &str) -> Result<Booster, MarketError> {
        let url = format!("{}/rest/v1/boosters", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("id", format!("eq.{}", id)),
                ("select", "*".to_string()),
                ("limit", "1".to_string()),
            ])
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketError::Upstream(format!(
                "booster lookup failed: {}",
                response.status()
            )));
        }

        let rows: Vec<Booster> = response.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| MarketError::UnknownBooster(id.to_string()))
    }

    /// Insert-only write. `Prefer: return=representation` so the created row
    /// comes back and can ride along in the HTTP response, verified or not.
    pub async fn insert_purchase(
        &self,
        record: &PurchaseRecord,
    ) -> Result<PurchaseRecord, MarketError> {
        let url = format!("{}/rest/v1/marketplace_purchases", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::Upstream(format!(
                "purchase insert failed: {}: {}",
                status, body
            )));
        }

        let rows: Vec<PurchaseRecord> = response.json().await?;
        rows.into_iter().next().ok_or_else(|| {
            MarketError::Upstream("purchase insert returned no representation".to_string())
        })
    }

    /// Health probe against the REST root.
    pub async fn ping(&self) -> bool {
        let url = format!("{}/rest/v1/", self.base_url);
        match self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VerificationOutcome;

    fn store(url: &str) -> SupabaseStore {
        SupabaseStore::new(url, "service-key")
    }

    #[tokio::test]
    async fn known_booster_resolves_price() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/v1/boosters")
            .match_query(mockito::Matcher::UrlEncoded("id".into(), "eq.turbo".into()))
            .match_header("apikey", "service-key")
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"turbo","price":50}]"#)
            .create_async()
            .await;

        let booster = store(&server.url()).booster("turbo").await.unwrap();
        assert_eq!(booster.price, 50);
    }

    #[tokio::test]
    async fn empty_result_is_unknown_booster() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/v1/boosters")
            .match_query(mockito::Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let err = store(&server.url()).booster("ghost").await.unwrap_err();
        assert!(matches!(err, MarketError::UnknownBooster(id) if id == "ghost"));
    }

    #[tokio::test]
    async fn insert_returns_created_representation() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/rest/v1/marketplace_purchases")
            .match_header("prefer", "return=representation")
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"booster_id":"turbo","target_wallet":"0xabc","tx_link":"0xdef","price":50,"processed":false}]"#,
            )
            .create_async()
            .await;

        let record = PurchaseRecord {
            booster_id: "turbo".to_string(),
            target_wallet: "0xabc".to_string(),
            tx_link: "0xdef".to_string(),
            price: 50,
            outcome: VerificationOutcome::unverified(),
        };
        let created = store(&server.url()).insert_purchase(&record).await.unwrap();
        assert_eq!(created.booster_id, "turbo");
        assert!(!created.outcome.verified);
    }

    #[tokio::test]
    async fn upstream_failure_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/rest/v1/marketplace_purchases")
            .with_status(500)
            .with_body(r#"{"message":"boom"}"#)
            .create_async()
            .await;

        let record = PurchaseRecord {
            booster_id: "turbo".to_string(),
            target_wallet: "0xabc".to_string(),
            tx_link: "0xdef".to_string(),
            price: 50,
            outcome: VerificationOutcome::unverified(),
        };
        let err = store(&server.url()).insert_purchase(&record).await.unwrap_err();
        assert!(matches!(err, MarketError::Upstream(_)));
    }
}
