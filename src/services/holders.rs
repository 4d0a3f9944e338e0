use crate::error::MarketError;
use ethers::types::Address;
use moka::future::Cache;
use reqwest::Client;
use std::time::Duration;

const ROUTESCAN_URL: &str =
    "https://api.routescan.io/v2/network/mainnet/evm/43114/etherscan/api";
const CACHE_KEY: &str = "holders";
const CACHE_TTL_SECS: u64 = 60;

/// Proxies the routescan token-holder list so the API key never reaches the
/// browser. The upstream is rate limited, so responses sit in a short-lived
/// in-memory cache.
pub struct HoldersService {
    client: Client,
    base_url: String,
    api_key: String,
    contract: Address,
    page_size: u32,
    cache: Cache<&'static str, serde_json::Value>,
}

impl HoldersService {
    pub fn new(api_key: &str, contract: Address, page_size: u32) -> Self {
        Self::with_base_url(ROUTESCAN_URL, api_key, contract, page_size)
    }

    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        contract: Address,
        page_size: u32,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            contract,
            page_size,
            cache: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
                .build(),
        }
    }

    /// Upstream JSON passed through untouched, same as the response the
    /// explorer API would give a keyed caller.
    pub async fn holder_list(&self) -> Result<serde_json::Value, MarketError> {
        if let Some(cached) = self.cache.get(CACHE_KEY).await {
            tracing::debug!("Returning cached holder list");
            return Ok(cached);
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("module", "token".to_string()),
                ("action", "tokenholderlist".to_string()),
                ("contractaddress", format!("{:?}", self.contract)),
                ("page", "1".to_string()),
                ("offset", self.page_size.to_string()),
                ("apikey", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketError::Upstream(format!(
                "holder list request failed: {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await?;
        self.cache.insert(CACHE_KEY, json.clone()).await;
        Ok(json)
    }
}
