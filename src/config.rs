use anyhow::{bail, Context, Result};
use ethers::types::Address;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // Chain (verification data source)
    pub rpc_url: String,
    pub token_contract: Address,
    pub community_address: Address,
    pub token_decimals: u32,

    // Supabase store
    pub supabase_url: String,
    pub supabase_service_key: String,

    // Token holder proxy
    pub holders_api_key: String,
    pub holders_page_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT")?,

            rpc_url: std::env::var("RPC_URL").context("RPC_URL required")?,
            token_contract: Self::parse_address("TOKEN_CONTRACT")?,
            community_address: Self::parse_address("COMMUNITY_ADDRESS")?,
            token_decimals: std::env::var("TOKEN_DECIMALS")
                .unwrap_or_else(|_| "18".to_string())
                .parse()
                .context("Invalid TOKEN_DECIMALS")?,

            supabase_url: std::env::var("SUPABASE_URL").context("SUPABASE_URL required")?,
            supabase_service_key: std::env::var("SUPABASE_SERVICE_KEY")
                .context("SUPABASE_SERVICE_KEY required")?,

            holders_api_key: std::env::var("HOLDERS_API_KEY")
                .context("HOLDERS_API_KEY required")?,
            holders_page_size: std::env::var("HOLDERS_PAGE_SIZE")
                .unwrap_or_else(|_| "155".to_string())
                .parse()
                .context("Invalid HOLDERS_PAGE_SIZE")?,
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_address(var: &str) -> Result<Address> {
        let addr_str = std::env::var(var).with_context(|| format!("{} required", var))?;
        Address::from_str(&addr_str).with_context(|| format!("Invalid address for {}", var))
    }

    fn validate(&self) -> Result<()> {
        if !self.rpc_url.starts_with("http") {
            bail!("RPC_URL must be HTTP(S) URL");
        }
        if !self.supabase_url.starts_with("http") {
            bail!("SUPABASE_URL must be HTTP(S) URL");
        }
        // 10^78 no longer fits a U256
        if self.token_decimals > 77 {
            bail!("TOKEN_DECIMALS too large");
        }

        tracing::info!(
            "Configuration validated: token contract {:?}, community {:?}",
            self.token_contract,
            self.community_address
        );

        Ok(())
    }
}
