use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_GENLAYER_CHAIN_ID, DEFAULT_GENLAYER_RPC_URL, DEFAULT_IMGBB_API_URL,
    DEFAULT_POLL_HISTORY_WINDOW, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_MAX_ATTEMPTS,
    DEFAULT_RPC_TIMEOUT_SECS,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // GenLayer
    pub genlayer_rpc_url: String,
    pub genlayer_chain_id: String,
    pub contract_address: String,
    pub rpc_timeout_secs: u64,

    // Image hosting
    pub imgbb_api_url: String,
    pub imgbb_api_key: Option<String>,

    // Reconciliation
    pub poll_interval_secs: u64,
    pub poll_max_attempts: u32,
    pub poll_history_window: u32,

    // CORS
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            genlayer_rpc_url: env::var("GENLAYER_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_GENLAYER_RPC_URL.to_string()),
            genlayer_chain_id: env::var("GENLAYER_CHAIN_ID")
                .unwrap_or_else(|_| DEFAULT_GENLAYER_CHAIN_ID.to_string()),
            contract_address: env::var("WILD_GUESS_CONTRACT_ADDRESS")?,
            rpc_timeout_secs: env::var("RPC_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_RPC_TIMEOUT_SECS.to_string())
                .parse()?,

            imgbb_api_url: env::var("IMGBB_API_URL")
                .unwrap_or_else(|_| DEFAULT_IMGBB_API_URL.to_string()),
            imgbb_api_key: env::var("IMGBB_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),

            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_SECS.to_string())
                .parse()?,
            poll_max_attempts: env::var("POLL_MAX_ATTEMPTS")
                .unwrap_or_else(|_| DEFAULT_POLL_MAX_ATTEMPTS.to_string())
                .parse()?,
            poll_history_window: env::var("POLL_HISTORY_WINDOW")
                .unwrap_or_else(|_| DEFAULT_POLL_HISTORY_WINDOW.to_string())
                .parse()?,

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.genlayer_rpc_url.trim().is_empty() {
            anyhow::bail!("GENLAYER_RPC_URL is empty");
        }
        url::Url::parse(&self.genlayer_rpc_url)
            .map_err(|e| anyhow::anyhow!("GENLAYER_RPC_URL is not a valid URL: {e}"))?;
        if !crate::utils::is_valid_address(&self.contract_address) {
            anyhow::bail!("WILD_GUESS_CONTRACT_ADDRESS must be a 0x-prefixed 20-byte hex address");
        }
        if self.poll_max_attempts == 0 {
            anyhow::bail!("POLL_MAX_ATTEMPTS must be > 0");
        }
        if self.poll_history_window == 0 {
            anyhow::bail!("POLL_HISTORY_WINDOW must be > 0");
        }

        if self.poll_interval_secs == 0 {
            tracing::warn!("POLL_INTERVAL_SECS is 0; the node will be polled back-to-back");
        }
        if self.imgbb_api_key.is_none() {
            tracing::warn!("IMGBB_API_KEY not set; image uploads will fail");
        }
        if !self.genlayer_chain_id.starts_with("0x") {
            tracing::warn!(
                "GENLAYER_CHAIN_ID {} is not hex; chain checks compare it literally",
                self.genlayer_chain_id
            );
        }
        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; requests may be blocked");
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        environment: "development".to_string(),
        genlayer_rpc_url: DEFAULT_GENLAYER_RPC_URL.to_string(),
        genlayer_chain_id: DEFAULT_GENLAYER_CHAIN_ID.to_string(),
        contract_address: "0x21Ab0638F4f0FbcD5C1c87d1423b3874cDb69307".to_string(),
        rpc_timeout_secs: DEFAULT_RPC_TIMEOUT_SECS,
        imgbb_api_url: DEFAULT_IMGBB_API_URL.to_string(),
        imgbb_api_key: None,
        poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        poll_max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
        poll_history_window: DEFAULT_POLL_HISTORY_WINDOW,
        cors_allowed_origins: "*".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_test_config_validates() {
        let config = test_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn validate_rejects_zero_attempts() {
        let mut config = test_config();
        config.poll_max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_contract_address() {
        let mut config = test_config();
        config.contract_address = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }
}
