// src/config.rs

use anyhow::{Context, Result};
use std::env;
use std::net::IpAddr;

pub const DEFAULT_ETHERSCAN_API_URL: &str = "https://api.etherscan.io/v2/api";

// A struct to hold all configuration, loaded once at startup from the .env file.
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,
    pub etherscan_api_url: String,
    pub etherscan_api_key: Option<String>,
    // Fixed `chainid` sent with every indexer query. 1 is Ethereum mainnet.
    pub chain_id: u64,
    pub request_timeout_secs: u64,
    pub telegram_webhook_secret: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            bind_addr: get("BIND_ADDR")
                .unwrap_or_else(|| "0.0.0.0".to_string())
                .parse()
                .context("BIND_ADDR must be an IP address")?,
            etherscan_api_url: get("ETHERSCAN_API_URL")
                .unwrap_or_else(|| DEFAULT_ETHERSCAN_API_URL.to_string()),
            etherscan_api_key: get("ETHERSCAN_API_KEY"),
            chain_id: get("CHAIN_ID")
                .unwrap_or_else(|| "1".to_string())
                .parse()
                .context("CHAIN_ID must be a valid number")?,
            request_timeout_secs: get("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a valid number")?,
            telegram_webhook_secret: get("TELEGRAM_WEBHOOK_SECRET"),
        })
    }
}
