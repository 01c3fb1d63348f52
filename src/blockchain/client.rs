// src/blockchain/client.rs

use crate::blockchain::models::{BalanceResult, EthAddress, TransactionSummary};
use crate::blockchain::services::balance as balance_service;
use crate::blockchain::services::history as history_service;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::time::Duration;
use tracing::warn;

/// Read-only chain queries used by the conversation flows.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    /// Balance in ether, or an upstream error with a short diagnostic.
    async fn get_balance(&self, address: &EthAddress) -> BalanceResult;

    /// Up to three recent transactions, newest first. Never fails: any problem
    /// yields an empty list.
    async fn get_transactions(&self, address: &EthAddress) -> Vec<TransactionSummary>;
}

/// Where and how to reach the indexer.
#[derive(Debug, Clone)]
pub struct IndexerEndpoint {
    pub base_url: String,
    pub chain_id: u64,
    pub api_key: Option<String>,
}

// --- EtherscanClient Implementation ---

/// `ChainQuery` backed by an Etherscan-compatible `module=account` API.
#[derive(Clone)]
pub struct EtherscanClient {
    client: ReqwestClient,
    endpoint: IndexerEndpoint,
}

impl EtherscanClient {
    /// Builds a client whose every request is bounded by `timeout`.
    pub fn new(endpoint: IndexerEndpoint, timeout: Duration) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for the indexer")?;
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            IndexerEndpoint {
                base_url: config.etherscan_api_url.clone(),
                chain_id: config.chain_id,
                api_key: config.etherscan_api_key.clone(),
            },
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

#[async_trait]
impl ChainQuery for EtherscanClient {
    async fn get_balance(&self, address: &EthAddress) -> BalanceResult {
        let result = balance_service::get_balance(&self.client, &self.endpoint, address).await;
        if let Err(e) = &result {
            warn!("Balance lookup for {} failed: {}", address, e);
        }
        result
    }

    async fn get_transactions(&self, address: &EthAddress) -> Vec<TransactionSummary> {
        match history_service::get_transactions(&self.client, &self.endpoint, address).await {
            Ok(txs) => txs,
            Err(e) => {
                warn!("Transaction lookup for {} failed: {}", address, e);
                Vec::new()
            }
        }
    }
}
