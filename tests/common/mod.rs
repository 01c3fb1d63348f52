// Shared helpers for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use eth_wallet_bot::blockchain::client::ChainQuery;
use eth_wallet_bot::blockchain::models::{BalanceResult, EthAddress, TransactionSummary};
use std::sync::Mutex;

pub const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
pub const TEST_JUNK: &str = "test test test test test test test test test test test junk";
pub const ADDRESS: &str = "0x9858EfFD232B4033E47d90003D41EC34EcaEda94";

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// In-memory `ChainQuery` with canned answers that records what it was asked.
pub struct StubChain {
    pub balance: BalanceResult,
    pub transactions: Vec<TransactionSummary>,
    pub calls: Mutex<Vec<String>>,
}

impl StubChain {
    pub fn new(balance: BalanceResult, transactions: Vec<TransactionSummary>) -> Self {
        Self {
            balance,
            transactions,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainQuery for StubChain {
    async fn get_balance(&self, address: &EthAddress) -> BalanceResult {
        self.calls.lock().unwrap().push(format!("balance:{}", address));
        self.balance.clone()
    }

    async fn get_transactions(&self, address: &EthAddress) -> Vec<TransactionSummary> {
        self.calls.lock().unwrap().push(format!("txlist:{}", address));
        self.transactions.clone()
    }
}
