// src/lib.rs

use std::sync::Arc;

pub mod api;
pub mod blockchain;
pub mod bot;
pub mod config;
pub mod transport;
pub mod utils;

/// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub machine: Arc<bot::ConversationStateMachine>,
}

impl AppState {
    /// Wires the default stack: in-memory sessions and the Etherscan client.
    pub fn from_config(config: config::Config) -> anyhow::Result<Self> {
        let chain = blockchain::client::EtherscanClient::from_config(&config)?;
        let machine = bot::ConversationStateMachine::new(
            Arc::new(bot::InMemorySessionStore::new()),
            Arc::new(chain),
        );
        Ok(Self {
            config,
            machine: Arc::new(machine),
        })
    }
}
