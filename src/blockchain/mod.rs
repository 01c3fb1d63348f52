// src/blockchain/mod.rs

// Indexer client and the `ChainQuery` seam used by the bot.
pub mod client;
// Wallet, balance and transaction data structures.
pub mod models;

pub mod services;
