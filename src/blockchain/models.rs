// src/blockchain/models.rs
use ethers_core::types::U256;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// --- Error types ---

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid address. It must be 42 characters long and start with 0x.")]
    InvalidAddress,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
}

/// Transport, timeout and parse failures against the indexer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl QueryError {
    /// Builds an `UpstreamUnavailable` with the diagnostic cut to 50 characters.
    pub fn upstream(diagnostic: impl fmt::Display) -> Self {
        QueryError::UpstreamUnavailable(crate::utils::truncate_chars(&diagnostic.to_string(), 50))
    }

    pub fn diagnostic(&self) -> &str {
        match self {
            QueryError::UpstreamUnavailable(diag) => diag,
        }
    }
}

// --- Address Models ---

/// An address that passed the syntactic check (`0x` + 40 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EthAddress(String);

impl EthAddress {
    pub(crate) fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Wallet Models ---

/// A wallet derived from a seed phrase at `m/44'/60'/0'/0/0`.
///
/// `private_key` is lowercase hex without a `0x` prefix. It is wrapped in a
/// secret so that `Debug` output and log lines never show it.
#[derive(Debug)]
pub struct DerivedWallet {
    pub address: String,
    pub private_key: SecretString,
}

// --- Balance Models ---

/// An ether amount rendered with exactly six fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EtherAmount(String);

impl EtherAmount {
    pub fn zero() -> Self {
        Self("0.000000".to_string())
    }

    pub fn from_wei(wei: U256) -> Self {
        Self(crate::utils::format_ether(wei))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EtherAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type BalanceResult = Result<EtherAmount, QueryError>;

// --- Transaction History Models ---

/// A display-ready summary of one ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    pub hash: String,
    pub from_address: String,
    pub to_address: String,
    pub value_ether: EtherAmount,
}

/// A raw `txlist` entry as returned by the indexer. Only the fields we render.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    pub value: String,
}
