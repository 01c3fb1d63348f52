use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use ethers_core::utils::{hex, keccak256};
use k256::ecdsa::SigningKey;
use secrecy::SecretString;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::blockchain::models::{DerivedWallet, WalletError};

/// BIP44 path of the first Ethereum account.
pub const ETH_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// Derives the first Ethereum account from a BIP39 phrase.
///
/// The phrase is lowercased, NFKD-normalized and its whitespace collapsed. Any
/// BIP39 wordlist is accepted, and a word may be shortened to a prefix that
/// matches exactly one word of the list. The seed passphrase is always empty.
pub fn derive(phrase: &str) -> Result<DerivedWallet, WalletError> {
    let normalized = normalize_phrase(phrase);
    if normalized.is_empty() {
        return Err(WalletError::InvalidMnemonic("seed phrase is empty".to_string()));
    }

    let mnemonic = match Mnemonic::parse_normalized(&normalized) {
        Ok(mnemonic) => mnemonic,
        Err(e) => parse_abbreviated(&normalized)
            .ok_or_else(|| WalletError::InvalidMnemonic(e.to_string()))?,
    };
    debug!(
        words = mnemonic.word_count(),
        language = ?mnemonic.language(),
        "Mnemonic accepted"
    );

    let seed = Zeroizing::new(mnemonic.to_seed_normalized(""));

    let path: DerivationPath = ETH_DERIVATION_PATH
        .parse()
        .map_err(|e| WalletError::InvalidMnemonic(format!("bad derivation path: {}", e)))?;
    let child = XPrv::derive_from_path(&seed[..], &path)
        .map_err(|e| WalletError::InvalidMnemonic(format!("key derivation failed: {}", e)))?;

    let signing_key: &SigningKey = child.private_key();
    let encoded_point = signing_key.verifying_key().to_encoded_point(false);
    let pubkey_bytes = encoded_point.as_bytes();
    let hash = keccak256(&pubkey_bytes[1..]);
    let address = checksum_address(&hex::encode(&hash[12..]));

    let private_key = SecretString::new(hex::encode(signing_key.to_bytes()));

    info!(%address, "Wallet derived from seed phrase.");
    Ok(DerivedWallet {
        address,
        private_key,
    })
}

/// Renders an address with the EIP-55 mixed-case checksum.
///
/// Accepts the address with or without `0x` in any casing; the output always
/// carries the `0x` prefix, so applying it twice is a no-op.
pub fn checksum_address(address: &str) -> String {
    let stripped = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    let lower = stripped.to_ascii_lowercase();
    let hash = keccak256(lower.as_bytes());

    let mut result = String::with_capacity(lower.len() + 2);
    result.push_str("0x");
    for (i, ch) in lower.chars().enumerate() {
        let byte = hash.get(i / 2).copied().unwrap_or(0);
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if ch.is_ascii_alphabetic() && nibble >= 8 {
            result.push(ch.to_ascii_uppercase());
        } else {
            result.push(ch);
        }
    }
    result
}

fn normalize_phrase(phrase: &str) -> String {
    phrase
        .nfkd()
        .collect::<String>()
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Retries a rejected phrase with every word expanded to the unique wordlist
/// entry it prefixes, one language at a time.
fn parse_abbreviated(normalized: &str) -> Option<Mnemonic> {
    Language::ALL.iter().find_map(|&language| {
        let expanded = normalized
            .split(' ')
            .map(|word| expand_word(language, word))
            .collect::<Option<Vec<_>>>()?;
        Mnemonic::parse_in_normalized(language, &expanded.join(" ")).ok()
    })
}

fn expand_word(language: Language, word: &str) -> Option<&'static str> {
    let list = language.word_list();
    if let Some(exact) = list.iter().find(|w| **w == word) {
        return Some(*exact);
    }
    let mut matches = list.iter().filter(|w| w.starts_with(word));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(*only),
        _ => None,
    }
}
