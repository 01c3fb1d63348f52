//! User-facing reply texts.

use crate::blockchain::models::{
    AddressError, DerivedWallet, EtherAmount, QueryError, TransactionSummary, WalletError,
};
use crate::bot::state::MenuCommand;
use secrecy::ExposeSecret;
use serde::Serialize;

/// A reply for the transport to deliver.
///
/// `markdown` marks Telegram-style markup (backtick code spans). `show_menu`
/// asks the transport to re-display the command menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub markdown: bool,
    pub show_menu: bool,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: false,
            show_menu: false,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            markdown: true,
            ..Self::plain(text)
        }
    }

    pub fn with_menu(mut self) -> Self {
        self.show_menu = true;
        self
    }
}

pub fn greeting() -> Reply {
    Reply::plain("👋 Hi! Choose an action:").with_menu()
}

pub fn use_menu() -> Reply {
    Reply::plain("Please use the menu buttons.").with_menu()
}

pub fn prompt(cmd: MenuCommand) -> Reply {
    match cmd {
        MenuCommand::CheckBalance | MenuCommand::CheckTransactions => {
            Reply::plain("Enter an Ethereum address (starts with 0x):")
        }
        MenuCommand::ConvertSeed => {
            Reply::plain("Enter your seed phrase (12 or 24 words separated by spaces):")
        }
    }
}

pub fn invalid_address(err: &AddressError) -> Reply {
    Reply::plain(format!("❌ {}", err))
}

pub fn balance(amount: &EtherAmount) -> Reply {
    Reply::plain(format!("💰 Balance: {} ETH", amount))
}

pub fn balance_unavailable(err: &QueryError) -> Reply {
    Reply::plain(format!("💰 Balance: error: {}", err.diagnostic()))
}

pub fn transactions(txs: &[TransactionSummary]) -> Reply {
    if txs.is_empty() {
        return Reply::plain("📭 No transactions found, or the request failed.");
    }

    let entries: Vec<String> = txs
        .iter()
        .map(|tx| {
            format!(
                "Hash: `{}`\nFrom: `{}`\nTo: `{}`\nValue: {} ETH",
                tx.hash, tx.from_address, tx.to_address, tx.value_ether
            )
        })
        .collect();
    Reply::markdown(format!("📨 Latest transactions:\n\n{}", entries.join("\n\n")))
}

/// The only place the private key leaves the crate.
pub fn wallet(wallet: &DerivedWallet) -> Reply {
    Reply::markdown(format!(
        "✅ Address: `{}`\n🔑 Private key: `{}`\n\n⚠️ NEVER SHARE YOUR PRIVATE KEY WITH ANYONE!",
        wallet.address,
        wallet.private_key.expose_secret()
    ))
}

pub fn invalid_mnemonic(err: &WalletError) -> Reply {
    let WalletError::InvalidMnemonic(reason) = err;
    Reply::plain(format!("❌ Error: {}\nCheck that the seed phrase is correct.", reason))
}
