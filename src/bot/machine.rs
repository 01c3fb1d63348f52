//! The per-user conversation state machine.

use crate::blockchain::client::ChainQuery;
use crate::blockchain::services::{address, wallet};
use crate::bot::replies::{self, Reply};
use crate::bot::session::{SessionStore, UserId, UserSession};
use crate::bot::state::{Flow, Input};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const START_COMMAND: &str = "/start";

pub struct ConversationStateMachine {
    sessions: Arc<dyn SessionStore>,
    chain: Arc<dyn ChainQuery>,
}

impl std::fmt::Debug for ConversationStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStateMachine").finish_non_exhaustive()
    }
}

impl ConversationStateMachine {
    pub fn new(sessions: Arc<dyn SessionStore>, chain: Arc<dyn ChainQuery>) -> Self {
        Self { sessions, chain }
    }

    pub fn session(&self, user_id: &UserId) -> UserSession {
        UserSession {
            user_id: user_id.clone(),
            state: self.sessions.get(user_id).unwrap_or_default(),
        }
    }

    /// Routes `/start` to [`Self::start`] and everything else to [`Self::handle`].
    pub async fn dispatch(&self, user_id: &UserId, text: &str) -> Reply {
        if is_start_command(text) {
            self.start(user_id)
        } else {
            self.handle(user_id, text).await
        }
    }

    /// Forgets the user's session and greets them with the menu.
    pub fn start(&self, user_id: &UserId) -> Reply {
        self.sessions.delete(user_id);
        info!(user_id = %user_id, "Session started");
        replies::greeting()
    }

    /// Handles one chat turn.
    ///
    /// The next state is stored before any flow work runs, so an awaiting state
    /// is left even if the flow's upstream call is slow or fails.
    pub async fn handle(&self, user_id: &UserId, text: &str) -> Reply {
        let text = text.trim();
        let state = self.sessions.get(user_id).unwrap_or_default();
        let input = state.classify(text);
        let next = state.next(&input);
        self.sessions.set(user_id, next);
        info!(user_id = %user_id, from = ?state, to = ?next, "Conversation transition");

        match input {
            Input::Command(cmd) => replies::prompt(cmd),
            Input::Unrecognized => replies::use_menu(),
            Input::Payload(flow, payload) => self.run_flow(flow, payload).await,
        }
    }

    async fn run_flow(&self, flow: Flow, payload: &str) -> Reply {
        match flow {
            Flow::Balance => match address::validate(payload) {
                Ok(addr) => match self.chain.get_balance(&addr).await {
                    Ok(amount) => replies::balance(&amount),
                    Err(e) => replies::balance_unavailable(&e),
                },
                Err(e) => {
                    debug!(len = payload.len(), "Rejected balance address");
                    replies::invalid_address(&e)
                }
            },
            Flow::Transactions => match address::validate(payload) {
                Ok(addr) => {
                    let txs = self.chain.get_transactions(&addr).await;
                    debug!("Found {} transactions for {}", txs.len(), addr);
                    replies::transactions(&txs)
                }
                Err(e) => {
                    debug!(len = payload.len(), "Rejected transactions address");
                    replies::invalid_address(&e)
                }
            },
            // The payload is a seed phrase: never log it.
            Flow::Seed => match wallet::derive(payload) {
                Ok(derived) => replies::wallet(&derived),
                Err(e) => {
                    warn!("Seed phrase rejected: {}", e);
                    replies::invalid_mnemonic(&e)
                }
            },
        }
    }
}

fn is_start_command(text: &str) -> bool {
    match text.split_whitespace().next() {
        Some(first) => {
            first == START_COMMAND
                || first
                    .strip_prefix(START_COMMAND)
                    .is_some_and(|rest| rest.starts_with('@'))
        }
        None => false,
    }
}
