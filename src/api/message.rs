use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    AppState,
    bot::{Reply, UserId},
};

// --- Request and Response Models ---

/// One inbound chat turn.
#[derive(Debug, Deserialize)]
pub struct MessageInput {
    pub user_id: String,
    pub text: String,
}

/// The reply to one chat turn.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageOutput {
    pub user_id: String,
    pub reply: String,
    pub markdown: bool,
    pub show_menu: bool,
}

impl MessageOutput {
    pub fn new(user_id: String, reply: Reply) -> Self {
        Self {
            user_id,
            reply: reply.text,
            markdown: reply.markdown,
            show_menu: reply.show_menu,
        }
    }
}

// --- Handler ---

/// Handler for the POST /api/message endpoint.
pub async fn message_handler(
    State(state): State<AppState>,
    Json(input): Json<MessageInput>,
) -> Json<MessageOutput> {
    info!("Received chat message from user '{}'", input.user_id);

    let user_id = UserId::new(input.user_id.clone());
    let reply = state.machine.dispatch(&user_id, &input.text).await;
    Json(MessageOutput::new(input.user_id, reply))
}
