//! Telegram webhook transport.
//!
//! Each text message is answered inline: the HTTP response to the webhook call
//! is itself a `sendMessage` request, so no bot token is needed here.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    AppState,
    bot::{MenuCommand, Reply, UserId},
};

pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

// --- Inbound Update (only the fields we read) ---

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramMessage {
    pub chat: TelegramChat,
    #[serde(default)]
    pub from: Option<TelegramUser>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
}

// --- Webhook reply ---

#[derive(Debug, Serialize)]
pub struct SendMessage {
    pub method: &'static str,
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
}

#[derive(Debug, Serialize)]
pub struct KeyboardButton {
    pub text: &'static str,
}

/// One button per row, in menu order.
pub fn main_keyboard() -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup {
        keyboard: MenuCommand::ALL
            .into_iter()
            .map(|cmd| vec![KeyboardButton { text: cmd.label() }])
            .collect(),
        resize_keyboard: true,
        one_time_keyboard: false,
    }
}

impl SendMessage {
    pub fn from_reply(chat_id: i64, reply: Reply) -> Self {
        Self {
            method: "sendMessage",
            chat_id,
            parse_mode: reply.markdown.then_some("Markdown"),
            reply_markup: reply.show_menu.then(main_keyboard),
            text: reply.text,
        }
    }
}

/// Handler for the POST /api/telegram/webhook endpoint.
pub async fn telegram_webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> Response {
    if let Some(expected) = &state.config.telegram_webhook_secret {
        let provided = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            warn!("Rejected Telegram update {} with a bad secret token", update.update_id);
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    let Some(message) = update.message else {
        debug!("Ignoring Telegram update {} without a message", update.update_id);
        return StatusCode::OK.into_response();
    };
    let Some(text) = message.text else {
        debug!("Ignoring non-text Telegram update {}", update.update_id);
        return StatusCode::OK.into_response();
    };

    let chat_id = message.chat.id;
    let user_id = UserId::from(message.from.map_or(chat_id, |user| user.id));
    let reply = state.machine.dispatch(&user_id, &text).await;

    Json(SendMessage::from_reply(chat_id, reply)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_is_attached_only_when_requested() {
        let with_menu = SendMessage::from_reply(7, Reply::plain("hi").with_menu());
        let keyboard = with_menu.reply_markup.expect("menu keyboard");
        assert_eq!(keyboard.keyboard.len(), 3);
        assert_eq!(keyboard.keyboard[0][0].text, MenuCommand::CheckBalance.label());
        assert_eq!(with_menu.parse_mode, None);

        let markdown = SendMessage::from_reply(7, Reply::markdown("`x`"));
        assert!(markdown.reply_markup.is_none());
        assert_eq!(markdown.parse_mode, Some("Markdown"));
    }
}
