// src/api/mod.rs

pub mod health;
pub mod message;
pub mod telegram;

use crate::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// All HTTP routes of the bot.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/message", post(message::message_handler))
        .route("/api/telegram/webhook", post(telegram::telegram_webhook_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
