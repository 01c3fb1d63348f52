// src/bot/mod.rs

pub mod machine;
pub mod replies;
pub mod session;
pub mod state;

pub use machine::ConversationStateMachine;
pub use replies::Reply;
pub use session::{InMemorySessionStore, SessionStore, UserId, UserSession};
pub use state::{ChatState, MenuCommand};
