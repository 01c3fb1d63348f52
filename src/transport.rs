// src/transport.rs
//
// Line-delimited JSON chat transport over stdin/stdout.

use crate::api::message::{MessageInput, MessageOutput};
use crate::bot::{ConversationStateMachine, UserId};
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info};

/// Reads `{"user_id": .., "text": ..}` lines and writes one JSON reply per line.
pub async fn run_loop<R, W>(
    machine: &ConversationStateMachine,
    mut reader: R,
    mut writer: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            info!("EOF received, shutting down stdio transport");
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = handle_line(machine, trimmed).await;
        writer.write_all(response.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}

async fn handle_line(machine: &ConversationStateMachine, line: &str) -> String {
    let input = match serde_json::from_str::<MessageInput>(line) {
        Ok(input) => input,
        Err(parse_error) => {
            error!("JSON parse error: {}", parse_error);
            return json!({ "error": format!("Parse error: {}", parse_error) }).to_string();
        }
    };

    debug!("Received stdio message from user '{}'", input.user_id);
    let user_id = UserId::new(input.user_id.clone());
    let reply = machine.dispatch(&user_id, &input.text).await;

    match serde_json::to_string(&MessageOutput::new(input.user_id, reply)) {
        Ok(out) => out,
        Err(e) => json!({ "error": format!("Serialization error: {}", e) }).to_string(),
    }
}
