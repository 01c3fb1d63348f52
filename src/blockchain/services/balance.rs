use crate::blockchain::client::IndexerEndpoint;
use crate::blockchain::models::{BalanceResult, EthAddress, EtherAmount, QueryError};
use crate::blockchain::services::fetch_account;
use crate::utils::parse_wei;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

pub async fn get_balance(
    client: &Client,
    endpoint: &IndexerEndpoint,
    address: &EthAddress,
) -> BalanceResult {
    info!("Attempting to fetch balance for address: {}", address);

    let res = fetch_account(
        client,
        endpoint,
        &[
            ("action", "balance"),
            ("address", address.as_str()),
            ("tag", "latest"),
        ],
    )
    .await?;

    interpret_balance(&res)
}

/// Turns an indexer balance response into an ether amount.
///
/// A missing or non-`"1"` status reads as a zero balance. This cannot tell an
/// empty account from a rejected or rate-limited request.
pub(crate) fn interpret_balance(res: &Value) -> BalanceResult {
    let body = res
        .as_object()
        .ok_or_else(|| QueryError::upstream("indexer response is not a JSON object"))?;

    if body.get("status").and_then(Value::as_str) != Some("1") {
        let upstream_message = body.get("message").and_then(Value::as_str).unwrap_or("");
        warn!(
            upstream_message,
            "Indexer returned a non-success status; reporting a zero balance."
        );
        return Ok(EtherAmount::zero());
    }

    let raw = match body.get("result") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        other => {
            return Err(QueryError::upstream(format!(
                "unexpected balance result: {}",
                other.unwrap_or(&Value::Null)
            )));
        }
    };

    let wei = parse_wei(&raw).map_err(QueryError::upstream)?;
    Ok(EtherAmount::from_wei(wei))
}
