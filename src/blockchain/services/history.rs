use crate::blockchain::client::IndexerEndpoint;
use crate::blockchain::models::{
    EthAddress, EtherAmount, QueryError, RawTransaction, TransactionSummary,
};
use crate::blockchain::services::fetch_account;
use crate::utils::{parse_wei, truncate_display};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

/// Entries kept for display, out of the `PAGE_SIZE` requested.
pub const MAX_SUMMARIES: usize = 3;
const PAGE_SIZE: &str = "5";

const HASH_DISPLAY_LEN: usize = 12;
const ADDRESS_DISPLAY_LEN: usize = 10;

/// Fetches the most recent transactions of `address`, newest first.
///
/// A failure flag or an empty list is `Ok(vec![])`. Transport and decoding
/// problems are errors here; `EtherscanClient` folds them into an empty list.
pub async fn get_transactions(
    client: &Client,
    endpoint: &IndexerEndpoint,
    address: &EthAddress,
) -> Result<Vec<TransactionSummary>, QueryError> {
    info!("Fetching recent transactions for address: {}", address);

    let res = fetch_account(
        client,
        endpoint,
        &[
            ("action", "txlist"),
            ("address", address.as_str()),
            ("page", "1"),
            ("offset", PAGE_SIZE),
            ("sort", "desc"),
        ],
    )
    .await?;

    summarize_transactions(&res)
}

pub(crate) fn summarize_transactions(res: &Value) -> Result<Vec<TransactionSummary>, QueryError> {
    if res.get("status").and_then(Value::as_str) != Some("1") {
        let upstream_message = res.get("message").and_then(Value::as_str).unwrap_or("");
        debug!(
            upstream_message,
            "Indexer returned no transactions."
        );
        return Ok(Vec::new());
    }

    let entries = match res.get("result") {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(other) => {
            return Err(QueryError::upstream(format!("unexpected txlist result: {}", other)));
        }
    };

    // The indexer already sorts newest first.
    entries
        .iter()
        .take(MAX_SUMMARIES)
        .map(|entry| {
            let tx: RawTransaction =
                serde_json::from_value(entry.clone()).map_err(QueryError::upstream)?;
            summarize(&tx)
        })
        .collect()
}

fn summarize(tx: &RawTransaction) -> Result<TransactionSummary, QueryError> {
    let wei = parse_wei(&tx.value).map_err(QueryError::upstream)?;
    Ok(TransactionSummary {
        hash: truncate_display(&tx.hash, HASH_DISPLAY_LEN),
        from_address: truncate_display(&tx.from, ADDRESS_DISPLAY_LEN),
        to_address: truncate_display(tx.to.as_deref().unwrap_or(""), ADDRESS_DISPLAY_LEN),
        value_ether: EtherAmount::from_wei(wei),
    })
}
