// src/blockchain/services/mod.rs

pub mod address;
pub mod balance;
pub mod history;
pub mod wallet;

use crate::blockchain::client::IndexerEndpoint;
use crate::blockchain::models::QueryError;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Issues a `module=account` GET against the indexer and decodes the JSON body.
///
/// The HTTP status code is not inspected; the indexer's own `status` flag in the
/// body decides success.
pub(crate) async fn fetch_account(
    client: &Client,
    endpoint: &IndexerEndpoint,
    params: &[(&str, &str)],
) -> Result<Value, QueryError> {
    let mut query: Vec<(&str, String)> = vec![
        ("chainid", endpoint.chain_id.to_string()),
        ("module", "account".to_string()),
    ];
    query.extend(params.iter().map(|(k, v)| (*k, v.to_string())));
    if let Some(api_key) = &endpoint.api_key {
        query.push(("apikey", api_key.clone()));
    }

    debug!("Sending indexer request to {} with {:?}", endpoint.base_url, params);

    let res: Value = client
        .get(&endpoint.base_url)
        .query(&query)
        .send()
        .await
        .map_err(describe_request_error)?
        .json()
        .await
        .map_err(describe_request_error)?;

    debug!("Received indexer response: {:?}", res);
    Ok(res)
}

/// Names the cause of a failed indexer call, without the request URL.
fn describe_request_error(err: reqwest::Error) -> QueryError {
    let err = err.without_url();
    if err.is_timeout() {
        QueryError::upstream("request timed out")
    } else if err.is_connect() {
        QueryError::upstream("connection failed")
    } else if err.is_decode() {
        QueryError::upstream("response is not valid JSON")
    } else {
        QueryError::upstream(err)
    }
}
