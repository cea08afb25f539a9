//! Relay/indexer submission callback.
//!
//! After a spoke transaction is broadcast, the relay is told about it so it
//! can pick up the message and deliver it to the hub.

use serde::Serialize;
use tracing::info;

use crate::hub::HubAddress;
use crate::CommonError;

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    action: &'static str,
    params: SubmitParams<'a>,
}

#[derive(Debug, Serialize)]
struct SubmitParams<'a> {
    chain_id: &'a str,
    tx_hash: &'a str,
    data: SubmitData<'a>,
}

#[derive(Debug, Serialize)]
struct SubmitData<'a> {
    address: String,
    payload: Option<&'a str>,
}

/// Client for the relay submission endpoint.
#[derive(Clone, Debug)]
pub struct RelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Notify the relay of a spoke transaction.
    pub async fn submit(
        &self,
        chain_id: &str,
        tx_hash: &str,
        address: &HubAddress,
        payload: Option<&str>,
    ) -> Result<serde_json::Value, CommonError> {
        let body = SubmitRequest {
            action: "submit",
            params: SubmitParams {
                chain_id,
                tx_hash,
                data: SubmitData {
                    address: address.to_string(),
                    payload,
                },
            },
        };

        info!("Submitting {} on chain {} to relay", tx_hash, chain_id);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| CommonError::Relay(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(CommonError::Relay(format!(
                "request failed with status: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CommonError::Relay(format!("failed to parse response: {}", e)))
    }
}
