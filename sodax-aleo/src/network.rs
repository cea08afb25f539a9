//! Aleo network client.
//!
//! [`AleoNetworkClient`] is the narrow read/submit surface the spoke needs
//! from an Aleo node: mapping lookups, confirmed-transaction lookups and
//! delegated proving submission. [`HttpNetworkClient`] implements it against
//! the public REST API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::error::NetworkError;
use crate::program::DelegateProvingConfig;
use crate::types::{AleoNetwork, ConfirmedTransaction, ProvingRequest, TransactionId};

/// Read/submit access to an Aleo node.
#[async_trait]
pub trait AleoNetworkClient: Send + Sync {
    /// Value stored under `key` in `program/mapping`.
    ///
    /// Returns [`NetworkError::NotFound`] when the key is absent.
    async fn get_program_mapping_value(
        &self,
        program: &str,
        mapping: &str,
        key: &str,
    ) -> Result<String, NetworkError>;

    /// Confirmed transaction, or `None` while it is not yet confirmed.
    async fn get_confirmed_transaction(
        &self,
        tx_id: &str,
    ) -> Result<Option<ConfirmedTransaction>, NetworkError>;

    /// Submit a proving request to a delegated prover, which broadcasts the
    /// resulting transaction.
    async fn submit_proving_request(
        &self,
        url: &str,
        request: &ProvingRequest,
        delegate: &DelegateProvingConfig,
    ) -> Result<TransactionId, NetworkError>;
}

#[derive(Debug, Deserialize)]
struct ProvingResponse {
    transaction: ProvedTransaction,
}

#[derive(Debug, Deserialize)]
struct ProvedTransaction {
    id: String,
}

/// REST client for an Aleo explorer/node endpoint.
#[derive(Clone, Debug)]
pub struct HttpNetworkClient {
    client: reqwest::Client,
    base_url: String,
    network: AleoNetwork,
}

impl HttpNetworkClient {
    pub fn new(base_url: impl Into<String>, network: AleoNetwork) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            network,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn network(&self) -> AleoNetwork {
        self.network
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.network.as_str(), path)
    }
}

async fn http_error(response: reqwest::Response) -> NetworkError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    NetworkError::Http { status, body }
}

#[async_trait]
impl AleoNetworkClient for HttpNetworkClient {
    async fn get_program_mapping_value(
        &self,
        program: &str,
        mapping: &str,
        key: &str,
    ) -> Result<String, NetworkError> {
        let url = self.url(&format!("program/{}/mapping/{}/{}", program, mapping, key));
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        // absent keys come back as `null`; a 404 means the program or mapping is missing
        if !response.status().is_success() {
            return Err(http_error(response).await);
        }

        let value: Option<serde_json::Value> = response.json().await?;
        match value {
            None | Some(serde_json::Value::Null) => {
                Err(NetworkError::NotFound(format!("{program}/{mapping}/{key}")))
            }
            Some(serde_json::Value::String(s)) => Ok(s),
            Some(other) => Ok(other.to_string()),
        }
    }

    async fn get_confirmed_transaction(
        &self,
        tx_id: &str,
    ) -> Result<Option<ConfirmedTransaction>, NetworkError> {
        let url = self.url(&format!("transaction/confirmed/{}", tx_id));
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(NetworkError::MalformedId(tx_id.to_string()))
            }
            status if status.is_success() => {
                let confirmed = response
                    .json::<ConfirmedTransaction>()
                    .await
                    .map_err(|e| NetworkError::Decode(e.to_string()))?;
                Ok(Some(confirmed))
            }
            _ => Err(http_error(response).await),
        }
    }

    async fn submit_proving_request(
        &self,
        url: &str,
        request: &ProvingRequest,
        delegate: &DelegateProvingConfig,
    ) -> Result<TransactionId, NetworkError> {
        debug!("POST proving request to {}", url);

        let response = self
            .client
            .post(url)
            .header("X-Provable-API-Key", &delegate.api_key)
            .header("X-Provable-Consumer-ID", &delegate.consumer_id)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(http_error(response).await);
        }

        let body: ProvingResponse = response
            .json()
            .await
            .map_err(|e| NetworkError::Decode(e.to_string()))?;
        body.transaction
            .id
            .parse()
            .map_err(|_| NetworkError::Decode(format!("prover returned bad transaction id: {}", body.transaction.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn tx_id() -> String {
        format!("at1{}", "x".repeat(58))
    }

    #[tokio::test]
    async fn test_mapping_value() {
        let app = Router::new().route(
            "/mainnet/program/:program/mapping/:mapping/:key",
            get(|Path((program, mapping, key)): Path<(String, String, String)>| async move {
                if program == "connection.aleo" && mapping == "messages" && key == "5u128" {
                    Json(serde_json::json!("true"))
                } else {
                    Json(serde_json::Value::Null)
                }
            }),
        );
        let client = HttpNetworkClient::new(spawn(app).await, AleoNetwork::Mainnet);

        let value = client
            .get_program_mapping_value("connection.aleo", "messages", "5u128")
            .await
            .unwrap();
        assert_eq!(value, "true");

        let err = client
            .get_program_mapping_value("connection.aleo", "messages", "6u128")
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_mapping_http_error() {
        let app = Router::new().route(
            "/testnet/program/:program/mapping/:mapping/:key",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = HttpNetworkClient::new(spawn(app).await, AleoNetwork::Testnet);

        let err = client
            .get_program_mapping_value("credits.aleo", "account", "aleo1x")
            .await
            .unwrap_err();
        assert_eq!(err, NetworkError::Http { status: 500, body: "boom".into() });
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_missing_program_is_not_an_absent_key() {
        let app = Router::new().route(
            "/mainnet/program/:program/mapping/:mapping/:key",
            get(|| async { (StatusCode::NOT_FOUND, "Program 'conection.aleo' does not exist") }),
        );
        let client = HttpNetworkClient::new(spawn(app).await, AleoNetwork::Mainnet);

        let err = client
            .get_program_mapping_value("conection.aleo", "messages", "5u128")
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::Http { status: 404, .. }));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_confirmed_transaction_states() {
        let accepted = tx_id();
        let app = Router::new().route(
            "/mainnet/transaction/confirmed/:id",
            get(move |Path(id): Path<String>| {
                let accepted = accepted.clone();
                async move {
                    if id == accepted {
                        Ok(Json(serde_json::json!({
                            "status": "accepted",
                            "type": "execute",
                            "index": 0,
                            "transaction": { "id": id },
                            "finalize": []
                        })))
                    } else if id.starts_with("at1") {
                        Err(StatusCode::NOT_FOUND)
                    } else {
                        Err(StatusCode::BAD_REQUEST)
                    }
                }
            }),
        );
        let client = HttpNetworkClient::new(spawn(app).await, AleoNetwork::Mainnet);

        let confirmed = client.get_confirmed_transaction(&tx_id()).await.unwrap().unwrap();
        assert_eq!(confirmed.tx_type, "execute");

        let pending = format!("at1{}", "y".repeat(58));
        assert!(client.get_confirmed_transaction(&pending).await.unwrap().is_none());

        let err = client.get_confirmed_transaction("garbage").await.unwrap_err();
        assert_eq!(err, NetworkError::MalformedId("garbage".into()));
    }

    #[tokio::test]
    async fn test_submit_proving_request() {
        let id = tx_id();
        let reply_id = id.clone();
        let app = Router::new().route(
            "/prove",
            post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
                let reply_id = reply_id.clone();
                async move {
                    assert_eq!(headers["x-provable-api-key"], "key");
                    assert_eq!(headers["x-provable-consumer-id"], "consumer");
                    assert_eq!(body["broadcast"], true);
                    Json(serde_json::json!({ "transaction": { "id": reply_id } }))
                }
            }),
        );
        let base = spawn(app).await;
        let client = HttpNetworkClient::new(base.clone(), AleoNetwork::Mainnet);
        let delegate = DelegateProvingConfig::new("key", "consumer");

        let submitted = client
            .submit_proving_request(
                &format!("{}/prove", base),
                &ProvingRequest(serde_json::json!({ "broadcast": true })),
                &delegate,
            )
            .await
            .unwrap();
        assert_eq!(submitted.as_str(), id);
    }
}
