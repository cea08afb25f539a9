//! Program execution seam.
//!
//! Proof generation and signing belong to an Aleo SDK. This module only
//! describes what the spoke needs from one: a [`ProgramManager`] bound to a
//! single account.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{AleoAddress, ExecuteOptions, FeeEstimate, ProvingRequest};

/// Account-bound program executor.
#[async_trait]
pub trait ProgramManager: Send + Sync {
    /// Address of the bound account.
    fn address(&self) -> AleoAddress;

    /// Estimate the execution fee of a call.
    async fn estimate_execution_fee(&self, options: &ExecuteOptions) -> anyhow::Result<FeeEstimate>;

    /// Prove, sign and broadcast a call, returning its transaction id.
    async fn execute(&self, options: &ExecuteOptions) -> anyhow::Result<String>;

    /// Build a proving request for a delegated prover.
    async fn proving_request(
        &self,
        options: &ExecuteOptions,
        broadcast: bool,
    ) -> anyhow::Result<ProvingRequest>;
}

/// Credentials for delegated proving.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateProvingConfig {
    pub api_key: String,
    pub consumer_id: String,
    /// Prover endpoint, defaulting to the public prover of the network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl DelegateProvingConfig {
    pub fn new(api_key: impl Into<String>, consumer_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            consumer_id: consumer_id.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl std::fmt::Debug for DelegateProvingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateProvingConfig")
            .field("api_key", &"<redacted>")
            .field("consumer_id", &self.consumer_id)
            .field("url", &self.url)
            .finish()
    }
}
