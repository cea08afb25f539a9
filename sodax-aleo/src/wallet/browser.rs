use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AleoError;
use crate::types::{AleoAddress, AleoNetwork, ExecuteOptions, ExecutionResult};

/// Fee attached to extension transactions when none is given (0.001 credits).
pub const DEFAULT_BROWSER_FEE_MICROCREDITS: u64 = 1_000;

/// Record decryption permission requested on connect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DecryptPermission {
    NoDecrypt,
    #[default]
    UponRequest,
    AutoDecrypt,
    OnChainHistory,
}

/// Account exposed by a connected extension.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterAccount {
    pub address: String,
}

/// Transaction as handed to an extension.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterTransactionOptions {
    pub program: String,
    pub function: String,
    pub inputs: Vec<String>,
    /// Fee in microcredits
    pub fee: u64,
    pub private_fee: bool,
}

/// Browser-extension wallet adapter.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn name(&self) -> &str;

    fn connected(&self) -> bool;

    fn account(&self) -> Option<AdapterAccount>;

    async fn connect(
        &self,
        network: AleoNetwork,
        permission: DecryptPermission,
        programs: &[String],
    ) -> anyhow::Result<Option<AdapterAccount>>;

    async fn disconnect(&self) -> anyhow::Result<()>;

    /// Sign and submit; returns the transaction id when the extension reports one.
    async fn execute_transaction(&self, options: AdapterTransactionOptions) -> anyhow::Result<Option<String>>;

    async fn sign_message(&self, message: &[u8]) -> anyhow::Result<Vec<u8>>;
}

/// Wallet reached through a connected browser extension.
pub struct BrowserExtensionWallet {
    adapter: Arc<dyn WalletAdapter>,
}

impl BrowserExtensionWallet {
    pub fn new(adapter: Arc<dyn WalletAdapter>) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &Arc<dyn WalletAdapter> {
        &self.adapter
    }

    fn connected_account(&self) -> Result<AdapterAccount, AleoError> {
        if !self.adapter.connected() {
            return Err(AleoError::WalletNotConnected);
        }
        self.adapter.account().ok_or(AleoError::WalletNotConnected)
    }

    pub fn address(&self) -> Result<AleoAddress, AleoError> {
        self.connected_account()?.address.parse()
    }

    pub(crate) async fn execute(&self, options: &ExecuteOptions) -> Result<ExecutionResult, AleoError> {
        self.connected_account()?;

        let request = AdapterTransactionOptions {
            program: options.program_name.clone(),
            function: options.function_name.clone(),
            inputs: options.inputs.clone(),
            fee: options
                .priority_fee
                .filter(|fee| *fee > 0)
                .unwrap_or(DEFAULT_BROWSER_FEE_MICROCREDITS),
            private_fee: options.private_fee,
        };

        let transaction_id = self
            .adapter
            .execute_transaction(request)
            .await
            .map_err(|e| AleoError::Execution(e.to_string()))?
            .ok_or(AleoError::MissingTransactionId)?;

        Ok(ExecutionResult {
            transaction_id,
            outputs: None,
        })
    }
}
