//! Wallet provider.
//!
//! A [`WalletProvider`] is what a spoke provider signs and submits through.
//! [`AleoWalletProvider`] backs it with one of two wallets:
//!
//! - [`LocalKeyWallet`]: a program manager holding the account key, proving
//!   locally or through a delegated prover
//! - [`BrowserExtensionWallet`]: a connected extension reached through a
//!   [`WalletAdapter`]
//!
//! Both wait for confirmation the same way, by polling the network client.

mod browser;
mod local;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

pub use browser::{
    AdapterAccount, AdapterTransactionOptions, BrowserExtensionWallet, DecryptPermission,
    WalletAdapter, DEFAULT_BROWSER_FEE_MICROCREDITS,
};
pub use local::LocalKeyWallet;

use crate::confirmation::wait_for_transaction_confirmation;
use crate::error::{AleoError, NetworkError};
use crate::network::AleoNetworkClient;
use crate::types::{AleoAddress, AleoNetwork, ExecuteOptions, ExecutionResult, TransactionReceipt, WaitOptions};

/// Signing and submission capability of a connected wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn wallet_address(&self) -> Result<AleoAddress, AleoError>;

    /// Sign and submit a program call.
    async fn execute(&self, options: &ExecuteOptions) -> Result<ExecutionResult, AleoError>;

    /// Wait until `tx_id` is accepted.
    async fn wait_for_transaction_receipt(
        &self,
        tx_id: &str,
        options: WaitOptions,
    ) -> Result<TransactionReceipt, AleoError>;

    async fn execute_and_wait(
        &self,
        options: &ExecuteOptions,
        wait: WaitOptions,
    ) -> Result<(ExecutionResult, TransactionReceipt), AleoError> {
        let result = self.execute(options).await?;
        let receipt = self
            .wait_for_transaction_receipt(&result.transaction_id, wait)
            .await?;
        Ok((result, receipt))
    }
}

/// Wallet behind an [`AleoWalletProvider`].
pub enum AleoWallet {
    LocalKey(LocalKeyWallet),
    BrowserExtension(BrowserExtensionWallet),
}

/// Wallet provider for Aleo.
pub struct AleoWalletProvider {
    wallet: AleoWallet,
    network: Arc<dyn AleoNetworkClient>,
    aleo_network: AleoNetwork,
}

impl AleoWalletProvider {
    pub fn new(wallet: AleoWallet, network: Arc<dyn AleoNetworkClient>, aleo_network: AleoNetwork) -> Self {
        Self {
            wallet,
            network,
            aleo_network,
        }
    }

    pub fn local_key(wallet: LocalKeyWallet, network: Arc<dyn AleoNetworkClient>, aleo_network: AleoNetwork) -> Self {
        Self::new(AleoWallet::LocalKey(wallet), network, aleo_network)
    }

    pub fn browser_extension(
        wallet: BrowserExtensionWallet,
        network: Arc<dyn AleoNetworkClient>,
        aleo_network: AleoNetwork,
    ) -> Self {
        Self::new(AleoWallet::BrowserExtension(wallet), network, aleo_network)
    }

    pub fn wallet(&self) -> &AleoWallet {
        &self.wallet
    }

    pub fn aleo_network(&self) -> AleoNetwork {
        self.aleo_network
    }
}

/// Map a confirmation failure onto the spoke error it stands for.
pub fn confirmation_error(tx_id: &str, options: &WaitOptions, error: NetworkError) -> AleoError {
    match error {
        NetworkError::Timeout { .. } => AleoError::ConfirmationTimeout {
            transaction_id: tx_id.to_string(),
            timeout_ms: u64::try_from(options.timeout.as_millis()).unwrap_or(u64::MAX),
        },
        NetworkError::MalformedId(_) => AleoError::MalformedTransactionId(tx_id.to_string()),
        NetworkError::Rejected(_) => AleoError::Rejected(tx_id.to_string()),
        other => AleoError::Network(other),
    }
}

#[async_trait]
impl WalletProvider for AleoWalletProvider {
    async fn wallet_address(&self) -> Result<AleoAddress, AleoError> {
        match &self.wallet {
            AleoWallet::LocalKey(wallet) => Ok(wallet.address()),
            AleoWallet::BrowserExtension(wallet) => wallet.address(),
        }
    }

    async fn execute(&self, options: &ExecuteOptions) -> Result<ExecutionResult, AleoError> {
        info!(
            "Executing {}/{} with {} inputs",
            options.program_name,
            options.function_name,
            options.inputs.len()
        );
        match &self.wallet {
            AleoWallet::LocalKey(wallet) => {
                wallet
                    .execute(self.network.as_ref(), self.aleo_network, options)
                    .await
            }
            AleoWallet::BrowserExtension(wallet) => wallet.execute(options).await,
        }
    }

    async fn wait_for_transaction_receipt(
        &self,
        tx_id: &str,
        options: WaitOptions,
    ) -> Result<TransactionReceipt, AleoError> {
        let confirmed = wait_for_transaction_confirmation(self.network.as_ref(), tx_id, options)
            .await
            .map_err(|e| confirmation_error(tx_id, &options, e))?;
        Ok(TransactionReceipt::from_confirmed(tx_id, confirmed))
    }
}
