//! Spoke service: deposits into the hub and hub wallet calls from Aleo.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sodax_common::{encode_hex_prefixed, keccak256, HubAddress, HubChainConfig, HubWalletResolver};
use tracing::info;

use crate::error::AleoError;
use crate::provider::{AleoSpokeProvider, TransferParams, TxOutcome};
use crate::types::{AleoAddress, FeeEstimate, Field, RawTransaction};

/// Deposit into the hub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositParams {
    pub from: AleoAddress,
    /// Hub wallet of the user, looked up from `from` when absent.
    pub to: Option<HubAddress>,
    pub token: Field,
    pub amount: u64,
    /// Hub calldata; only its keccak256 goes on the spoke.
    pub data: Vec<u8>,
    /// Preferred sequence number, replaced when already used.
    pub conn_sn: Option<u128>,
    pub fee_amount: u64,
}

/// Deposit as the hub sees it, for simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositSimulationParams {
    #[serde(rename = "spokeChainID")]
    pub spoke_chain_id: String,
    pub token: String,
    pub from: String,
    pub to: HubAddress,
    pub amount: u128,
    pub data: String,
    pub src_address: String,
}

/// Hex of the spoke-side encoding of an Aleo identifier (its UTF-8 bytes).
pub fn encode_spoke_address(value: &str) -> String {
    encode_hex_prefixed(value.as_bytes())
}

/// Aleo spoke service.
#[derive(Clone)]
pub struct AleoSpokeService {
    hub: HubChainConfig,
    hub_wallets: Arc<dyn HubWalletResolver>,
}

impl AleoSpokeService {
    pub fn new(hub: HubChainConfig, hub_wallets: Arc<dyn HubWalletResolver>) -> Self {
        Self { hub, hub_wallets }
    }

    pub fn hub(&self) -> &HubChainConfig {
        &self.hub
    }

    /// Hub wallet of an Aleo account.
    pub async fn user_hub_wallet(
        &self,
        provider: &AleoSpokeProvider,
        from: &AleoAddress,
    ) -> Result<HubAddress, AleoError> {
        let relay_chain_id = provider.config().relay_chain_id;
        Ok(self
            .hub_wallets
            .user_hub_wallet(relay_chain_id, &from.bcs_bytes())
            .await?)
    }

    async fn resolve_recipient(
        &self,
        params: &DepositParams,
        provider: &AleoSpokeProvider,
    ) -> Result<HubAddress, AleoError> {
        match params.to {
            Some(to) => Ok(to),
            None => self.user_hub_wallet(provider, &params.from).await,
        }
    }

    /// Deposit `params.amount` of `params.token` into the hub.
    ///
    /// Native credits go through `transfer_native`, every other token through
    /// `transfer`.
    pub async fn deposit(
        &self,
        params: &DepositParams,
        provider: &AleoSpokeProvider,
        raw: bool,
    ) -> Result<TxOutcome, AleoError> {
        info!("Depositing on spoke chain {}", provider.config().chain_id);

        let recipient = self.resolve_recipient(params, provider).await?;
        let base = provider.base();
        let conn_sn = base.generate_unique_conn_sn(params.conn_sn).await?;
        let hub_chain_id = u128::from(self.hub.evm_chain_id);
        info!("Hub chain id {}", hub_chain_id);

        let transfer = TransferParams {
            token: params.token.clone(),
            dst_address: recipient,
            amount: params.amount,
            conn_sn,
            data: keccak256(&params.data),
            fee_amount: params.fee_amount,
            hub_chain_id,
            hub_address: self.hub.asset_manager,
        };

        if provider.config().is_native(&params.token) {
            base.transfer_native(&transfer, provider.signer(), raw).await
        } else {
            base.transfer(&transfer, provider.signer(), raw).await
        }
    }

    /// Send `payload` to the hub wallet `from` through the connection program.
    pub async fn call_wallet(
        &self,
        from: &HubAddress,
        payload: &[u8],
        provider: &AleoSpokeProvider,
        raw: bool,
    ) -> Result<TxOutcome, AleoError> {
        let relay_chain_id = self.hub.relay_chain_id()?;
        let base = provider.base();
        let conn_sn = base.generate_unique_conn_sn(None).await?;
        base.send_message(
            relay_chain_id,
            from,
            conn_sn,
            &keccak256(payload),
            provider.signer(),
            raw,
        )
        .await
    }

    /// Wait for a spoke transaction. Raw providers cannot wait.
    pub async fn wait_for_confirmation(
        &self,
        provider: &AleoSpokeProvider,
        tx_id: &str,
        timeout: Duration,
    ) -> Result<bool, AleoError> {
        if provider.is_raw() {
            return Err(AleoError::RawProvider);
        }
        provider.wait_for_transaction_confirmation(tx_id, timeout).await
    }

    /// Own balance of `token_program`.
    pub async fn get_deposit(&self, token_program: &str, provider: &AleoSpokeProvider) -> Result<u128, AleoError> {
        let address = provider.wallet_address().await?;
        provider.base().get_balance(address.as_str(), token_program).await
    }

    /// Execution fee of an unsigned transaction.
    pub async fn estimate_gas(
        &self,
        raw: &RawTransaction,
        provider: &AleoSpokeProvider,
    ) -> Result<FeeEstimate, AleoError> {
        provider.base().estimate_fee(&raw.data).await
    }

    /// Deposit parameters as the hub will see them.
    pub async fn simulate_deposit_params(
        &self,
        params: &DepositParams,
        provider: &AleoSpokeProvider,
    ) -> Result<DepositSimulationParams, AleoError> {
        let to = self.resolve_recipient(params, provider).await?;
        let config = provider.config();
        Ok(DepositSimulationParams {
            spoke_chain_id: config.chain_id.clone(),
            token: encode_spoke_address(params.token.as_str()),
            from: encode_spoke_address(params.from.as_str()),
            to,
            amount: u128::from(params.amount),
            data: encode_hex_prefixed(&params.data),
            src_address: encode_spoke_address(config.addresses.asset_manager.as_str()),
        })
    }
}
