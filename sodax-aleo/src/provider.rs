//! Spoke providers.
//!
//! [`AleoBaseSpokeProvider`] builds the asset-manager and connection program
//! calls and reads on-chain state. [`AleoSpokeProvider`] pairs it with a
//! [`SpokeSigner`]: either a wallet that signs and submits, or a bare address
//! for which unsigned [`RawTransaction`]s are produced.

use std::sync::Arc;
use std::time::Duration;

use sodax_common::HubAddress;
use tracing::{debug, info};

use crate::codec::{bytes_to_leo_u8_array, format_amount, is_valid_address, is_valid_transaction_id, parse_leo_integer};
use crate::config::AleoSpokeChainConfig;
use crate::conn_sn::ConnSnAllocator;
use crate::error::{AleoError, NetworkError};
use crate::network::{AleoNetworkClient, HttpNetworkClient};
use crate::program::ProgramManager;
use crate::types::{AleoAddress, ExecuteOptions, FeeEstimate, Field, LeoType, ProgramId, RawTransaction, WaitOptions};
use crate::wallet::WalletProvider;

/// Balance mapping of token programs.
pub const ACCOUNT_MAPPING: &str = "account";

pub const TRANSFER_FUNCTION: &str = "transfer";
pub const TRANSFER_NATIVE_FUNCTION: &str = "transfer_native";
pub const SEND_MESSAGE_FUNCTION: &str = "send_message";

/// Who signs spoke transactions.
#[derive(Clone)]
pub enum SpokeSigner {
    /// No signing capability: only unsigned transactions are produced.
    Raw { address: AleoAddress },
    Wallet(Arc<dyn WalletProvider>),
}

impl SpokeSigner {
    pub async fn wallet_address(&self) -> Result<AleoAddress, AleoError> {
        match self {
            SpokeSigner::Raw { address } => Ok(address.clone()),
            SpokeSigner::Wallet(wallet) => wallet.wallet_address().await,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, SpokeSigner::Raw { .. })
    }
}

impl std::fmt::Debug for SpokeSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpokeSigner::Raw { address } => f.debug_struct("Raw").field("address", address).finish(),
            SpokeSigner::Wallet(_) => f.write_str("Wallet"),
        }
    }
}

/// Outcome of a spoke call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    /// Submitted by the wallet, with the id it reported.
    Submitted(String),
    Raw(RawTransaction),
}

impl TxOutcome {
    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            TxOutcome::Submitted(id) => Some(id),
            TxOutcome::Raw(_) => None,
        }
    }

    pub fn into_raw(self) -> Option<RawTransaction> {
        match self {
            TxOutcome::Raw(raw) => Some(raw),
            TxOutcome::Submitted(_) => None,
        }
    }
}

/// Arguments of the asset manager `transfer` functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferParams {
    pub token: Field,
    /// Hub-side recipient
    pub dst_address: HubAddress,
    pub amount: u64,
    pub conn_sn: u128,
    /// keccak256 of the hub payload
    pub data: [u8; 32],
    /// Relayer fee
    pub fee_amount: u64,
    pub hub_chain_id: u128,
    pub hub_address: HubAddress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TransferKind {
    Token,
    Native,
}

impl TransferKind {
    fn function_name(self) -> &'static str {
        match self {
            TransferKind::Token => TRANSFER_FUNCTION,
            TransferKind::Native => TRANSFER_NATIVE_FUNCTION,
        }
    }
}

/// Program calls and state reads of the Aleo spoke.
#[derive(Clone)]
pub struct AleoBaseSpokeProvider {
    config: AleoSpokeChainConfig,
    network: Arc<dyn AleoNetworkClient>,
    program_manager: Option<Arc<dyn ProgramManager>>,
}

impl AleoBaseSpokeProvider {
    pub fn new(config: AleoSpokeChainConfig, network: Arc<dyn AleoNetworkClient>) -> Self {
        Self {
            config,
            network,
            program_manager: None,
        }
    }

    /// Provider talking to `config.rpc_url` over HTTP.
    pub fn from_config(config: AleoSpokeChainConfig) -> Self {
        let network = Arc::new(HttpNetworkClient::new(config.rpc_url.clone(), config.network));
        Self::new(config, network)
    }

    /// Program manager used for fee estimation.
    pub fn with_program_manager(mut self, program_manager: Arc<dyn ProgramManager>) -> Self {
        self.program_manager = Some(program_manager);
        self
    }

    pub fn config(&self) -> &AleoSpokeChainConfig {
        &self.config
    }

    pub fn network(&self) -> &Arc<dyn AleoNetworkClient> {
        &self.network
    }

    pub fn conn_sn_allocator(&self) -> ConnSnAllocator {
        ConnSnAllocator::new(self.network.clone(), self.config.addresses.connection.clone())
    }

    /// Call options of an asset manager transfer.
    pub fn transfer_options(&self, params: &TransferParams, native: bool) -> Result<ExecuteOptions, AleoError> {
        let kind = if native { TransferKind::Native } else { TransferKind::Token };
        let inputs = vec![
            format_amount(&params.token, LeoType::Field),
            bytes_to_leo_u8_array(params.dst_address.as_bytes())?,
            format_amount(params.amount, LeoType::U64),
            format_amount(params.conn_sn, LeoType::U128),
            bytes_to_leo_u8_array(&params.data)?,
            format_amount(params.fee_amount, LeoType::U64),
            format_amount(params.hub_chain_id, LeoType::U128),
            bytes_to_leo_u8_array(params.hub_address.as_bytes())?,
        ];
        Ok(ExecuteOptions::new(
            self.config.addresses.asset_manager.as_str(),
            kind.function_name(),
            inputs,
        ))
    }

    /// Call options of a connection `send_message`.
    pub fn send_message_options(
        &self,
        dst_chain_id: u128,
        dst_address: &HubAddress,
        conn_sn: u128,
        payload: &[u8; 32],
    ) -> Result<ExecuteOptions, AleoError> {
        let inputs = vec![
            format_amount(dst_chain_id, LeoType::U128),
            bytes_to_leo_u8_array(dst_address.as_bytes())?,
            format_amount(conn_sn, LeoType::U128),
            bytes_to_leo_u8_array(payload)?,
        ];
        Ok(ExecuteOptions::new(
            self.config.addresses.connection.as_str(),
            SEND_MESSAGE_FUNCTION,
            inputs,
        ))
    }

    /// Token transfer into the hub through `transfer`.
    pub async fn transfer(&self, params: &TransferParams, signer: &SpokeSigner, raw: bool) -> Result<TxOutcome, AleoError> {
        self.execute_transfer(TransferKind::Token, params, signer, raw).await
    }

    /// Native credits transfer into the hub through `transfer_native`.
    pub async fn transfer_native(
        &self,
        params: &TransferParams,
        signer: &SpokeSigner,
        raw: bool,
    ) -> Result<TxOutcome, AleoError> {
        self.execute_transfer(TransferKind::Native, params, signer, raw).await
    }

    async fn execute_transfer(
        &self,
        kind: TransferKind,
        params: &TransferParams,
        signer: &SpokeSigner,
        raw: bool,
    ) -> Result<TxOutcome, AleoError> {
        let options = self.transfer_options(params, kind == TransferKind::Native)?;
        let to = self.config.addresses.asset_manager.clone();
        self.dispatch(options, to, u128::from(params.amount), signer, raw).await
    }

    /// Message to the hub through the connection program.
    pub async fn send_message(
        &self,
        dst_chain_id: u128,
        dst_address: &HubAddress,
        conn_sn: u128,
        payload: &[u8; 32],
        signer: &SpokeSigner,
        raw: bool,
    ) -> Result<TxOutcome, AleoError> {
        let options = self.send_message_options(dst_chain_id, dst_address, conn_sn, payload)?;
        let to = self.config.addresses.connection.clone();
        self.dispatch(options, to, 0, signer, raw).await
    }

    async fn dispatch(
        &self,
        options: ExecuteOptions,
        to: ProgramId,
        value: u128,
        signer: &SpokeSigner,
        raw: bool,
    ) -> Result<TxOutcome, AleoError> {
        debug!("{}/{} inputs: {:?}", options.program_name, options.function_name, options.inputs);

        match signer {
            SpokeSigner::Wallet(wallet) if !raw => {
                let result = wallet.execute(&options).await?;
                info!("Submitted {}/{} as {}", options.program_name, options.function_name, result.transaction_id);
                Ok(TxOutcome::Submitted(result.transaction_id))
            }
            _ => Ok(TxOutcome::Raw(RawTransaction {
                from: signer.wallet_address().await?,
                to,
                value,
                data: options,
            })),
        }
    }

    /// Balance of `wallet` in the `account` mapping of `token_program`.
    ///
    /// An account without an entry has a zero balance.
    pub async fn get_balance(&self, wallet: &str, token_program: &str) -> Result<u128, AleoError> {
        if !is_valid_address(wallet) {
            return Err(AleoError::InvalidAddress(wallet.to_string()));
        }
        match self
            .network
            .get_program_mapping_value(token_program, ACCOUNT_MAPPING, wallet)
            .await
        {
            Ok(value) => Ok(parse_leo_integer(&value)?),
            Err(NetworkError::NotFound(_)) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Execution fee of a call, from the program manager.
    pub async fn estimate_fee(&self, options: &ExecuteOptions) -> Result<FeeEstimate, AleoError> {
        let program_manager = self
            .program_manager
            .as_ref()
            .ok_or_else(|| AleoError::FeeEstimation("no program manager configured".into()))?;
        program_manager
            .estimate_execution_fee(options)
            .await
            .map_err(|e| AleoError::FeeEstimation(e.to_string()))
    }

    pub async fn is_conn_sn_used(&self, conn_sn: u128) -> Result<bool, AleoError> {
        Ok(self.conn_sn_allocator().is_used(conn_sn).await?)
    }

    pub async fn generate_unique_conn_sn(&self, candidate: Option<u128>) -> Result<u128, AleoError> {
        self.conn_sn_allocator().allocate(candidate).await
    }
}

impl std::fmt::Debug for AleoBaseSpokeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AleoBaseSpokeProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Base provider bound to a signer.
#[derive(Clone, Debug)]
pub struct AleoSpokeProvider {
    base: AleoBaseSpokeProvider,
    signer: SpokeSigner,
}

impl AleoSpokeProvider {
    /// Provider signing through `wallet`.
    pub fn new(base: AleoBaseSpokeProvider, wallet: Arc<dyn WalletProvider>) -> Self {
        Self {
            base,
            signer: SpokeSigner::Wallet(wallet),
        }
    }

    /// Provider that only knows an address and builds unsigned transactions.
    pub fn raw(base: AleoBaseSpokeProvider, address: &str) -> Result<Self, AleoError> {
        Ok(Self {
            base,
            signer: SpokeSigner::Raw {
                address: address.parse()?,
            },
        })
    }

    pub fn base(&self) -> &AleoBaseSpokeProvider {
        &self.base
    }

    pub fn config(&self) -> &AleoSpokeChainConfig {
        self.base.config()
    }

    pub fn signer(&self) -> &SpokeSigner {
        &self.signer
    }

    pub fn is_raw(&self) -> bool {
        self.signer.is_raw()
    }

    pub async fn wallet_address(&self) -> Result<AleoAddress, AleoError> {
        self.signer.wallet_address().await
    }

    /// Wait for `tx_id`, returning whether it was accepted.
    ///
    /// Rejection is `Ok(false)`; a timeout or malformed id is an error.
    pub async fn wait_for_transaction_confirmation(&self, tx_id: &str, timeout: Duration) -> Result<bool, AleoError> {
        if !is_valid_transaction_id(tx_id) {
            return Err(AleoError::InvalidTransactionId(tx_id.to_string()));
        }
        let wallet = match &self.signer {
            SpokeSigner::Raw { .. } => return Err(AleoError::RawProvider),
            SpokeSigner::Wallet(wallet) => wallet,
        };

        let options = WaitOptions::default().with_timeout(timeout);
        match wallet.wait_for_transaction_receipt(tx_id, options).await {
            Ok(_) => Ok(true),
            Err(AleoError::Rejected(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
