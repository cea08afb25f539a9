//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sodax_aleo::{
    AleoNetworkClient, AleoSpokeChainConfig, ConfirmedTransaction, DelegateProvingConfig, ExecuteOptions,
    ExecutionResult, FeeEstimate, NetworkError, ProgramManager, ProvingRequest, TransactionId,
    TransactionReceipt, TransactionStatus, WaitOptions, WalletProvider, AleoAddress, AleoError,
};
use sodax_common::{CommonError, HubAddress, HubWalletResolver};

// === Fixtures ===

pub const USER: &str = "aleo1rhgdu77hgyqd3xjj8ucu3jj9r2krwz6mnzyd80gncr5fxcwlh5rsvzp9px";
pub const ALEO_RELAY_CHAIN_ID: u128 = 42;

pub fn tx_id(c: char) -> String {
    format!("at1{}", c.to_string().repeat(58))
}

pub fn config() -> AleoSpokeChainConfig {
    AleoSpokeChainConfig::mainnet(ALEO_RELAY_CHAIN_ID).unwrap()
}

pub fn hub_address(last: u8) -> HubAddress {
    let mut bytes = [0u8; 20];
    bytes[19] = last;
    HubAddress::from(bytes)
}

// === Network ===

/// In-memory Aleo node.
#[derive(Default)]
pub struct MockNetwork {
    /// `program/mapping/key` -> value
    pub mappings: Mutex<HashMap<String, String>>,
    /// Every key probed in any mapping, in order.
    pub probes: Mutex<Vec<String>>,
    /// Answers for confirmation lookups, the last one repeating.
    pub confirmations: Mutex<VecDeque<Result<Option<TransactionStatus>, NetworkError>>>,
    pub mapping_failure: Mutex<Option<NetworkError>>,
    pub proving_submissions: Mutex<Vec<(String, ProvingRequest)>>,
    pub confirmation_polls: AtomicU32,
}

impl MockNetwork {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_mapping(&self, program: &str, mapping: &str, key: &str, value: &str) {
        self.mappings
            .lock()
            .unwrap()
            .insert(format!("{program}/{mapping}/{key}"), value.to_string());
    }

    pub fn fail_mappings(&self, error: NetworkError) {
        *self.mapping_failure.lock().unwrap() = Some(error);
    }

    pub fn script_confirmations(&self, answers: Vec<Result<Option<TransactionStatus>, NetworkError>>) {
        *self.confirmations.lock().unwrap() = answers.into();
    }

    pub fn probes(&self) -> Vec<String> {
        self.probes.lock().unwrap().clone()
    }
}

#[async_trait]
impl AleoNetworkClient for MockNetwork {
    async fn get_program_mapping_value(
        &self,
        program: &str,
        mapping: &str,
        key: &str,
    ) -> Result<String, NetworkError> {
        self.probes.lock().unwrap().push(key.to_string());
        if let Some(e) = self.mapping_failure.lock().unwrap().clone() {
            return Err(e);
        }
        self.mappings
            .lock()
            .unwrap()
            .get(&format!("{program}/{mapping}/{key}"))
            .cloned()
            .ok_or_else(|| NetworkError::NotFound(key.to_string()))
    }

    async fn get_confirmed_transaction(
        &self,
        _tx_id: &str,
    ) -> Result<Option<ConfirmedTransaction>, NetworkError> {
        self.confirmation_polls.fetch_add(1, Ordering::SeqCst);
        let answer = {
            let mut answers = self.confirmations.lock().unwrap();
            if answers.len() > 1 {
                answers.pop_front().unwrap()
            } else {
                answers.front().cloned().unwrap_or(Ok(None))
            }
        };
        Ok(answer?.map(|status| ConfirmedTransaction {
            status,
            tx_type: "execute".into(),
            index: 0,
            transaction: serde_json::json!({}),
            finalize: vec![],
        }))
    }

    async fn submit_proving_request(
        &self,
        url: &str,
        request: &ProvingRequest,
        _delegate: &DelegateProvingConfig,
    ) -> Result<TransactionId, NetworkError> {
        self.proving_submissions
            .lock()
            .unwrap()
            .push((url.to_string(), request.clone()));
        Ok(tx_id('d').parse().unwrap())
    }
}

// === Wallet ===

/// Wallet recording every call it is asked to execute.
pub struct RecordingWallet {
    pub address: AleoAddress,
    pub executed: Mutex<Vec<ExecuteOptions>>,
}

impl RecordingWallet {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            address: USER.parse().unwrap(),
            executed: Mutex::new(Vec::new()),
        })
    }

    pub fn executed(&self) -> Vec<ExecuteOptions> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for RecordingWallet {
    async fn wallet_address(&self) -> Result<AleoAddress, AleoError> {
        Ok(self.address.clone())
    }

    async fn execute(&self, options: &ExecuteOptions) -> Result<ExecutionResult, AleoError> {
        self.executed.lock().unwrap().push(options.clone());
        Ok(ExecutionResult {
            transaction_id: tx_id('w'),
            outputs: None,
        })
    }

    async fn wait_for_transaction_receipt(
        &self,
        tx_id: &str,
        _options: WaitOptions,
    ) -> Result<TransactionReceipt, AleoError> {
        Err(AleoError::Rejected(tx_id.to_string()))
    }
}

// === Program manager ===

/// Program manager that "proves" by echoing the call.
pub struct EchoProgramManager {
    pub address: AleoAddress,
    pub fail_with: Option<String>,
    pub executed: Mutex<Vec<ExecuteOptions>>,
}

impl EchoProgramManager {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            address: USER.parse().unwrap(),
            fail_with: None,
            executed: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            address: USER.parse().unwrap(),
            fail_with: Some(message.to_string()),
            executed: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ProgramManager for EchoProgramManager {
    fn address(&self) -> AleoAddress {
        self.address.clone()
    }

    async fn estimate_execution_fee(&self, options: &ExecuteOptions) -> anyhow::Result<FeeEstimate> {
        Ok(FeeEstimate {
            microcredits: 1_000 * options.inputs.len() as u64,
        })
    }

    async fn execute(&self, options: &ExecuteOptions) -> anyhow::Result<String> {
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{}", message);
        }
        self.executed.lock().unwrap().push(options.clone());
        Ok(tx_id('e'))
    }

    async fn proving_request(&self, options: &ExecuteOptions, broadcast: bool) -> anyhow::Result<ProvingRequest> {
        Ok(ProvingRequest(serde_json::json!({
            "function": options.function_name,
            "broadcast": broadcast,
        })))
    }
}

// === Hub ===

/// Hub wallet factory answering from a fixed address.
pub struct FixedHubWallets {
    pub wallet: HubAddress,
    pub lookups: Mutex<Vec<(u128, Vec<u8>)>>,
}

impl FixedHubWallets {
    pub fn new(wallet: HubAddress) -> Arc<Self> {
        Arc::new(Self {
            wallet,
            lookups: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl HubWalletResolver for FixedHubWallets {
    async fn user_hub_wallet(
        &self,
        spoke_relay_chain_id: u128,
        spoke_address: &[u8],
    ) -> Result<HubAddress, CommonError> {
        self.lookups
            .lock()
            .unwrap()
            .push((spoke_relay_chain_id, spoke_address.to_vec()));
        Ok(self.wallet)
    }
}
