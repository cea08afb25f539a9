//! Wallet provider: local-key and browser-extension execution, confirmation.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use common::*;
use sodax_aleo::wallet::{
    AdapterAccount, AdapterTransactionOptions, DecryptPermission, DEFAULT_BROWSER_FEE_MICROCREDITS,
};
use sodax_aleo::{
    AleoBaseSpokeProvider, AleoError, AleoNetwork, AleoSpokeProvider, AleoWalletProvider, BrowserExtensionWallet,
    DelegateProvingConfig, ExecuteOptions, LocalKeyWallet, NetworkError, TransactionStatus, WaitOptions,
    WalletAdapter, WalletProvider,
};

fn options() -> ExecuteOptions {
    ExecuteOptions::new("asset_manager.aleo", "transfer", vec!["1field".into(), "2u64".into()])
}

// === Local key ===

#[tokio::test]
async fn test_local_key_executes_through_program_manager() {
    let network = MockNetwork::new();
    let pm = EchoProgramManager::new();
    let provider = AleoWalletProvider::local_key(LocalKeyWallet::new(pm.clone()), network.clone(), AleoNetwork::Mainnet);

    let result = provider.execute(&options()).await.unwrap();

    assert_eq!(result.transaction_id, tx_id('e'));
    assert_eq!(pm.executed.lock().unwrap().len(), 1);
    assert!(network.proving_submissions.lock().unwrap().is_empty());
    assert_eq!(provider.wallet_address().await.unwrap().as_str(), USER);
}

#[tokio::test]
async fn test_delegated_proving_uses_default_prover_url() {
    let network = MockNetwork::new();
    let pm = EchoProgramManager::new();
    let wallet = LocalKeyWallet::new(pm.clone()).with_delegate(DelegateProvingConfig::new("key", "consumer"));
    let provider = AleoWalletProvider::local_key(wallet, network.clone(), AleoNetwork::Testnet);

    let result = provider.execute(&options()).await.unwrap();

    assert_eq!(result.transaction_id, tx_id('d'));
    assert!(pm.executed.lock().unwrap().is_empty());
    let submissions = network.proving_submissions.lock().unwrap().clone();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].0, "https://api.provable.com/prove/testnet/prove");
    assert_eq!(submissions[0].1 .0["broadcast"], true);
}

#[tokio::test]
async fn test_delegated_proving_custom_url() {
    let network = MockNetwork::new();
    let delegate = DelegateProvingConfig::new("key", "consumer").with_url("http://prover.local/prove");
    let wallet = LocalKeyWallet::new(EchoProgramManager::new()).with_delegate(delegate);
    let provider = AleoWalletProvider::local_key(wallet, network.clone(), AleoNetwork::Mainnet);

    provider.execute(&options()).await.unwrap();

    assert_eq!(network.proving_submissions.lock().unwrap()[0].0, "http://prover.local/prove");
}

#[tokio::test]
async fn test_execution_failure_is_normalized() {
    let provider = AleoWalletProvider::local_key(
        LocalKeyWallet::new(EchoProgramManager::failing("insufficient public balance")),
        MockNetwork::new(),
        AleoNetwork::Mainnet,
    );

    let err = provider.execute(&options()).await.unwrap_err();
    match err {
        AleoError::Execution(message) => assert!(message.contains("insufficient public balance")),
        other => panic!("unexpected error: {other:?}"),
    }
}

// === Confirmation ===

fn local_provider(network: Arc<MockNetwork>) -> AleoWalletProvider {
    AleoWalletProvider::local_key(LocalKeyWallet::new(EchoProgramManager::new()), network, AleoNetwork::Mainnet)
}

#[tokio::test(start_paused = true)]
async fn test_receipt_after_pending_polls() {
    let network = MockNetwork::new();
    network.script_confirmations(vec![Ok(None), Ok(None), Ok(Some(TransactionStatus::Accepted))]);
    let provider = local_provider(network.clone());

    let receipt = provider
        .wait_for_transaction_receipt(&tx_id('a'), WaitOptions::default())
        .await
        .unwrap();

    assert_eq!(receipt.transaction_id, tx_id('a'));
    assert_eq!(receipt.status, TransactionStatus::Accepted);
    assert_eq!(network.confirmation_polls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_rejection_and_timeout_are_distinct_kinds() {
    let network = MockNetwork::new();
    network.script_confirmations(vec![Ok(Some(TransactionStatus::Rejected))]);
    let rejected = local_provider(network)
        .wait_for_transaction_receipt(&tx_id('r'), WaitOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(rejected, AleoError::Rejected(ref id) if *id == tx_id('r')));
    assert!(!rejected.is_retryable());

    let network = MockNetwork::new();
    let timed_out = local_provider(network)
        .wait_for_transaction_receipt(&tx_id('t'), WaitOptions::default().with_timeout(Duration::from_secs(6)))
        .await
        .unwrap_err();
    assert!(matches!(timed_out, AleoError::ConfirmationTimeout { timeout_ms: 6_000, .. }));
    assert!(timed_out.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_node_is_not_reported_as_pending() {
    let network = MockNetwork::new();
    network.script_confirmations(vec![Err(NetworkError::Http {
        status: 503,
        body: "node down".into(),
    })]);

    let err = local_provider(network.clone())
        .wait_for_transaction_receipt(&tx_id('n'), WaitOptions::default().with_timeout(Duration::from_secs(10)))
        .await
        .unwrap_err();
    assert!(matches!(err, AleoError::Network(NetworkError::Http { status: 503, .. })));
    assert!(network.confirmation_polls.load(Ordering::SeqCst) > 1);
}

#[tokio::test(start_paused = true)]
async fn test_node_blip_then_pending_times_out() {
    let network = MockNetwork::new();
    network.script_confirmations(vec![Err(NetworkError::Transport("reset".into())), Ok(None)]);

    let err = local_provider(network)
        .wait_for_transaction_receipt(&tx_id('p'), WaitOptions::default().with_timeout(Duration::from_secs(10)))
        .await
        .unwrap_err();
    assert!(matches!(err, AleoError::ConfirmationTimeout { timeout_ms: 10_000, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_malformed_id_kind() {
    let network = MockNetwork::new();
    network.script_confirmations(vec![Err(NetworkError::MalformedId("x".into()))]);

    let err = local_provider(network)
        .wait_for_transaction_receipt("x", WaitOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AleoError::MalformedTransactionId(_)));
}

#[tokio::test(start_paused = true)]
async fn test_execute_and_wait() {
    let network = MockNetwork::new();
    network.script_confirmations(vec![Ok(Some(TransactionStatus::Accepted))]);
    let provider = local_provider(network);

    let (result, receipt) = provider
        .execute_and_wait(&options(), WaitOptions::default())
        .await
        .unwrap();
    assert_eq!(result.transaction_id, receipt.transaction_id);
}

#[tokio::test(start_paused = true)]
async fn test_spoke_provider_confirmation_outcomes() {
    let network = MockNetwork::new();
    let wallet = Arc::new(local_provider(network.clone()));
    let base = AleoBaseSpokeProvider::new(config(), network.clone());
    let provider = AleoSpokeProvider::new(base, wallet);

    let err = provider
        .wait_for_transaction_confirmation("not-an-id", Duration::from_secs(45))
        .await
        .unwrap_err();
    assert!(matches!(err, AleoError::InvalidTransactionId(_)));
    assert_eq!(network.confirmation_polls.load(Ordering::SeqCst), 0);

    network.script_confirmations(vec![Ok(Some(TransactionStatus::Accepted))]);
    assert!(provider
        .wait_for_transaction_confirmation(&tx_id('a'), Duration::from_secs(45))
        .await
        .unwrap());

    network.script_confirmations(vec![Ok(Some(TransactionStatus::Rejected))]);
    assert!(!provider
        .wait_for_transaction_confirmation(&tx_id('b'), Duration::from_secs(45))
        .await
        .unwrap());
}

// === Browser extension ===

struct FakeExtension {
    connected: AtomicBool,
    account: Option<AdapterAccount>,
    transaction_id: Option<String>,
    requests: Mutex<Vec<AdapterTransactionOptions>>,
}

impl FakeExtension {
    fn new(connected: bool, transaction_id: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            connected: AtomicBool::new(connected),
            account: Some(AdapterAccount {
                address: USER.to_string(),
            }),
            transaction_id,
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl WalletAdapter for FakeExtension {
    fn name(&self) -> &str {
        "Fake Wallet"
    }

    fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn account(&self) -> Option<AdapterAccount> {
        self.account.clone()
    }

    async fn connect(
        &self,
        _network: AleoNetwork,
        _permission: DecryptPermission,
        _programs: &[String],
    ) -> anyhow::Result<Option<AdapterAccount>> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(self.account.clone())
    }

    async fn disconnect(&self) -> anyhow::Result<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn execute_transaction(&self, options: AdapterTransactionOptions) -> anyhow::Result<Option<String>> {
        self.requests.lock().unwrap().push(options);
        Ok(self.transaction_id.clone())
    }

    async fn sign_message(&self, message: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(message.iter().rev().copied().collect())
    }
}

fn browser_provider(extension: Arc<FakeExtension>) -> AleoWalletProvider {
    AleoWalletProvider::browser_extension(
        BrowserExtensionWallet::new(extension),
        MockNetwork::new(),
        AleoNetwork::Mainnet,
    )
}

#[tokio::test]
async fn test_browser_execute_with_default_fee() {
    let extension = FakeExtension::new(true, Some(tx_id('x')));
    let provider = browser_provider(extension.clone());

    let result = provider.execute(&options()).await.unwrap();

    assert_eq!(result.transaction_id, tx_id('x'));
    let requests = extension.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].program, "asset_manager.aleo");
    assert_eq!(requests[0].function, "transfer");
    assert_eq!(requests[0].fee, 1_000);
    assert!(!requests[0].private_fee);
}

#[tokio::test]
async fn test_browser_execute_with_priority_fee() {
    let extension = FakeExtension::new(true, Some(tx_id('x')));
    let provider = browser_provider(extension.clone());

    provider.execute(&options().with_priority_fee(2_500)).await.unwrap();

    assert_eq!(extension.requests.lock().unwrap()[0].fee, 2_500);
}

#[tokio::test]
async fn test_browser_zero_priority_fee_uses_default() {
    let extension = FakeExtension::new(true, Some(tx_id('x')));
    let provider = browser_provider(extension.clone());

    provider.execute(&options().with_priority_fee(0)).await.unwrap();

    assert_eq!(extension.requests.lock().unwrap()[0].fee, DEFAULT_BROWSER_FEE_MICROCREDITS);
}

#[tokio::test]
async fn test_browser_requires_connection() {
    let extension = FakeExtension::new(false, Some(tx_id('x')));
    let provider = browser_provider(extension.clone());

    assert!(matches!(provider.execute(&options()).await, Err(AleoError::WalletNotConnected)));
    assert!(matches!(provider.wallet_address().await, Err(AleoError::WalletNotConnected)));
    assert!(extension.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_browser_missing_transaction_id() {
    let provider = browser_provider(FakeExtension::new(true, None));

    assert!(matches!(provider.execute(&options()).await, Err(AleoError::MissingTransactionId)));
}

#[tokio::test]
async fn test_connector_lifecycle() {
    let extension = FakeExtension::new(false, None);
    let connector = sodax_aleo::AleoXConnector::new(extension.clone());
    assert_eq!(connector.id(), "Fake Wallet");

    assert!(matches!(connector.sign_message("hi").await, Err(AleoError::WalletNotConnected)));

    let account = connector.connect().await.unwrap().unwrap();
    assert_eq!(account.address, USER);
    assert_eq!(account.chain_type, sodax_common::ChainType::Aleo);
    assert_eq!(connector.sign_message("hi").await.unwrap(), b"ih".to_vec());

    connector.disconnect().await.unwrap();
    assert!(!extension.connected());
}
