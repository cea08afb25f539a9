//! Spoke actions driven from the command line.
//!
//! The CLI only knows an address, so every action builds an unsigned
//! transaction and prints it for signing elsewhere.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use sodax_aleo::confirmation::wait_for_transaction_confirmation;
use sodax_aleo::{
    AleoAddress, AleoBaseSpokeProvider, AleoSpokeProvider, AleoSpokeService, DepositParams, Field, TransactionReceipt,
    TxOutcome,
};
use sodax_common::{decode_hex, encode_hex_prefixed, EvmHubProvider, HubAddress, RelayClient};
use tracing::info;

use crate::config::CliConfig;

/// Wired-up providers for one CLI run.
pub struct Session {
    pub config: CliConfig,
    pub provider: AleoSpokeProvider,
}

impl Session {
    pub fn new(config: CliConfig) -> Result<Self> {
        let base = AleoBaseSpokeProvider::from_config(config.spoke_config()?);
        let provider = AleoSpokeProvider::raw(base, &config.aleo_address)
            .with_context(|| format!("ALEO_ADDRESS {} is not an Aleo address", config.aleo_address))?;
        Ok(Self { config, provider })
    }

    fn service(&self) -> Result<AleoSpokeService> {
        let hub = self.config.hub_config()?;
        let resolver = Arc::new(EvmHubProvider::new(hub.clone())?);
        Ok(AleoSpokeService::new(hub, resolver))
    }

    /// Hub wallet of the configured account.
    pub async fn user_hub_wallet(&self) -> Result<HubAddress> {
        let service = self.service()?;
        let address = self.provider.wallet_address().await?;
        Ok(service.user_hub_wallet(&self.provider, &address).await?)
    }
}

/// Deposit-family arguments.
pub struct DepositRequest {
    pub token: String,
    pub amount: u64,
    pub data: String,
    pub to: Option<HubAddress>,
    pub conn_sn: Option<u128>,
    pub fee_amount: u64,
}

pub async fn deposit(session: &Session, action: &str, request: DepositRequest) -> Result<()> {
    let service = session.service()?;
    let token: Field = request.token.parse().context("token must be a field element")?;
    let data = decode_hex(&request.data).context("--data must be hex")?;

    let params = DepositParams {
        from: session.provider.wallet_address().await?,
        to: request.to,
        token,
        amount: request.amount,
        data,
        conn_sn: request.conn_sn,
        fee_amount: request.fee_amount,
    };

    let outcome = service.deposit(&params, &session.provider, true).await?;
    print_outcome(action, outcome)
}

/// Wallet-call arguments. Token and amount are what the hub calldata acts on.
pub struct WalletCallRequest {
    pub token: String,
    pub amount: u64,
    pub recipient: Option<String>,
    pub data: String,
}

pub async fn call_wallet(session: &Session, action: &str, request: WalletCallRequest) -> Result<()> {
    let token: Field = request.token.parse().context("token must be a field element")?;
    if let Some(recipient) = &request.recipient {
        let recipient: AleoAddress = recipient
            .parse()
            .with_context(|| format!("recipient {} is not an Aleo address", recipient))?;
        info!("[{}] recipient {}", action, recipient);
    }
    let payload = decode_hex(&request.data).context("--data must be hex")?;

    let service = session.service()?;
    let hub_wallet = session.user_hub_wallet().await?;
    info!("[{}] {} of token {} via hub wallet {}", action, request.amount, token, hub_wallet);

    let outcome = service.call_wallet(&hub_wallet, &payload, &session.provider, true).await?;
    print_outcome(action, outcome)
}

/// Deposit the input token of a swap intent.
pub async fn create_intent(session: &Session, request: DepositRequest, output_token: &str) -> Result<()> {
    let output: Field = output_token.parse().context("output token must be a field element")?;
    info!("[createIntent] {} of token {} for token {}", request.amount, request.token, output);
    deposit(session, "createIntent", request).await
}

fn print_outcome(action: &str, outcome: TxOutcome) -> Result<()> {
    match outcome {
        TxOutcome::Raw(raw) => {
            info!("[{}] built {}/{}", action, raw.data.program_name, raw.data.function_name);
            println!("{}", serde_json::to_string_pretty(&raw)?);
        }
        TxOutcome::Submitted(tx_id) => println!("[{}] txId {}", action, tx_id),
    }
    Ok(())
}

pub async fn balance(session: &Session, token_program: &str) -> Result<()> {
    let address = session.provider.wallet_address().await?;
    let balance = session.provider.base().get_balance(address.as_str(), token_program).await?;
    println!("{}", balance);
    Ok(())
}

pub async fn wait(session: &Session, tx_id: &str) -> Result<()> {
    if !sodax_aleo::codec::is_valid_transaction_id(tx_id) {
        bail!("{} is not an Aleo transaction id", tx_id);
    }
    let options = session.config.wait_options();
    let confirmed = wait_for_transaction_confirmation(session.provider.base().network().as_ref(), tx_id, options)
        .await
        .map_err(|e| sodax_aleo::wallet::confirmation_error(tx_id, &options, e))?;

    let receipt = TransactionReceipt::from_confirmed(tx_id, confirmed);
    println!("[wait] {} {:?} ({})", receipt.transaction_id, receipt.status, receipt.tx_type);
    Ok(())
}

pub async fn submit(session: &Session, tx_id: &str, payload: Option<&str>) -> Result<()> {
    let payload = payload
        .map(|p| decode_hex(p).map(|bytes| encode_hex_prefixed(&bytes)))
        .transpose()
        .context("--payload must be hex")?;
    let hub_wallet = session.user_hub_wallet().await?;

    let relay = RelayClient::new(session.config.api_url.clone());
    let response = relay
        .submit(&session.provider.config().chain_id, tx_id, &hub_wallet, payload.as_deref())
        .await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub async fn hub_wallet(session: &Session) -> Result<()> {
    println!("{}", session.user_hub_wallet().await?);
    Ok(())
}
