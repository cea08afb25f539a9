//! sodax-aleo
//!
//! Command line driver for the Aleo spoke.
//!
//! Actions:
//! 1. Deposit family: token transfer into the hub carrying hub calldata
//!    - `deposit <token> <amount> [recipient]`
//!    - `supply <token> <amount>`, `repay <token> <amount>`
//!    - `createIntent <amount> <input_token> <output_token>`
//! 2. Wallet calls: message to the user's hub wallet
//!    - `withdrawAsset <token> <amount> <recipient>`
//!    - `borrow <token> <amount>`, `withdraw <token> <amount>`
//! 3. `balance`, `wait`, `submit` and `hub-wallet` helpers
//!
//! Hub calldata is built by the money market / swap tooling and passed in as
//! hex with `--data`.

mod actions;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sodax_common::HubAddress;
use tracing::info;

use crate::actions::{DepositRequest, Session, WalletCallRequest};
use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "sodax-aleo", about = "Build Aleo spoke transactions for the Sodax hub")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deposit a token to a hub recipient.
    Deposit(DepositArgs),
    /// Withdraw an asset from the hub wallet to an Aleo recipient.
    #[command(name = "withdrawAsset")]
    WithdrawAsset(WithdrawAssetArgs),
    /// Supply to the money market.
    Supply(MoneyMarketArgs),
    /// Borrow from the money market.
    Borrow(WalletCallArgs),
    /// Withdraw from the money market.
    Withdraw(WalletCallArgs),
    /// Repay a money market loan.
    Repay(MoneyMarketArgs),
    /// Create a swap intent.
    #[command(name = "createIntent")]
    CreateIntent(CreateIntentArgs),
    /// Balance of the configured account in a token program.
    Balance {
        /// Token program, e.g. `credits.aleo`.
        token_program: String,
    },
    /// Wait for a transaction to be confirmed.
    Wait { tx_id: String },
    /// Notify the relay of a broadcast transaction.
    Submit {
        tx_id: String,
        /// Hub calldata carried by the transaction.
        #[arg(long)]
        payload: Option<String>,
    },
    /// Print the hub wallet of the configured account.
    HubWallet,
}

/// Options shared by every transfer into the hub.
#[derive(Args)]
struct TransferFlags {
    /// Hub calldata (hex).
    #[arg(long, default_value = "0x")]
    data: String,
    /// Preferred connection sequence number.
    #[arg(long)]
    conn_sn: Option<u128>,
    /// Relayer fee.
    #[arg(long, default_value_t = 0)]
    fee: u64,
}

#[derive(Args)]
struct DepositArgs {
    /// Token id (field element).
    token: String,
    /// Amount in the token's base units.
    amount: u64,
    /// Hub recipient, defaulting to the account's hub wallet.
    recipient: Option<HubAddress>,
    #[command(flatten)]
    transfer: TransferFlags,
}

#[derive(Args)]
struct MoneyMarketArgs {
    token: String,
    amount: u64,
    #[command(flatten)]
    transfer: TransferFlags,
}

#[derive(Args)]
struct CreateIntentArgs {
    /// Amount of the input token.
    amount: u64,
    /// Token deposited into the intent.
    input_token: String,
    /// Token the solver pays out.
    output_token: String,
    /// Intents contract on the hub, defaulting to the account's hub wallet.
    #[arg(long)]
    to: Option<HubAddress>,
    #[command(flatten)]
    transfer: TransferFlags,
}

#[derive(Args)]
struct WalletCallArgs {
    token: String,
    amount: u64,
    /// Hub calldata (hex).
    #[arg(long)]
    data: String,
}

#[derive(Args)]
struct WithdrawAssetArgs {
    token: String,
    amount: u64,
    /// Aleo address receiving the asset.
    recipient: String,
    /// Hub calldata (hex).
    #[arg(long)]
    data: String,
}

fn deposit_request(token: String, amount: u64, to: Option<HubAddress>, flags: TransferFlags) -> DepositRequest {
    DepositRequest {
        token,
        amount,
        data: flags.data,
        to,
        conn_sn: flags.conn_sn,
        fee_amount: flags.fee,
    }
}

impl From<DepositArgs> for DepositRequest {
    fn from(args: DepositArgs) -> Self {
        deposit_request(args.token, args.amount, args.recipient, args.transfer)
    }
}

impl From<MoneyMarketArgs> for DepositRequest {
    fn from(args: MoneyMarketArgs) -> Self {
        deposit_request(args.token, args.amount, None, args.transfer)
    }
}

impl From<WalletCallArgs> for WalletCallRequest {
    fn from(args: WalletCallArgs) -> Self {
        Self {
            token: args.token,
            amount: args.amount,
            recipient: None,
            data: args.data,
        }
    }
}

impl From<WithdrawAssetArgs> for WalletCallRequest {
    fn from(args: WithdrawAssetArgs) -> Self {
        Self {
            token: args.token,
            amount: args.amount,
            recipient: Some(args.recipient),
            data: args.data,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sodax_cli=info,sodax_aleo=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = CliConfig::from_env()?;

    info!("Aleo RPC: {} ({})", config.aleo_rpc_url, config.aleo_network);
    let session = Session::new(config)?;

    match cli.command {
        Commands::Deposit(args) => actions::deposit(&session, "deposit", args.into()).await,
        Commands::Supply(args) => actions::deposit(&session, "supply", args.into()).await,
        Commands::Repay(args) => actions::deposit(&session, "repay", args.into()).await,
        Commands::CreateIntent(args) => {
            let request = deposit_request(args.input_token, args.amount, args.to, args.transfer);
            actions::create_intent(&session, request, &args.output_token).await
        }
        Commands::WithdrawAsset(args) => actions::call_wallet(&session, "withdrawAsset", args.into()).await,
        Commands::Borrow(args) => actions::call_wallet(&session, "borrow", args.into()).await,
        Commands::Withdraw(args) => actions::call_wallet(&session, "withdraw", args.into()).await,
        Commands::Balance { token_program } => actions::balance(&session, &token_program).await,
        Commands::Wait { tx_id } => actions::wait(&session, &tx_id).await,
        Commands::Submit { tx_id, payload } => actions::submit(&session, &tx_id, payload.as_deref()).await,
        Commands::HubWallet => actions::hub_wallet(&session).await,
    }
}
