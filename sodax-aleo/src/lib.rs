//! sodax-aleo
//!
//! Aleo spoke integration for Sodax cross-chain transfers.
//!
//! # Overview
//!
//! Aleo users reach the hub chain in two ways: by depositing tokens into the
//! asset manager program, or by sending a message to their hub wallet through
//! the connection program. Both carry a connection sequence number (`conn_sn`)
//! that the connection program records once used.
//!
//! ```text
//!   AleoSpokeService ──► AleoSpokeProvider ──► AleoBaseSpokeProvider
//!                                │                    │
//!                                │                    ├──► codec (Leo literals)
//!                                │                    └──► ConnSnAllocator
//!                                ▼
//!                          SpokeSigner
//!                    Raw { address } │ Wallet(WalletProvider)
//!                          │                    │
//!                   RawTransaction      execute ──► confirmation poller
//! ```
//!
//! # Modules
//!
//! - [`codec`]: Leo literal rendering and identifier validation
//! - [`config`]: spoke chain configuration
//! - [`network`]: Aleo node client (trait + REST implementation)
//! - [`confirmation`]: fixed-interval confirmation polling
//! - [`conn_sn`]: sequence number allocation
//! - [`provider`]: base and signer-bound spoke providers
//! - [`service`]: deposits and hub wallet calls
//! - [`wallet`]: local-key and browser-extension wallets
//! - [`xservice`]: balance service and connector for the chain registry

pub mod codec;
pub mod config;
pub mod confirmation;
pub mod conn_sn;
pub mod error;
pub mod network;
pub mod program;
pub mod provider;
pub mod service;
pub mod types;
pub mod wallet;
pub mod xservice;

pub use codec::CodecError;
pub use config::{AleoProgramAddresses, AleoSpokeChainConfig};
pub use conn_sn::{random_conn_sn, ConnSnAllocator, CONN_SN_MAX_RETRIES};
pub use error::{AleoError, NetworkError};
pub use network::{AleoNetworkClient, HttpNetworkClient};
pub use program::{DelegateProvingConfig, ProgramManager};
pub use provider::{AleoBaseSpokeProvider, AleoSpokeProvider, SpokeSigner, TransferParams, TxOutcome};
pub use service::{AleoSpokeService, DepositParams, DepositSimulationParams};
pub use types::*;
pub use wallet::{AleoWallet, AleoWalletProvider, BrowserExtensionWallet, LocalKeyWallet, WalletAdapter, WalletProvider};
pub use xservice::{AleoXConnector, AleoXService};

/// Default confirmation timeout (ms).
pub const ALEO_DEFAULT_TIMEOUT_MS: u64 = 45_000;

/// Default confirmation poll interval (ms).
pub const ALEO_DEFAULT_CHECK_INTERVAL_MS: u64 = 2_000;
