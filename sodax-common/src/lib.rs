//! sodax-common
//!
//! Shared building blocks for Sodax spoke chain integrations.
//!
//! # Overview
//!
//! Every spoke integration (EVM, Solana, Sui, Aleo, Injective, Stellar, Icon)
//! relays its transactions to the same hub chain. This crate holds what they
//! all need:
//!
//! - [`chains`]: chain identifiers, chain types and intent relay ids
//! - [`hub`]: hub chain configuration and the wallet-abstraction lookup
//! - [`registry`]: the per-chain service registry handed out at startup
//! - [`relay`]: the relay/indexer submission callback
//!
//! ```text
//!   spoke service ──► hub wallet lookup (eth_call) ──► hub wallet address
//!        │
//!        └──► spoke tx ──► relay submit callback ──► indexer
//! ```

pub mod chains;
pub mod error;
pub mod hub;
pub mod registry;
pub mod relay;

use sha3::{Digest, Keccak256};

pub use chains::{get_chain_info, get_intent_relay_chain_id, is_native_token, ChainInfo, ChainType, XToken};
pub use error::CommonError;
pub use hub::{EvmHubProvider, HubAddress, HubChainConfig, HubWalletResolver};
pub use registry::{ServiceRegistry, XAccount, XService};
pub use relay::RelayClient;

/// Keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Decode a hex string with or without a `0x` prefix.
///
/// An odd number of nibbles is left-padded with a zero nibble.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, CommonError> {
    let trimmed = input.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let normalized = if stripped.len() % 2 == 1 {
        format!("0{stripped}")
    } else {
        stripped.to_string()
    };
    hex::decode(normalized).map_err(|e| CommonError::InvalidHex(format!("{input}: {e}")))
}

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn encode_hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
