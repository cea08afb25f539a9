//! Aleo spoke chain configuration.

use serde::{Deserialize, Serialize};
use sodax_common::chains::ALEO_MAINNET_CHAIN_ID;

use crate::error::AleoError;
use crate::types::{AleoNetwork, Field, ProgramId};

// ═══════════════════════════════════════════════════════════════════════════════
// DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Public Aleo REST endpoint.
pub const DEFAULT_RPC_URL: &str = "https://api.explorer.provable.com/v1";

/// Credits program, holding native balances in mapping `account`.
pub const CREDITS_PROGRAM: &str = "credits.aleo";

/// Native-token sentinel used as the `token` argument of `transfer_native`.
pub const ALEO_NATIVE_TOKEN: &str =
    "3443843282313283355522573239085696902919850365217539366784739393210722344986";

pub const DEFAULT_ASSET_MANAGER_PROGRAM: &str = "asset_manager.aleo";
pub const DEFAULT_CONNECTION_PROGRAM: &str = "connection.aleo";

/// Default delegated proving endpoint for a network.
pub fn default_delegate_url(network: AleoNetwork) -> String {
    format!("https://api.provable.com/prove/{}/prove", network.as_str())
}

// ═══════════════════════════════════════════════════════════════════════════════
// CHAIN CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

/// Spoke program ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AleoProgramAddresses {
    pub asset_manager: ProgramId,
    pub connection: ProgramId,
}

/// Static configuration of the Aleo spoke chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AleoSpokeChainConfig {
    /// Spoke chain identifier
    pub chain_id: String,
    /// Intent relay chain id assigned to this spoke
    pub relay_chain_id: u128,
    pub rpc_url: String,
    pub network: AleoNetwork,
    /// Native token sentinel
    pub native_token: Field,
    pub addresses: AleoProgramAddresses,
}

impl AleoSpokeChainConfig {
    /// Mainnet deployment with the default program ids.
    pub fn mainnet(relay_chain_id: u128) -> Result<Self, AleoError> {
        Ok(Self {
            chain_id: ALEO_MAINNET_CHAIN_ID.to_string(),
            relay_chain_id,
            rpc_url: DEFAULT_RPC_URL.to_string(),
            network: AleoNetwork::Mainnet,
            native_token: ALEO_NATIVE_TOKEN.parse()?,
            addresses: AleoProgramAddresses {
                asset_manager: DEFAULT_ASSET_MANAGER_PROGRAM.parse()?,
                connection: DEFAULT_CONNECTION_PROGRAM.parse()?,
            },
        })
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    pub fn with_network(mut self, network: AleoNetwork) -> Self {
        self.network = network;
        self
    }

    pub fn with_addresses(mut self, addresses: AleoProgramAddresses) -> Self {
        self.addresses = addresses;
        self
    }

    /// Whether `token` is the native sentinel.
    pub fn is_native(&self, token: &Field) -> bool {
        token == &self.native_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_defaults() {
        let config = AleoSpokeChainConfig::mainnet(42).unwrap();
        assert_eq!(config.chain_id, "aleo");
        assert_eq!(config.relay_chain_id, 42);
        assert_eq!(config.addresses.asset_manager.as_str(), "asset_manager.aleo");
        assert!(config.is_native(&ALEO_NATIVE_TOKEN.parse().unwrap()));
        assert!(!config.is_native(&Field::from(1u128)));
    }

    #[test]
    fn test_delegate_url() {
        assert_eq!(
            default_delegate_url(AleoNetwork::Testnet),
            "https://api.provable.com/prove/testnet/prove"
        );
    }

    #[test]
    fn test_config_json() {
        let config = AleoSpokeChainConfig::mainnet(7).unwrap().with_network(AleoNetwork::Testnet);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["network"], "testnet");
        assert_eq!(json["addresses"]["connection"], "connection.aleo");
        let back: AleoSpokeChainConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
