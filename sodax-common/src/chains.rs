//! Chain identifiers, chain types and intent relay ids
//!
//! Spoke chains are addressed by a short string identifier. The hub relays
//! messages keyed by a numeric intent relay chain id instead, so both are
//! kept side by side here.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// CHAIN IDENTIFIERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Sonic mainnet (hub chain)
pub const SONIC_MAINNET_CHAIN_ID: &str = "sonic";
/// Aleo mainnet
pub const ALEO_MAINNET_CHAIN_ID: &str = "aleo";
/// Avalanche C-Chain
pub const AVALANCHE_MAINNET_CHAIN_ID: &str = "0xa86a.avax";
/// Arbitrum One
pub const ARBITRUM_MAINNET_CHAIN_ID: &str = "0xa4b1.arbitrum";
/// Base
pub const BASE_MAINNET_CHAIN_ID: &str = "0x2105.base";
/// BNB Chain
pub const BSC_MAINNET_CHAIN_ID: &str = "0x38.bsc";
/// Optimism
pub const OPTIMISM_MAINNET_CHAIN_ID: &str = "0xa.optimism";
/// Polygon PoS
pub const POLYGON_MAINNET_CHAIN_ID: &str = "0x89.polygon";
/// Solana mainnet-beta
pub const SOLANA_MAINNET_CHAIN_ID: &str = "solana";
/// Sui mainnet
pub const SUI_MAINNET_CHAIN_ID: &str = "sui";
/// Stellar pubnet
pub const STELLAR_MAINNET_CHAIN_ID: &str = "stellar";
/// Injective mainnet
pub const INJECTIVE_MAINNET_CHAIN_ID: &str = "injective-1";
/// ICON mainnet
pub const ICON_MAINNET_CHAIN_ID: &str = "0x1.icon";

/// Chain family, which decides the wallet and transaction model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChainType {
    Evm,
    Solana,
    Sui,
    Aleo,
    Injective,
    Stellar,
    Icon,
}

impl ChainType {
    /// Get the string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainType::Evm => "EVM",
            ChainType::Solana => "SOLANA",
            ChainType::Sui => "SUI",
            ChainType::Aleo => "ALEO",
            ChainType::Injective => "INJECTIVE",
            ChainType::Stellar => "STELLAR",
            ChainType::Icon => "ICON",
        }
    }
}

impl std::fmt::Display for ChainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CHAIN INFO
// ═══════════════════════════════════════════════════════════════════════════════

/// Chain information structure
#[derive(Debug, Clone)]
pub struct ChainInfo {
    /// Spoke chain identifier
    pub chain_id: &'static str,
    /// Human-readable chain name
    pub display_name: &'static str,
    /// Chain type
    pub chain_type: ChainType,
    /// Intent relay chain id, `None` when assigned per deployment
    pub relay_chain_id: Option<u128>,
}

/// Get info for a known chain
pub fn get_chain_info(chain_id: &str) -> Option<ChainInfo> {
    let (display_name, chain_type, relay_chain_id, static_id) = match chain_id {
        SONIC_MAINNET_CHAIN_ID => ("Sonic", ChainType::Evm, Some(146), SONIC_MAINNET_CHAIN_ID),
        AVALANCHE_MAINNET_CHAIN_ID => (
            "Avalanche",
            ChainType::Evm,
            Some(6),
            AVALANCHE_MAINNET_CHAIN_ID,
        ),
        ARBITRUM_MAINNET_CHAIN_ID => (
            "Arbitrum One",
            ChainType::Evm,
            Some(23),
            ARBITRUM_MAINNET_CHAIN_ID,
        ),
        BASE_MAINNET_CHAIN_ID => ("Base", ChainType::Evm, Some(30), BASE_MAINNET_CHAIN_ID),
        BSC_MAINNET_CHAIN_ID => ("BNB Chain", ChainType::Evm, Some(4), BSC_MAINNET_CHAIN_ID),
        OPTIMISM_MAINNET_CHAIN_ID => (
            "Optimism",
            ChainType::Evm,
            Some(24),
            OPTIMISM_MAINNET_CHAIN_ID,
        ),
        POLYGON_MAINNET_CHAIN_ID => ("Polygon", ChainType::Evm, Some(5), POLYGON_MAINNET_CHAIN_ID),
        SOLANA_MAINNET_CHAIN_ID => ("Solana", ChainType::Solana, Some(1), SOLANA_MAINNET_CHAIN_ID),
        SUI_MAINNET_CHAIN_ID => ("Sui", ChainType::Sui, Some(21), SUI_MAINNET_CHAIN_ID),
        STELLAR_MAINNET_CHAIN_ID => (
            "Stellar",
            ChainType::Stellar,
            Some(27),
            STELLAR_MAINNET_CHAIN_ID,
        ),
        INJECTIVE_MAINNET_CHAIN_ID => (
            "Injective",
            ChainType::Injective,
            Some(19),
            INJECTIVE_MAINNET_CHAIN_ID,
        ),
        ICON_MAINNET_CHAIN_ID => (
            "ICON",
            ChainType::Icon,
            Some(1_768_124_270),
            ICON_MAINNET_CHAIN_ID,
        ),
        ALEO_MAINNET_CHAIN_ID => ("Aleo", ChainType::Aleo, None, ALEO_MAINNET_CHAIN_ID),
        _ => return None,
    };

    Some(ChainInfo {
        chain_id: static_id,
        display_name,
        chain_type,
        relay_chain_id,
    })
}

/// Intent relay chain id for a chain, if it has a fixed one.
pub fn get_intent_relay_chain_id(chain_id: &str) -> Option<u128> {
    get_chain_info(chain_id).and_then(|info| info.relay_chain_id)
}

/// Chain type for a chain identifier.
pub fn get_chain_type(chain_id: &str) -> Option<ChainType> {
    get_chain_info(chain_id).map(|info| info.chain_type)
}

// ═══════════════════════════════════════════════════════════════════════════════
// TOKENS
// ═══════════════════════════════════════════════════════════════════════════════

/// Native token sentinel addresses, one per chain family.
pub const NATIVE_TOKEN_ADDRESSES: &[&str] = &[
    "cx0000000000000000000000000000000000000000",
    "0x0000000000000000000000000000000000000000",
    "inj",
    "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI",
    "hx0000000000000000000000000000000000000000",
    "11111111111111111111111111111111",
    "CAS3J7GYLGXMF6TDJBBYYSE3HQ6BBSMLNUQ34T6TZMYMW2EVH34XOWMA",
    "3443843282313283355522573239085696902919850365217539366784739393210722344986",
];

/// A token on a specific chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XToken {
    /// Chain the token lives on.
    pub chain_id: String,
    /// Token address, program id or native sentinel.
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

impl XToken {
    pub fn new(
        chain_id: impl Into<String>,
        address: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            address: address.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Whether this is the chain's native token.
    pub fn is_native(&self) -> bool {
        is_native_token(&self.address)
    }
}

/// Check a token address against the native sentinels.
pub fn is_native_token(address: &str) -> bool {
    NATIVE_TOKEN_ADDRESSES.contains(&address)
}
