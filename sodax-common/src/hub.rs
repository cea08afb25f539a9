//! Hub chain configuration and wallet-abstraction lookup.
//!
//! Every spoke user owns a deterministic wallet contract on the hub. Its
//! address is derived on-chain by the hub wallet factory from the spoke's
//! relay chain id and the user's spoke address bytes, and is read here with
//! an `eth_call` through an `ethers` HTTP provider.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use ethers::abi::{self, ParamType, Token};
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionRequest, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::chains::{get_intent_relay_chain_id, SONIC_MAINNET_CHAIN_ID};
use crate::{encode_hex_prefixed, CommonError};

/// Solidity signature of the factory lookup.
pub const GET_DEPLOYED_ADDRESS_SIGNATURE: &str = "getDeployedAddress(uint256,bytes)";

/// Sonic EVM chain id.
pub const SONIC_EVM_CHAIN_ID: u64 = 146;

/// 20-byte EVM address on the hub chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct HubAddress(pub Address);

impl HubAddress {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn address(&self) -> Address {
        self.0
    }

    /// Left-pad to a 32-byte word.
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(self.0.as_bytes());
        word
    }
}

impl From<Address> for HubAddress {
    fn from(address: Address) -> Self {
        HubAddress(address)
    }
}

impl From<[u8; 20]> for HubAddress {
    fn from(bytes: [u8; 20]) -> Self {
        HubAddress(Address::from(bytes))
    }
}

impl From<HubAddress> for Address {
    fn from(address: HubAddress) -> Self {
        address.0
    }
}

impl FromStr for HubAddress {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix("0x")
            .ok_or_else(|| CommonError::InvalidAddress(format!("{s}: missing 0x prefix")))?;
        if body.len() != 40 {
            return Err(CommonError::InvalidAddress(format!(
                "{s}: expected 40 hex chars, got {}",
                body.len()
            )));
        }
        let address: Address = body
            .parse()
            .map_err(|e| CommonError::InvalidAddress(format!("{s}: {e}")))?;
        Ok(HubAddress(address))
    }
}

impl fmt::Display for HubAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_hex_prefixed(self.0.as_bytes()))
    }
}

impl Serialize for HubAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HubAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Hub chain configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HubChainConfig {
    /// Hub chain identifier.
    pub chain_id: String,
    /// EVM chain id of the hub.
    pub evm_chain_id: u64,
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Hub asset manager; receives spoke transfers.
    pub asset_manager: HubAddress,
    /// Hub wallet factory used for wallet-abstraction lookups.
    pub wallet_factory: HubAddress,
}

impl HubChainConfig {
    /// Sonic hub configuration with deployment-specific contract addresses.
    pub fn sonic(rpc_url: impl Into<String>, asset_manager: HubAddress, wallet_factory: HubAddress) -> Self {
        Self {
            chain_id: SONIC_MAINNET_CHAIN_ID.to_string(),
            evm_chain_id: SONIC_EVM_CHAIN_ID,
            rpc_url: rpc_url.into(),
            asset_manager,
            wallet_factory,
        }
    }

    /// Intent relay chain id of the hub.
    pub fn relay_chain_id(&self) -> Result<u128, CommonError> {
        get_intent_relay_chain_id(&self.chain_id)
            .ok_or_else(|| CommonError::UnsupportedChain(self.chain_id.clone()))
    }
}

/// Resolves a spoke user's hub wallet address.
#[async_trait]
pub trait HubWalletResolver: Send + Sync {
    /// Look up the hub wallet for `spoke_address` on the spoke with `spoke_relay_chain_id`.
    async fn user_hub_wallet(
        &self,
        spoke_relay_chain_id: u128,
        spoke_address: &[u8],
    ) -> Result<HubAddress, CommonError>;
}

/// Calldata for `getDeployedAddress(uint256,bytes)`.
pub fn encode_get_deployed_address(chain_id: u128, user: &[u8]) -> Vec<u8> {
    let mut calldata = ethers::utils::id(GET_DEPLOYED_ADDRESS_SIGNATURE).to_vec();
    calldata.extend_from_slice(&abi::encode(&[
        Token::Uint(U256::from(chain_id)),
        Token::Bytes(user.to_vec()),
    ]));
    calldata
}

/// Decode an ABI-encoded `address` return value.
pub fn decode_address_word(bytes: &[u8]) -> Result<HubAddress, CommonError> {
    let tokens = abi::decode(&[ParamType::Address], bytes)
        .map_err(|e| CommonError::Rpc(format!("invalid address return: {}", e)))?;
    tokens
        .into_iter()
        .next()
        .and_then(Token::into_address)
        .map(HubAddress)
        .ok_or_else(|| CommonError::Rpc("address return missing".into()))
}

/// Hub provider speaking EVM JSON-RPC.
#[derive(Clone, Debug)]
pub struct EvmHubProvider {
    provider: Provider<Http>,
    config: HubChainConfig,
}

impl EvmHubProvider {
    pub fn new(config: HubChainConfig) -> Result<Self, CommonError> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| CommonError::Rpc(format!("invalid hub rpc url {}: {}", config.rpc_url, e)))?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &HubChainConfig {
        &self.config
    }

    /// Execute a read-only `eth_call` against `to`.
    pub async fn eth_call(&self, to: &HubAddress, data: &[u8]) -> Result<Vec<u8>, CommonError> {
        let tx: TypedTransaction = TransactionRequest::new()
            .to(to.address())
            .data(Bytes::from(data.to_vec()))
            .into();

        let result = self
            .provider
            .call(&tx, None)
            .await
            .map_err(|e| CommonError::Rpc(format!("eth_call to {} failed: {}", to, e)))?;
        Ok(result.to_vec())
    }
}

#[async_trait]
impl HubWalletResolver for EvmHubProvider {
    async fn user_hub_wallet(
        &self,
        spoke_relay_chain_id: u128,
        spoke_address: &[u8],
    ) -> Result<HubAddress, CommonError> {
        let calldata = encode_get_deployed_address(spoke_relay_chain_id, spoke_address);
        let result = self.eth_call(&self.config.wallet_factory, &calldata).await?;
        let wallet = decode_address_word(&result)?;
        debug!(
            "Resolved hub wallet {} for spoke relay chain {}",
            wallet, spoke_relay_chain_id
        );
        Ok(wallet)
    }
}
