//! Aleo chain service and wallet connector for the per-chain registry.

use std::any::Any;
use std::sync::{Arc, RwLock};

use sodax_common::{ChainType, XAccount, XService, XToken};
use tracing::warn;

use crate::codec::parse_leo_integer;
use crate::config::CREDITS_PROGRAM;
use crate::error::AleoError;
use crate::network::{AleoNetworkClient, HttpNetworkClient};
use crate::provider::ACCOUNT_MAPPING;
use crate::types::AleoNetwork;
use crate::wallet::{DecryptPermission, WalletAdapter};

pub const MAINNET_EXPLORER_URL: &str = "https://api.explorer.aleo.org/v2";
pub const TESTNET_EXPLORER_URL: &str = "https://api.explorer.provable.com/v2";

/// Explorer endpoint for a network.
pub fn explorer_url(network: AleoNetwork) -> &'static str {
    match network {
        AleoNetwork::Mainnet => MAINNET_EXPLORER_URL,
        AleoNetwork::Testnet => TESTNET_EXPLORER_URL,
    }
}

struct ClientState {
    network: AleoNetwork,
    rpc_url: String,
    client: Arc<dyn AleoNetworkClient>,
}

/// Balance reads for UI consumers.
pub struct AleoXService {
    state: RwLock<ClientState>,
}

impl AleoXService {
    pub fn new(network: AleoNetwork) -> Self {
        Self {
            state: RwLock::new(Self::http_state(network)),
        }
    }

    /// Service reading through an existing client.
    pub fn with_client(network: AleoNetwork, rpc_url: impl Into<String>, client: Arc<dyn AleoNetworkClient>) -> Self {
        Self {
            state: RwLock::new(ClientState {
                network,
                rpc_url: rpc_url.into(),
                client,
            }),
        }
    }

    fn http_state(network: AleoNetwork) -> ClientState {
        let rpc_url = explorer_url(network).to_string();
        ClientState {
            network,
            client: Arc::new(HttpNetworkClient::new(rpc_url.clone(), network)),
            rpc_url,
        }
    }

    /// Switch to the explorer of `network`.
    pub fn set_network(&self, network: AleoNetwork) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        *state = Self::http_state(network);
    }

    pub fn network(&self) -> AleoNetwork {
        self.state.read().unwrap_or_else(|e| e.into_inner()).network
    }

    pub fn rpc_url(&self) -> String {
        self.state.read().unwrap_or_else(|e| e.into_inner()).rpc_url.clone()
    }

    fn client(&self) -> Arc<dyn AleoNetworkClient> {
        self.state.read().unwrap_or_else(|e| e.into_inner()).client.clone()
    }

    /// Balance of `address` in `token`, or 0 when unknown.
    ///
    /// Lookup failures are logged and read as 0.
    pub async fn get_balance(&self, address: Option<&str>, token: &XToken) -> u128 {
        let Some(address) = address else {
            return 0;
        };
        let program = if token.is_native() {
            CREDITS_PROGRAM
        } else {
            token.address.as_str()
        };

        let value = match self
            .client()
            .get_program_mapping_value(program, ACCOUNT_MAPPING, address)
            .await
        {
            Ok(value) => value,
            Err(e) => {
                warn!("Balance lookup of {} in {} failed: {}", address, program, e);
                return 0;
            }
        };

        parse_leo_integer(&value).unwrap_or_else(|e| {
            warn!("Unparseable balance for {} in {}: {}", address, program, e);
            0
        })
    }
}

impl Default for AleoXService {
    fn default() -> Self {
        Self::new(AleoNetwork::Testnet)
    }
}

impl XService for AleoXService {
    fn chain_type(&self) -> ChainType {
        ChainType::Aleo
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Connects a browser extension as an [`XAccount`].
pub struct AleoXConnector {
    adapter: Arc<dyn WalletAdapter>,
    network: AleoNetwork,
    decrypt_permission: DecryptPermission,
}

impl AleoXConnector {
    pub fn new(adapter: Arc<dyn WalletAdapter>) -> Self {
        Self {
            adapter,
            network: AleoNetwork::Testnet,
            decrypt_permission: DecryptPermission::NoDecrypt,
        }
    }

    pub fn with_network(mut self, network: AleoNetwork) -> Self {
        self.network = network;
        self
    }

    pub fn with_decrypt_permission(mut self, permission: DecryptPermission) -> Self {
        self.decrypt_permission = permission;
        self
    }

    /// Connector id, the adapter name.
    pub fn id(&self) -> &str {
        self.adapter.name()
    }

    pub fn adapter(&self) -> &Arc<dyn WalletAdapter> {
        &self.adapter
    }

    /// Connect, returning the account when the extension exposes one.
    pub async fn connect(&self) -> Result<Option<XAccount>, AleoError> {
        let account = self
            .adapter
            .connect(self.network, self.decrypt_permission, &[])
            .await
            .map_err(|e| AleoError::Execution(format!("connect failed: {e}")))?;

        Ok(account
            .filter(|account| !account.address.is_empty())
            .map(|account| XAccount {
                address: account.address,
                chain_type: ChainType::Aleo,
            }))
    }

    pub async fn disconnect(&self) -> Result<(), AleoError> {
        self.adapter
            .disconnect()
            .await
            .map_err(|e| AleoError::Execution(format!("disconnect failed: {e}")))
    }

    /// Sign `message` with the connected account.
    pub async fn sign_message(&self, message: &str) -> Result<Vec<u8>, AleoError> {
        if !self.adapter.connected() {
            return Err(AleoError::WalletNotConnected);
        }
        self.adapter
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| AleoError::Execution(format!("sign failed: {e}")))
    }
}
