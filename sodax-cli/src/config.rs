//! CLI configuration.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use sodax_aleo::config::DEFAULT_RPC_URL;
use sodax_aleo::{AleoNetwork, AleoSpokeChainConfig, WaitOptions, ALEO_DEFAULT_CHECK_INTERVAL_MS, ALEO_DEFAULT_TIMEOUT_MS};
use sodax_common::{HubAddress, HubChainConfig};

/// CLI configuration.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Aleo REST endpoint.
    pub aleo_rpc_url: String,
    pub aleo_network: AleoNetwork,
    /// Intent relay chain id of the Aleo spoke.
    pub aleo_relay_chain_id: u128,
    /// Account the unsigned transactions are built for.
    pub aleo_address: String,
    /// Hub JSON-RPC endpoint.
    pub hub_rpc_url: String,
    pub hub_asset_manager: Option<HubAddress>,
    pub hub_wallet_factory: Option<HubAddress>,
    /// Relay submission endpoint.
    pub api_url: String,
    pub confirm_timeout_ms: u64,
    pub confirm_interval_ms: u64,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let aleo_rpc_url = env::var("ALEO_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());

        let aleo_network = match env::var("ALEO_NETWORK") {
            Ok(s) => s.parse().context("ALEO_NETWORK must be mainnet or testnet")?,
            Err(_) => AleoNetwork::Mainnet,
        };

        let aleo_relay_chain_id: u128 = env::var("ALEO_RELAY_CHAIN_ID")
            .context("ALEO_RELAY_CHAIN_ID must be set")?
            .parse()
            .context("ALEO_RELAY_CHAIN_ID must be an integer")?;

        let aleo_address = env::var("ALEO_ADDRESS").context("ALEO_ADDRESS must be set")?;

        let hub_rpc_url = env::var("HUB_RPC_URL").unwrap_or_else(|_| "https://rpc.soniclabs.com".to_string());
        let hub_asset_manager = parse_hub_address("HUB_ASSET_MANAGER")?;
        let hub_wallet_factory = parse_hub_address("HUB_WALLET_FACTORY")?;

        let api_url = env::var("API_URL").unwrap_or_else(|_| "http://localhost:4566/".to_string());

        let confirm_timeout_ms: u64 = env::var("CONFIRM_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ALEO_DEFAULT_TIMEOUT_MS);

        let confirm_interval_ms: u64 = env::var("CONFIRM_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ALEO_DEFAULT_CHECK_INTERVAL_MS);

        Ok(Self {
            aleo_rpc_url,
            aleo_network,
            aleo_relay_chain_id,
            aleo_address,
            hub_rpc_url,
            hub_asset_manager,
            hub_wallet_factory,
            api_url,
            confirm_timeout_ms,
            confirm_interval_ms,
        })
    }

    pub fn spoke_config(&self) -> Result<AleoSpokeChainConfig> {
        Ok(AleoSpokeChainConfig::mainnet(self.aleo_relay_chain_id)?
            .with_rpc_url(self.aleo_rpc_url.clone())
            .with_network(self.aleo_network))
    }

    /// Hub configuration; both hub contract addresses must be set.
    pub fn hub_config(&self) -> Result<HubChainConfig> {
        let asset_manager = self.hub_asset_manager.context("HUB_ASSET_MANAGER must be set")?;
        let wallet_factory = self.hub_wallet_factory.context("HUB_WALLET_FACTORY must be set")?;
        Ok(HubChainConfig::sonic(self.hub_rpc_url.clone(), asset_manager, wallet_factory))
    }

    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::default()
            .with_timeout(Duration::from_millis(self.confirm_timeout_ms))
            .with_check_interval(Duration::from_millis(self.confirm_interval_ms))
    }
}

fn parse_hub_address(var: &str) -> Result<Option<HubAddress>> {
    env::var(var)
        .ok()
        .map(|s| s.parse().with_context(|| format!("{var} is not a hub address")))
        .transpose()
}
