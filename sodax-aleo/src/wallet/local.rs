use std::sync::Arc;

use tracing::debug;

use crate::config::default_delegate_url;
use crate::error::AleoError;
use crate::network::AleoNetworkClient;
use crate::program::{DelegateProvingConfig, ProgramManager};
use crate::types::{AleoAddress, AleoNetwork, ExecuteOptions, ExecutionResult};

/// Wallet whose key lives in a local program manager.
pub struct LocalKeyWallet {
    program_manager: Arc<dyn ProgramManager>,
    delegate: Option<DelegateProvingConfig>,
}

impl LocalKeyWallet {
    pub fn new(program_manager: Arc<dyn ProgramManager>) -> Self {
        Self {
            program_manager,
            delegate: None,
        }
    }

    /// Prove through a delegated prover instead of locally.
    pub fn with_delegate(mut self, delegate: DelegateProvingConfig) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub fn address(&self) -> AleoAddress {
        self.program_manager.address()
    }

    pub fn program_manager(&self) -> &Arc<dyn ProgramManager> {
        &self.program_manager
    }

    pub(crate) async fn execute(
        &self,
        network: &dyn AleoNetworkClient,
        aleo_network: AleoNetwork,
        options: &ExecuteOptions,
    ) -> Result<ExecutionResult, AleoError> {
        let transaction_id = match &self.delegate {
            Some(delegate) => self.execute_delegated(network, aleo_network, delegate, options).await,
            None => self.program_manager.execute(options).await,
        }
        .map_err(|e| AleoError::Execution(e.to_string()))?;

        Ok(ExecutionResult {
            transaction_id,
            outputs: None,
        })
    }

    async fn execute_delegated(
        &self,
        network: &dyn AleoNetworkClient,
        aleo_network: AleoNetwork,
        delegate: &DelegateProvingConfig,
        options: &ExecuteOptions,
    ) -> anyhow::Result<String> {
        let request = self.program_manager.proving_request(options, true).await?;
        let url = delegate
            .url
            .clone()
            .unwrap_or_else(|| default_delegate_url(aleo_network));
        debug!("Delegating proof of {}/{} to {}", options.program_name, options.function_name, url);

        let transaction_id = network.submit_proving_request(&url, &request, delegate).await?;
        Ok(transaction_id.into())
    }
}
