//! Per-chain service registry.
//!
//! One service instance per chain type, built once at application start and
//! passed by reference to whatever needs it.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chains::ChainType;
use crate::CommonError;

/// A connected account on some chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XAccount {
    pub address: String,
    pub chain_type: ChainType,
}

/// Chain-specific service (balances, connectors, network client).
pub trait XService: Any + Send + Sync {
    /// Chain family served by this instance.
    fn chain_type(&self) -> ChainType;

    /// Upcast for typed lookups.
    fn as_any(&self) -> &dyn Any;
}

/// Registry mapping chain type to its service instance.
#[derive(Default)]
pub struct ServiceRegistry {
    services: HashMap<ChainType, Arc<dyn XService>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service, returning the one it replaced.
    pub fn register(&mut self, service: Arc<dyn XService>) -> Option<Arc<dyn XService>> {
        self.services.insert(service.chain_type(), service)
    }

    /// Builder-style registration.
    pub fn with(mut self, service: Arc<dyn XService>) -> Self {
        self.register(service);
        self
    }

    /// Service for a chain type.
    pub fn get(&self, chain_type: ChainType) -> Result<&Arc<dyn XService>, CommonError> {
        self.services
            .get(&chain_type)
            .ok_or_else(|| CommonError::UnsupportedChain(chain_type.to_string()))
    }

    /// Service for a chain type, downcast to its concrete type.
    pub fn get_as<T: XService>(&self, chain_type: ChainType) -> Option<&T> {
        self.services
            .get(&chain_type)
            .and_then(|service| service.as_any().downcast_ref::<T>())
    }

    /// Registered chain types.
    pub fn chain_types(&self) -> impl Iterator<Item = ChainType> + '_ {
        self.services.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
