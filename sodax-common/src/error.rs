//! Error types shared by the hub, registry and relay clients.

use thiserror::Error;

/// Error type for hub lookups, registry access and relay submission.
#[derive(Error, Debug)]
pub enum CommonError {
    /// Hex input could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Address failed format validation.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// No service or chain entry for the requested chain.
    #[error("unsupported chain: {0}")]
    UnsupportedChain(String),

    /// Hub JSON-RPC call failed.
    #[error("hub rpc error: {0}")]
    Rpc(String),

    /// Relay submission failed.
    #[error("relay error: {0}")]
    Relay(String),

    /// Payload could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CommonError {
    /// Get a machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            CommonError::InvalidHex(_) => "INVALID_HEX",
            CommonError::InvalidAddress(_) => "INVALID_ADDRESS",
            CommonError::UnsupportedChain(_) => "UNSUPPORTED_CHAIN",
            CommonError::Rpc(_) => "RPC_ERROR",
            CommonError::Relay(_) => "RELAY_ERROR",
            CommonError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CommonError::Rpc(_) | CommonError::Relay(_))
    }
}

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        CommonError::Serialization(err.to_string())
    }
}
