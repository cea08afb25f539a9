//! Error types for the Aleo spoke.

use sodax_common::CommonError;
use thiserror::Error;

use crate::codec::CodecError;

/// Transport failure kinds reported by an [`AleoNetworkClient`](crate::network::AleoNetworkClient).
///
/// The kind is decided where the failure happens (HTTP status, response
/// shape, deadline), never recovered later from message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("timed out after {waited_ms}ms")]
    Timeout { waited_ms: u64 },

    #[error("malformed transaction id: {0}")]
    MalformedId(String),

    #[error("transaction {0} rejected")]
    Rejected(String),

    #[error("http {status}: {body}")]
    Http { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),
}

impl NetworkError {
    /// Failures worth another poll.
    pub fn is_transient(&self) -> bool {
        match self {
            NetworkError::Transport(_) => true,
            NetworkError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            NetworkError::Decode(e.to_string())
        } else {
            NetworkError::Transport(e.to_string())
        }
    }
}

/// Errors that can occur in spoke operations.
#[derive(Error, Debug)]
pub enum AleoError {
    #[error("invalid Aleo address: {0}")]
    InvalidAddress(String),

    #[error("invalid transaction id: {0}")]
    InvalidTransactionId(String),

    #[error("invalid program id: {0}")]
    InvalidProgramId(String),

    #[error("invalid field element: {0}")]
    InvalidField(String),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to generate unique connSn after {attempts} attempts")]
    ConnSnExhausted { attempts: u32 },

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error(
        "transaction {transaction_id} did not confirm within {timeout_ms}ms, it may still be pending"
    )]
    ConfirmationTimeout {
        transaction_id: String,
        timeout_ms: u64,
    },

    #[error("invalid transaction ID format: {0}")]
    MalformedTransactionId(String),

    #[error("transaction {0} was rejected by the network")]
    Rejected(String),

    #[error("browser wallet not connected")]
    WalletNotConnected,

    #[error("cannot wait for confirmation with raw provider")]
    RawProvider,

    #[error("execution failed: {0}")]
    Execution(String),

    #[error("fee estimation failed: {0}")]
    FeeEstimation(String),

    #[error("wallet returned no transaction id")]
    MissingTransactionId,

    #[error("hub error: {0}")]
    Hub(#[from] CommonError),
}

impl AleoError {
    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AleoError::InvalidAddress(_) => "INVALID_ADDRESS",
            AleoError::InvalidTransactionId(_) => "INVALID_TRANSACTION_ID",
            AleoError::InvalidProgramId(_) => "INVALID_PROGRAM_ID",
            AleoError::InvalidField(_) => "INVALID_FIELD",
            AleoError::Codec(_) => "CODEC_ERROR",
            AleoError::Config(_) => "CONFIG_ERROR",
            AleoError::ConnSnExhausted { .. } => "CONN_SN_EXHAUSTED",
            AleoError::Network(_) => "NETWORK_ERROR",
            AleoError::ConfirmationTimeout { .. } => "CONFIRMATION_TIMEOUT",
            AleoError::MalformedTransactionId(_) => "MALFORMED_TRANSACTION_ID",
            AleoError::Rejected(_) => "TRANSACTION_REJECTED",
            AleoError::WalletNotConnected => "WALLET_NOT_CONNECTED",
            AleoError::RawProvider => "RAW_PROVIDER",
            AleoError::Execution(_) => "EXECUTION_FAILED",
            AleoError::FeeEstimation(_) => "FEE_ESTIMATION_FAILED",
            AleoError::MissingTransactionId => "MISSING_TRANSACTION_ID",
            AleoError::Hub(_) => "HUB_ERROR",
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            AleoError::ConfirmationTimeout { .. } | AleoError::ConnSnExhausted { .. } => true,
            AleoError::Network(e) => e.is_transient(),
            AleoError::Hub(e) => e.is_retryable(),
            _ => false,
        }
    }
}
