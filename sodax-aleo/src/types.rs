//! Type definitions for the Aleo spoke.
//!
//! This module provides types for:
//! - Aleo network selection and validated identifiers
//! - Program call parameters (`ExecuteOptions`) and unsigned payloads
//! - Confirmation results and wait options

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::AleoError;
use crate::{ALEO_DEFAULT_CHECK_INTERVAL_MS, ALEO_DEFAULT_TIMEOUT_MS};

/// Aleo network identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AleoNetwork {
    #[default]
    Mainnet,
    Testnet,
}

impl AleoNetwork {
    /// Path segment used by the REST API.
    pub fn as_str(&self) -> &'static str {
        match self {
            AleoNetwork::Mainnet => "mainnet",
            AleoNetwork::Testnet => "testnet",
        }
    }
}

impl FromStr for AleoNetwork {
    type Err = AleoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(AleoNetwork::Mainnet),
            "testnet" | "testnet3" => Ok(AleoNetwork::Testnet),
            other => Err(AleoError::Config(format!("unknown aleo network: {other}"))),
        }
    }
}

impl fmt::Display for AleoNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aleo account address (`aleo1…`, 63 characters).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AleoAddress(String);

impl AleoAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// UTF-8 bytes of the address, the encoding hub contracts expect.
    pub fn bcs_bytes(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }
}

impl FromStr for AleoAddress {
    type Err = AleoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if codec::is_valid_address(s) {
            Ok(AleoAddress(s.to_string()))
        } else {
            Err(AleoError::InvalidAddress(s.to_string()))
        }
    }
}

impl TryFrom<String> for AleoAddress {
    type Error = AleoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AleoAddress> for String {
    fn from(value: AleoAddress) -> Self {
        value.0
    }
}

impl fmt::Display for AleoAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aleo transaction id (`at1…`, 61 characters).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId(String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TransactionId {
    type Err = AleoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if codec::is_valid_transaction_id(s) {
            Ok(TransactionId(s.to_string()))
        } else {
            Err(AleoError::InvalidTransactionId(s.to_string()))
        }
    }
}

impl TryFrom<String> for TransactionId {
    type Error = AleoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TransactionId> for String {
    fn from(value: TransactionId) -> Self {
        value.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aleo program identifier (`<name>.aleo`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProgramId(String);

impl ProgramId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProgramId {
    type Err = AleoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s
            .strip_suffix(".aleo")
            .map(|name| {
                !name.is_empty()
                    && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    && name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            })
            .unwrap_or(false);
        if valid {
            Ok(ProgramId(s.to_string()))
        } else {
            Err(AleoError::InvalidProgramId(s.to_string()))
        }
    }
}

impl TryFrom<String> for ProgramId {
    type Error = AleoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProgramId> for String {
    fn from(value: ProgramId) -> Self {
        value.0
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Field element as decimal digits, without the `field` suffix.
///
/// Token ids in the token registry are field elements wider than `u128`,
/// so the digits are kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Field(String);

impl Field {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Field {
    type Err = AleoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_suffix("field").unwrap_or(s);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(AleoError::InvalidField(s.to_string()));
        }
        let trimmed = digits.trim_start_matches('0');
        Ok(Field(if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }))
    }
}

impl TryFrom<String> for Field {
    type Error = AleoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Field> for String {
    fn from(value: Field) -> Self {
        value.0
    }
}

impl From<u128> for Field {
    fn from(value: u128) -> Self {
        Field(value.to_string())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Leo literal types used by the spoke programs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeoType {
    U8,
    U16,
    U32,
    U64,
    U128,
    Field,
}

impl LeoType {
    /// Literal suffix.
    pub fn suffix(&self) -> &'static str {
        match self {
            LeoType::U8 => "u8",
            LeoType::U16 => "u16",
            LeoType::U32 => "u32",
            LeoType::U64 => "u64",
            LeoType::U128 => "u128",
            LeoType::Field => "field",
        }
    }
}

/// Program call parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteOptions {
    pub program_name: String,
    pub function_name: String,
    /// Leo-literal encoded inputs, in parameter order.
    pub inputs: Vec<String>,
    /// Priority fee in microcredits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_fee: Option<u64>,
    #[serde(default)]
    pub private_fee: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_record: Option<String>,
}

impl ExecuteOptions {
    pub fn new(
        program_name: impl Into<String>,
        function_name: impl Into<String>,
        inputs: Vec<String>,
    ) -> Self {
        Self {
            program_name: program_name.into(),
            function_name: function_name.into(),
            inputs,
            priority_fee: None,
            private_fee: false,
            fee_record: None,
        }
    }

    pub fn with_priority_fee(mut self, microcredits: u64) -> Self {
        self.priority_fee = Some(microcredits);
        self
    }
}

/// Unsigned transaction for callers that sign elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub from: AleoAddress,
    pub to: ProgramId,
    pub value: u128,
    pub data: ExecuteOptions,
}

/// Result of submitting a program call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub transaction_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,
}

/// Final status of a confirmed transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Accepted,
    Rejected,
}

/// Confirmed transaction as reported by the network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedTransaction {
    pub status: TransactionStatus,
    #[serde(rename = "type")]
    pub tx_type: String,
    #[serde(default)]
    pub index: u64,
    #[serde(default)]
    pub transaction: serde_json::Value,
    #[serde(default)]
    pub finalize: Vec<serde_json::Value>,
}

/// Receipt returned once a transaction is confirmed.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionReceipt {
    pub transaction_id: String,
    pub status: TransactionStatus,
    pub tx_type: String,
    pub index: u64,
    pub transaction: serde_json::Value,
    pub finalize: Vec<serde_json::Value>,
    pub confirmed_at: SystemTime,
}

impl TransactionReceipt {
    pub fn from_confirmed(transaction_id: impl Into<String>, confirmed: ConfirmedTransaction) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            status: confirmed.status,
            tx_type: confirmed.tx_type,
            index: confirmed.index,
            transaction: confirmed.transaction,
            finalize: confirmed.finalize,
            confirmed_at: SystemTime::now(),
        }
    }
}

/// Polling parameters for confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitOptions {
    pub check_interval: Duration,
    pub timeout: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_millis(ALEO_DEFAULT_CHECK_INTERVAL_MS),
            timeout: Duration::from_millis(ALEO_DEFAULT_TIMEOUT_MS),
        }
    }
}

impl WaitOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_check_interval(mut self, check_interval: Duration) -> Self {
        self.check_interval = check_interval;
        self
    }
}

/// Execution fee estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEstimate {
    pub microcredits: u64,
}

/// Opaque proving request produced by the program manager.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvingRequest(pub serde_json::Value);
