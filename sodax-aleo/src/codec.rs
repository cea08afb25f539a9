//! Leo literal encoding.
//!
//! Spoke programs take every argument as a Leo literal string: integers carry
//! their type suffix (`100u64`) and byte arguments are fixed `[u8; 32]`
//! arrays rendered as `[0u8, 0u8, ..., 255u8]`.

use std::fmt::Display;

use thiserror::Error;

use crate::types::LeoType;

/// Width of every byte-array argument of the spoke programs.
pub const LEO_BYTE_ARRAY_LEN: usize = 32;

pub const ADDRESS_PREFIX: &str = "aleo1";
pub const ADDRESS_LENGTH: usize = 63;
pub const TRANSACTION_ID_PREFIX: &str = "at1";
pub const TRANSACTION_ID_LENGTH: usize = 61;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("{len} bytes do not fit in a {LEO_BYTE_ARRAY_LEN}-byte array")]
    TooLong { len: usize },

    #[error("invalid Aleo address: {0}")]
    InvalidAddress(String),

    #[error("invalid Leo integer literal: {0}")]
    InvalidInteger(String),
}

/// Render `value` as a Leo literal of type `ty`. No range check is done.
pub fn format_amount(value: impl Display, ty: LeoType) -> String {
    format!("{}{}", value, ty.suffix())
}

/// Left-pad `bytes` with zeros to 32 bytes.
pub fn to_fixed_bytes(bytes: &[u8]) -> Result<[u8; LEO_BYTE_ARRAY_LEN], CodecError> {
    if bytes.len() > LEO_BYTE_ARRAY_LEN {
        return Err(CodecError::TooLong { len: bytes.len() });
    }
    let mut out = [0u8; LEO_BYTE_ARRAY_LEN];
    out[LEO_BYTE_ARRAY_LEN - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

/// Decode a hex string (optional `0x`, any case, odd length allowed) into a
/// left-padded 32-byte array.
pub fn hex_to_fixed_bytes(hex: &str) -> Result<[u8; LEO_BYTE_ARRAY_LEN], CodecError> {
    let bytes = sodax_common::decode_hex(hex).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
    to_fixed_bytes(&bytes)
}

/// Render a 32-byte array as a Leo `[u8; 32]` literal.
pub fn leo_u8_array(bytes: &[u8; LEO_BYTE_ARRAY_LEN]) -> String {
    let elements: Vec<String> = bytes.iter().map(|b| format_amount(b, LeoType::U8)).collect();
    format!("[{}]", elements.join(", "))
}

/// Render up to 32 bytes as a left-padded Leo `[u8; 32]` literal.
pub fn bytes_to_leo_u8_array(bytes: &[u8]) -> Result<String, CodecError> {
    Ok(leo_u8_array(&to_fixed_bytes(bytes)?))
}

/// Render a hex string as a left-padded Leo `[u8; 32]` literal.
///
/// Input longer than 32 bytes is an error, never truncated.
pub fn hex_to_leo_u8_array(hex: &str) -> Result<String, CodecError> {
    Ok(leo_u8_array(&hex_to_fixed_bytes(hex)?))
}

/// Checks the `aleo1` prefix and length only, not the bech32 checksum.
pub fn is_valid_address(address: &str) -> bool {
    address.starts_with(ADDRESS_PREFIX) && address.len() == ADDRESS_LENGTH
}

pub fn is_valid_transaction_id(tx_id: &str) -> bool {
    tx_id.starts_with(TRANSACTION_ID_PREFIX) && tx_id.len() == TRANSACTION_ID_LENGTH
}

/// Spoke-address bytes of an Aleo address, as hub contracts key them.
pub fn address_bcs_bytes(address: &str) -> Result<Vec<u8>, CodecError> {
    if !is_valid_address(address) {
        return Err(CodecError::InvalidAddress(address.to_string()));
    }
    Ok(address.as_bytes().to_vec())
}

/// Parse a Leo integer literal such as `"1500u64"`.
///
/// Mapping values come back JSON-quoted and with a type suffix; both are
/// stripped. A bare digit string is accepted too.
pub fn parse_leo_integer(literal: &str) -> Result<u128, CodecError> {
    let trimmed = literal.trim().trim_matches('"');
    let digits = match trimmed.find(['u', 'i']) {
        Some(pos) => {
            let suffix = &trimmed[pos + 1..];
            if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_digit()) {
                return Err(CodecError::InvalidInteger(literal.to_string()));
            }
            &trimmed[..pos]
        }
        None => trimmed,
    };
    digits
        .replace('_', "")
        .parse::<u128>()
        .map_err(|_| CodecError::InvalidInteger(literal.to_string()))
}
