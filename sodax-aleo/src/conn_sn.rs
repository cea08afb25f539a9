//! Connection sequence number allocation.
//!
//! Every outbound message carries a `conn_sn` that the connection program
//! records in its `messages` mapping. A number is free when that mapping has
//! no entry for it.
//!
//! Uniqueness is best-effort: two callers can probe the same free number
//! before either submits. The 128-bit random space makes that unlikely and
//! the connection program rejects the second submission.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, warn};

use crate::codec::format_amount;
use crate::error::{AleoError, NetworkError};
use crate::network::AleoNetworkClient;
use crate::types::{LeoType, ProgramId};

/// Random candidates probed before giving up.
pub const CONN_SN_MAX_RETRIES: u32 = 10;

/// Mapping of the connection program that records used sequence numbers.
pub const MESSAGES_MAPPING: &str = "messages";

/// Unchecked random sequence number: 16 OS-random bytes, big-endian.
pub fn random_conn_sn() -> u128 {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    u128::from_be_bytes(bytes)
}

/// Allocates sequence numbers not yet recorded by the connection program.
#[derive(Clone)]
pub struct ConnSnAllocator {
    network: Arc<dyn AleoNetworkClient>,
    connection_program: ProgramId,
    max_retries: u32,
}

impl ConnSnAllocator {
    pub fn new(network: Arc<dyn AleoNetworkClient>, connection_program: ProgramId) -> Self {
        Self {
            network,
            connection_program,
            max_retries: CONN_SN_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Whether `conn_sn` is already recorded.
    pub async fn is_used(&self, conn_sn: u128) -> Result<bool, NetworkError> {
        let key = format_amount(conn_sn, LeoType::U128);
        match self
            .network
            .get_program_mapping_value(self.connection_program.as_str(), MESSAGES_MAPPING, &key)
            .await
        {
            Ok(_) => Ok(true),
            Err(NetworkError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Allocate a free sequence number.
    ///
    /// A free `candidate` is returned as is. A used one is logged and
    /// replaced by random probing, which fails with
    /// [`AleoError::ConnSnExhausted`] after `max_retries` used draws.
    pub async fn allocate(&self, candidate: Option<u128>) -> Result<u128, AleoError> {
        if let Some(conn_sn) = candidate {
            if !self.is_used(conn_sn).await? {
                return Ok(conn_sn);
            }
            warn!("Provided connSn {} is already used, generating a new one", conn_sn);
        }

        for attempt in 1..=self.max_retries {
            let conn_sn = random_conn_sn();
            if !self.is_used(conn_sn).await? {
                debug!("Allocated connSn {} on attempt {}", conn_sn, attempt);
                return Ok(conn_sn);
            }
        }

        Err(AleoError::ConnSnExhausted {
            attempts: self.max_retries,
        })
    }
}
