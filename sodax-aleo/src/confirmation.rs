//! Transaction confirmation polling.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::error::NetworkError;
use crate::network::AleoNetworkClient;
use crate::types::{ConfirmedTransaction, TransactionStatus, WaitOptions};

/// Poll until `tx_id` is confirmed, rejected or the deadline passes.
///
/// Polling is at a fixed interval. A transient transport failure does not end
/// the wait, but if the deadline passes while the node is still failing the
/// last failure is returned instead of a timeout. Any other error ends the
/// wait immediately.
pub async fn wait_for_transaction_confirmation(
    client: &dyn AleoNetworkClient,
    tx_id: &str,
    options: WaitOptions,
) -> Result<ConfirmedTransaction, NetworkError> {
    let started = Instant::now();
    let deadline = started + options.timeout;
    let mut last_failure: Option<NetworkError> = None;

    loop {
        match client.get_confirmed_transaction(tx_id).await {
            Ok(Some(confirmed)) => {
                return match confirmed.status {
                    TransactionStatus::Accepted => Ok(confirmed),
                    TransactionStatus::Rejected => Err(NetworkError::Rejected(tx_id.to_string())),
                };
            }
            Ok(None) | Err(NetworkError::NotFound(_)) => {
                debug!("Transaction {} not yet confirmed", tx_id);
                last_failure = None;
            }
            Err(e) if e.is_transient() => {
                warn!("Polling {} failed, retrying: {}", tx_id, e);
                last_failure = Some(e);
            }
            Err(e) => return Err(e),
        }

        let now = Instant::now();
        if now >= deadline {
            if let Some(failure) = last_failure.take() {
                return Err(failure);
            }
            return Err(NetworkError::Timeout {
                waited_ms: duration_ms(now - started),
            });
        }
        sleep(options.check_interval.min(deadline - now)).await;
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
