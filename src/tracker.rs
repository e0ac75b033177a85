//! Pending-transaction settlement tracking
//!
//! A state machine over one transaction identifier, driven entirely by poll
//! responses from the node. The tracker performs no transport logic of its
//! own: it interprets snapshots, retries with backoff, and stops at the
//! transaction's round deadline.

use crate::error::{Result, TxForgeError};
use crate::node::{NodeApi, PendingStatus};
use crate::signer::SignedTransaction;
use std::time::Duration;
use tracing::{debug, warn};

/// Consecutive failed polls tolerated before the tracker gives up. The round
/// deadline cannot be evaluated while the node is unreachable, so this bounds
/// the loop when the network is down outright.
const MAX_CONSECUTIVE_POLL_FAILURES: u32 = 10;

/// Authoritative fields of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub round: u64,
    pub asset_index: Option<u64>,
    pub application_index: Option<u64>,
    pub closing_amount: Option<u64>,
    pub close_rewards: Option<u64>,
    pub sender_rewards: Option<u64>,
    pub receiver_rewards: Option<u64>,
}

/// Outcome of interpreting one status snapshot. `Confirmed`, `Evicted` and
/// `Unknown` are terminal; callers branch on them rather than treating them
/// as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    /// In the pending pool, not yet included in a block.
    Pooled,
    Confirmed(Confirmation),
    /// The node discarded the transaction; the reason is the node's verbatim
    /// pool error.
    Evicted { reason: String },
    /// The node has no record of the identifier. Distinct from `Evicted`:
    /// the transaction may have aged out of the node's memory window or
    /// never arrived, so this is not a definitive rejection.
    Unknown,
}

/// Pure interpretation of a single poll response. `None` means the node
/// reported no record of the identifier.
pub fn interpret(snapshot: Option<&PendingStatus>) -> TxOutcome {
    match snapshot {
        None => TxOutcome::Unknown,
        Some(status) if status.confirmed_round > 0 => TxOutcome::Confirmed(Confirmation {
            round: status.confirmed_round,
            asset_index: status.asset_index,
            application_index: status.application_index,
            closing_amount: status.closing_amount,
            close_rewards: status.close_rewards,
            sender_rewards: status.sender_rewards,
            receiver_rewards: status.receiver_rewards,
        }),
        Some(status) if !status.pool_error.is_empty() => TxOutcome::Evicted {
            reason: status.pool_error.clone(),
        },
        Some(_) => TxOutcome::Pooled,
    }
}

/// Exponential poll backoff: `initial`, then multiplied each step, capped.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    multiplier: u32,
    cap: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, multiplier: u32, cap: Duration) -> Self {
        Self {
            initial,
            multiplier,
            cap,
        }
    }

    pub fn initial(&self) -> Duration {
        self.initial
    }

    pub fn next(&self, current: Duration) -> Duration {
        (current * self.multiplier).min(self.cap)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(250),
            multiplier: 2,
            cap: Duration::from_secs(4),
        }
    }
}

/// Polls one transaction identifier until a terminal outcome or the round
/// deadline. Independent trackers share nothing; one per identifier.
pub struct PendingTracker<'a, N: NodeApi> {
    node: &'a N,
    backoff: Backoff,
}

impl<'a, N: NodeApi> PendingTracker<'a, N> {
    pub fn new(node: &'a N) -> Self {
        Self {
            node,
            backoff: Backoff::default(),
        }
    }

    pub fn with_backoff(node: &'a N, backoff: Backoff) -> Self {
        Self { node, backoff }
    }

    /// One poll, no retry.
    pub fn poll_once(&self, tx_id: &str) -> Result<TxOutcome> {
        Ok(interpret(self.node.pending_status(tx_id)?.as_ref()))
    }

    /// Poll until `Confirmed` or `Evicted`, or until the network round
    /// passes `last_valid`. The network will never confirm past that round,
    /// so the result there is `Unknown`, never `Evicted`. Transient poll
    /// failures retry within the same deadline.
    pub fn wait_for_outcome(&self, tx_id: &str, last_valid: u64) -> Result<TxOutcome> {
        let mut delay = self.backoff.initial();
        let mut consecutive_failures = 0u32;
        loop {
            match self.node.pending_status(tx_id) {
                Ok(snapshot) => {
                    consecutive_failures = 0;
                    match interpret(snapshot.as_ref()) {
                        TxOutcome::Confirmed(confirmation) => {
                            debug!(tx_id, round = confirmation.round, "confirmed");
                            return Ok(TxOutcome::Confirmed(confirmation));
                        }
                        outcome @ TxOutcome::Evicted { .. } => {
                            debug!(tx_id, "evicted from pool");
                            return Ok(outcome);
                        }
                        // Pooled keeps waiting; Unknown may just mean the
                        // node hasn't seen the submission yet.
                        TxOutcome::Pooled | TxOutcome::Unknown => {}
                    }
                }
                Err(TxForgeError::Poll(reason)) => {
                    consecutive_failures += 1;
                    warn!(tx_id, %reason, consecutive_failures, "transient poll failure");
                    if consecutive_failures >= MAX_CONSECUTIVE_POLL_FAILURES {
                        return Err(TxForgeError::Poll(reason));
                    }
                }
                Err(other) => return Err(other),
            }

            match self.node.current_round() {
                Ok(round) if round > last_valid => {
                    debug!(tx_id, round, last_valid, "deadline passed");
                    return Ok(TxOutcome::Unknown);
                }
                Ok(_) => {}
                Err(TxForgeError::Poll(reason)) => {
                    consecutive_failures += 1;
                    warn!(tx_id, %reason, consecutive_failures, "round lookup failed");
                    if consecutive_failures >= MAX_CONSECUTIVE_POLL_FAILURES {
                        return Err(TxForgeError::Poll(reason));
                    }
                }
                Err(other) => return Err(other),
            }

            std::thread::sleep(delay);
            delay = self.backoff.next(delay);
        }
    }

    /// Submit a signed envelope and track it to a terminal outcome, using
    /// the transaction's own last-valid round as the deadline.
    pub fn submit_and_wait(&self, signed: &SignedTransaction) -> Result<(String, TxOutcome)> {
        let bytes = signed.encode()?;
        let tx_id = self.node.submit_raw(&bytes)?;
        debug!(%tx_id, size = bytes.len(), "submitted");
        let outcome = self.wait_for_outcome(&tx_id, signed.transaction().header.last_valid)?;
        Ok((tx_id, outcome))
    }
}
