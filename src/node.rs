//! External node interface boundary
//!
//! The transport itself lives outside this crate. This module fixes the shape
//! the rest of the pipeline depends on: submit raw signed bytes, read back a
//! pending-status snapshot, and read the network's current round.

use crate::error::{Result, TxForgeError};
use serde::Deserialize;

/// Snapshot of a pending transaction as reported by a node. Created fresh on
/// every poll response and never mutated; the next poll supersedes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PendingStatus {
    /// Round the transaction was committed in; zero while still pending.
    #[serde(rename = "confirmed-round", default)]
    pub confirmed_round: u64,
    /// Non-empty when the pool discarded the transaction.
    #[serde(rename = "pool-error", default)]
    pub pool_error: String,
    /// Populated only when the transaction created an asset.
    #[serde(rename = "asset-index", default)]
    pub asset_index: Option<u64>,
    /// Populated only when the transaction created an application.
    #[serde(rename = "application-index", default)]
    pub application_index: Option<u64>,
    #[serde(rename = "closing-amount", default)]
    pub closing_amount: Option<u64>,
    #[serde(rename = "close-rewards", default)]
    pub close_rewards: Option<u64>,
    #[serde(rename = "sender-rewards", default)]
    pub sender_rewards: Option<u64>,
    #[serde(rename = "receiver-rewards", default)]
    pub receiver_rewards: Option<u64>,
}

impl PendingStatus {
    /// Parse a node's JSON response body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| TxForgeError::Decoding(format!("pending status body: {}", e)))
    }
}

/// The node operations the pipeline depends on.
pub trait NodeApi {
    /// Submit raw signed bytes. Returns the transaction identifier, or a
    /// `Submission` error carrying the node's verbatim rejection reason.
    fn submit_raw(&self, bytes: &[u8]) -> Result<String>;

    /// Status snapshot for an identifier. `None` means the node has no
    /// record of it; transport failures are `Poll` errors.
    fn pending_status(&self, tx_id: &str) -> Result<Option<PendingStatus>>;

    /// The network round the node currently sits at.
    fn current_round(&self) -> Result<u64>;
}
