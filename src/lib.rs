//! TxForge - Canonical Ledger Transaction Pipeline
//!
//! A library for constructing ledger transactions field by field, encoding
//! them into the deterministic byte form the network signs and hashes, and
//! tracking submitted transactions until they settle.

pub mod address;
pub mod builder;
pub mod canonical;
pub mod error;
pub mod fee;
pub mod node;
pub mod signer;
pub mod tracker;
pub mod transaction;

pub use address::Address;
pub use builder::{
    AssetConfigBuilder, AssetTransferBuilder, KeyRegistrationBuilder, PaymentBuilder,
};
pub use error::TxForgeError;
pub use fee::FeeParams;
pub use node::{NodeApi, PendingStatus};
pub use signer::{KeypairSigner, SignatureMode, SignedTransaction, TransactionSigner};
pub use tracker::{PendingTracker, TxOutcome};
pub use transaction::Transaction;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::address::Address;
    pub use crate::builder::{
        AssetConfigBuilder, AssetTransferBuilder, KeyRegistrationBuilder, PaymentBuilder,
    };
    pub use crate::error::TxForgeError;
    pub use crate::fee::FeeParams;
    pub use crate::node::{NodeApi, PendingStatus};
    pub use crate::signer::{KeypairSigner, SignedTransaction, TransactionSigner};
    pub use crate::tracker::{PendingTracker, TxOutcome};
    pub use crate::transaction::Transaction;
}
