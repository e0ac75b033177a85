//! Fee assignment from estimated encoded size
//!
//! Fee-per-byte networks price a transaction by the length of its signed wire
//! form. The builders' size estimate covers the canonical transaction bytes;
//! this module adds the single-signature envelope overhead, applies the
//! network's minimum, and enforces the caller's ceiling.

use crate::error::{Result, TxForgeError};
use crate::transaction::Transaction;
use num_bigint::BigUint;

/// Bytes a single-signature envelope adds over the canonical transaction
/// bytes, excluding the variable-width length prefix of the `txn` entry:
/// the field count, the `sig` entry carrying the 64-byte signature, and the
/// `txn` key and tag.
pub const SIGNED_ENVELOPE_OVERHEAD: usize = 76;

fn compact_len(value: usize) -> usize {
    if value <= 0x7f {
        1
    } else if value <= 0x3fff {
        2
    } else {
        3
    }
}

/// Exact wire length of a single-signature envelope around canonical bytes
/// of the given length.
pub fn signed_size(canonical_size: usize) -> usize {
    canonical_size + SIGNED_ENVELOPE_OVERHEAD + compact_len(canonical_size)
}

/// Suggested fee parameters, typically fetched from the node.
#[derive(Debug, Clone, Default)]
pub struct FeeParams {
    /// Fee units per byte of the signed transaction.
    pub fee_per_byte: u64,
    /// Network minimum per transaction.
    pub min_fee: u64,
    /// Flat surcharge on top of the computed fee.
    pub extra_fee: Option<u64>,
    /// Ceiling the caller refuses to pay past.
    pub max_fee: Option<u64>,
}

/// Fee for a transaction whose canonical encoding is `canonical_size` bytes.
pub fn compute_fee(params: &FeeParams, canonical_size: usize) -> Result<BigUint> {
    let mut fee = u128::from(params.fee_per_byte) * signed_size(canonical_size) as u128;
    if fee < u128::from(params.min_fee) {
        fee = u128::from(params.min_fee);
    }
    if let Some(extra) = params.extra_fee {
        fee += u128::from(extra);
    }
    if let Some(max) = params.max_fee {
        if fee > u128::from(max) {
            return Err(TxForgeError::Validation(format!(
                "computed fee {} exceeds max fee {}",
                fee, max
            )));
        }
    }
    Ok(BigUint::from(fee))
}

impl Transaction {
    /// Recompute this transaction's fee from its current encoded size. The
    /// size is taken before the fee field is populated, matching how
    /// fee-per-byte networks quote suggested fees.
    pub fn assign_fee(mut self, params: &FeeParams) -> Result<Transaction> {
        let size = self.encoded_size()?;
        self.header.fee = compute_fee(params, size)?;
        Ok(self)
    }
}
