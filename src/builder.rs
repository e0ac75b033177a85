//! Fluent transaction builders with per-variant validation
//!
//! One builder per variant, all sharing the same common-field contract:
//! chained setters consuming and returning the builder, absence distinct from
//! zero, last write wins silently. `build()` validates in a fixed field order
//! so the first violated invariant is always the same for the same input,
//! then freezes an immutable `Transaction`.

use crate::address::Address;
use crate::error::{Result, TxForgeError};
use crate::transaction::{
    AssetConfigFields, AssetTransferFields, KeyRegistrationFields, PaymentFields, Transaction,
    TransactionBody, TransactionHeader, HASH_LEN, MAX_ASSET_NAME_LEN, MAX_ASSET_URL_LEN,
    MAX_DECIMALS, MAX_NOTE_LEN, MAX_UNIT_NAME_LEN, PARTICIPATION_KEY_LEN,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use num_bigint::BigUint;
use num_traits::Zero;

/// Common fields accumulated by every builder.
#[derive(Debug, Clone, Default)]
struct CommonFields {
    sender: Option<Address>,
    fee: BigUint,
    first_valid: Option<u64>,
    last_valid: Option<u64>,
    genesis_hash: Option<[u8; HASH_LEN]>,
    genesis_id: String,
    note: Vec<u8>,
    group: Option<[u8; HASH_LEN]>,
    rekey_to: Option<Address>,
    lease: Option<[u8; HASH_LEN]>,
}

impl CommonFields {
    /// Validation order: sender, first-valid, last-valid, window ordering,
    /// note length.
    fn validated_header(&self) -> Result<TransactionHeader> {
        let sender = self
            .sender
            .ok_or_else(|| TxForgeError::Validation("sender is required".to_string()))?;
        let first_valid = self.first_valid.ok_or_else(|| {
            TxForgeError::Validation("first-valid round is required".to_string())
        })?;
        let last_valid = self
            .last_valid
            .ok_or_else(|| TxForgeError::Validation("last-valid round is required".to_string()))?;
        if first_valid > last_valid {
            return Err(TxForgeError::Validation(format!(
                "validity window is inverted: first-valid {} exceeds last-valid {}",
                first_valid, last_valid
            )));
        }
        if self.note.len() > MAX_NOTE_LEN {
            return Err(TxForgeError::Validation(format!(
                "note exceeds {} bytes",
                MAX_NOTE_LEN
            )));
        }
        Ok(TransactionHeader {
            sender,
            fee: self.fee.clone(),
            first_valid,
            last_valid,
            genesis_hash: self.genesis_hash,
            genesis_id: self.genesis_id.clone(),
            note: self.note.clone(),
            group: self.group,
            rekey_to: self.rekey_to,
            lease: self.lease,
        })
    }
}

/// A 32-byte value captured through one of the raw/hex/base64 entry points.
/// Resolution happens at `build()` time, in that field's validation slot, so
/// every entry point converges to the same internal state.
#[derive(Debug, Clone)]
enum Hash32Input {
    Raw(Vec<u8>),
    Base64(String),
    Hex(String),
}

impl Hash32Input {
    fn resolve(&self, field: &str) -> Result<[u8; HASH_LEN]> {
        let bytes = match self {
            Hash32Input::Raw(bytes) => bytes.clone(),
            Hash32Input::Base64(text) => BASE64.decode(text).map_err(|e| {
                TxForgeError::Validation(format!("{} is not valid base64: {}", field, e))
            })?,
            Hash32Input::Hex(text) => hex::decode(text).map_err(|e| {
                TxForgeError::Validation(format!("{} is not valid hex: {}", field, e))
            })?,
        };
        if bytes.len() != HASH_LEN {
            return Err(TxForgeError::Validation(format!(
                "{} must be exactly {} bytes, got {}",
                field,
                HASH_LEN,
                bytes.len()
            )));
        }
        let mut out = [0u8; HASH_LEN];
        out.copy_from_slice(&bytes);
        Ok(out)
    }
}

macro_rules! impl_common_setters {
    ($builder:ty) => {
        impl $builder {
            pub fn sender(mut self, sender: Address) -> Self {
                self.common.sender = Some(sender);
                self
            }

            /// Fee in network fee units. Usually assigned afterwards from
            /// the encoded size via `Transaction::assign_fee`.
            pub fn fee(mut self, fee: impl Into<BigUint>) -> Self {
                self.common.fee = fee.into();
                self
            }

            pub fn first_valid(mut self, round: u64) -> Self {
                self.common.first_valid = Some(round);
                self
            }

            pub fn last_valid(mut self, round: u64) -> Self {
                self.common.last_valid = Some(round);
                self
            }

            pub fn genesis_hash(mut self, hash: [u8; HASH_LEN]) -> Self {
                self.common.genesis_hash = Some(hash);
                self
            }

            pub fn genesis_id(mut self, id: &str) -> Self {
                self.common.genesis_id = id.to_string();
                self
            }

            pub fn note(mut self, note: &[u8]) -> Self {
                self.common.note = note.to_vec();
                self
            }

            /// UTF-8 convenience over the same byte field as `note`.
            pub fn note_text(self, note: &str) -> Self {
                self.note(note.as_bytes())
            }

            pub fn group(mut self, group: [u8; HASH_LEN]) -> Self {
                self.common.group = Some(group);
                self
            }

            pub fn rekey_to(mut self, address: Address) -> Self {
                self.common.rekey_to = Some(address);
                self
            }

            pub fn lease(mut self, lease: [u8; HASH_LEN]) -> Self {
                self.common.lease = Some(lease);
                self
            }

            /// Exact byte length the canonical encoding of `build()` would
            /// produce, without consuming the builder. Callers use this to
            /// pre-compute fees on fee-per-byte networks.
            pub fn estimated_size(&self) -> Result<usize> {
                self.clone().build()?.encoded_size()
            }
        }

        impl Default for $builder {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// Builds a payment transaction.
#[derive(Debug, Clone)]
pub struct PaymentBuilder {
    common: CommonFields,
    receiver: Option<Address>,
    amount: BigUint,
    close_remainder_to: Option<Address>,
}

impl PaymentBuilder {
    pub fn new() -> Self {
        Self {
            common: CommonFields::default(),
            receiver: None,
            amount: BigUint::default(),
            close_remainder_to: None,
        }
    }

    pub fn receiver(mut self, receiver: Address) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn amount(mut self, amount: impl Into<BigUint>) -> Self {
        self.amount = amount.into();
        self
    }

    /// Close the sender account, sending the remaining balance here.
    pub fn close_remainder_to(mut self, address: Address) -> Self {
        self.close_remainder_to = Some(address);
        self
    }

    pub fn build(self) -> Result<Transaction> {
        let header = self.common.validated_header()?;
        let receiver = self
            .receiver
            .ok_or_else(|| TxForgeError::Validation("receiver is required".to_string()))?;
        Ok(Transaction {
            header,
            body: TransactionBody::Payment(PaymentFields {
                receiver,
                amount: self.amount,
                close_remainder_to: self.close_remainder_to,
            }),
        })
    }
}

impl_common_setters!(PaymentBuilder);

/// Builds an asset-transfer transaction (plain transfer, opt-in, opt-out,
/// or clawback depending on which fields are set).
#[derive(Debug, Clone)]
pub struct AssetTransferBuilder {
    common: CommonFields,
    asset_id: BigUint,
    amount: BigUint,
    receiver: Option<Address>,
    asset_sender: Option<Address>,
    close_remainder_to: Option<Address>,
}

impl AssetTransferBuilder {
    pub fn new() -> Self {
        Self {
            common: CommonFields::default(),
            asset_id: BigUint::default(),
            amount: BigUint::default(),
            receiver: None,
            asset_sender: None,
            close_remainder_to: None,
        }
    }

    pub fn asset_id(mut self, asset_id: impl Into<BigUint>) -> Self {
        self.asset_id = asset_id.into();
        self
    }

    pub fn amount(mut self, amount: impl Into<BigUint>) -> Self {
        self.amount = amount.into();
        self
    }

    pub fn receiver(mut self, receiver: Address) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// The account base units are taken from when the sender acts as the
    /// asset's clawback.
    pub fn asset_sender(mut self, address: Address) -> Self {
        self.asset_sender = Some(address);
        self
    }

    pub fn close_remainder_to(mut self, address: Address) -> Self {
        self.close_remainder_to = Some(address);
        self
    }

    /// Validation order: asset id, receiver.
    pub fn build(self) -> Result<Transaction> {
        let header = self.common.validated_header()?;
        if self.asset_id.is_zero() {
            return Err(TxForgeError::Validation("asset id is required".to_string()));
        }
        let receiver = self
            .receiver
            .ok_or_else(|| TxForgeError::Validation("receiver is required".to_string()))?;
        Ok(Transaction {
            header,
            body: TransactionBody::AssetTransfer(AssetTransferFields {
                asset_id: self.asset_id,
                amount: self.amount,
                receiver,
                asset_sender: self.asset_sender,
                close_remainder_to: self.close_remainder_to,
            }),
        })
    }
}

impl_common_setters!(AssetTransferBuilder);

/// Builds an asset-configuration transaction: creation when the asset id is
/// zero, reconfiguration of capability addresses otherwise, or destruction
/// when the destroy flag is set.
#[derive(Debug, Clone)]
pub struct AssetConfigBuilder {
    common: CommonFields,
    asset_id: BigUint,
    total: Option<BigUint>,
    decimals: Option<u32>,
    default_frozen: bool,
    unit_name: String,
    asset_name: String,
    url: String,
    metadata_hash: Option<Hash32Input>,
    manager: Option<Address>,
    reserve: Option<Address>,
    freeze: Option<Address>,
    clawback: Option<Address>,
    destroy: bool,
}

impl AssetConfigBuilder {
    pub fn new() -> Self {
        Self {
            common: CommonFields::default(),
            asset_id: BigUint::default(),
            total: None,
            decimals: None,
            default_frozen: false,
            unit_name: String::new(),
            asset_name: String::new(),
            url: String::new(),
            metadata_hash: None,
            manager: None,
            reserve: None,
            freeze: None,
            clawback: None,
            destroy: false,
        }
    }

    /// Zero means a new asset is being created.
    pub fn asset_id(mut self, asset_id: impl Into<BigUint>) -> Self {
        self.asset_id = asset_id.into();
        self
    }

    pub fn total(mut self, total: impl Into<BigUint>) -> Self {
        self.total = Some(total.into());
        self
    }

    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    pub fn default_frozen(mut self, frozen: bool) -> Self {
        self.default_frozen = frozen;
        self
    }

    pub fn unit_name(mut self, name: &str) -> Self {
        self.unit_name = name.to_string();
        self
    }

    pub fn asset_name(mut self, name: &str) -> Self {
        self.asset_name = name.to_string();
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn metadata_hash(mut self, hash: &[u8]) -> Self {
        self.metadata_hash = Some(Hash32Input::Raw(hash.to_vec()));
        self
    }

    /// Base64 convenience over the same byte field as `metadata_hash`.
    pub fn metadata_hash_b64(mut self, hash: &str) -> Self {
        self.metadata_hash = Some(Hash32Input::Base64(hash.to_string()));
        self
    }

    /// Hex convenience over the same byte field as `metadata_hash`.
    pub fn metadata_hash_hex(mut self, hash: &str) -> Self {
        self.metadata_hash = Some(Hash32Input::Hex(hash.to_string()));
        self
    }

    pub fn manager(mut self, address: Address) -> Self {
        self.manager = Some(address);
        self
    }

    pub fn reserve(mut self, address: Address) -> Self {
        self.reserve = Some(address);
        self
    }

    pub fn freeze(mut self, address: Address) -> Self {
        self.freeze = Some(address);
        self
    }

    pub fn clawback(mut self, address: Address) -> Self {
        self.clawback = Some(address);
        self
    }

    /// Destroy the asset. Mutually exclusive with every configuration field.
    pub fn destroy(mut self, destroy: bool) -> Self {
        self.destroy = destroy;
        self
    }

    fn has_configuration_fields(&self) -> bool {
        self.total.is_some()
            || self.decimals.is_some()
            || self.default_frozen
            || !self.unit_name.is_empty()
            || !self.asset_name.is_empty()
            || !self.url.is_empty()
            || self.metadata_hash.is_some()
            || self.manager.is_some()
            || self.reserve.is_some()
            || self.freeze.is_some()
            || self.clawback.is_some()
    }

    /// Validation order: destroy conflicts, destroy target, creation
    /// requirements, creation-only fields, decimals range, name/url lengths,
    /// metadata hash.
    pub fn build(self) -> Result<Transaction> {
        let header = self.common.validated_header()?;

        if self.destroy {
            if self.has_configuration_fields() {
                return Err(TxForgeError::Validation(
                    "destroy conflicts with configuration fields".to_string(),
                ));
            }
            if self.asset_id.is_zero() {
                return Err(TxForgeError::Validation(
                    "destroy requires an existing asset".to_string(),
                ));
            }
        } else if self.asset_id.is_zero() {
            if self.total.is_none() || self.decimals.is_none() {
                return Err(TxForgeError::Validation(
                    "total and decimals required on creation".to_string(),
                ));
            }
        } else if self.total.is_some() || self.decimals.is_some() {
            return Err(TxForgeError::Validation(
                "total and decimals are creation-only fields".to_string(),
            ));
        }

        if let Some(decimals) = self.decimals {
            if decimals > MAX_DECIMALS {
                return Err(TxForgeError::Validation(format!(
                    "decimals exceeds {}",
                    MAX_DECIMALS
                )));
            }
        }
        if self.unit_name.len() > MAX_UNIT_NAME_LEN {
            return Err(TxForgeError::Validation(format!(
                "unit name exceeds {} bytes",
                MAX_UNIT_NAME_LEN
            )));
        }
        if self.asset_name.len() > MAX_ASSET_NAME_LEN {
            return Err(TxForgeError::Validation(format!(
                "asset name exceeds {} bytes",
                MAX_ASSET_NAME_LEN
            )));
        }
        if self.url.len() > MAX_ASSET_URL_LEN {
            return Err(TxForgeError::Validation(format!(
                "url exceeds {} bytes",
                MAX_ASSET_URL_LEN
            )));
        }
        let metadata_hash = match &self.metadata_hash {
            Some(input) => Some(input.resolve("metadata hash")?),
            None => None,
        };

        Ok(Transaction {
            header,
            body: TransactionBody::AssetConfig(AssetConfigFields {
                asset_id: self.asset_id,
                total: self.total,
                decimals: self.decimals,
                default_frozen: self.default_frozen,
                unit_name: self.unit_name,
                asset_name: self.asset_name,
                url: self.url,
                metadata_hash,
                manager: self.manager,
                reserve: self.reserve,
                freeze: self.freeze,
                clawback: self.clawback,
            }),
        })
    }
}

impl_common_setters!(AssetConfigBuilder);

/// Builds a key-registration transaction: online with a full participation
/// key set, offline with none, or permanently non-participating.
#[derive(Debug, Clone)]
pub struct KeyRegistrationBuilder {
    common: CommonFields,
    vote_key: Option<[u8; PARTICIPATION_KEY_LEN]>,
    selection_key: Option<[u8; PARTICIPATION_KEY_LEN]>,
    vote_first: Option<u64>,
    vote_last: Option<u64>,
    vote_key_dilution: Option<u64>,
    non_participation: bool,
}

impl KeyRegistrationBuilder {
    pub fn new() -> Self {
        Self {
            common: CommonFields::default(),
            vote_key: None,
            selection_key: None,
            vote_first: None,
            vote_last: None,
            vote_key_dilution: None,
            non_participation: false,
        }
    }

    pub fn vote_key(mut self, key: [u8; PARTICIPATION_KEY_LEN]) -> Self {
        self.vote_key = Some(key);
        self
    }

    pub fn selection_key(mut self, key: [u8; PARTICIPATION_KEY_LEN]) -> Self {
        self.selection_key = Some(key);
        self
    }

    pub fn vote_first(mut self, round: u64) -> Self {
        self.vote_first = Some(round);
        self
    }

    pub fn vote_last(mut self, round: u64) -> Self {
        self.vote_last = Some(round);
        self
    }

    pub fn vote_key_dilution(mut self, dilution: u64) -> Self {
        self.vote_key_dilution = Some(dilution);
        self
    }

    /// Mark the account permanently non-participating.
    pub fn non_participation(mut self, non_participation: bool) -> Self {
        self.non_participation = non_participation;
        self
    }

    fn has_participation_fields(&self) -> bool {
        self.vote_key.is_some()
            || self.selection_key.is_some()
            || self.vote_first.is_some()
            || self.vote_last.is_some()
            || self.vote_key_dilution.is_some()
    }

    fn has_full_participation_set(&self) -> bool {
        self.vote_key.is_some()
            && self.selection_key.is_some()
            && self.vote_first.is_some()
            && self.vote_last.is_some()
            && self.vote_key_dilution.is_some()
    }

    /// Validation order: non-participation conflicts, partial key set, vote
    /// window ordering.
    pub fn build(self) -> Result<Transaction> {
        let header = self.common.validated_header()?;

        if self.non_participation && self.has_participation_fields() {
            return Err(TxForgeError::Validation(
                "non-participation conflicts with participation keys".to_string(),
            ));
        }
        if self.has_participation_fields() && !self.has_full_participation_set() {
            return Err(TxForgeError::Validation(
                "online registration requires the full participation key set".to_string(),
            ));
        }
        let vote_first = self.vote_first.unwrap_or(0);
        let vote_last = self.vote_last.unwrap_or(0);
        if vote_first > vote_last {
            return Err(TxForgeError::Validation(format!(
                "vote validity window is inverted: vote-first {} exceeds vote-last {}",
                vote_first, vote_last
            )));
        }

        Ok(Transaction {
            header,
            body: TransactionBody::KeyRegistration(KeyRegistrationFields {
                vote_key: self.vote_key,
                selection_key: self.selection_key,
                vote_first,
                vote_last,
                vote_key_dilution: self.vote_key_dilution.unwrap_or(0),
                non_participation: self.non_participation,
            }),
        })
    }
}

impl_common_setters!(KeyRegistrationBuilder);

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> Address {
        Address::new([1u8; 32])
    }

    fn receiver() -> Address {
        Address::new([2u8; 32])
    }

    fn payment() -> PaymentBuilder {
        PaymentBuilder::new()
            .sender(sender())
            .first_valid(100)
            .last_valid(200)
            .genesis_hash([9u8; 32])
            .genesis_id("net-v1")
            .receiver(receiver())
            .amount(1000u64)
    }

    fn asset_create() -> AssetConfigBuilder {
        AssetConfigBuilder::new()
            .sender(sender())
            .first_valid(100)
            .last_valid(200)
            .genesis_hash([9u8; 32])
            .total(1_000_000u64)
            .decimals(2)
    }

    #[test]
    fn test_missing_sender_named_first() {
        let err = PaymentBuilder::new()
            .first_valid(100)
            .last_valid(200)
            .receiver(receiver())
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "validation error: sender is required");
    }

    #[test]
    fn test_inverted_validity_window() {
        let err = payment().first_valid(300).build().unwrap_err();
        assert!(err
            .to_string()
            .contains("validity window is inverted: first-valid 300 exceeds last-valid 200"));
    }

    #[test]
    fn test_note_length_bound() {
        assert!(payment().note(&[0u8; 1024]).build().is_ok());
        let err = payment().note(&[0u8; 1025]).build().unwrap_err();
        assert!(err.to_string().contains("note exceeds 1024 bytes"));
    }

    #[test]
    fn test_last_write_wins() {
        let tx = payment().amount(1u64).amount(5u64).build().unwrap();
        match tx.body {
            TransactionBody::Payment(fields) => {
                assert_eq!(fields.amount, BigUint::from(5u64));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_setter_order_does_not_change_bytes() {
        let a = payment().note_text("hi").build().unwrap();
        let b = PaymentBuilder::new()
            .note_text("hi")
            .receiver(receiver())
            .amount(1000u64)
            .genesis_id("net-v1")
            .genesis_hash([9u8; 32])
            .last_valid(200)
            .first_valid(100)
            .sender(sender())
            .build()
            .unwrap();
        assert_eq!(a.canonical_bytes().unwrap(), b.canonical_bytes().unwrap());
    }

    #[test]
    fn test_zero_values_match_unset() {
        let unset = payment().build().unwrap();
        let zeroed = payment().fee(0u64).note(b"").genesis_id("net-v1").build().unwrap();
        assert_eq!(
            unset.canonical_bytes().unwrap(),
            zeroed.canonical_bytes().unwrap()
        );
    }

    #[test]
    fn test_estimated_size_equals_encoding() {
        let builder = payment().note_text("size check");
        let estimated = builder.estimated_size().unwrap();
        let actual = builder.build().unwrap().canonical_bytes().unwrap().len();
        assert_eq!(estimated, actual);

        let builder = asset_create()
            .unit_name("TOK")
            .asset_name("Token")
            .url("https://example.org")
            .manager(sender());
        assert_eq!(
            builder.estimated_size().unwrap(),
            builder.build().unwrap().canonical_bytes().unwrap().len()
        );
    }

    #[test]
    fn test_creation_requires_total_and_decimals() {
        let base = AssetConfigBuilder::new()
            .sender(sender())
            .first_valid(100)
            .last_valid(200);
        let err = base.clone().build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: total and decimals required on creation"
        );
        let err = base.clone().total(100u64).build().unwrap_err();
        assert!(err.to_string().contains("total and decimals required"));
        assert!(base.total(100u64).decimals(0).build().is_ok());
    }

    #[test]
    fn test_destroy_is_exclusive() {
        let destroy = AssetConfigBuilder::new()
            .sender(sender())
            .first_valid(100)
            .last_valid(200)
            .asset_id(77u64)
            .destroy(true);
        assert!(destroy.clone().build().is_ok());

        let err = destroy.clone().asset_name("Token").build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: destroy conflicts with configuration fields"
        );
        let err = destroy.clone().manager(sender()).build().unwrap_err();
        assert!(err.to_string().contains("destroy conflicts"));

        let err = destroy.asset_id(0u64).build().unwrap_err();
        assert!(err.to_string().contains("destroy requires an existing asset"));
    }

    #[test]
    fn test_total_is_creation_only() {
        let err = AssetConfigBuilder::new()
            .sender(sender())
            .first_valid(100)
            .last_valid(200)
            .asset_id(77u64)
            .total(5u64)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("creation-only"));
    }

    #[test]
    fn test_decimals_range() {
        assert!(asset_create().decimals(19).build().is_ok());
        let err = asset_create().decimals(20).build().unwrap_err();
        assert!(err.to_string().contains("decimals exceeds 19"));
    }

    #[test]
    fn test_name_and_url_bounds() {
        assert!(asset_create().unit_name("ABCDEFGH").build().is_ok());
        assert!(asset_create().unit_name("ABCDEFGHI").build().is_err());
        assert!(asset_create().asset_name(&"a".repeat(33)).build().is_err());
        assert!(asset_create().url(&"u".repeat(97)).build().is_err());
    }

    #[test]
    fn test_metadata_entry_points_converge() {
        let hash = [0xabu8; 32];
        let raw = asset_create().metadata_hash(&hash).build().unwrap();
        let b64 = asset_create()
            .metadata_hash_b64(&BASE64.encode(hash))
            .build()
            .unwrap();
        let hexed = asset_create()
            .metadata_hash_hex(&hex::encode(hash))
            .build()
            .unwrap();
        assert_eq!(raw, b64);
        assert_eq!(raw, hexed);
        assert_eq!(
            raw.canonical_bytes().unwrap(),
            hexed.canonical_bytes().unwrap()
        );
    }

    #[test]
    fn test_metadata_length_enforced() {
        let err = asset_create().metadata_hash(&[1u8; 31]).build().unwrap_err();
        assert!(err.to_string().contains("exactly 32 bytes"));
        let err = asset_create()
            .metadata_hash_b64("not base64!!")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("not valid base64"));
    }

    #[test]
    fn test_asset_transfer_requirements() {
        let base = AssetTransferBuilder::new()
            .sender(sender())
            .first_valid(100)
            .last_valid(200);
        let err = base.clone().receiver(receiver()).build().unwrap_err();
        assert!(err.to_string().contains("asset id is required"));
        let err = base.clone().asset_id(7u64).build().unwrap_err();
        assert!(err.to_string().contains("receiver is required"));
        assert!(base.asset_id(7u64).receiver(receiver()).build().is_ok());
    }

    #[test]
    fn test_keyreg_modes() {
        let base = KeyRegistrationBuilder::new()
            .sender(sender())
            .first_valid(100)
            .last_valid(200);

        // Offline: nothing set
        assert!(base.clone().build().is_ok());

        // Non-participation alone
        assert!(base.clone().non_participation(true).build().is_ok());

        // Non-participation plus keys conflicts
        let err = base
            .clone()
            .non_participation(true)
            .vote_key([1u8; 32])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("non-participation conflicts"));

        // Partial online set
        let err = base.clone().vote_key([1u8; 32]).build().unwrap_err();
        assert!(err
            .to_string()
            .contains("full participation key set"));

        // Full online set
        assert!(base
            .vote_key([1u8; 32])
            .selection_key([2u8; 32])
            .vote_first(100)
            .vote_last(10_000)
            .vote_key_dilution(100)
            .build()
            .is_ok());
    }
}
