//! Transaction records and their canonical field emission
//!
//! A transaction is an immutable record: a header of fields common to every
//! variant plus a tagged variant payload. Records are produced by the builders
//! in `crate::builder` and never constructed field-by-field at call sites, so
//! every record reaching `canonical_bytes` has already passed validation.

use crate::address::Address;
use crate::canonical::{FieldEncode, FieldMap};
use crate::error::Result;
use num_bigint::BigUint;

/// Genesis hashes, group identifiers, leases and metadata hashes are all
/// fixed 32-byte sequences.
pub const HASH_LEN: usize = 32;
/// Participation keys carried by key-registration transactions.
pub const PARTICIPATION_KEY_LEN: usize = 32;

pub const MAX_NOTE_LEN: usize = 1024;
pub const MAX_UNIT_NAME_LEN: usize = 8;
pub const MAX_ASSET_NAME_LEN: usize = 32;
pub const MAX_ASSET_URL_LEN: usize = 96;
pub const MAX_DECIMALS: u32 = 19;

/// Fields common to every transaction variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionHeader {
    pub sender: Address,
    /// Network fee units. Non-negativity is structural.
    pub fee: BigUint,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_hash: Option<[u8; HASH_LEN]>,
    pub genesis_id: String,
    /// Empty means absent; the canonical encoding cannot tell the two apart.
    pub note: Vec<u8>,
    /// Atomic-group identifier, assigned when grouping transactions.
    pub group: Option<[u8; HASH_LEN]>,
    pub rekey_to: Option<Address>,
    /// Anti-replay lease.
    pub lease: Option<[u8; HASH_LEN]>,
}

impl FieldEncode for TransactionHeader {
    fn put_fields(&self, map: &mut FieldMap) -> Result<()> {
        map.put_address("snd", Some(&self.sender))?;
        map.put_uint("fee", &self.fee)?;
        map.put_u64("fv", self.first_valid)?;
        map.put_u64("lv", self.last_valid)?;
        if let Some(hash) = &self.genesis_hash {
            map.put_bytes("gh", hash)?;
        }
        map.put_str("gen", &self.genesis_id)?;
        map.put_bytes("note", &self.note)?;
        if let Some(group) = &self.group {
            map.put_bytes("grp", group)?;
        }
        map.put_address("rekey", self.rekey_to.as_ref())?;
        if let Some(lease) = &self.lease {
            map.put_bytes("lx", lease)?;
        }
        Ok(())
    }
}

/// Moves fee units between two accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentFields {
    pub receiver: Address,
    pub amount: BigUint,
    /// Sends the remaining balance here and closes the sender account.
    pub close_remainder_to: Option<Address>,
}

impl FieldEncode for PaymentFields {
    fn put_fields(&self, map: &mut FieldMap) -> Result<()> {
        map.put_address("rcv", Some(&self.receiver))?;
        map.put_uint("amt", &self.amount)?;
        map.put_address("close", self.close_remainder_to.as_ref())?;
        Ok(())
    }
}

/// Moves base units of an existing asset. A zero-amount transfer to self is
/// an opt-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTransferFields {
    pub asset_id: BigUint,
    pub amount: BigUint,
    pub receiver: Address,
    /// Clawback source; present only when the sender acts as clawback.
    pub asset_sender: Option<Address>,
    pub close_remainder_to: Option<Address>,
}

impl FieldEncode for AssetTransferFields {
    fn put_fields(&self, map: &mut FieldMap) -> Result<()> {
        map.put_uint("xaid", &self.asset_id)?;
        map.put_uint("aamt", &self.amount)?;
        map.put_address("arcv", Some(&self.receiver))?;
        map.put_address("asnd", self.asset_sender.as_ref())?;
        map.put_address("aclose", self.close_remainder_to.as_ref())?;
        Ok(())
    }
}

/// Creates (`asset_id == 0`), reconfigures, or destroys a ledger-native
/// asset. An absent capability address after creation disables that
/// capability permanently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfigFields {
    pub asset_id: BigUint,
    pub total: Option<BigUint>,
    pub decimals: Option<u32>,
    pub default_frozen: bool,
    pub unit_name: String,
    pub asset_name: String,
    pub url: String,
    pub metadata_hash: Option<[u8; HASH_LEN]>,
    pub manager: Option<Address>,
    pub reserve: Option<Address>,
    pub freeze: Option<Address>,
    pub clawback: Option<Address>,
}

impl FieldEncode for AssetConfigFields {
    fn put_fields(&self, map: &mut FieldMap) -> Result<()> {
        map.put_uint("caid", &self.asset_id)?;
        if let Some(total) = &self.total {
            map.put_uint("t", total)?;
        }
        if let Some(decimals) = self.decimals {
            map.put_u64("dc", u64::from(decimals))?;
        }
        map.put_bool("df", self.default_frozen)?;
        map.put_str("un", &self.unit_name)?;
        map.put_str("an", &self.asset_name)?;
        map.put_str("au", &self.url)?;
        if let Some(hash) = &self.metadata_hash {
            map.put_bytes("am", hash)?;
        }
        map.put_address("m", self.manager.as_ref())?;
        map.put_address("r", self.reserve.as_ref())?;
        map.put_address("f", self.freeze.as_ref())?;
        map.put_address("c", self.clawback.as_ref())?;
        Ok(())
    }
}

/// Registers or retires an account's participation keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRegistrationFields {
    pub vote_key: Option<[u8; PARTICIPATION_KEY_LEN]>,
    pub selection_key: Option<[u8; PARTICIPATION_KEY_LEN]>,
    pub vote_first: u64,
    pub vote_last: u64,
    pub vote_key_dilution: u64,
    pub non_participation: bool,
}

impl FieldEncode for KeyRegistrationFields {
    fn put_fields(&self, map: &mut FieldMap) -> Result<()> {
        if let Some(key) = &self.vote_key {
            map.put_bytes("votekey", key)?;
        }
        if let Some(key) = &self.selection_key {
            map.put_bytes("selkey", key)?;
        }
        map.put_u64("votefst", self.vote_first)?;
        map.put_u64("votelst", self.vote_last)?;
        map.put_u64("votekd", self.vote_key_dilution)?;
        map.put_bool("nonpart", self.non_participation)?;
        Ok(())
    }
}

/// Variant payload, dispatched on by validation and encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionBody {
    Payment(PaymentFields),
    AssetTransfer(AssetTransferFields),
    AssetConfig(AssetConfigFields),
    KeyRegistration(KeyRegistrationFields),
}

/// An immutable, validated transaction record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub header: TransactionHeader,
    pub body: TransactionBody,
}

impl Transaction {
    /// Protocol type tag emitted under the `type` key.
    pub fn type_tag(&self) -> &'static str {
        match self.body {
            TransactionBody::Payment(_) => "pay",
            TransactionBody::AssetTransfer(_) => "axfer",
            TransactionBody::AssetConfig(_) => "acfg",
            TransactionBody::KeyRegistration(_) => "keyreg",
        }
    }

    /// The deterministic byte encoding that gets signed and hashed into the
    /// transaction identifier.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        let mut map = FieldMap::new();
        map.put_str("type", self.type_tag())?;
        self.header.put_fields(&mut map)?;
        match &self.body {
            TransactionBody::Payment(fields) => fields.put_fields(&mut map)?,
            TransactionBody::AssetTransfer(fields) => fields.put_fields(&mut map)?,
            TransactionBody::AssetConfig(fields) => fields.put_fields(&mut map)?,
            TransactionBody::KeyRegistration(fields) => fields.put_fields(&mut map)?,
        }
        map.encode()
    }

    /// Exact length of `canonical_bytes`.
    pub fn encoded_size(&self) -> Result<usize> {
        Ok(self.canonical_bytes()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(sender: Address) -> TransactionHeader {
        TransactionHeader {
            sender,
            fee: BigUint::from(1000u64),
            first_valid: 5_000_000,
            last_valid: 5_000_010,
            genesis_hash: Some([9u8; HASH_LEN]),
            genesis_id: "net-v1".to_string(),
            note: Vec::new(),
            group: None,
            rekey_to: None,
            lease: None,
        }
    }

    #[test]
    fn test_type_tags() {
        let sender = Address::new([1u8; 32]);
        let payment = Transaction {
            header: header(sender),
            body: TransactionBody::Payment(PaymentFields {
                receiver: Address::new([2u8; 32]),
                amount: BigUint::from(100u64),
                close_remainder_to: None,
            }),
        };
        assert_eq!(payment.type_tag(), "pay");

        let config = Transaction {
            header: header(sender),
            body: TransactionBody::AssetConfig(AssetConfigFields {
                asset_id: BigUint::default(),
                total: Some(BigUint::from(1u64)),
                decimals: Some(0),
                default_frozen: false,
                unit_name: String::new(),
                asset_name: String::new(),
                url: String::new(),
                metadata_hash: None,
                manager: None,
                reserve: None,
                freeze: None,
                clawback: None,
            }),
        };
        assert_eq!(config.type_tag(), "acfg");
    }

    #[test]
    fn test_canonical_bytes_are_stable() {
        let sender = Address::new([1u8; 32]);
        let make = || Transaction {
            header: header(sender),
            body: TransactionBody::Payment(PaymentFields {
                receiver: Address::new([2u8; 32]),
                amount: BigUint::from(100u64),
                close_remainder_to: None,
            }),
        };
        assert_eq!(
            make().canonical_bytes().unwrap(),
            make().canonical_bytes().unwrap()
        );
    }

    #[test]
    fn test_absent_optionals_leave_no_trace() {
        let sender = Address::new([1u8; 32]);
        let mut bare = header(sender);
        bare.note = Vec::new();
        let mut with_empty_note = header(sender);
        with_empty_note.note = Vec::new();
        with_empty_note.rekey_to = Some(Address::new([0u8; 32]));

        let body = TransactionBody::Payment(PaymentFields {
            receiver: Address::new([2u8; 32]),
            amount: BigUint::from(100u64),
            close_remainder_to: None,
        });
        let a = Transaction {
            header: bare,
            body: body.clone(),
        };
        let b = Transaction {
            header: with_empty_note,
            body,
        };
        assert_eq!(a.canonical_bytes().unwrap(), b.canonical_bytes().unwrap());
    }

    #[test]
    fn test_encoded_size_matches_bytes() {
        let sender = Address::new([1u8; 32]);
        let tx = Transaction {
            header: header(sender),
            body: TransactionBody::KeyRegistration(KeyRegistrationFields {
                vote_key: Some([3u8; 32]),
                selection_key: Some([4u8; 32]),
                vote_first: 1,
                vote_last: 100,
                vote_key_dilution: 10,
                non_participation: false,
            }),
        };
        assert_eq!(
            tx.encoded_size().unwrap(),
            tx.canonical_bytes().unwrap().len()
        );
    }
}
