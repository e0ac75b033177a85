//! Fixed-size public-key addresses with a checksummed text form
//!
//! An address is the raw 32-byte public key. The text form appends a 4-byte
//! checksum and base58-encodes the result; the checksum exists only for
//! display and transcription safety. Canonical transaction bytes always carry
//! the raw key, never the text form.

use crate::error::{Result, TxForgeError};
use sha2::{Digest, Sha512_256};
use std::fmt;
use std::str::FromStr;

/// Length of the raw public-key portion of an address.
pub const ADDRESS_LEN: usize = 32;

const CHECKSUM_LEN: usize = 4;

/// A 32-byte public-key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Build an address from a byte slice, rejecting anything but exactly
    /// 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ADDRESS_LEN {
            return Err(TxForgeError::Decoding(format!(
                "address must be {} bytes, got {}",
                ADDRESS_LEN,
                bytes.len()
            )));
        }
        let mut key = [0u8; ADDRESS_LEN];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// The all-zero address. Encodes as absent in the canonical field map.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    fn checksum(key: &[u8; ADDRESS_LEN]) -> [u8; CHECKSUM_LEN] {
        let digest = Sha512_256::digest(key);
        let mut checksum = [0u8; CHECKSUM_LEN];
        checksum.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
        checksum
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut raw = [0u8; ADDRESS_LEN + CHECKSUM_LEN];
        raw[..ADDRESS_LEN].copy_from_slice(&self.0);
        raw[ADDRESS_LEN..].copy_from_slice(&Self::checksum(&self.0));
        write!(f, "{}", bs58::encode(raw).into_string())
    }
}

impl FromStr for Address {
    type Err = TxForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let raw = bs58::decode(s).into_vec()?;
        if raw.len() != ADDRESS_LEN + CHECKSUM_LEN {
            return Err(TxForgeError::Decoding(format!(
                "address text must decode to {} bytes, got {}",
                ADDRESS_LEN + CHECKSUM_LEN,
                raw.len()
            )));
        }
        let address = Self::from_slice(&raw[..ADDRESS_LEN])?;
        if raw[ADDRESS_LEN..] != Self::checksum(&address.0) {
            return Err(TxForgeError::Decoding(
                "address checksum mismatch".to_string(),
            ));
        }
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip() {
        let address = Address::new([7u8; 32]);
        let text = address.to_string();
        let parsed: Address = text.parse().unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        let address = Address::new([7u8; 32]);
        let mut raw = [0u8; 36];
        raw[..32].copy_from_slice(address.as_bytes());
        // Valid checksum with one byte flipped
        let digest = Sha512_256::digest(address.as_bytes());
        raw[32..].copy_from_slice(&digest[28..]);
        raw[35] ^= 0xff;
        let text = bs58::encode(raw).into_string();
        assert!(matches!(
            text.parse::<Address>(),
            Err(TxForgeError::Decoding(_))
        ));
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(Address::from_slice(&[1u8; 31]).is_err());
        assert!(Address::from_slice(&[1u8; 33]).is_err());
        assert!("3yZe7d".parse::<Address>().is_err());
    }

    #[test]
    fn test_zero_detection() {
        assert!(Address::new([0u8; 32]).is_zero());
        assert!(!Address::new([1u8; 32]).is_zero());
    }
}
