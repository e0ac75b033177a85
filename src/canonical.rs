//! Canonical byte encoding primitives
//!
//! This module provides the manual byte-level encoding that every transaction
//! record flows through before signing. The bytes produced here are signed and
//! hashed into the transaction identifier, so every rule is consensus-critical:
//! present fields are emitted in bytewise-sorted key order, zero/empty values
//! are omitted entirely, and integers use their minimal unsigned big-endian
//! width.

use crate::address::{Address, ADDRESS_LEN};
use crate::error::{Result, TxForgeError};
use num_bigint::BigUint;
use num_traits::Zero;
use std::io::Write;

/// Value type tags, one byte ahead of each payload.
pub const TAG_UINT: u8 = 0x01;
pub const TAG_BYTES: u8 = 0x02;
pub const TAG_STR: u8 = 0x03;
pub const TAG_BOOL: u8 = 0x04;
pub const TAG_ADDR: u8 = 0x05;

/// Types that contribute short-named fields to a canonical field map.
pub trait FieldEncode {
    fn put_fields(&self, map: &mut FieldMap) -> Result<()>;
}

/// Compact-u16: variable-length little-endian base-128 encoding, used for
/// every length prefix and for the field count.
pub fn encode_compact_u16(value: u16, writer: &mut Vec<u8>) -> Result<()> {
    if value <= 0x7f {
        writer.write_all(&[value as u8])?;
    } else if value <= 0x3fff {
        writer.write_all(&[((value & 0x7f) | 0x80) as u8, (value >> 7) as u8])?;
    } else {
        writer.write_all(&[
            ((value & 0x7f) | 0x80) as u8,
            (((value >> 7) & 0x7f) | 0x80) as u8,
            (value >> 14) as u8,
        ])?;
    }
    Ok(())
}

fn encode_len(len: usize, writer: &mut Vec<u8>) -> Result<()> {
    let len: u16 = len.try_into().map_err(|_| {
        TxForgeError::Encoding(format!("length {} exceeds the encodable range", len))
    })?;
    encode_compact_u16(len, writer)
}

/// Minimal unsigned big-endian integer. Zero integers are omitted from the
/// field map, never encoded; reaching this function with zero is a defect.
pub fn encode_uint(value: &BigUint, writer: &mut Vec<u8>) -> Result<()> {
    if value.is_zero() {
        return Err(TxForgeError::Encoding(
            "zero integers are omitted, not encoded".to_string(),
        ));
    }
    writer.write_all(&[TAG_UINT])?;
    let magnitude = value.to_bytes_be();
    encode_len(magnitude.len(), writer)?;
    writer.write_all(&magnitude)?;
    Ok(())
}

/// Length-prefixed opaque byte sequence.
pub fn encode_bytes(data: &[u8], writer: &mut Vec<u8>) -> Result<()> {
    writer.write_all(&[TAG_BYTES])?;
    encode_len(data.len(), writer)?;
    writer.write_all(data)?;
    Ok(())
}

/// Length-prefixed UTF-8 string.
pub fn encode_str(value: &str, writer: &mut Vec<u8>) -> Result<()> {
    writer.write_all(&[TAG_STR])?;
    encode_len(value.len(), writer)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

/// Booleans only ever encode as true; false is omitted from the field map.
pub fn encode_bool(value: bool, writer: &mut Vec<u8>) -> Result<()> {
    if !value {
        return Err(TxForgeError::Encoding(
            "false booleans are omitted, not encoded".to_string(),
        ));
    }
    writer.write_all(&[TAG_BOOL, 1])?;
    Ok(())
}

/// Raw fixed-length public-key bytes. The checksummed text form never appears
/// in signed bytes.
pub fn encode_address(address: &Address, writer: &mut Vec<u8>) -> Result<()> {
    writer.write_all(&[TAG_ADDR])?;
    writer.write_all(address.as_bytes())?;
    Ok(())
}

/// Accumulates present fields under their protocol short names, then emits
/// them in a single bytewise-sorted key order.
///
/// Insertion order never reaches the wire: two encoders given the same
/// logical record agree byte-for-byte regardless of the order fields were
/// set during construction.
#[derive(Debug, Default)]
pub struct FieldMap {
    fields: Vec<(&'static str, Vec<u8>)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn put_uint(&mut self, key: &'static str, value: &BigUint) -> Result<()> {
        if value.is_zero() {
            return Ok(());
        }
        let mut buf = Vec::new();
        encode_uint(value, &mut buf)?;
        self.fields.push((key, buf));
        Ok(())
    }

    pub fn put_u64(&mut self, key: &'static str, value: u64) -> Result<()> {
        self.put_uint(key, &BigUint::from(value))
    }

    pub fn put_bytes(&mut self, key: &'static str, value: &[u8]) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }
        let mut buf = Vec::new();
        encode_bytes(value, &mut buf)?;
        self.fields.push((key, buf));
        Ok(())
    }

    pub fn put_str(&mut self, key: &'static str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }
        let mut buf = Vec::new();
        encode_str(value, &mut buf)?;
        self.fields.push((key, buf));
        Ok(())
    }

    pub fn put_bool(&mut self, key: &'static str, value: bool) -> Result<()> {
        if !value {
            return Ok(());
        }
        let mut buf = Vec::new();
        encode_bool(value, &mut buf)?;
        self.fields.push((key, buf));
        Ok(())
    }

    /// Absent and all-zero addresses are both omitted; the zero key is the
    /// address type's empty value.
    pub fn put_address(&mut self, key: &'static str, value: Option<&Address>) -> Result<()> {
        let address = match value {
            Some(address) if !address.is_zero() => address,
            _ => return Ok(()),
        };
        let mut buf = Vec::new();
        encode_address(address, &mut buf)?;
        self.fields.push((key, buf));
        Ok(())
    }

    /// Emit the accumulated fields: compact count, then `key || value` pairs
    /// in bytewise-sorted key order. A duplicate key means two record fields
    /// mapped onto one short name, which validation should have made
    /// impossible.
    pub fn encode(mut self) -> Result<Vec<u8>> {
        self.fields.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        for pair in self.fields.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(TxForgeError::Encoding(format!(
                    "duplicate field key: {}",
                    pair[0].0
                )));
            }
        }

        let mut out = Vec::new();
        encode_len(self.fields.len(), &mut out)?;
        for (key, value) in &self.fields {
            encode_len(key.len(), &mut out)?;
            out.write_all(key.as_bytes())?;
            out.write_all(value)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_u16_boundaries() {
        let mut buf = Vec::new();
        encode_compact_u16(0x7f, &mut buf).unwrap();
        assert_eq!(buf, vec![0x7f]);

        buf.clear();
        encode_compact_u16(0x80, &mut buf).unwrap();
        assert_eq!(buf, vec![0x80, 0x01]);

        buf.clear();
        encode_compact_u16(0x3fff, &mut buf).unwrap();
        assert_eq!(buf, vec![0xff, 0x7f]);

        buf.clear();
        encode_compact_u16(0x4000, &mut buf).unwrap();
        assert_eq!(buf, vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn test_uint_minimal_width() {
        let mut buf = Vec::new();
        encode_uint(&BigUint::from(1u64), &mut buf).unwrap();
        assert_eq!(buf, vec![TAG_UINT, 1, 0x01]);

        buf.clear();
        encode_uint(&BigUint::from(0x0100u64), &mut buf).unwrap();
        assert_eq!(buf, vec![TAG_UINT, 2, 0x01, 0x00]);

        buf.clear();
        assert!(encode_uint(&BigUint::zero(), &mut buf).is_err());
    }

    #[test]
    fn test_map_sorts_keys_bytewise() {
        let mut map = FieldMap::new();
        map.put_u64("lv", 10).unwrap();
        map.put_u64("fv", 5).unwrap();
        map.put_str("gen", "net-v1").unwrap();
        let bytes = map.encode().unwrap();

        // 3 fields, then fv < gen < lv
        assert_eq!(bytes[0], 3);
        assert_eq!(&bytes[1..4], [2, b'f', b'v']);
        let gen_pos = bytes.windows(4).position(|w| w == [3, b'g', b'e', b'n']);
        let lv_pos = bytes.windows(3).position(|w| w == [2, b'l', b'v']);
        assert!(gen_pos.unwrap() < lv_pos.unwrap());
    }

    #[test]
    fn test_insertion_order_is_irrelevant() {
        let mut forward = FieldMap::new();
        forward.put_u64("fv", 5).unwrap();
        forward.put_u64("lv", 10).unwrap();

        let mut reversed = FieldMap::new();
        reversed.put_u64("lv", 10).unwrap();
        reversed.put_u64("fv", 5).unwrap();

        assert_eq!(forward.encode().unwrap(), reversed.encode().unwrap());
    }

    #[test]
    fn test_zero_values_are_omitted() {
        let mut map = FieldMap::new();
        map.put_u64("fee", 0).unwrap();
        map.put_bytes("note", b"").unwrap();
        map.put_str("gen", "").unwrap();
        map.put_bool("df", false).unwrap();
        map.put_address("snd", Some(&Address::new([0u8; ADDRESS_LEN])))
            .unwrap();
        map.put_address("rekey", None).unwrap();
        assert_eq!(map.encode().unwrap(), vec![0]);
    }

    #[test]
    fn test_duplicate_key_is_a_defect() {
        let mut map = FieldMap::new();
        map.put_u64("fee", 1).unwrap();
        map.put_u64("fee", 2).unwrap();
        assert!(matches!(map.encode(), Err(TxForgeError::Encoding(_))));
    }

    #[test]
    fn test_bytes_are_length_prefixed() {
        let mut buf = Vec::new();
        encode_bytes(&[0xaa; 200], &mut buf).unwrap();
        assert_eq!(buf[0], TAG_BYTES);
        assert_eq!(&buf[1..3], [0xc8, 0x01]); // compact 200
        assert_eq!(buf.len(), 3 + 200);
    }
}
