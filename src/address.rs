//! Canonical account address type.
//!
//! # Definition
//! An address is **exactly 20 bytes**, the account identifier on the chain
//! the reward ledger and name registry live on.
//!
//! # Encodings
//! * Internally: raw 20 bytes.
//! * At API boundaries: 0x-prefixed lowercase hex (40 nibbles). Parsing
//!   accepts upper/lower case with or without the `0x` prefix and rejects
//!   every other length.
//! * serde uses the hex form, since every wire surface this crate talks to
//!   (registry RPC, social graph, ledger) exchanges addresses as strings.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Construct from a 20-byte array (canonical form).
    #[inline]
    pub fn from_bytes(b: [u8; 20]) -> Self {
        Address(b)
    }

    /// Borrow the underlying 20-byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Canonical textual form: `0x` + 40 lowercase nibbles.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl AsRef<[u8]> for Address {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("expected 40 hex nibbles, got {0}")]
    BadLength(usize),
    #[error("non-hex character in address")]
    BadDigit,
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let h = s
            .trim()
            .strip_prefix("0x")
            .or_else(|| s.trim().strip_prefix("0X"))
            .unwrap_or_else(|| s.trim());
        if h.len() != 40 {
            return Err(AddressParseError::BadLength(h.len()));
        }
        let bytes = hex::decode(h).map_err(|_| AddressParseError::BadDigit)?;
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Address(arr))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_hex() {
        let a: Address = "0x00000000000000000000000000000000000000ab"
            .parse()
            .unwrap();
        assert_eq!(a.as_bytes()[19], 0xab);
    }

    #[test]
    fn accepts_unprefixed_and_uppercase() {
        let a: Address = "00000000000000000000000000000000000000AB"
            .parse()
            .unwrap();
        assert_eq!(a.as_bytes()[19], 0xab);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            "0xabcd".parse::<Address>(),
            Err(AddressParseError::BadLength(4))
        );
    }

    #[test]
    fn rejects_non_hex() {
        assert_eq!(
            "0x00000000000000000000000000000000000000zz".parse::<Address>(),
            Err(AddressParseError::BadDigit)
        );
    }

    #[test]
    fn display_roundtrips() {
        let a = Address::from_bytes([0x11; 20]);
        let back: Address = a.to_hex().parse().unwrap();
        assert_eq!(a, back);
    }

    #[test]
    fn serde_uses_hex_string() {
        let a = Address::from_bytes([0x22; 20]);
        let j = serde_json::to_string(&a).unwrap();
        assert_eq!(j, format!("\"{}\"", a.to_hex()));
        let back: Address = serde_json::from_str(&j).unwrap();
        assert_eq!(a, back);
    }
}
