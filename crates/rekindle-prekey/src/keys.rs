use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::KeyDecodeError;

/// Type marker prefixed to every serialized public key.
///
/// Covers both X25519 pre-keys and the Ed25519 identity key: they share the
/// Curve25519 field and the 32-byte length, and which algorithm applies is
/// fixed by the bundle slot the key sits in.
pub const KEY_TYPE_DJB: u8 = 0x05;
/// Raw public key length.
pub const PUBLIC_KEY_LEN: usize = 32;
/// Public key length on the wire: marker + key bytes.
pub const SERIALIZED_PUBLIC_KEY_LEN: usize = PUBLIC_KEY_LEN + 1;
/// Ed25519 signature length.
pub const SIGNATURE_LEN: usize = 64;

/// A 32-byte public key.
///
/// Holding a `PublicKey` means the bytes already passed structural decoding,
/// so bundle assembly never re-checks key well-formedness.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    pub fn from_raw(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode the serialized form (`0x05 || key`).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyDecodeError> {
        if bytes.len() != SERIALIZED_PUBLIC_KEY_LEN {
            return Err(KeyDecodeError::BadLength {
                expected: SERIALIZED_PUBLIC_KEY_LEN,
                actual: bytes.len(),
            });
        }
        if bytes[0] != KEY_TYPE_DJB {
            return Err(KeyDecodeError::BadKeyType(bytes[0]));
        }
        let mut key = [0u8; PUBLIC_KEY_LEN];
        key.copy_from_slice(&bytes[1..]);
        Ok(Self(key))
    }

    pub fn to_bytes(&self) -> [u8; SERIALIZED_PUBLIC_KEY_LEN] {
        let mut out = [0u8; SERIALIZED_PUBLIC_KEY_LEN];
        out[0] = KEY_TYPE_DJB;
        out[1..].copy_from_slice(&self.0);
        out
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl From<x25519_dalek::PublicKey> for PublicKey {
    fn from(key: x25519_dalek::PublicKey) -> Self {
        Self(key.to_bytes())
    }
}

impl From<ed25519_dalek::VerifyingKey> for PublicKey {
    fn from(key: ed25519_dalek::VerifyingKey) -> Self {
        Self(key.to_bytes())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&hex::encode(self.0)).finish()
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let bytes = hex::decode(&encoded).map_err(serde::de::Error::custom)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}
