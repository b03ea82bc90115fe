use crate::error::KeyDecodeError;
use crate::keys::PublicKey;
use crate::records::{PublicPreKey, PublicSignedPreKey};

/// Turns raw byte buffers into typed key material.
///
/// Bundle assembly from bytes goes through this trait so callers can swap in
/// a different wire format, or a test double that fails on demand.
pub trait KeyDecoder: Send + Sync {
    /// Decode a standalone public key, such as the identity key.
    fn decode_public_key(&self, bytes: &[u8]) -> Result<PublicKey, KeyDecodeError>;

    /// Decode a one-time pre-key record (id + key).
    fn decode_pre_key(&self, bytes: &[u8]) -> Result<PublicPreKey, KeyDecodeError>;

    /// Decode a signed pre-key record (id + key + signature).
    fn decode_signed_pre_key(&self, bytes: &[u8]) -> Result<PublicSignedPreKey, KeyDecodeError>;
}

/// Decoder for the binary record formats in [`crate::records`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WireKeyDecoder;

impl KeyDecoder for WireKeyDecoder {
    fn decode_public_key(&self, bytes: &[u8]) -> Result<PublicKey, KeyDecodeError> {
        PublicKey::from_bytes(bytes)
    }

    fn decode_pre_key(&self, bytes: &[u8]) -> Result<PublicPreKey, KeyDecodeError> {
        PublicPreKey::from_bytes(bytes)
    }

    fn decode_signed_pre_key(&self, bytes: &[u8]) -> Result<PublicSignedPreKey, KeyDecodeError> {
        PublicSignedPreKey::from_bytes(bytes)
    }
}
