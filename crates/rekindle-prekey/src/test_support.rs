use crate::decoder::{KeyDecoder, WireKeyDecoder};
use crate::error::{BundleField, KeyDecodeError};
use crate::keys::PublicKey;
use crate::records::{PublicPreKey, PublicSignedPreKey};

/// Decoder that fails with a fixed error on one field and delegates the
/// others to [`WireKeyDecoder`].
pub struct FailingDecoder {
    field: BundleField,
    error: KeyDecodeError,
}

impl FailingDecoder {
    pub fn new(field: BundleField, error: KeyDecodeError) -> Self {
        Self { field, error }
    }

    fn fail_on(&self, field: BundleField) -> Result<(), KeyDecodeError> {
        if self.field == field {
            Err(self.error.clone())
        } else {
            Ok(())
        }
    }
}

impl KeyDecoder for FailingDecoder {
    fn decode_public_key(&self, bytes: &[u8]) -> Result<PublicKey, KeyDecodeError> {
        self.fail_on(BundleField::IdentityKey)?;
        WireKeyDecoder.decode_public_key(bytes)
    }

    fn decode_pre_key(&self, bytes: &[u8]) -> Result<PublicPreKey, KeyDecodeError> {
        self.fail_on(BundleField::PreKey)?;
        WireKeyDecoder.decode_pre_key(bytes)
    }

    fn decode_signed_pre_key(&self, bytes: &[u8]) -> Result<PublicSignedPreKey, KeyDecodeError> {
        self.fail_on(BundleField::SignedPreKey)?;
        WireKeyDecoder.decode_signed_pre_key(bytes)
    }
}
