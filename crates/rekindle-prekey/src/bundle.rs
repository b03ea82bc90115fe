//! `PreKeyBundle` assembly.
//!
//! A bundle is either assembled from typed keys we already hold, or
//! materialized from the three byte buffers a peer published. Assembly from
//! bytes is all-or-nothing: the first buffer that fails to decode aborts the
//! whole bundle.

use serde::{Deserialize, Serialize};

use crate::decoder::{KeyDecoder, WireKeyDecoder};
use crate::error::{BundleError, BundleField};
use crate::keys::PublicKey;
use crate::records::{PublicPreKey, PublicSignedPreKey};
use crate::verify::SignatureVerifier;

/// The public keys a peer needs to start an X3DH session with us offline.
///
/// Immutable once built. The one-time pre-key id and key are stored as one
/// optional pair, so an id without its key is never observable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreKeyBundle {
    registration_id: u32,
    pre_key: Option<PublicPreKey>,
    signed_pre_key_id: u32,
    signed_pre_key_public: PublicKey,
    signed_pre_key_signature: Vec<u8>,
    identity_key: PublicKey,
}

/// A bundle split into the byte buffers accepted by [`PreKeyBundle::from_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleParts {
    /// Registration id of the publishing party.
    pub registration_id: u32,
    /// Encoded [`PublicPreKey`], absent once one-time keys are exhausted.
    pub pre_key: Option<Vec<u8>>,
    /// Encoded [`PublicSignedPreKey`].
    pub signed_pre_key: Vec<u8>,
    /// Serialized identity [`PublicKey`].
    pub identity_key: Vec<u8>,
}

impl PreKeyBundle {
    /// Assemble a bundle from its flat components.
    ///
    /// `pre_key_id` is only kept when `pre_key_public` is present; without a
    /// one-time key there is nothing for the id to refer to.
    pub fn new(
        registration_id: u32,
        pre_key_id: u32,
        pre_key_public: Option<PublicKey>,
        signed_pre_key_id: u32,
        signed_pre_key_public: PublicKey,
        signed_pre_key_signature: Vec<u8>,
        identity_key: PublicKey,
    ) -> Self {
        Self {
            registration_id,
            pre_key: pre_key_public.map(|key| PublicPreKey::new(pre_key_id, key)),
            signed_pre_key_id,
            signed_pre_key_public,
            signed_pre_key_signature,
            identity_key,
        }
    }

    /// Assemble a bundle from a one-time pre-key record and a signed pre-key record.
    pub fn from_records(
        registration_id: u32,
        pre_key: Option<PublicPreKey>,
        signed_pre_key: PublicSignedPreKey,
        identity_key: PublicKey,
    ) -> Self {
        Self {
            registration_id,
            pre_key,
            signed_pre_key_id: signed_pre_key.id,
            signed_pre_key_public: signed_pre_key.key,
            signed_pre_key_signature: signed_pre_key.signature,
            identity_key,
        }
    }

    /// Materialize a bundle from published byte buffers using the default
    /// wire decoder.
    ///
    /// `device_id` identifies the peer device the bundle came from; it is
    /// logged but not part of the bundle.
    pub fn from_bytes(
        registration_id: u32,
        device_id: u32,
        pre_key: Option<&[u8]>,
        signed_pre_key: &[u8],
        identity_key: &[u8],
    ) -> Result<Self, BundleError> {
        Self::from_bytes_with(
            &WireKeyDecoder,
            registration_id,
            device_id,
            pre_key,
            signed_pre_key,
            identity_key,
        )
    }

    /// Like [`from_bytes`](Self::from_bytes), decoding through `decoder`.
    pub fn from_bytes_with<D: KeyDecoder + ?Sized>(
        decoder: &D,
        registration_id: u32,
        device_id: u32,
        pre_key: Option<&[u8]>,
        signed_pre_key: &[u8],
        identity_key: &[u8],
    ) -> Result<Self, BundleError> {
        let decoded = decode_parts(decoder, pre_key, signed_pre_key, identity_key);
        let (pre_key, signed_pre_key, identity_key) = match decoded {
            Ok(parts) => parts,
            Err(e) => {
                tracing::warn!(
                    registration_id,
                    device_id,
                    field = ?e.field(),
                    error = %e,
                    "rejecting pre-key bundle"
                );
                return Err(e);
            }
        };

        tracing::debug!(
            registration_id,
            device_id,
            signed_pre_key_id = signed_pre_key.id,
            has_one_time_key = pre_key.is_some(),
            "pre-key bundle decoded"
        );

        Ok(Self::from_records(
            registration_id,
            pre_key,
            signed_pre_key,
            identity_key,
        ))
    }

    /// Split the bundle into the byte buffers [`from_bytes`](Self::from_bytes) accepts.
    ///
    /// Fails when the signature is not a 64-byte Ed25519 signature: `new`
    /// stores any bytes, but the wire form only carries full signatures.
    pub fn to_parts(&self) -> Result<BundleParts, BundleError> {
        let signed_pre_key = self
            .signed_pre_key()
            .to_bytes()
            .map_err(|source| BundleError::Encode {
                field: BundleField::SignedPreKey,
                source,
            })?;
        Ok(BundleParts {
            registration_id: self.registration_id,
            pre_key: self.pre_key.as_ref().map(PublicPreKey::to_bytes),
            signed_pre_key,
            identity_key: self.identity_key.to_bytes().to_vec(),
        })
    }

    /// A copy of this bundle with the one-time pre-key removed.
    pub fn without_pre_key(&self) -> Self {
        Self {
            pre_key: None,
            ..self.clone()
        }
    }

    /// Check the signed pre-key signature against the identity key.
    ///
    /// The signed message is the serialized signed pre-key public key.
    pub fn verify_signature<V: SignatureVerifier + ?Sized>(
        &self,
        verifier: &V,
    ) -> Result<(), BundleError> {
        verifier.verify(
            &self.identity_key,
            &self.signed_pre_key_public.to_bytes(),
            &self.signed_pre_key_signature,
        )?;
        Ok(())
    }

    /// Registration id of the account that owns the bundle.
    pub fn registration_id(&self) -> u32 {
        self.registration_id
    }

    /// The one-time pre-key, if the bundle still carries one.
    pub fn pre_key(&self) -> Option<&PublicPreKey> {
        self.pre_key.as_ref()
    }

    /// Id of the one-time pre-key. `None` whenever the key itself is absent.
    pub fn pre_key_id(&self) -> Option<u32> {
        self.pre_key.map(|pk| pk.id)
    }

    /// Public half of the one-time pre-key.
    pub fn pre_key_public(&self) -> Option<&PublicKey> {
        self.pre_key.as_ref().map(|pk| &pk.key)
    }

    /// Id of the signed pre-key.
    pub fn signed_pre_key_id(&self) -> u32 {
        self.signed_pre_key_id
    }

    /// Public half of the signed pre-key.
    pub fn signed_pre_key_public(&self) -> &PublicKey {
        &self.signed_pre_key_public
    }

    /// Identity key signature over the serialized signed pre-key.
    pub fn signed_pre_key_signature(&self) -> &[u8] {
        &self.signed_pre_key_signature
    }

    /// The signed pre-key fields as one record.
    pub fn signed_pre_key(&self) -> PublicSignedPreKey {
        PublicSignedPreKey::new(
            self.signed_pre_key_id,
            self.signed_pre_key_public,
            self.signed_pre_key_signature.clone(),
        )
    }

    /// Long-term identity key of the owner.
    pub fn identity_key(&self) -> &PublicKey {
        &self.identity_key
    }
}

type DecodedParts = (Option<PublicPreKey>, PublicSignedPreKey, PublicKey);

fn decode_parts<D: KeyDecoder + ?Sized>(
    decoder: &D,
    pre_key: Option<&[u8]>,
    signed_pre_key: &[u8],
    identity_key: &[u8],
) -> Result<DecodedParts, BundleError> {
    let identity_key = decoder
        .decode_public_key(identity_key)
        .map_err(BundleError::decode(BundleField::IdentityKey))?;
    let signed_pre_key = decoder
        .decode_signed_pre_key(signed_pre_key)
        .map_err(BundleError::decode(BundleField::SignedPreKey))?;
    let pre_key = pre_key
        .map(|bytes| decoder.decode_pre_key(bytes))
        .transpose()
        .map_err(BundleError::decode(BundleField::PreKey))?;
    Ok((pre_key, signed_pre_key, identity_key))
}
