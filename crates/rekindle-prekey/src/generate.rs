//! Local pre-key generation for the bundles we publish.
//!
//! Secrets stay here; only the public records go into a [`PreKeyBundle`].

use rand::rngs::OsRng;
use x25519_dalek::{PublicKey as X25519Public, StaticSecret};

use crate::bundle::PreKeyBundle;
use crate::identity::IdentityKeyPair;
use crate::keys::PublicKey;
use crate::records::{PublicPreKey, PublicSignedPreKey};

/// A one-time pre-key with its X25519 secret.
pub struct LocalPreKey {
    id: u32,
    secret: StaticSecret,
}

impl LocalPreKey {
    pub fn generate(id: u32) -> Self {
        Self {
            id,
            secret: StaticSecret::random_from_rng(OsRng),
        }
    }

    /// Generate `count` keys with consecutive ids starting at `start_id`.
    /// Ids wrap around at `u32::MAX`.
    pub fn generate_batch(start_id: u32, count: u32) -> Vec<Self> {
        (0..count)
            .map(|offset| Self::generate(start_id.wrapping_add(offset)))
            .collect()
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// # Security
    /// Private key material.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret.to_bytes()
    }

    pub fn public(&self) -> PublicPreKey {
        PublicPreKey::new(self.id, X25519Public::from(&self.secret).into())
    }
}

/// A signed pre-key: X25519 secret plus the identity signature over its
/// serialized public key.
pub struct LocalSignedPreKey {
    id: u32,
    secret: StaticSecret,
    signature: Vec<u8>,
}

impl LocalSignedPreKey {
    pub fn generate(id: u32, identity: &IdentityKeyPair) -> Self {
        let secret = StaticSecret::random_from_rng(OsRng);
        let public = PublicKey::from(X25519Public::from(&secret));
        let signature = identity.sign(&public.to_bytes());
        Self {
            id,
            secret,
            signature,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// # Security
    /// Private key material.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret.to_bytes()
    }

    pub fn public(&self) -> PublicSignedPreKey {
        PublicSignedPreKey::new(
            self.id,
            X25519Public::from(&self.secret).into(),
            self.signature.clone(),
        )
    }
}

impl PreKeyBundle {
    /// Build the bundle we publish for others to start sessions with us.
    pub fn publish(
        registration_id: u32,
        identity: &IdentityKeyPair,
        signed_pre_key: &LocalSignedPreKey,
        pre_key: Option<&LocalPreKey>,
    ) -> Self {
        tracing::debug!(
            registration_id,
            signed_pre_key_id = signed_pre_key.id(),
            pre_key_id = pre_key.map(LocalPreKey::id),
            "publishing pre-key bundle"
        );
        Self::from_records(
            registration_id,
            pre_key.map(LocalPreKey::public),
            signed_pre_key.public(),
            identity.public_key(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::Ed25519Verifier;

    #[test]
    fn batch_ids_are_consecutive_and_wrap() {
        let batch = LocalPreKey::generate_batch(u32::MAX - 1, 3);
        let ids: Vec<u32> = batch.iter().map(LocalPreKey::id).collect();
        assert_eq!(ids, vec![u32::MAX - 1, u32::MAX, 0]);
    }

    #[test]
    fn batch_keys_are_distinct() {
        let batch = LocalPreKey::generate_batch(1, 4);
        for (i, a) in batch.iter().enumerate() {
            for b in &batch[i + 1..] {
                assert_ne!(a.public().key, b.public().key);
            }
        }
    }

    #[test]
    fn public_matches_secret() {
        let pre_key = LocalPreKey::generate(5);
        let derived = X25519Public::from(&StaticSecret::from(pre_key.secret_bytes()));
        assert_eq!(pre_key.public().key.as_bytes(), derived.as_bytes());
    }

    #[test]
    fn published_bundle_verifies() {
        let identity = IdentityKeyPair::generate();
        let signed = LocalSignedPreKey::generate(3, &identity);
        let one_time = LocalPreKey::generate(11);

        let bundle = PreKeyBundle::publish(4242, &identity, &signed, Some(&one_time));
        assert_eq!(bundle.registration_id(), 4242);
        assert_eq!(bundle.signed_pre_key_id(), 3);
        assert_eq!(bundle.pre_key_id(), Some(11));
        assert_eq!(bundle.identity_key(), &identity.public_key());
        assert!(bundle.verify_signature(&Ed25519Verifier).is_ok());
    }

    #[test]
    fn published_without_one_time_key() {
        let identity = IdentityKeyPair::generate();
        let signed = LocalSignedPreKey::generate(3, &identity);

        let bundle = PreKeyBundle::publish(1, &identity, &signed, None);
        assert!(bundle.pre_key().is_none());
        assert!(bundle.verify_signature(&Ed25519Verifier).is_ok());
    }
}
