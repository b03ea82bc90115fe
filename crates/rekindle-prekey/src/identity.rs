use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use zeroize::ZeroizeOnDrop;

use crate::keys::PublicKey;

/// The local party's long-term Ed25519 identity key pair.
///
/// Its public half is the `identity_key` of every bundle we publish, and it
/// signs each signed pre-key.
#[derive(ZeroizeOnDrop)]
pub struct IdentityKeyPair {
    signing_key: SigningKey,
}

impl IdentityKeyPair {
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Restore from a 32-byte secret key.
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(bytes),
        }
    }

    /// The Ed25519 verifying key, in the same `0x05`-marked form as pre-keys.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from(self.signing_key.verifying_key())
    }

    /// # Security
    /// Private key material. Only hand this to a keystore.
    pub fn secret_key_bytes(&self) -> &[u8; 32] {
        self.signing_key.as_bytes()
    }

    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_bytes().to_vec()
    }
}

impl std::fmt::Debug for IdentityKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityKeyPair")
            .field("public_key", &self.public_key().to_hex())
            .finish()
    }
}
