use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::error::VerifyError;
use crate::keys::PublicKey;

/// Checks a signature made by an identity key.
pub trait SignatureVerifier: Send + Sync {
    fn verify(
        &self,
        identity_key: &PublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), VerifyError>;
}

/// Treats the identity key as an Ed25519 verifying key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        identity_key: &PublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), VerifyError> {
        let verifying_key = VerifyingKey::from_bytes(identity_key.as_bytes())
            .map_err(|e| VerifyError::InvalidIdentityKey(e.to_string()))?;
        let signature = Signature::from_slice(signature)
            .map_err(|e| VerifyError::MalformedSignature(e.to_string()))?;
        verifying_key
            .verify(message, &signature)
            .map_err(|e| VerifyError::Mismatch(e.to_string()))
    }
}
