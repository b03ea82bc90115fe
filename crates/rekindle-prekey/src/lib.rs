pub mod bundle;
pub mod decoder;
pub mod error;
pub mod generate;
pub mod identity;
pub mod keys;
pub mod records;
pub mod verify;
#[cfg(test)]
mod test_support;

pub use bundle::{BundleParts, PreKeyBundle};
pub use decoder::{KeyDecoder, WireKeyDecoder};
pub use error::{BundleError, BundleField, KeyDecodeError, VerifyError};
pub use generate::{LocalPreKey, LocalSignedPreKey};
pub use identity::IdentityKeyPair;
pub use keys::PublicKey;
pub use records::{PublicPreKey, PublicSignedPreKey};
pub use verify::{Ed25519Verifier, SignatureVerifier};
