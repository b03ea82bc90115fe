use std::fmt;

use thiserror::Error;

/// Why a byte buffer did not decode into a key or key record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyDecodeError {
    #[error("bad length: expected {expected} bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },

    #[error("unknown key type marker: {0:#04x}")]
    BadKeyType(u8),

    #[error("truncated record: needed {needed} more bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("signature length {0} is not supported")]
    BadSignatureLength(usize),

    #[error("truncated signature: expected {expected} bytes, got {actual}")]
    TruncatedSignature { expected: usize, actual: usize },

    #[error("{0} unexpected trailing bytes")]
    TrailingBytes(usize),
}

/// Which part of a bundle a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleField {
    PreKey,
    SignedPreKey,
    IdentityKey,
}

impl fmt::Display for BundleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PreKey => "one-time pre-key",
            Self::SignedPreKey => "signed pre-key",
            Self::IdentityKey => "identity key",
        })
    }
}

/// Signature check failures reported by a [`SignatureVerifier`](crate::verify::SignatureVerifier).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("invalid identity key: {0}")]
    InvalidIdentityKey(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("signature mismatch: {0}")]
    Mismatch(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
    #[error("failed to decode {field}: {source}")]
    Decode {
        field: BundleField,
        #[source]
        source: KeyDecodeError,
    },

    #[error("failed to encode {field}: {source}")]
    Encode {
        field: BundleField,
        #[source]
        source: KeyDecodeError,
    },

    #[error("signed pre-key signature rejected: {0}")]
    InvalidSignature(#[from] VerifyError),
}

impl BundleError {
    pub(crate) fn decode(field: BundleField) -> impl FnOnce(KeyDecodeError) -> Self {
        move |source| Self::Decode { field, source }
    }

    /// The bundle field that failed to decode or encode.
    pub fn field(&self) -> Option<BundleField> {
        match self {
            Self::Decode { field, .. } | Self::Encode { field, .. } => Some(*field),
            Self::InvalidSignature(_) => None,
        }
    }
}

impl From<(BundleField, KeyDecodeError)> for BundleError {
    fn from((field, source): (BundleField, KeyDecodeError)) -> Self {
        Self::Decode { field, source }
    }
}
