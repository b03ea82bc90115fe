//! Public pre-key records and their binary encodings.
//!
//! ```text
//! PublicPreKey        id:u32be | key:33
//! PublicSignedPreKey  id:u32be | key:33 | sig_len:u16be | signature:sig_len
//! ```

use serde::{Deserialize, Serialize};

use crate::error::KeyDecodeError;
use crate::keys::{PublicKey, SERIALIZED_PUBLIC_KEY_LEN, SIGNATURE_LEN};

/// Encoded length of a [`PublicPreKey`].
pub const PRE_KEY_RECORD_LEN: usize = 4 + SERIALIZED_PUBLIC_KEY_LEN;

/// A one-time pre-key as published: its id paired with its public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicPreKey {
    pub id: u32,
    pub key: PublicKey,
}

impl PublicPreKey {
    pub fn new(id: u32, key: PublicKey) -> Self {
        Self { id, key }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PRE_KEY_RECORD_LEN);
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.key.to_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyDecodeError> {
        if bytes.len() != PRE_KEY_RECORD_LEN {
            return Err(KeyDecodeError::BadLength {
                expected: PRE_KEY_RECORD_LEN,
                actual: bytes.len(),
            });
        }
        let mut reader = Reader::new(bytes);
        let id = reader.read_u32()?;
        let key = PublicKey::from_bytes(reader.take(SERIALIZED_PUBLIC_KEY_LEN)?)?;
        Ok(Self { id, key })
    }
}

/// A signed pre-key as published: id, public key and the identity key's
/// signature over the serialized public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicSignedPreKey {
    pub id: u32,
    pub key: PublicKey,
    pub signature: Vec<u8>,
}

impl PublicSignedPreKey {
    pub fn new(id: u32, key: PublicKey, signature: Vec<u8>) -> Self {
        Self { id, key, signature }
    }

    /// Encode the record. Fails if the signature is not [`SIGNATURE_LEN`]
    /// bytes, since [`from_bytes`](Self::from_bytes) would reject it.
    pub fn to_bytes(&self) -> Result<Vec<u8>, KeyDecodeError> {
        if self.signature.len() != SIGNATURE_LEN {
            return Err(KeyDecodeError::BadSignatureLength(self.signature.len()));
        }
        let sig_len = u16::try_from(self.signature.len())
            .map_err(|_| KeyDecodeError::BadSignatureLength(self.signature.len()))?;
        let mut out =
            Vec::with_capacity(4 + SERIALIZED_PUBLIC_KEY_LEN + 2 + self.signature.len());
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.key.to_bytes());
        out.extend_from_slice(&sig_len.to_be_bytes());
        out.extend_from_slice(&self.signature);
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyDecodeError> {
        let mut reader = Reader::new(bytes);
        let id = reader.read_u32()?;
        let key = PublicKey::from_bytes(reader.take(SERIALIZED_PUBLIC_KEY_LEN)?)?;

        let sig_len = usize::from(reader.read_u16()?);
        if sig_len != SIGNATURE_LEN {
            return Err(KeyDecodeError::BadSignatureLength(sig_len));
        }
        if reader.remaining() < sig_len {
            return Err(KeyDecodeError::TruncatedSignature {
                expected: sig_len,
                actual: reader.remaining(),
            });
        }
        let signature = reader.take(sig_len)?.to_vec();
        reader.finish()?;

        Ok(Self { id, key, signature })
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], KeyDecodeError> {
        if self.remaining() < n {
            return Err(KeyDecodeError::Truncated {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32, KeyDecodeError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn read_u16(&mut self) -> Result<u16, KeyDecodeError> {
        let mut buf = [0u8; 2];
        buf.copy_from_slice(self.take(2)?);
        Ok(u16::from_be_bytes(buf))
    }

    fn finish(self) -> Result<(), KeyDecodeError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(KeyDecodeError::TrailingBytes(n)),
        }
    }
}
