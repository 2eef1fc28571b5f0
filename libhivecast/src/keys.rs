//! Posting key handling
//!
//! WIF decoding, `STM...` public keys and canonical signing come from
//! `hive_rs::crypto`. [`PrivateKey`] wraps that key so the secret never shows
//! up in `Debug` output and decoding errors land in [`KeyError`].

use crate::error::KeyError;

pub use hive_rs::crypto::PublicKey;

/// A secp256k1 posting key
#[derive(Clone)]
pub struct PrivateKey {
    inner: hive_rs::crypto::PrivateKey,
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key().to_string())
            .finish()
    }
}

impl PrivateKey {
    /// Decode a WIF-encoded private key, ignoring surrounding whitespace
    pub fn from_wif(wif: &str) -> Result<Self, KeyError> {
        let inner = hive_rs::crypto::PrivateKey::from_wif(wif.trim())
            .map_err(|e| KeyError::InvalidWif(describe(e)))?;
        Ok(Self { inner })
    }

    /// Build a key from a raw 32-byte secret scalar
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let secret: [u8; 32] = bytes.try_into().map_err(|_| {
            KeyError::InvalidWif(format!("expected 32 secret bytes, got {}", bytes.len()))
        })?;
        let inner = hive_rs::crypto::PrivateKey::from_bytes(secret)
            .map_err(|e| KeyError::InvalidWif(describe(e)))?;
        Ok(Self { inner })
    }

    pub fn to_wif(&self) -> String {
        self.inner.to_wif()
    }

    pub fn public_key(&self) -> PublicKey {
        self.inner.public_key()
    }

    /// The key as the Hive client expects it for signing
    pub fn as_hive(&self) -> &hive_rs::crypto::PrivateKey {
        &self.inner
    }
}

/// Strip the client's "Invalid key: " prefix; [`KeyError`] adds its own
fn describe(error: hive_rs::HiveError) -> String {
    match error {
        hive_rs::HiveError::InvalidKey(msg) => msg,
        other => other.to_string(),
    }
}
