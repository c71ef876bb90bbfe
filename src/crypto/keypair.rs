//! secp256k1 keypair generation.

use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{PublicKey, Secp256k1, SecretKey, SignOnly};

use super::Address;

/// Errors that can occur while producing a keypair.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("failed to read OS entropy: {0}")]
    Entropy(#[from] rand::Error),

    #[error("invalid secret key: {0}")]
    InvalidKey(#[from] secp256k1::Error),
}

/// A TRON keypair (private key + derived address).
#[derive(Debug, Clone)]
pub struct Keypair {
    /// The private key bytes (32 bytes)
    secret_key: [u8; 32],
    /// The uncompressed public key point
    public_key: PublicKey,
    /// The derived TRON address
    address: Address,
}

impl Keypair {
    /// Generates a new random keypair from OS entropy.
    ///
    /// Candidate scalars outside `[1, n)` are rejected by the curve library
    /// and redrawn. An entropy failure is returned rather than retried.
    pub fn generate(secp: &Secp256k1<SignOnly>) -> Result<Self, KeyError> {
        let mut candidate = [0u8; 32];
        loop {
            OsRng.try_fill_bytes(&mut candidate)?;
            if let Ok(secret_key) = SecretKey::from_slice(&candidate) {
                return Ok(Self::from_secret_key(secp, secret_key));
            }
        }
    }

    /// Builds a keypair from existing secret key bytes.
    pub fn from_secret_bytes(secret_bytes: [u8; 32]) -> Result<Self, KeyError> {
        let secp = Secp256k1::signing_only();
        let secret_key = SecretKey::from_slice(&secret_bytes)?;
        Ok(Self::from_secret_key(&secp, secret_key))
    }

    fn from_secret_key(secp: &Secp256k1<SignOnly>, secret_key: SecretKey) -> Self {
        let public_key = PublicKey::from_secret_key(secp, &secret_key);
        Self {
            secret_key: secret_key.secret_bytes(),
            address: Address::from_public_key(&public_key),
            public_key,
        }
    }

    /// Returns the private key as a hex string (without 0x prefix).
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key)
    }

    /// Returns the private key bytes.
    pub fn private_key_bytes(&self) -> &[u8; 32] {
        &self.secret_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Returns a reference to the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}
