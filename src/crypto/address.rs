//! TRON address representation and utilities.

use std::fmt;

use secp256k1::PublicKey;
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

/// Version byte prepended to the account hash on TRON mainnet.
pub const ADDRESS_VERSION: u8 = 0x41;

/// Length of the binary address (version byte + 20-byte account hash).
const BINARY_LEN: usize = 21;

/// Length of the base58check checksum.
const CHECKSUM_LEN: usize = 4;

/// Errors returned when parsing a textual address.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("not valid base58: {0}")]
    Base58(String),

    #[error("decoded address is {0} bytes, expected 25")]
    Length(usize),

    #[error("unexpected version byte 0x{0:02x}")]
    Version(u8),

    #[error("checksum mismatch")]
    Checksum,
}

/// A TRON address: the 21-byte binary form and its base58check text.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: [u8; BINARY_LEN],
    text: String,
}

impl Address {
    /// Derives an address from a secp256k1 public key.
    ///
    /// Process:
    /// 1. Serialize the public key in uncompressed form (65 bytes)
    /// 2. Keccak-256 the 64 coordinate bytes (the 0x04 tag is skipped)
    /// 3. Take the last 20 bytes of the hash and prepend `0x41`
    /// 4. Append the first 4 bytes of SHA-256(SHA-256(binary)) and base58 it
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let public_key_bytes = public_key.serialize_uncompressed();

        let mut hasher = Keccak::v256();
        hasher.update(&public_key_bytes[1..]);
        let mut hash = [0u8; 32];
        hasher.finalize(&mut hash);

        let mut bytes = [0u8; BINARY_LEN];
        bytes[0] = ADDRESS_VERSION;
        bytes[1..].copy_from_slice(&hash[12..]);

        Self::from_bytes(bytes)
    }

    /// Creates an address from its 21-byte binary form.
    pub fn from_bytes(bytes: [u8; BINARY_LEN]) -> Self {
        let mut payload = [0u8; BINARY_LEN + CHECKSUM_LEN];
        payload[..BINARY_LEN].copy_from_slice(&bytes);
        payload[BINARY_LEN..].copy_from_slice(&checksum(&bytes));

        Self {
            bytes,
            text: bs58::encode(payload).into_string(),
        }
    }

    /// Parses and validates a base58check address such as `T...`.
    pub fn from_base58(text: &str) -> Result<Self, AddressError> {
        let decoded = bs58::decode(text)
            .into_vec()
            .map_err(|e| AddressError::Base58(e.to_string()))?;

        if decoded.len() != BINARY_LEN + CHECKSUM_LEN {
            return Err(AddressError::Length(decoded.len()));
        }
        if decoded[0] != ADDRESS_VERSION {
            return Err(AddressError::Version(decoded[0]));
        }

        let (body, check) = decoded.split_at(BINARY_LEN);
        if checksum(body).as_slice() != check {
            return Err(AddressError::Checksum);
        }

        let mut bytes = [0u8; BINARY_LEN];
        bytes.copy_from_slice(body);
        Ok(Self {
            bytes,
            text: text.to_owned(),
        })
    }

    /// Returns the binary address (version byte + account hash).
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; BINARY_LEN] {
        &self.bytes
    }

    /// Returns the base58check text form.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the binary address as lowercase hex (`41...`).
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

/// First four bytes of a double SHA-256.
fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(Sha256::digest(data));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.text)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
