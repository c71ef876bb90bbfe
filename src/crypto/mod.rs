//! Cryptographic operations for TRON key and address generation.
//!
//! This module provides:
//! - Secure random key generation using secp256k1
//! - TRON address derivation (Keccak-256 account hash, base58check text)
//! - Keypair management

mod address;
mod keypair;

pub use address::{Address, AddressError, ADDRESS_VERSION};
pub use keypair::{KeyError, Keypair};
