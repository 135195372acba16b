//! Cryptographic operations for Ethereum key and address generation.
//!
//! This module provides:
//! - Secure random key generation using secp256k1
//! - Ethereum address derivation using Keccak-256
//! - The `KeySource` seam the exporter draws keypairs from

mod address;
mod keypair;
mod source;

pub use address::{Address, AddressStyle};
pub use keypair::Keypair;
pub use source::{KeyGenError, KeySource, RngKeySource};
