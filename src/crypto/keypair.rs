//! Ethereum keypair derivation.

use std::fmt;

use secp256k1::{PublicKey, Secp256k1, SecretKey, Signing};
use tiny_keccak::{Hasher, Keccak};

use super::Address;

/// An Ethereum keypair (private key + derived address).
#[derive(Clone)]
pub struct Keypair {
    /// The private key bytes (32 bytes)
    secret_key: [u8; 32],
    /// The derived Ethereum address
    address: Address,
}

impl Keypair {
    /// Builds a keypair from raw secret key bytes.
    ///
    /// Fails if the bytes are zero or not below the secp256k1 curve order.
    pub fn from_secret_key<C: Signing>(
        secp: &Secp256k1<C>,
        secret_bytes: [u8; 32],
    ) -> Result<Self, secp256k1::Error> {
        let secret_key = SecretKey::from_slice(&secret_bytes)?;
        let public_key = PublicKey::from_secret_key(secp, &secret_key);

        Ok(Self {
            secret_key: secret_bytes,
            address: derive_address(&public_key),
        })
    }

    /// Returns the private key as a hex string (without 0x prefix).
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key)
    }

    /// Returns the private key as a hex string with 0x prefix.
    pub fn private_key_hex_prefixed(&self) -> String {
        format!("0x{}", self.private_key_hex())
    }

    /// Returns the private key bytes.
    pub fn private_key_bytes(&self) -> &[u8; 32] {
        &self.secret_key
    }

    /// Returns a reference to the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Derives an Ethereum address from a secp256k1 public key.
///
/// Process:
/// 1. Serialize the public key in uncompressed form (65 bytes)
/// 2. Remove the first byte (0x04 prefix)
/// 3. Hash the remaining 64 bytes with Keccak-256
/// 4. Take the last 20 bytes of the hash
#[inline]
fn derive_address(public_key: &PublicKey) -> Address {
    let public_key_bytes = public_key.serialize_uncompressed();

    let mut hasher = Keccak::v256();
    hasher.update(&public_key_bytes[1..]);

    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);

    let mut address_bytes = [0u8; 20];
    address_bytes.copy_from_slice(&hash[12..]);

    Address::from_bytes(address_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret_from_u8(last: u8) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[31] = last;
        bytes
    }

    #[test]
    fn test_known_addresses() {
        let secp = Secp256k1::signing_only();

        let one = Keypair::from_secret_key(&secp, secret_from_u8(1)).unwrap();
        assert_eq!(
            one.address().to_hex(),
            "7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );

        let two = Keypair::from_secret_key(&secp, secret_from_u8(2)).unwrap();
        assert_eq!(
            two.address().to_hex(),
            "2b5ad5c4795c026514f8317c7a215e218dccd6cf"
        );
    }

    #[test]
    fn test_private_key_hex() {
        let secp = Secp256k1::signing_only();
        let keypair = Keypair::from_secret_key(&secp, secret_from_u8(1)).unwrap();

        let hex = keypair.private_key_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.ends_with("01"));
        assert_eq!(keypair.private_key_hex_prefixed(), format!("0x{}", hex));
    }

    #[test]
    fn test_rejects_zero_and_out_of_range() {
        let secp = Secp256k1::signing_only();
        assert!(Keypair::from_secret_key(&secp, [0u8; 32]).is_err());
        assert!(Keypair::from_secret_key(&secp, [0xff; 32]).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let secp = Secp256k1::signing_only();
        let keypair = Keypair::from_secret_key(&secp, secret_from_u8(1)).unwrap();
        let debug = format!("{:?}", keypair);
        assert!(debug.contains("7e5f4552091a69125d5dfcb7b8c2659029395bdf"));
        assert!(!debug.contains(&keypair.private_key_hex()));
    }
}
