//! # Identity Module
//!
//! The outward face of the crate. A wallet identity is a P-256 key pair;
//! its address is a checksummed base58 string anyone can hold and validate
//! without ever seeing the private key.
//!
//! The identity stack is layered:
//!
//! 1. **Key pair**: raw P-256 key material ([`crate::crypto::keys`]).
//! 2. **Address**: version byte + `RIPEMD160(SHA256(pubkey))` + checksum,
//!    base58-encoded ([`address`]).
//! 3. **Wallet identity**: a key pair bound to a network profile
//!    ([`wallet`]).
//!
//! Most callers need only the three functions below.

pub mod address;
pub mod wallet;

pub use crate::crypto::keys::{KeyError, KeyPair, PublicKey};
pub use address::{encode_address, is_valid, is_valid_for_network, Address, AddressError};
pub use wallet::WalletIdentity;

/// Generate a new key pair from the OS cryptographic RNG.
///
/// A failure here means the platform could not supply randomness. Treat it
/// as fatal.
pub fn generate_keypair() -> Result<KeyPair, KeyError> {
    KeyPair::generate()
}

/// Derive the address string of a key pair under the given version byte.
///
/// Deterministic: the same key pair and version always give the same string.
///
/// ```
/// use wallet_address::identity::{derive_address, generate_keypair, is_valid_address};
///
/// let kp = generate_keypair().unwrap();
/// let address = derive_address(&kp, 0x00);
/// assert!(is_valid_address(&address));
/// ```
pub fn derive_address(keypair: &KeyPair, version: u8) -> String {
    let address = Address::from_public_key(&keypair.public_key(), version);
    tracing::debug!(version, %address, "derived address");
    address.encode()
}

/// Fail-closed address check. See [`address::is_valid`].
pub fn is_valid_address(address: &str) -> bool {
    is_valid(address)
}
