//! # Hashing Utilities
//!
//! The digest pipeline behind every address. Two primitives, composed two
//! ways:
//!
//! ```text
//! identity hash = RIPEMD-160(SHA-256(public_key))       -> 20 bytes
//! checksum      = SHA-256(SHA-256(payload))[..4]        ->  4 bytes
//! ```
//!
//! Both compositions are part of the address format. Replacing either with
//! a single pass of anything produces addresses nobody else can validate,
//! and the double SHA-256 is what keeps the checksum immune to length
//! extension on the payload.
//!
//! None of these functions can fail: hashes accept any byte string.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::config::{CHECKSUM_LENGTH, IDENTITY_HASH_LENGTH};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use wallet_address::crypto::sha256;
///
/// let hash = sha256(b"wallet");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the double-SHA-256 hash: `SHA-256(SHA-256(data))`.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute the RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; IDENTITY_HASH_LENGTH] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// `RIPEMD-160(SHA-256(data))`, the 20-byte identity hash of a public key.
///
/// The SHA-256 pass goes first so the short RIPEMD-160 output never sees
/// attacker-shaped input directly.
///
/// ```
/// use wallet_address::crypto::hash160;
///
/// let id = hash160(&[0u8; 64]);
/// assert_eq!(id.len(), 20);
/// ```
pub fn hash160(data: &[u8]) -> [u8; IDENTITY_HASH_LENGTH] {
    ripemd160(&sha256(data))
}

/// First four bytes of `SHA-256(SHA-256(payload))`.
///
/// A random corruption slips past this with probability 2^-32, which is
/// the whole error-detection budget of an address.
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let digest = double_sha256(payload);
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    out
}
