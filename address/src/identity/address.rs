//! # Wallet Addresses
//!
//! An address is the shareable form of a public key. It is derived one way
//! only: nothing here can recover a key from an address.
//!
//! ```text
//! public_key (64 bytes, X || Y)
//!     -> RIPEMD160(SHA256(public_key))               -> identity hash (20)
//!     -> version || identity hash                    -> payload (21)
//!     -> payload || SHA256(SHA256(payload))[..4]     -> address bytes (25)
//!     -> base58                                      -> 1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs
//! ```
//!
//! | offset | length | field          |
//! |--------|--------|----------------|
//! | 0      | 1      | version byte   |
//! | 1      | 20     | identity hash  |
//! | 21     | 4      | checksum       |
//!
//! The version byte is zero on mainnet, so mainnet addresses always start
//! with at least one `1`.
//!
//! ## Strict vs. fail-closed parsing
//!
//! [`Address::decode`] reports *why* a string was rejected, for callers that
//! need the components. [`is_valid`] is for untrusted input: it collapses
//! every failure into `false` and never panics, and it does the same amount
//! of hashing whether the length or the checksum was wrong.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{
    version_name, NetworkProfile, ADDRESS_BYTES_LENGTH, CHECKSUM_LENGTH, IDENTITY_HASH_LENGTH,
    MAX_ADDRESS_TEXT_LENGTH, PAYLOAD_LENGTH, PUBLIC_KEY_LENGTH,
};
use crate::crypto::hash::{checksum, hash160};
use crate::crypto::keys::PublicKey;
use crate::encoding::base58::{self, DecodeError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons an address string failed strict decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The text is not valid base58.
    #[error("address encoding error: {0}")]
    Encoding(#[from] DecodeError),

    /// The base58 text decoded to the wrong number of bytes.
    #[error("invalid address length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },

    /// The embedded checksum does not match the payload.
    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A decoded wallet address: version byte plus identity hash.
///
/// The checksum is not stored. It is a pure function of the other two
/// fields and gets recomputed whenever the address is rendered.
///
/// # Examples
///
/// ```
/// use wallet_address::crypto::keys::KeyPair;
/// use wallet_address::identity::Address;
///
/// let kp = KeyPair::generate().unwrap();
/// let address = Address::from_public_key(&kp.public_key(), 0x00);
/// let text = address.encode();
/// assert!(text.starts_with('1'));
///
/// let parsed: Address = text.parse().unwrap();
/// assert_eq!(parsed, address);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    version: u8,
    identity_hash: [u8; IDENTITY_HASH_LENGTH],
}

impl Address {
    /// Wrap an already-computed identity hash.
    pub fn from_identity_hash(identity_hash: [u8; IDENTITY_HASH_LENGTH], version: u8) -> Self {
        Self {
            version,
            identity_hash,
        }
    }

    /// Derive the address of a validated public key.
    pub fn from_public_key(public_key: &PublicKey, version: u8) -> Self {
        Self::from_public_key_bytes(public_key.as_bytes(), version)
    }

    /// Derive an address from raw `X || Y` public key bytes.
    ///
    /// The bytes are hashed as given; use [`PublicKey::from_bytes`] first if
    /// they come from outside and need point validation.
    pub fn from_public_key_bytes(public_key: &[u8; PUBLIC_KEY_LENGTH], version: u8) -> Self {
        Self::from_identity_hash(hash160(public_key), version)
    }

    /// Parse the 25-byte binary form, verifying length and checksum.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.len() != ADDRESS_BYTES_LENGTH {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_BYTES_LENGTH,
                got: bytes.len(),
            });
        }

        let (payload, claimed) = bytes.split_at(PAYLOAD_LENGTH);
        if checksum(payload) != claimed {
            return Err(AddressError::ChecksumMismatch);
        }

        let mut identity_hash = [0u8; IDENTITY_HASH_LENGTH];
        identity_hash.copy_from_slice(&payload[1..]);
        Ok(Self::from_identity_hash(identity_hash, payload[0]))
    }

    /// Strictly decode a base58 address string.
    pub fn decode(address: &str) -> Result<Self, AddressError> {
        let bytes = base58::decode(address)?;
        Self::from_bytes(&bytes)
    }

    /// The version byte.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The network profile owning this version byte, if it is a known one.
    pub fn network(&self) -> Option<NetworkProfile> {
        NetworkProfile::from_version_byte(self.version)
    }

    /// The 20-byte identity hash.
    pub fn identity_hash(&self) -> &[u8; IDENTITY_HASH_LENGTH] {
        &self.identity_hash
    }

    /// `version || identity_hash`.
    pub fn payload(&self) -> [u8; PAYLOAD_LENGTH] {
        let mut payload = [0u8; PAYLOAD_LENGTH];
        payload[0] = self.version;
        payload[1..].copy_from_slice(&self.identity_hash);
        payload
    }

    /// The four checksum bytes appended to the payload.
    pub fn checksum(&self) -> [u8; CHECKSUM_LENGTH] {
        checksum(&self.payload())
    }

    /// The 25-byte binary form: payload followed by checksum.
    pub fn to_bytes(&self) -> [u8; ADDRESS_BYTES_LENGTH] {
        let payload = self.payload();
        let mut bytes = [0u8; ADDRESS_BYTES_LENGTH];
        bytes[..PAYLOAD_LENGTH].copy_from_slice(&payload);
        bytes[PAYLOAD_LENGTH..].copy_from_slice(&checksum(&payload));
        bytes
    }

    /// Render as base58 text.
    pub fn encode(&self) -> String {
        base58::encode(&self.to_bytes())
    }

    /// Whether this address was derived from `public_key`, under any version.
    pub fn matches_public_key(&self, public_key: &PublicKey) -> bool {
        hash160(public_key.as_bytes()) == self.identity_hash
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}, {})", self.encode(), version_name(self.version))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.encode())
        } else {
            serializer.serialize_bytes(&self.to_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Address::decode(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            Address::from_bytes(&bytes).map_err(serde::de::Error::custom)
        }
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Encode raw `X || Y` public key bytes straight to an address string.
pub fn encode_address(public_key: &[u8; PUBLIC_KEY_LENGTH], version: u8) -> String {
    Address::from_public_key_bytes(public_key, version).encode()
}

/// Fail-closed validity check for untrusted address strings.
///
/// Returns `true` only for well-formed base58 that decodes to exactly
/// 25 bytes whose last four bytes are the checksum of the first 21.
/// Every other input, including the empty string, yields `false`.
///
/// Wrong-length input still goes through a full checksum computation over
/// a zero-padded buffer, so a length failure and a checksum failure cost
/// the same and look the same to the caller. Text longer than
/// [`MAX_ADDRESS_TEXT_LENGTH`] is refused before decoding, which keeps the
/// quadratic base58 decoder bounded.
pub fn is_valid(address: &str) -> bool {
    match fixed_work_checks(address) {
        Some(checks) => checks.length_ok & checks.checksum_ok,
        None => false,
    }
}

/// [`is_valid`], plus the version byte must belong to `network`.
///
/// Runs the same fixed-work path, so a wrong-length string still pays for
/// the checksum.
pub fn is_valid_for_network(address: &str, network: NetworkProfile) -> bool {
    match fixed_work_checks(address) {
        Some(checks) => {
            checks.length_ok & checks.checksum_ok & (checks.version == network.version_byte())
        }
        None => false,
    }
}

/// Outcome of each check on a string that decoded as base58.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Checks {
    length_ok: bool,
    checksum_ok: bool,
    version: u8,
}

/// Decode into a zero-padded 25-byte buffer and run every check on it.
///
/// Returns `None` only for text that is too long or not base58. Those
/// rejections happen before any decoded length is known.
fn fixed_work_checks(address: &str) -> Option<Checks> {
    if address.len() > MAX_ADDRESS_TEXT_LENGTH {
        tracing::trace!(len = address.len(), "rejected address: text too long");
        return None;
    }

    let Ok(decoded) = base58::decode(address) else {
        tracing::trace!("rejected address: not base58");
        return None;
    };

    let mut buf = [0u8; ADDRESS_BYTES_LENGTH];
    let take = decoded.len().min(ADDRESS_BYTES_LENGTH);
    buf[..take].copy_from_slice(&decoded[..take]);

    let (payload, claimed) = buf.split_at(PAYLOAD_LENGTH);
    let checks = Checks {
        length_ok: decoded.len() == ADDRESS_BYTES_LENGTH,
        checksum_ok: checksum(payload) == claimed,
        version: buf[0],
    };

    // Non-short-circuiting: both checks always run.
    if !(checks.length_ok & checks.checksum_ok) {
        tracing::trace!("rejected address: length or checksum");
    }
    Some(checks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASE58_ALPHABET, VERSION_TESTNET};
    use crate::crypto::keys::KeyPair;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn seeded_keypair(seed: u64) -> KeyPair {
        KeyPair::generate_with(&mut StdRng::seed_from_u64(seed)).unwrap()
    }

    /// Replace the last character with a different alphabet symbol.
    fn alter_last_char(address: &str) -> String {
        let mut chars: Vec<char> = address.chars().collect();
        let last = chars.pop().unwrap();
        let replacement = if last == 'z' { 'y' } else { 'z' };
        chars.push(replacement);
        chars.into_iter().collect()
    }

    #[test]
    fn test_all_zero_hash_known_vector() {
        // Version 0x00 with an all-zero identity hash: the well-known
        // "burn" address.
        let address = Address::from_identity_hash([0u8; 20], 0x00);
        assert_eq!(address.encode(), "1111111111111111111114oLvT2");
        assert_eq!(
            Address::decode("1111111111111111111114oLvT2").unwrap(),
            address
        );
    }

    #[test]
    fn derived_address_is_valid() {
        let kp = seeded_keypair(1);
        for version in [0x00, 0x05, VERSION_TESTNET, 0xFF] {
            let text = Address::from_public_key(&kp.public_key(), version).encode();
            assert!(is_valid(&text), "version 0x{version:02X}: {text}");
        }
    }

    #[test]
    fn test_encode_address_matches_type() {
        let kp = seeded_keypair(2);
        assert_eq!(
            encode_address(&kp.public_key_bytes(), 0x00),
            Address::from_public_key(&kp.public_key(), 0x00).encode()
        );
    }

    #[test]
    fn test_bytes_layout() {
        let kp = seeded_keypair(3);
        let address = Address::from_public_key(&kp.public_key(), 0x6F);
        let bytes = address.to_bytes();
        assert_eq!(bytes.len(), 25);
        assert_eq!(bytes[0], 0x6F);
        assert_eq!(&bytes[1..21], &hash160(&kp.public_key_bytes()));
        assert_eq!(&bytes[21..], &checksum(&bytes[..21]));
    }

    #[test]
    fn two_leading_zero_bytes_render_as_two_ones() {
        let mut identity_hash = [0u8; 20];
        identity_hash[0] = 0x00;
        for (i, byte) in identity_hash.iter_mut().enumerate().skip(1) {
            *byte = i as u8;
        }
        let address = Address::from_identity_hash(identity_hash, 0x00);
        let bytes = address.to_bytes();
        assert_eq!(&bytes[..3], &[0x00, 0x00, 0x01]);

        let text = address.encode();
        assert!(text.starts_with("11"));
        assert!(!text[2..].starts_with('1'));
        assert_eq!(base58::decode(&text).unwrap(), bytes.to_vec());
        assert!(is_valid(&text));
    }

    #[test]
    fn test_altered_last_char_is_invalid() {
        let text = Address::from_public_key(&seeded_keypair(4).public_key(), 0x00).encode();
        let altered = alter_last_char(&text);

        let decoded = base58::decode(&altered).unwrap();
        assert_eq!(decoded.len(), 25);
        assert_ne!(&decoded[21..], &checksum(&decoded[..21]));

        assert!(!is_valid(&altered));
        assert_eq!(
            Address::decode(&altered).unwrap_err(),
            AddressError::ChecksumMismatch
        );
    }

    #[test]
    fn every_single_bit_flip_is_detected() {
        let address = Address::from_public_key(&seeded_keypair(5).public_key(), 0x00);
        let bytes = address.to_bytes();
        for bit in 0..(25 * 8) {
            let mut corrupted = bytes;
            corrupted[bit / 8] ^= 1 << (bit % 8);
            let text = base58::encode(&corrupted);
            assert!(!is_valid(&text), "bit {bit} flip went undetected");
        }
    }

    #[test]
    fn wrong_lengths_are_rejected_without_panicking() {
        let bytes = Address::from_identity_hash([9u8; 20], 0x00).to_bytes();
        for len in 0..40 {
            if len == 25 {
                continue;
            }
            let mut data = bytes.to_vec();
            data.resize(len, 0x42);
            let text = base58::encode(&data);
            assert!(!is_valid(&text), "length {len} accepted");
        }
    }

    #[test]
    fn test_length_error_detail() {
        let text = base58::encode(&[1u8; 24]);
        assert_eq!(
            Address::decode(&text).unwrap_err(),
            AddressError::InvalidLength {
                expected: 25,
                got: 24
            }
        );
    }

    #[test]
    fn test_out_of_alphabet_input_is_invalid() {
        let text = Address::from_identity_hash([3u8; 20], 0x00).encode();
        for bad in ['0', 'O', 'I', 'l', '-', ' ', 'é'] {
            let mut mangled = text.clone();
            mangled.insert(5, bad);
            assert!(!is_valid(&mangled));
            assert!(matches!(
                Address::decode(&mangled),
                Err(AddressError::Encoding(DecodeError::InvalidCharacter { .. }))
            ));
        }
        assert!(!is_valid(""));
    }

    #[test]
    fn random_strings_are_rejected_unless_they_decode_to_25_bytes() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut rejected = 0;
        for _ in 0..500 {
            let len = rng.gen_range(0..50);
            let s: String = (0..len)
                .map(|_| BASE58_ALPHABET[rng.gen_range(0..58)] as char)
                .collect();
            let decodes_to_address =
                matches!(base58::decode(&s), Ok(bytes) if bytes.len() == ADDRESS_BYTES_LENGTH);
            if !decodes_to_address {
                assert!(!is_valid(&s), "{s:?} accepted");
                rejected += 1;
            }
        }
        // Almost every random string has the wrong decoded length.
        assert!(rejected > 400, "only {rejected} strings rejected");
    }

    #[test]
    fn wrong_length_and_bad_checksum_both_compute_checksum() {
        let bytes = Address::from_identity_hash([9u8; 20], 0x00).to_bytes();

        // One extra byte: the padded buffer holds a valid address, so the
        // checksum passes and only the length check fails.
        let mut long = bytes.to_vec();
        long.push(0x42);
        let checks = fixed_work_checks(&base58::encode(&long)).unwrap();
        assert!(!checks.length_ok);
        assert!(checks.checksum_ok);

        let mut corrupted = bytes;
        corrupted[24] ^= 0x01;
        let checks = fixed_work_checks(&base58::encode(&corrupted)).unwrap();
        assert!(checks.length_ok);
        assert!(!checks.checksum_ok);

        for text in [base58::encode(&long), base58::encode(&corrupted)] {
            assert!(!is_valid(&text));
            assert!(!is_valid_for_network(&text, NetworkProfile::Mainnet));
        }
    }

    #[test]
    fn overlong_text_is_rejected_before_decoding() {
        let huge = "z".repeat(100_000);
        assert!(fixed_work_checks(&huge).is_none());
        assert!(!is_valid(&huge));
        assert!(!is_valid_for_network(&huge, NetworkProfile::Mainnet));

        let just_over = "1".repeat(MAX_ADDRESS_TEXT_LENGTH + 1);
        assert!(!is_valid(&just_over));
    }

    #[test]
    fn highest_version_byte_fits_length_bound() {
        let address = Address::from_identity_hash([0xFF; 20], 0xFF);
        let text = address.encode();
        assert_eq!(text.len(), MAX_ADDRESS_TEXT_LENGTH);
        assert!(is_valid(&text));
    }

    #[test]
    fn test_deterministic_derivation() {
        let kp = seeded_keypair(6);
        let a = Address::from_public_key(&kp.public_key(), 0x00).encode();
        let b = Address::from_public_key(&kp.public_key(), 0x00).encode();
        assert_eq!(a, b);
    }

    #[test]
    fn different_versions_give_different_addresses() {
        let kp = seeded_keypair(7);
        let main = Address::from_public_key(&kp.public_key(), 0x00);
        let test = Address::from_public_key(&kp.public_key(), VERSION_TESTNET);
        assert_ne!(main.encode(), test.encode());
        assert_eq!(main.identity_hash(), test.identity_hash());
        assert_eq!(main.network(), Some(NetworkProfile::Mainnet));
        assert_eq!(test.network(), Some(NetworkProfile::Testnet));
    }

    #[test]
    fn network_check_requires_matching_version() {
        let kp = seeded_keypair(8);
        let text = Address::from_public_key(&kp.public_key(), VERSION_TESTNET).encode();
        assert!(is_valid_for_network(&text, NetworkProfile::Testnet));
        assert!(!is_valid_for_network(&text, NetworkProfile::Mainnet));
        assert!(!is_valid_for_network("not an address", NetworkProfile::Testnet));
    }

    #[test]
    fn matches_public_key_checks_hash() {
        let kp1 = seeded_keypair(9);
        let kp2 = seeded_keypair(10);
        let address = Address::from_public_key(&kp1.public_key(), 0x00);
        assert!(address.matches_public_key(&kp1.public_key()));
        assert!(!address.matches_public_key(&kp2.public_key()));
    }

    #[test]
    fn address_serde_json_roundtrip() {
        let address = Address::from_public_key(&seeded_keypair(11).public_key(), 0x00);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address.encode()));
        let recovered: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, address);
    }

    #[test]
    fn test_serde_rejects_corrupted_address() {
        let text = Address::from_identity_hash([1u8; 20], 0x00).encode();
        let json = format!("\"{}\"", alter_last_char(&text));
        assert!(serde_json::from_str::<Address>(&json).is_err());
    }

    #[test]
    fn debug_shows_network_name() {
        let address = Address::from_identity_hash([0u8; 20], 0x00);
        assert_eq!(
            format!("{:?}", address),
            "Address(1111111111111111111114oLvT2, mainnet)"
        );
    }
}
