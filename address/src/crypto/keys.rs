//! # Key Management
//!
//! P-256 key pair generation and the raw public-key byte format that the
//! address pipeline hashes.
//!
//! The curve arithmetic is `p256` from RustCrypto. We never touch scalars
//! or field elements ourselves; this module only decides where randomness
//! comes from and how a public point is laid out as bytes:
//!
//! ```text
//! X (32 bytes, big-endian) || Y (32 bytes, big-endian)   -> 64 bytes
//! ```
//!
//! No SEC1 tag byte, no compression flag. Both coordinates are always
//! left-padded to the full field width. A coordinate whose top byte happens
//! to be zero still occupies 32 bytes, otherwise roughly one key in 128
//! would hash to the wrong identity.
//!
//! ## Security considerations
//!
//! - Secret scalars are zeroized on drop (thanks, `elliptic-curve`).
//! - `generate()` pulls from the OS RNG. Tests inject a seeded RNG through
//!   [`KeyPair::generate_with`] instead of poking at globals.
//! - A failing RNG is fatal. We surface the error and never fall back to a
//!   weaker source.
//! - Key bytes are never logged.

use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{COORDINATE_LENGTH, CURVE_NAME, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};

/// How many candidate scalars we draw before concluding the RNG is broken.
///
/// A uniformly random 32-byte string lands outside `[1, n)` with
/// probability below 2^-32, so a healthy source essentially never needs a
/// second draw.
const MAX_GENERATION_ATTEMPTS: usize = 8;

/// Errors that can occur during key operations.
///
/// Deliberately vague about *why* a secret was rejected. Error messages end
/// up in logs, and key material must not.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The randomness source failed, or kept producing unusable scalars.
    /// Fatal: callers must not retry with a different source.
    #[error("key generation failed: {0}")]
    Generation(String),

    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key bytes: wrong length or not a point on {}", CURVE_NAME)]
    InvalidPublicKey,
}

/// A wallet identity key pair over NIST P-256.
///
/// Owns the secret scalar exclusively. `KeyPair` intentionally does NOT
/// implement `Serialize`: exporting a private key should take a deliberate
/// call to [`secret_key_bytes`](Self::secret_key_bytes), not a stray
/// `serde_json::to_string`.
///
/// # Examples
///
/// ```
/// use wallet_address::crypto::keys::KeyPair;
///
/// let kp = KeyPair::generate().unwrap();
/// assert_eq!(kp.public_key_bytes().len(), 64);
/// ```
#[derive(Clone)]
pub struct KeyPair {
    secret: p256::SecretKey,
    public: PublicKey,
}

/// The public half of a key pair in raw `X || Y` form.
///
/// Every constructor guarantees the bytes describe a point on P-256, so
/// holders of a `PublicKey` never need to re-check.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl KeyPair {
    /// Generate a fresh key pair from the OS cryptographic RNG.
    pub fn generate() -> Result<Self, KeyError> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a key pair from a caller-supplied cryptographic RNG.
    ///
    /// Candidate scalars are rejection-sampled: a draw of zero or of a value
    /// at or above the group order is discarded and redrawn. An error from
    /// the RNG itself aborts immediately.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, KeyError> {
        let mut candidate = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            rng.try_fill_bytes(&mut candidate[..])
                .map_err(|e| KeyError::Generation(format!("randomness source failed: {e}")))?;

            if let Ok(secret) = p256::SecretKey::from_slice(&candidate[..]) {
                let keypair = Self::from_secret(secret);
                tracing::debug!(
                    curve = CURVE_NAME,
                    attempt,
                    public_key = %keypair.public,
                    "generated key pair"
                );
                return Ok(keypair);
            }

            tracing::trace!(attempt, "rejected out-of-range scalar candidate");
        }

        Err(KeyError::Generation(format!(
            "no valid scalar after {MAX_GENERATION_ATTEMPTS} draws"
        )))
    }

    /// Reconstruct a key pair from a raw 32-byte big-endian secret scalar.
    ///
    /// Rejects zero and anything at or above the group order.
    pub fn from_secret_bytes(bytes: &[u8; SECRET_KEY_LENGTH]) -> Result<Self, KeyError> {
        let secret =
            p256::SecretKey::from_slice(bytes).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_secret(secret))
    }

    /// Reconstruct a key pair from a hex-encoded secret scalar.
    ///
    /// Handy for fixtures. Please don't keep hex secrets in config files.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = Zeroizing::new(hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?);
        let arr: &[u8; SECRET_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Self::from_secret_bytes(arr)
    }

    fn from_secret(secret: p256::SecretKey) -> Self {
        let public = PublicKey::from_point(&secret.public_key());
        Self { secret, public }
    }

    /// Returns the public key associated with this key pair.
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// The raw 64-byte `X || Y` public key consumed by the digest pipeline.
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.public.bytes
    }

    /// Exports the raw 32-byte secret scalar.
    ///
    /// **Handle with extreme care.** Wrap the result in `Zeroizing` if it
    /// has to live for more than a moment.
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.secret.to_bytes().into()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public half only. Never print secret material, not even a prefix.
        write!(f, "KeyPair(pub={})", self.public.to_hex())
    }
}

impl PartialEq for KeyPair {
    /// Compares public keys; secrets are not compared in variable time.
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl Eq for KeyPair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    /// Lay out a curve point as fixed-width `X || Y`.
    fn from_point(point: &p256::PublicKey) -> Self {
        // Uncompressed SEC1 is 0x04 || X || Y with both coordinates already
        // padded to the field width by the encoder.
        let encoded = point.to_encoded_point(false);
        let sec1 = encoded.as_bytes();
        debug_assert_eq!(sec1.len(), 1 + PUBLIC_KEY_LENGTH);

        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        bytes.copy_from_slice(&sec1[1..]);
        Self { bytes }
    }

    /// Accept an externally supplied raw public key.
    ///
    /// Validates the length and that `(X, Y)` is actually on the curve
    /// before handing the bytes to anything that hashes them.
    pub fn from_bytes(slice: &[u8]) -> Result<Self, KeyError> {
        if slice.len() != PUBLIC_KEY_LENGTH {
            return Err(KeyError::InvalidPublicKey);
        }

        let mut sec1 = [0u8; 1 + PUBLIC_KEY_LENGTH];
        sec1[0] = 0x04;
        sec1[1..].copy_from_slice(slice);
        let point =
            p256::PublicKey::from_sec1_bytes(&sec1).map_err(|_| KeyError::InvalidPublicKey)?;

        Ok(Self::from_point(&point))
    }

    /// Parse a hex-encoded raw public key.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::from_bytes(&bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Big-endian X coordinate.
    pub fn x(&self) -> &[u8] {
        &self.bytes[..COORDINATE_LENGTH]
    }

    /// Big-endian Y coordinate.
    pub fn y(&self) -> &[u8] {
        &self.bytes[COORDINATE_LENGTH..]
    }

    /// Hex-encoded representation. 128 characters for 64 bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl Serialize for PublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.bytes)
        }
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            PublicKey::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            PublicKey::from_bytes(&bytes).map_err(serde::de::Error::custom)
        }
    }
}
