//! # Address Configuration & Constants
//!
//! Every magic number in the address pipeline lives here. If you're
//! hardcoding a length somewhere else, you're doing it wrong.
//!
//! The byte layout defined below is part of the address format itself.
//! Change any of it and every address ever handed out stops validating,
//! so treat these values as frozen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Key Material
// ---------------------------------------------------------------------------

/// Width of a single P-256 affine coordinate in bytes (256-bit field).
pub const COORDINATE_LENGTH: usize = 32;

/// Raw public key length: `X || Y`, both coordinates big-endian and
/// left-padded to [`COORDINATE_LENGTH`]. No SEC1 tag byte, no compression.
pub const PUBLIC_KEY_LENGTH: usize = 2 * COORDINATE_LENGTH;

/// P-256 secret scalar length in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Name of the curve used for key generation. Shows up in logs and debug
/// output, never in the address itself.
pub const CURVE_NAME: &str = "P-256";

// ---------------------------------------------------------------------------
// Address Layout
// ---------------------------------------------------------------------------

/// Length of the identity hash: RIPEMD-160 output.
pub const IDENTITY_HASH_LENGTH: usize = 20;

/// Version byte plus identity hash.
pub const PAYLOAD_LENGTH: usize = 1 + IDENTITY_HASH_LENGTH;

/// Leading bytes of `SHA256(SHA256(payload))` kept as the checksum.
pub const CHECKSUM_LENGTH: usize = 4;

/// Full binary address before text encoding: payload followed by checksum.
pub const ADDRESS_BYTES_LENGTH: usize = PAYLOAD_LENGTH + CHECKSUM_LENGTH;

/// Longest base58 text that can decode to [`ADDRESS_BYTES_LENGTH`] bytes.
/// Mainnet addresses stop at 34 symbols, but a version byte of `0xFF`
/// pushes the full 25-byte value past `58^34`.
pub const MAX_ADDRESS_TEXT_LENGTH: usize = 35;

/// The base58 alphabet. Digits and letters minus `0`, `O`, `I` and `l`,
/// which look too much alike when someone reads an address over the phone.
pub const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

// ---------------------------------------------------------------------------
// Network Profiles
// ---------------------------------------------------------------------------

/// Version byte of the default (mainnet) profile.
pub const VERSION_MAINNET: u8 = 0x00;

/// Version byte of the testnet profile. Encodes to addresses starting with
/// `m` or `n`, so testnet addresses are easy to tell apart at a glance.
pub const VERSION_TESTNET: u8 = 0x6F;

/// Version byte of the devnet profile.
pub const VERSION_DEVNET: u8 = 0x5A;

/// Errors raised while loading address configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The network name is not one of the known profiles.
    #[error("unknown network profile: {0}")]
    UnknownNetwork(String),

    /// The configuration document could not be parsed.
    #[error("invalid address configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A named network profile. Each profile owns exactly one version byte,
/// which is what actually ends up in the address payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkProfile {
    /// Production network. Version byte `0x00`.
    #[default]
    Mainnet,
    /// Public test network. Version byte `0x6F`.
    Testnet,
    /// Local development network. Version byte `0x5A`.
    Devnet,
}

impl NetworkProfile {
    /// All known profiles, in declaration order.
    pub const ALL: [NetworkProfile; 3] = [
        NetworkProfile::Mainnet,
        NetworkProfile::Testnet,
        NetworkProfile::Devnet,
    ];

    /// The version byte embedded in addresses for this profile.
    pub const fn version_byte(self) -> u8 {
        match self {
            NetworkProfile::Mainnet => VERSION_MAINNET,
            NetworkProfile::Testnet => VERSION_TESTNET,
            NetworkProfile::Devnet => VERSION_DEVNET,
        }
    }

    /// Looks up the profile that owns a version byte.
    /// Returns `None` for unrecognized bytes; we don't guess.
    pub fn from_version_byte(version: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|profile| profile.version_byte() == version)
    }

    /// Lowercase profile name, mainly for logging.
    pub const fn name(self) -> &'static str {
        match self {
            NetworkProfile::Mainnet => "mainnet",
            NetworkProfile::Testnet => "testnet",
            NetworkProfile::Devnet => "devnet",
        }
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(NetworkProfile::Mainnet),
            "testnet" => Ok(NetworkProfile::Testnet),
            "devnet" => Ok(NetworkProfile::Devnet),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

/// Returns a friendly name for a version byte. Unknown bytes get a hex dump.
pub fn version_name(version: u8) -> String {
    match NetworkProfile::from_version_byte(version) {
        Some(profile) => profile.name().to_string(),
        None => format!("unknown(0x{:02X})", version),
    }
}

// ---------------------------------------------------------------------------
// Runtime Configuration
// ---------------------------------------------------------------------------

/// Address derivation settings supplied by the embedding application.
///
/// The version byte is always resolved through this struct (or passed
/// explicitly) so that supporting another network never means hunting
/// down a literal `0x00` somewhere in the call graph.
///
/// ```
/// use wallet_address::config::{AddressConfig, NetworkProfile};
///
/// let config = AddressConfig::from_json(r#"{ "network": "testnet" }"#).unwrap();
/// assert_eq!(config.network, NetworkProfile::Testnet);
/// assert_eq!(config.version_byte(), 0x6F);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddressConfig {
    /// Profile whose version byte is used by default.
    #[serde(default)]
    pub network: NetworkProfile,

    /// Explicit version byte that takes precedence over the profile's.
    /// Useful for private deployments that mint their own prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_byte_override: Option<u8>,
}

impl AddressConfig {
    /// Configuration for a known network profile.
    pub fn for_network(network: NetworkProfile) -> Self {
        Self {
            network,
            version_byte_override: None,
        }
    }

    /// Configuration pinned to an arbitrary version byte.
    pub fn with_version_byte(version: u8) -> Self {
        Self {
            network: NetworkProfile::from_version_byte(version).unwrap_or_default(),
            version_byte_override: Some(version),
        }
    }

    /// The version byte to place in front of derived identity hashes.
    pub fn version_byte(&self) -> u8 {
        self.version_byte_override
            .unwrap_or_else(|| self.network.version_byte())
    }

    /// Parse configuration from a JSON document. Missing fields fall back
    /// to the mainnet defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
