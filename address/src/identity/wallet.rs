//! A single wallet identity: one key pair bound to one address configuration.

use std::fmt;

use crate::config::AddressConfig;
use crate::crypto::keys::{KeyError, KeyPair, PublicKey};
use crate::identity::address::Address;

/// The key pair a wallet signs with, plus the settings its address is
/// rendered under.
///
/// Created once per identity and kept for as long as the process needs to
/// sign. The address is cached at construction since both inputs are
/// immutable afterwards.
#[derive(Clone)]
pub struct WalletIdentity {
    keypair: KeyPair,
    config: AddressConfig,
    address: Address,
}

impl WalletIdentity {
    /// Generate a fresh identity from the OS RNG.
    pub fn generate(config: AddressConfig) -> Result<Self, KeyError> {
        Ok(Self::from_keypair(KeyPair::generate()?, config))
    }

    /// Bind an existing key pair to an address configuration.
    pub fn from_keypair(keypair: KeyPair, config: AddressConfig) -> Self {
        let address = Address::from_public_key(&keypair.public_key(), config.version_byte());
        tracing::debug!(
            network = %config.network,
            version = config.version_byte(),
            %address,
            "wallet identity ready"
        );
        Self {
            keypair,
            config,
            address,
        }
    }

    /// The key pair this identity was built from.
    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    /// Public half of the key pair, as `X || Y`.
    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key()
    }

    /// Network and version-byte settings used to derive the address.
    pub fn config(&self) -> &AddressConfig {
        &self.config
    }

    /// The derived address, computed once at construction.
    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl fmt::Debug for WalletIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletIdentity")
            .field("address", &self.address.encode())
            .field("network", &self.config.network)
            .finish_non_exhaustive()
    }
}
