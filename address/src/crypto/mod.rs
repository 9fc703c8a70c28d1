//! # Cryptographic Primitives
//!
//! Everything that hashes or holds key material lives here:
//!
//! - **P-256** key pairs, via `p256`. The address scheme only needs the
//!   public point, but the secret scalar has to be generated somewhere.
//! - **SHA-256** and **RIPEMD-160**, via `sha2` and `ripemd`, composed into
//!   the identity hash and the address checksum.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. Curve arithmetic and hash compression functions come from
//! audited RustCrypto crates. This module only fixes byte layouts and the
//! order in which the primitives are applied.

pub mod hash;
pub mod keys;

pub use hash::{checksum, double_sha256, hash160, ripemd160, sha256};
pub use keys::{KeyError, KeyPair, PublicKey};
