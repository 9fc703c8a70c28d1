// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Wallet Address — Core Library
//!
//! Turns a private signing key into a short, checksummed, typo-resistant
//! address, and checks addresses handed to us by strangers.
//!
//! ```text
//! KeyPair -> X || Y -> RIPEMD160(SHA256(.)) -> version || hash || checksum -> base58
//! ```
//!
//! ## Architecture
//!
//! - **config** — Layout constants and network profiles (version bytes).
//! - **crypto** — P-256 key pairs and the SHA-256 / RIPEMD-160 pipeline.
//! - **encoding** — Base58 with leading-zero preservation.
//! - **identity** — Addresses, wallet identities, and the three calls most
//!   callers need: [`generate_keypair`], [`derive_address`],
//!   [`is_valid_address`].
//!
//! ## Design Philosophy
//!
//! 1. Bit-exact formats. Encode then decode gives back the same bytes,
//!    always, including leading zeros.
//! 2. Validation fails closed. Untrusted strings get a `bool`, never a panic.
//! 3. Everything except key generation is a pure function, so all of it is
//!    safe to call from any number of threads at once.

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod identity;

pub use identity::{derive_address, generate_keypair, is_valid_address};
