//! # Text Encodings
//!
//! Byte-to-text codecs used for anything a human has to read or type.
//! Currently just base58; hex goes through the `hex` crate directly.

pub mod base58;

pub use base58::{Alphabet, AlphabetError, DecodeError};
