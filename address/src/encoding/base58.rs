//! # Base58
//!
//! Positional base-58 text encoding with explicit leading-zero preservation.
//!
//! The input is read as one big-endian unsigned integer and rewritten in
//! base 58, most significant digit first. A plain integer conversion loses
//! leading `0x00` bytes (they add nothing to the magnitude), so every
//! leading zero byte is emitted as one copy of the alphabet's first symbol
//! instead, and decoding turns each leading first symbol back into a zero
//! byte:
//!
//! ```text
//! 00 00 28 7f b4 cd   ->   "11" ++ base58(0x287fb4cd)
//! ```
//!
//! Both directions run in `O(n^2)` over the input length, which is
//! irrelevant for 25-byte addresses and still fine for the few hundred
//! bytes anyone ever base58-encodes in practice.

use std::fmt;
use thiserror::Error;

use crate::config::BASE58_ALPHABET;

/// Marks a byte that is not part of the alphabet in the reverse table.
const INVALID: u8 = 0xFF;

/// Errors produced while decoding base58 text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A character outside the 58-symbol alphabet. `index` is the
    /// position in characters, not bytes.
    #[error("invalid base58 character {character:?} at index {index}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Its character position in the input.
        index: usize,
    },

    /// The decoded byte string does not have the length the caller needs.
    #[error("decoded length mismatch: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required number of bytes.
        expected: usize,
        /// Number of bytes actually decoded.
        got: usize,
    },
}

/// Errors produced while building a custom alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
    #[error("alphabet symbol at index {index} is not ASCII")]
    NonAscii { index: usize },

    #[error("alphabet symbol {symbol:?} appears more than once")]
    Duplicate { symbol: char },
}

/// A 58-symbol alphabet with its reverse lookup table.
#[derive(Clone, Copy)]
pub struct Alphabet {
    encode: [u8; 58],
    decode: [u8; 128],
}

impl Alphabet {
    /// The Bitcoin ordering, used for every address this crate produces.
    pub const BITCOIN: Alphabet = Alphabet::build(BASE58_ALPHABET);

    /// Build an alphabet from 58 distinct ASCII symbols.
    pub fn new(symbols: &[u8; 58]) -> Result<Self, AlphabetError> {
        let mut seen = [false; 128];
        for (index, &symbol) in symbols.iter().enumerate() {
            if !symbol.is_ascii() {
                return Err(AlphabetError::NonAscii { index });
            }
            if seen[symbol as usize] {
                return Err(AlphabetError::Duplicate {
                    symbol: symbol as char,
                });
            }
            seen[symbol as usize] = true;
        }
        Ok(Self::build(symbols))
    }

    const fn build(symbols: &[u8; 58]) -> Self {
        let mut decode = [INVALID; 128];
        let mut i = 0;
        while i < symbols.len() {
            decode[symbols[i] as usize] = i as u8;
            i += 1;
        }
        Self {
            encode: *symbols,
            decode,
        }
    }

    /// The symbol that stands for a leading zero byte.
    pub fn zero_symbol(&self) -> char {
        self.encode[0] as char
    }

    /// Digit value of `c`, or `None` if `c` is not in the alphabet.
    pub fn digit(&self, c: char) -> Option<u8> {
        if !c.is_ascii() {
            return None;
        }
        match self.decode[c as usize] {
            INVALID => None,
            value => Some(value),
        }
    }

    /// The 58 symbols in digit order.
    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII, so this cannot fail.
        std::str::from_utf8(&self.encode).unwrap_or_default()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::BITCOIN
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({})", self.as_str())
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.encode == other.encode
    }
}

impl Eq for Alphabet {}

/// Encode bytes with the Bitcoin alphabet.
///
/// # Example
///
/// ```
/// use wallet_address::encoding::base58;
///
/// assert_eq!(base58::encode(b"hello world"), "StV1DL6CwTryKyV");
/// assert_eq!(base58::encode(&[0, 0, 1]), "112");
/// ```
pub fn encode(input: &[u8]) -> String {
    encode_with(input, &Alphabet::BITCOIN)
}

/// Encode bytes with an explicit alphabet.
pub fn encode_with(input: &[u8], alphabet: &Alphabet) -> String {
    let zeros = input.iter().take_while(|&&b| b == 0).count();

    // Base-58 digits, least significant first. Each input byte is folded in
    // by multiplying the running value by 256 and adding the byte.
    // log(256) / log(58) ~= 1.37, so this capacity never reallocates.
    let mut digits: Vec<u8> = Vec::with_capacity((input.len() - zeros) * 138 / 100 + 1);
    for &byte in &input[zeros..] {
        let mut carry = u32::from(byte);
        for digit in digits.iter_mut() {
            carry += u32::from(*digit) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat(alphabet.zero_symbol()).take(zeros));
    out.extend(
        digits
            .iter()
            .rev()
            .map(|&d| alphabet.encode[d as usize] as char),
    );
    out
}

/// Decode Bitcoin-alphabet base58 text.
///
/// Fails on the first character outside the alphabet, including
/// whitespace. No trimming is done on the caller's behalf.
///
/// ```
/// use wallet_address::encoding::base58::{self, DecodeError};
///
/// assert_eq!(base58::decode("112").unwrap(), vec![0, 0, 1]);
/// assert!(matches!(
///     base58::decode("1O1"),
///     Err(DecodeError::InvalidCharacter { character: 'O', index: 1 })
/// ));
/// ```
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    decode_with(input, &Alphabet::BITCOIN)
}

/// Decode base58 text with an explicit alphabet.
pub fn decode_with(input: &str, alphabet: &Alphabet) -> Result<Vec<u8>, DecodeError> {
    // Bytes of the magnitude, least significant first.
    let mut bytes: Vec<u8> = Vec::with_capacity(input.len() * 733 / 1000 + 1);

    for (index, character) in input.chars().enumerate() {
        let value = alphabet
            .digit(character)
            .ok_or(DecodeError::InvalidCharacter { character, index })?;

        let mut carry = u32::from(value);
        for byte in bytes.iter_mut() {
            carry += u32::from(*byte) * 58;
            *byte = carry as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push(carry as u8);
            carry >>= 8;
        }
    }

    let zero_symbol = alphabet.zero_symbol();
    let zeros = input.chars().take_while(|&c| c == zero_symbol).count();

    let mut out = Vec::with_capacity(zeros + bytes.len());
    out.resize(zeros, 0);
    out.extend(bytes.iter().rev());
    Ok(out)
}

/// Decode Bitcoin-alphabet base58 text that must be exactly `N` bytes.
pub fn decode_to_array<const N: usize>(input: &str) -> Result<[u8; N], DecodeError> {
    let bytes = decode(input)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| DecodeError::InvalidLength {
            expected: N,
            got: bytes.len(),
        })
}
