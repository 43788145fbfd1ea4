//! Error types

use thiserror::Error;

/// Error decoding a malformed hexadecimal string into bytes.
#[derive(Error, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InputError {
    /// The string has an odd number of digits.
    #[error("odd number of hexadecimal digits")]
    OddLength,

    /// The string contains a character that is not a hexadecimal digit.
    #[error("invalid hexadecimal character {c:?} at position {index}")]
    InvalidCharacter {
        /// The offending character.
        c: char,
        /// Position of the character in the input.
        index: usize,
    },
}

impl From<hex::FromHexError> for InputError {
    fn from(src: hex::FromHexError) -> Self {
        match src {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                Self::InvalidCharacter { c, index }
            }
            // `hex::decode` returns a `Vec` and never reports a length mismatch
            _ => Self::OddLength,
        }
    }
}

/// Error parsing an invalid textual or binary representation of UUID.
#[derive(Error, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParseError {
    /// The input does not hold exactly 16 bytes (32 hexadecimal digits).
    #[error("UUID must have 16 bytes")]
    InvalidLength,

    /// The input is not valid hexadecimal.
    #[error("invalid hexadecimal in UUID")]
    InvalidHex(#[source] InputError),

    /// The input is a valid UUID but not of the version requested.
    #[error("not a valid version {expected} UUID")]
    VersionMismatch {
        /// The version the caller asked for.
        expected: u8,
    },
}

impl From<InputError> for ParseError {
    fn from(src: InputError) -> Self {
        Self::InvalidHex(src)
    }
}

/// Error indicating a numeric value outside the range its destination can hold.
#[derive(Error, Clone, Eq, PartialEq, Hash, Debug)]
#[error("{what} out of range: {value}")]
pub struct RangeError {
    /// What the value was meant to become.
    pub what: &'static str,
    /// The rejected value.
    pub value: i128,
}
