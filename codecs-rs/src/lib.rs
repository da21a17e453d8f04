//! # Codecs
//!
//! Text encodings for binary data: Base16 (hex), Base32 (RFC 4648), Base64
//! and Base64Url. Each scheme is a unit type implementing [`Codec`];
//! [`Encoding`] selects one at runtime.

mod b64;
mod base16;
mod base32;

pub use b64::{Base64, Base64Url};
pub use base16::Base16;
pub use base32::Base32;

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Cannot decode an empty string")]
    Empty,

    #[error("Invalid character in {encoding} string: {character:?}")]
    InvalidCharacter { encoding: Encoding, character: char },

    #[error("Invalid {0} encoded string")]
    InvalidEncoding(Encoding),
}

/// A binary-to-text encoding scheme
pub trait Codec {
    const ENCODING: Encoding;

    /// True if `encoded` looks like a non-empty string in this encoding
    fn is_encoded(encoded: &str) -> bool;

    fn encode(raw: &[u8]) -> String;

    fn decode(encoded: &str) -> Result<Vec<u8>>;
}

/// Encoding selector; discriminants are the scheme's numeric identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Encoding {
    Base16 = 16,
    Base32 = 32,
    Base64 = 64,
    Base64Url = 641,
}

impl Encoding {
    pub const ALL: [Encoding; 4] = [
        Encoding::Base16,
        Encoding::Base32,
        Encoding::Base64,
        Encoding::Base64Url,
    ];

    pub const fn id(self) -> u16 {
        self as u16
    }

    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Base16 => "Base16",
            Encoding::Base32 => "Base32",
            Encoding::Base64 => "Base64",
            Encoding::Base64Url => "Base64Url",
        }
    }

    pub fn is_encoded(self, encoded: &str) -> bool {
        match self {
            Encoding::Base16 => Base16::is_encoded(encoded),
            Encoding::Base32 => Base32::is_encoded(encoded),
            Encoding::Base64 => Base64::is_encoded(encoded),
            Encoding::Base64Url => Base64Url::is_encoded(encoded),
        }
    }

    pub fn encode(self, raw: impl AsRef<[u8]>) -> String {
        let raw = raw.as_ref();
        match self {
            Encoding::Base16 => Base16::encode(raw),
            Encoding::Base32 => Base32::encode(raw),
            Encoding::Base64 => Base64::encode(raw),
            Encoding::Base64Url => Base64Url::encode(raw),
        }
    }

    pub fn decode(self, encoded: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Base16 => Base16::decode(encoded),
            Encoding::Base32 => Base32::decode(encoded),
            Encoding::Base64 => Base64::decode(encoded),
            Encoding::Base64Url => Base64Url::decode(encoded),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u16> for Encoding {
    type Error = String;

    fn try_from(id: u16) -> std::result::Result<Self, Self::Error> {
        Encoding::from_id(id).ok_or_else(|| format!("Unknown encoding id: {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Encoding::Base16, b"hello", "68656c6c6f")]
    #[test_case(Encoding::Base32, b"hello", "NBSWY3DP")]
    #[test_case(Encoding::Base64, b"hello?", "aGVsbG8/")]
    #[test_case(Encoding::Base64Url, b"hello?", "aGVsbG8_")]
    fn test_dispatch(encoding: Encoding, raw: &[u8], encoded: &str) {
        assert_eq!(encoding.encode(raw), encoded);
        assert!(encoding.is_encoded(encoded));
        assert_eq!(encoding.decode(encoded).unwrap(), raw);
    }

    #[test]
    fn test_ids() {
        assert_eq!(Encoding::Base64Url.id(), 641);
        assert_eq!(Encoding::try_from(32).unwrap(), Encoding::Base32);
        assert!(Encoding::try_from(58).is_err());
    }

    #[test]
    fn test_empty_input_is_an_error_everywhere() {
        for encoding in Encoding::ALL {
            assert!(!encoding.is_encoded(""));
            assert_eq!(encoding.decode(""), Err(CodecError::Empty));
        }
    }
}
