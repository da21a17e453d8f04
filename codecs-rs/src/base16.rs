//! Hexadecimal

use crate::{Codec, CodecError, Encoding, Result};
use hex::FromHexError;

/// Lowercase hex. Decoding accepts either case, an optional `0x` prefix and
/// odd lengths (treated as having a leading zero).
#[derive(Debug, Clone, Copy)]
pub struct Base16;

impl Base16 {
    fn digits(encoded: &str) -> &str {
        encoded.strip_prefix("0x").unwrap_or(encoded)
    }
}

impl Codec for Base16 {
    const ENCODING: Encoding = Encoding::Base16;

    fn is_encoded(encoded: &str) -> bool {
        let digits = Self::digits(encoded);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
    }

    fn encode(raw: &[u8]) -> String {
        hex::encode(raw)
    }

    fn decode(encoded: &str) -> Result<Vec<u8>> {
        if encoded.is_empty() {
            return Err(CodecError::Empty);
        }
        if !Self::is_encoded(encoded) {
            return Err(CodecError::InvalidEncoding(Self::ENCODING));
        }

        let digits = Self::digits(encoded);
        let decoded = if digits.len() % 2 != 0 {
            hex::decode(format!("0{}", digits))
        } else {
            hex::decode(digits)
        };

        decoded.map_err(|e| match e {
            FromHexError::InvalidHexCharacter { c, .. } => CodecError::InvalidCharacter {
                encoding: Self::ENCODING,
                character: c,
            },
            FromHexError::OddLength | FromHexError::InvalidStringLength => {
                CodecError::InvalidEncoding(Self::ENCODING)
            }
        })
    }
}
