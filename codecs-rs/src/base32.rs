//! RFC 4648 Base32

use crate::{Codec, CodecError, Encoding, Result};
use lazy_static::lazy_static;
use regex::Regex;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

lazy_static! {
    static ref BASE32_PATTERN: Regex = Regex::new(r"(?i)^[A-Z2-7]+=*$").unwrap();
}

/// Padded to a multiple of 8 with `=`. Decoding is case-insensitive.
#[derive(Debug, Clone, Copy)]
pub struct Base32;

impl Codec for Base32 {
    const ENCODING: Encoding = Encoding::Base32;

    fn is_encoded(encoded: &str) -> bool {
        BASE32_PATTERN.is_match(encoded)
    }

    fn encode(raw: &[u8]) -> String {
        let mut out = String::with_capacity((raw.len() + 4) / 5 * 8);
        let mut buffer: u32 = 0;
        let mut bits = 0;

        for &byte in raw {
            buffer = (buffer << 8) | byte as u32;
            bits += 8;
            while bits >= 5 {
                bits -= 5;
                out.push(ALPHABET[((buffer >> bits) & 0x1F) as usize] as char);
            }
            buffer &= (1 << bits) - 1;
        }

        if bits > 0 {
            out.push(ALPHABET[((buffer << (5 - bits)) & 0x1F) as usize] as char);
        }

        while out.len() % 8 != 0 {
            out.push('=');
        }
        out
    }

    fn decode(encoded: &str) -> Result<Vec<u8>> {
        let body = encoded.trim_end_matches('=');
        if body.is_empty() {
            return Err(CodecError::Empty);
        }

        let mut out = Vec::with_capacity(body.len() * 5 / 8);
        let mut buffer: u32 = 0;
        let mut bits = 0;

        for c in body.chars() {
            let upper = c.to_ascii_uppercase();
            let value = ALPHABET
                .iter()
                .position(|&a| a as char == upper)
                .ok_or(CodecError::InvalidCharacter {
                    encoding: Self::ENCODING,
                    character: c,
                })?;

            buffer = (buffer << 5) | value as u32;
            bits += 5;
            if bits >= 8 {
                bits -= 8;
                out.push(((buffer >> bits) & 0xFF) as u8);
                buffer &= (1 << bits) - 1;
            }
        }

        Ok(out)
    }
}
