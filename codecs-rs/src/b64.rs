//! Base64 and its URL-safe variant

use crate::{Codec, CodecError, Encoding, Result};
use ::base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BASE64_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").unwrap();
    static ref BASE64_URL_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9\-_]+={0,2}$").unwrap();
}

/// Standard alphabet, padded
#[derive(Debug, Clone, Copy)]
pub struct Base64;

impl Codec for Base64 {
    const ENCODING: Encoding = Encoding::Base64;

    fn is_encoded(encoded: &str) -> bool {
        BASE64_PATTERN.is_match(encoded) && encoded.len() % 4 == 0
    }

    fn encode(raw: &[u8]) -> String {
        general_purpose::STANDARD.encode(raw)
    }

    fn decode(encoded: &str) -> Result<Vec<u8>> {
        if encoded.is_empty() {
            return Err(CodecError::Empty);
        }
        if !Self::is_encoded(encoded) {
            return Err(CodecError::InvalidEncoding(Self::ENCODING));
        }

        general_purpose::STANDARD
            .decode(encoded)
            .map_err(|_| CodecError::InvalidEncoding(Self::ENCODING))
    }
}

/// URL-safe alphabet. Encodes with padding; decodes with or without it.
#[derive(Debug, Clone, Copy)]
pub struct Base64Url;

impl Codec for Base64Url {
    const ENCODING: Encoding = Encoding::Base64Url;

    fn is_encoded(encoded: &str) -> bool {
        BASE64_URL_PATTERN.is_match(encoded) && encoded.len() % 4 != 1
    }

    fn encode(raw: &[u8]) -> String {
        general_purpose::URL_SAFE.encode(raw)
    }

    fn decode(encoded: &str) -> Result<Vec<u8>> {
        if encoded.is_empty() {
            return Err(CodecError::Empty);
        }
        if !Self::is_encoded(encoded) {
            return Err(CodecError::InvalidEncoding(Self::ENCODING));
        }

        let mut padded = encoded.to_string();
        while padded.len() % 4 != 0 {
            padded.push('=');
        }

        general_purpose::URL_SAFE
            .decode(padded)
            .map_err(|_| CodecError::InvalidEncoding(Self::ENCODING))
    }
}
