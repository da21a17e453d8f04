//! ASCII membership checks

/// True if every byte is printable ASCII (0x20..=0x7E)
pub fn is_printable_only(value: &str) -> bool {
    value.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// True if every byte is in the ASCII range (0x00..=0x7F)
pub fn in_charset(value: &str) -> bool {
    value.is_ascii()
}
