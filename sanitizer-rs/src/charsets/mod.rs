//! Character set membership checks

pub mod ascii;
pub mod utf8;

pub use utf8::UnicodeRange;
