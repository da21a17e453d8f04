//! Registry key normalization

/// Maps a caller supplied key to the form used for storage and lookup
pub trait KeyNormalizer {
    fn normalize(key: &str) -> String;
}

/// Keys are compared after trimming and lowercasing
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseTrimmed;

impl KeyNormalizer for LowercaseTrimmed {
    fn normalize(key: &str) -> String {
        key.trim().to_lowercase()
    }
}

/// Keys are compared exactly as given
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl KeyNormalizer for Verbatim {
    fn normalize(key: &str) -> String {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("  Primary ", "primary")]
    #[test_case("DB", "db")]
    #[test_case("", "")]
    fn test_lowercase_trimmed(input: &str, expected: &str) {
        assert_eq!(LowercaseTrimmed::normalize(input), expected);
    }

    #[test]
    fn test_verbatim() {
        assert_eq!(Verbatim::normalize(" Primary "), " Primary ");
    }
}
