//! Short code generation.
//!
//! Codes are drawn uniformly and independently from the 62 ASCII
//! alphanumerics. The thread RNG is fast but not a security boundary: codes are
//! identifiers, not secrets, and uniqueness is enforced by the store.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Default length of generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Codes that cannot be issued because they shadow fixed routes.
pub const RESERVED_CODES: &[&str] = &["api", "health", "shorten", "stats"];

/// Generator of fixed-length alphanumeric codes.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    length: usize,
}

impl CodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Produces a fresh random code of the configured length.
    pub fn generate(&self) -> String {
        generate_code(self.length)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

/// Generates a random code of `length` characters from `[A-Za-z0-9]`.
///
/// # Examples
///
/// ```
/// use shorturl::utils::code_generator::generate_code;
///
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true if the code collides with a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code(6).len(), 6);
        assert_eq!(generate_code(12).len(), 12);
        assert!(generate_code(0).is_empty());
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        for _ in 0..200 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code(8)).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generator_covers_all_character_classes() {
        let sample: String = (0..500).map(|_| generate_code(DEFAULT_CODE_LENGTH)).collect();

        assert!(sample.chars().any(|c| c.is_ascii_uppercase()));
        assert!(sample.chars().any(|c| c.is_ascii_lowercase()));
        assert!(sample.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_default_generator_length() {
        let generator = CodeGenerator::default();
        assert_eq!(generator.length(), 6);
        assert_eq!(generator.generate().len(), 6);
    }

    #[test]
    fn test_reserved_codes() {
        assert!(is_reserved("health"));
        assert!(is_reserved("stats"));
        assert!(!is_reserved("Health"));
        assert!(!is_reserved("abc123"));
    }
}
