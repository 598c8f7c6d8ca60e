//! Short code generation and validation utilities.
//!
//! Generated codes are drawn uniformly from the 62-symbol alphanumeric
//! alphabet. Custom codes supplied by users are validated for length and
//! character set; uniqueness is checked by the caller against storage.

use rand::Rng;
use rand::distr::Alphanumeric;
use std::collections::HashSet;

/// Length of generated codes before any collision-driven growth.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Attempts per length tier before moving to a longer code.
const MAX_ATTEMPTS_PER_LENGTH: usize = 100;

const MIN_CUSTOM_CODE_LENGTH: usize = 3;
const MAX_CUSTOM_CODE_LENGTH: usize = 20;

/// Reasons a custom short code is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("Code must not be empty")]
    EmptyCode,

    #[error("Code may only contain letters, digits, hyphens and underscores")]
    InvalidFormat,

    #[error("Code must be at least 3 characters")]
    TooShort,

    #[error("Code must be at most 20 characters")]
    TooLong,
}

/// Generates a random alphanumeric code of exactly `length` characters.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Generates a code that is not present in `existing`.
///
/// Tries up to 100 random codes of `length` characters; when every attempt
/// collides, moves on to `length + 1` and repeats. Never fails.
///
/// # Examples
///
/// ```ignore
/// let existing = HashSet::from(["abc1234".to_string()]);
/// let code = generate_unique_code(&existing, DEFAULT_CODE_LENGTH);
/// assert!(!existing.contains(&code));
/// ```
pub fn generate_unique_code(existing: &HashSet<String>, length: usize) -> String {
    generate_unique_code_with(&mut rand::rng(), existing, length)
}

/// Same as [`generate_unique_code`] with a caller-supplied random source.
pub fn generate_unique_code_with<R: Rng + ?Sized>(
    rng: &mut R,
    existing: &HashSet<String>,
    length: usize,
) -> String {
    let mut length = length.max(1);

    loop {
        for _ in 0..MAX_ATTEMPTS_PER_LENGTH {
            let code = generate_code(rng, length);
            if !existing.contains(&code) {
                return code;
            }
        }

        tracing::warn!(length, "Code space exhausted at this length, growing code");
        length += 1;
    }
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Not blank
/// - Allowed characters: ASCII letters, digits, `-`, `_`
/// - Length: 3-20 characters
///
/// # Errors
///
/// Returns the first violated rule, checked in the order above.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("go-od_1").is_ok());
/// assert_eq!(validate_custom_code("ab"), Err(CodeError::TooShort));
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), CodeError> {
    if code.trim().is_empty() {
        return Err(CodeError::EmptyCode);
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CodeError::InvalidFormat);
    }

    if code.len() < MIN_CUSTOM_CODE_LENGTH {
        return Err(CodeError::TooShort);
    }

    if code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(CodeError::TooLong);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn all_single_char_codes() -> HashSet<String> {
        ('a'..='z')
            .chain('A'..='Z')
            .chain('0'..='9')
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn test_generate_code_has_requested_length() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate_code(&mut rng, 7).len(), 7);
        assert_eq!(generate_code(&mut rng, 12).len(), 12);
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let code = generate_code(&mut rng, 10);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_unique_code_default_length() {
        let code = generate_unique_code(&HashSet::new(), DEFAULT_CODE_LENGTH);
        assert_eq!(code.len(), 7);
    }

    #[test]
    fn test_generate_unique_code_avoids_existing() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut existing = HashSet::new();

        for _ in 0..500 {
            let code = generate_unique_code_with(&mut rng, &existing, 3);
            assert!(!existing.contains(&code));
            existing.insert(code);
        }

        assert_eq!(existing.len(), 500);
    }

    #[test]
    fn test_generate_unique_code_grows_when_tier_exhausted() {
        let existing = all_single_char_codes();
        assert_eq!(existing.len(), 62);

        let code = generate_unique_code(&existing, 1);

        assert_eq!(code.len(), 2);
        assert!(!existing.contains(&code));
    }

    #[test]
    fn test_generate_unique_code_zero_length_treated_as_one() {
        let code = generate_unique_code(&HashSet::new(), 0);
        assert_eq!(code.len(), 1);
    }

    #[test]
    fn test_validate_valid_code() {
        assert!(validate_custom_code("go-od_1").is_ok());
        assert!(validate_custom_code("abc").is_ok());
        assert!(validate_custom_code(&"a".repeat(20)).is_ok());
        assert!(validate_custom_code("MixedCase99").is_ok());
    }

    #[test]
    fn test_validate_too_short() {
        assert_eq!(validate_custom_code("ab"), Err(CodeError::TooShort));
    }

    #[test]
    fn test_validate_too_long() {
        assert_eq!(
            validate_custom_code(&"a".repeat(21)),
            Err(CodeError::TooLong)
        );
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate_custom_code(""), Err(CodeError::EmptyCode));
        assert_eq!(validate_custom_code("   "), Err(CodeError::EmptyCode));
    }

    #[test]
    fn test_validate_invalid_characters() {
        assert_eq!(validate_custom_code("my code"), Err(CodeError::InvalidFormat));
        assert_eq!(validate_custom_code("promo!"), Err(CodeError::InvalidFormat));
        assert_eq!(validate_custom_code("кириллица"), Err(CodeError::InvalidFormat));
    }

    #[test]
    fn test_validate_format_checked_before_length() {
        assert_eq!(validate_custom_code("a!"), Err(CodeError::InvalidFormat));
    }
}
