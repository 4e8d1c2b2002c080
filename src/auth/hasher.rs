/**
 * Password Hashing and Strength Validation
 *
 * This module wraps bcrypt for one-way password hashing and implements the
 * account password policy.
 *
 * # Security
 *
 * - Hashes embed their salt and cost parameters, so verification needs no
 *   side channel
 * - Verification is constant-time inside bcrypt and never errors outward:
 *   a malformed stored hash verifies as `false`
 * - The strength policy is first-match-wins: checks run in a fixed order
 *   and only the first failing rule's message is reported
 */

use bcrypt::BcryptError;

/// bcrypt work factor used for all account passwords
pub const HASH_COST: u32 = 10;

/// Characters that satisfy the special-character rule
pub const SPECIAL_CHARS: &str = "!@#$%^&*";

/// Hash a password with bcrypt
///
/// # Arguments
/// * `password` - Plaintext password
///
/// # Returns
/// The salted hash string, or an error if hashing itself fails
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    bcrypt::hash(password, HASH_COST)
}

/// Verify a password against a stored hash
///
/// Returns `false` both on mismatch and on a malformed stored hash; this
/// function never errors outward.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Validate password strength
///
/// Checks run in a fixed order; the first failing rule's message is
/// returned and later rules are not evaluated.
///
/// Rules, in order:
/// 1. At least 8 characters
/// 2. At least one uppercase letter
/// 3. At least one lowercase letter
/// 4. At least one digit
/// 5. At least one special character from `!@#$%^&*`
pub fn validate_strength(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number".to_string());
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err("Password must contain at least one special character (!@#$%^&*)".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_round_trip() {
        let hash = hash_password("Abcdef1!").unwrap();
        assert!(verify_password("Abcdef1!", &hash));
        assert!(!verify_password("Abcdef1?", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("Abcdef1!").unwrap();
        let second = hash_password("Abcdef1!").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("Abcdef1!", &first));
        assert!(verify_password("Abcdef1!", &second));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!verify_password("Abcdef1!", "not-a-bcrypt-hash"));
        assert!(!verify_password("Abcdef1!", ""));
    }

    #[test]
    fn test_strength_accepts_valid_password() {
        assert!(validate_strength("Abcdef1!").is_ok());
    }

    #[test]
    fn test_strength_rejects_short_password() {
        let err = validate_strength("Abcde1!").unwrap_err();
        assert!(err.contains("8 characters"));
    }

    #[test]
    fn test_strength_rejects_missing_uppercase() {
        let err = validate_strength("abcdef1!").unwrap_err();
        assert!(err.contains("uppercase"));
    }

    #[test]
    fn test_strength_rejects_missing_lowercase() {
        let err = validate_strength("ABCDEF1!").unwrap_err();
        assert!(err.contains("lowercase"));
    }

    #[test]
    fn test_strength_rejects_missing_digit() {
        let err = validate_strength("Abcdefg!").unwrap_err();
        assert!(err.contains("number"));
    }

    #[test]
    fn test_strength_rejects_missing_special_char() {
        let err = validate_strength("Abcdefg1").unwrap_err();
        assert!(err.contains("special character"));
    }

    #[test]
    fn test_strength_first_match_wins() {
        // Fails length, uppercase, digit and special at once; only the
        // length message may be reported.
        let err = validate_strength("abc").unwrap_err();
        assert!(err.contains("8 characters"));
        assert!(!err.contains("uppercase"));
    }
}
