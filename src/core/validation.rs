//! Client-side form checks that run before any network call.

pub const MIN_PASSWORD_LEN: usize = 8;

pub const REQUIRED_FIELDS: &str = "Email and password are required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match";

/// Returns the error to show, or `None` if the login form may be submitted.
pub fn validate_login(email: &str, password: &str) -> Option<&'static str> {
    if email.trim().is_empty() || password.is_empty() {
        return Some(REQUIRED_FIELDS);
    }
    None
}

/// Checks run in the order the user would hit them: required, length, confirmation.
pub fn validate_signup(email: &str, password: &str, confirm: &str) -> Option<&'static str> {
    if email.trim().is_empty() || password.is_empty() {
        return Some(REQUIRED_FIELDS);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some(PASSWORD_TOO_SHORT);
    }
    if password != confirm {
        return Some(PASSWORDS_DIFFER);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(validate_login("", "secret"), Some(REQUIRED_FIELDS));
        assert_eq!(validate_login("  ", "secret"), Some(REQUIRED_FIELDS));
        assert_eq!(validate_login("a@b.com", ""), Some(REQUIRED_FIELDS));
        assert_eq!(validate_login("a@b.com", "x"), None);
    }

    #[test]
    fn seven_char_password_is_too_short() {
        assert_eq!(
            validate_signup("a@b.com", "1234567", "1234567"),
            Some(PASSWORD_TOO_SHORT)
        );
    }

    #[test]
    fn length_is_checked_before_confirmation() {
        assert_eq!(
            validate_signup("a@b.com", "short", "different"),
            Some(PASSWORD_TOO_SHORT)
        );
    }

    #[test]
    fn mismatched_confirmation() {
        assert_eq!(
            validate_signup("a@b.com", "12345678", "12345679"),
            Some(PASSWORDS_DIFFER)
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 4 chars, 8+ bytes
        assert_eq!(
            validate_signup("a@b.com", "éééé", "éééé"),
            Some(PASSWORD_TOO_SHORT)
        );
    }

    #[test]
    fn valid_signup_passes() {
        assert_eq!(validate_signup("a@b.com", "12345678", "12345678"), None);
    }
}
