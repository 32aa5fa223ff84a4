use rand::{distr::Alphanumeric, Rng};

use super::SessionId;

/// Length of generated session ids and CSRF state tokens.
const TOKEN_LENGTH: usize = 32;

fn random_token(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Generate a cryptographically random session ID.
pub fn generate_session_id() -> SessionId {
    SessionId::new(random_token(TOKEN_LENGTH))
}

/// Generate a random state parameter for CSRF protection.
pub fn generate_state() -> String {
    random_token(TOKEN_LENGTH)
}

/// Display name for a user whose claims carry no name, derived from the
/// local part of their email address.
pub fn email_to_name(email: &str) -> String {
    match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local.to_string(),
        None if !email.is_empty() => email.to_string(),
        _ => "User".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_session_id_produces_32_char_alphanumeric() {
        let id = generate_session_id();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generate_session_id_is_unique() {
        assert_ne!(generate_session_id(), generate_session_id());
    }

    #[test]
    fn generate_state_produces_32_char_string() {
        assert_eq!(generate_state().len(), 32);
    }

    #[test]
    fn email_to_name_extracts_local_part() {
        assert_eq!(email_to_name("john.doe@example.com"), "john.doe");
        assert_eq!(email_to_name("alice@test.org"), "alice");
    }

    #[test]
    fn email_to_name_handles_malformed_addresses() {
        assert_eq!(email_to_name("no-at-sign"), "no-at-sign");
        assert_eq!(email_to_name("@example.com"), "User");
        assert_eq!(email_to_name(""), "User");
    }
}
