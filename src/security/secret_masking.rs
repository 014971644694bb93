//! Masking helpers for secrets that end up in log lines
//!
//! Passwords and tokens issued by the containers are carried as
//! `SecretString`; when a log line needs to identify one, it logs the
//! masked form produced here.

use secrecy::{ExposeSecret, SecretString};

/// Masks a secret for safe logging
///
/// Shows only the first 3 and last 3 characters for identification purposes.
/// Secrets shorter than 10 characters are fully masked as "****".
///
/// # Examples
///
/// ```
/// use edge_admin_proxy::security::mask_secret;
///
/// assert_eq!(mask_secret("abcdef123456"), "abc...456");
/// assert_eq!(mask_secret("short"), "****");
/// ```
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 10 {
        return "****".to_string();
    }

    let prefix: String = chars[..3].iter().collect();
    let suffix: String = chars[chars.len() - 3..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

/// Masked form of a `SecretString`
pub fn mask(secret: &SecretString) -> String {
    mask_secret(secret.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret_with_short_secret() {
        assert_eq!(mask_secret("short"), "****");
        assert_eq!(mask_secret(""), "****");
        assert_eq!(mask_secret("123456789"), "****");
    }

    #[test]
    fn test_mask_secret_with_long_secret() {
        assert_eq!(mask_secret("abcdef123456"), "abc...456");
        assert_eq!(mask_secret("hvs.very-long-root-token"), "hvs...ken");
    }

    #[test]
    fn test_mask_secret_multibyte() {
        assert_eq!(mask_secret("ééé-password-ààà"), "ééé...ààà");
    }

    #[test]
    fn test_mask_secret_string() {
        let secret = SecretString::from("eyJhbGciOiJIUzI1NiJ9");
        assert_eq!(mask(&secret), "eyJ...iJ9");
    }
}
