//! Parameter Validator - checks caller-supplied path parameters
//!
//! Parameters reach the container runtime as discrete argv entries, so these
//! checks are about rejecting values the downstream tools would misread, not
//! about shell quoting.
//!
//! # Example
//!
//! ```
//! use edge_admin_proxy::validation::validate_api_key_name;
//!
//! assert!(validate_api_key_name("gateway-key_01").is_ok());
//! assert!(validate_api_key_name("gateway key").is_err());
//! ```

use crate::core::ProxyError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref API_KEY_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// Values API explorers send when a field is left at its example value
const PLACEHOLDER_VALUES: &[&str] = &["string"];

/// Validate a ChirpStack API key name.
///
/// Accepts a non-empty run of ASCII letters, digits, `_` and `-` that is not
/// a placeholder value.
pub fn validate_api_key_name(name: &str) -> Result<(), ProxyError> {
    if !API_KEY_NAME_REGEX.is_match(name) || PLACEHOLDER_VALUES.contains(&name) {
        return Err(ProxyError::Validation {
            field: "name".to_string(),
        });
    }
    Ok(())
}

/// Validate an EdgeX proxy username (must not be empty).
pub fn validate_username(username: &str) -> Result<(), ProxyError> {
    if username.is_empty() {
        return Err(ProxyError::Validation {
            field: "username".to_string(),
        });
    }
    Ok(())
}
