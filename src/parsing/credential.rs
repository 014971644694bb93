//! EdgeX `secrets-config proxy adduser` output

use super::ParsedOutcome;
use secrecy::SecretString;
use serde_json::{Map, Value};

pub const UNEXPECTED_RESPONSE: &str = "Unexpected EdgeX response";
pub const DEFAULT_USERNAME: &str = "N/A";
pub const DEFAULT_PASSWORD: &str = "No password found";

/// Parse the JSON object printed by `secrets-config proxy adduser`.
///
/// Anything other than a non-empty JSON object is a `ParseFailure` carrying
/// the raw text. Missing fields fall back to fixed placeholder values.
pub fn parse_credential_output(raw: &str) -> ParsedOutcome {
    let object = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) if !map.is_empty() => map,
        _ => {
            return ParsedOutcome::ParseFailure {
                reason: UNEXPECTED_RESPONSE.to_string(),
                raw_output: raw.to_string(),
            };
        }
    };

    ParsedOutcome::Credential {
        username: field_or(&object, "username", DEFAULT_USERNAME),
        password: SecretString::from(field_or(&object, "password", DEFAULT_PASSWORD)),
    }
}

fn field_or(object: &Map<String, Value>, key: &str, default: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn credential(raw: &str) -> (String, String) {
        match parse_credential_output(raw) {
            ParsedOutcome::Credential { username, password } => {
                (username, password.expose_secret().to_string())
            }
            other => panic!("expected credential, got {}", other.kind()),
        }
    }

    fn failure(raw: &str) -> (String, String) {
        match parse_credential_output(raw) {
            ParsedOutcome::ParseFailure { reason, raw_output } => (reason, raw_output),
            other => panic!("expected parse failure, got {}", other.kind()),
        }
    }

    #[test]
    fn test_both_fields() {
        let (username, password) =
            credential(r#"{"username": "alice", "password": "eyJhbGciOiJIUzI1NiJ9"}"#);
        assert_eq!(username, "alice");
        assert_eq!(password, "eyJhbGciOiJIUzI1NiJ9");
    }

    #[test]
    fn test_missing_username_defaults() {
        let (username, password) = credential(r#"{"password": "p4ss"}"#);
        assert_eq!(username, "N/A");
        assert_eq!(password, "p4ss");
    }

    #[test]
    fn test_missing_password_defaults() {
        let (username, password) = credential(r#"{"username": "bob", "extra": 1}"#);
        assert_eq!(username, "bob");
        assert_eq!(password, "No password found");
    }

    #[test]
    fn test_non_string_values_rendered_as_json() {
        let (username, password) = credential(r#"{"username": 42, "password": null}"#);
        assert_eq!(username, "42");
        assert_eq!(password, "null");
    }

    #[test]
    fn test_malformed_json_keeps_raw_text() {
        let raw = "Error: no root token\n  {partial";
        let (reason, raw_output) = failure(raw);
        assert_eq!(reason, "Unexpected EdgeX response");
        assert_eq!(raw_output, raw);
    }

    #[test]
    fn test_empty_object_is_failure() {
        let (_, raw_output) = failure("{}");
        assert_eq!(raw_output, "{}");
    }

    #[test]
    fn test_non_object_json_is_failure() {
        failure(r#"["alice", "secret"]"#);
        failure(r#""just a string""#);
        failure("");
    }
}
