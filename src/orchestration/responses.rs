//! Response bodies for successful requests
//!
//! Secrets stay wrapped in `SecretString` until the moment they are
//! serialized into the response.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};

pub const WELCOME_MESSAGE: &str = "Welcome to the ChirpStack, EdgeX, and Root Token Manager!";

/// `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

impl Default for WelcomeResponse {
    fn default() -> Self {
        Self {
            message: WELCOME_MESSAGE,
        }
    }
}

/// `GET /generate-password/{username}`
#[derive(Debug, Serialize)]
pub struct PasswordResponse {
    pub message: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

/// `GET /create-chirpstack-api-key/{name}`
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub name: String,
    pub result: ApiKeyResult,
}

#[derive(Debug, Serialize)]
pub struct ApiKeyResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "expose_optional")]
    pub token: Option<SecretString>,
}

/// `GET /tokens`
#[derive(Debug, Serialize)]
pub struct TokensResponse {
    #[serde(serialize_with = "expose_all")]
    pub tokens: Vec<SecretString>,
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

fn expose_optional<S: Serializer>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(secret) => serializer.serialize_some(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}

fn expose_all<S: Serializer>(secrets: &[SecretString], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(secrets.iter().map(|s| s.expose_secret()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_response_exposes_only_in_json() {
        let response = PasswordResponse {
            message: "User alice created successfully.".to_string(),
            password: SecretString::from("hunter2-hunter2"),
        };

        assert!(!format!("{:?}", response).contains("hunter2"));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "message": "User alice created successfully.",
                "password": "hunter2-hunter2"
            })
        );
    }

    #[test]
    fn test_api_key_result_omits_missing_fields() {
        let response = ApiKeyResponse {
            name: "my-key".to_string(),
            result: ApiKeyResult {
                id: None,
                token: Some(SecretString::from("xyz789")),
            },
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "name": "my-key", "result": { "token": "xyz789" } })
        );
    }

    #[test]
    fn test_tokens_response() {
        let response = TokensResponse {
            tokens: vec![SecretString::from("t1"), SecretString::from("t1")],
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "tokens": ["t1", "t1"] })
        );
    }

    #[test]
    fn test_welcome_response() {
        assert_eq!(
            serde_json::to_value(WelcomeResponse::default()).unwrap(),
            json!({ "message": "Welcome to the ChirpStack, EdgeX, and Root Token Manager!" })
        );
    }
}
