//! Parsers for container command output
//!
//! Each parser turns the stdout of one container command into a
//! `ParsedOutcome`. They are pure functions of their input: no I/O, no
//! state carried between calls.

pub mod api_key;
pub mod credential;
pub mod root_tokens;

pub use api_key::parse_api_key_output;
pub use credential::parse_credential_output;
pub use root_tokens::parse_token_list_output;

use secrecy::SecretString;

/// Structured result of parsing command output
#[derive(Debug)]
pub enum ParsedOutcome {
    /// EdgeX proxy user credentials
    Credential {
        username: String,
        password: SecretString,
    },

    /// ChirpStack API key; either half may be missing from the output
    ApiKey {
        id: Option<String>,
        token: Option<SecretString>,
    },

    /// Root tokens in document order, duplicates preserved
    TokenList { tokens: Vec<SecretString> },

    /// The output parsed but held no root token
    NoTokens { raw_output: String },

    /// The output did not have the expected shape
    ParseFailure { reason: String, raw_output: String },
}

impl ParsedOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Credential { .. } => "credential",
            Self::ApiKey { .. } => "api_key",
            Self::TokenList { .. } => "token_list",
            Self::NoTokens { .. } => "no_tokens",
            Self::ParseFailure { .. } => "parse_failure",
        }
    }
}
