//! ChirpStack `create-api-key` output

use super::ParsedOutcome;
use secrecy::SecretString;

pub const PARSE_FAILED: &str = "Failed to parse ChirpStack API key";

/// Parse the `id: ...` / `token: ...` lines printed by `chirpstack create-api-key`.
///
/// Only lines starting exactly with `id:` or `token:` count; a later line
/// overwrites an earlier one with the same prefix.
pub fn parse_api_key_output(raw: &str) -> ParsedOutcome {
    let mut id = None;
    let mut token = None;

    for line in raw.split('\n') {
        if let Some(rest) = line.strip_prefix("id:") {
            id = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("token:") {
            token = Some(SecretString::from(rest.trim()));
        }
    }

    if id.is_none() && token.is_none() {
        return ParsedOutcome::ParseFailure {
            reason: PARSE_FAILED.to_string(),
            raw_output: raw.to_string(),
        };
    }

    ParsedOutcome::ApiKey { id, token }
}
