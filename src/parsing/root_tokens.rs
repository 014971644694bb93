//! Vault init file (`resp-init.json`) root tokens

use super::ParsedOutcome;
use lazy_static::lazy_static;
use regex::Regex;
use secrecy::SecretString;

lazy_static! {
    static ref ROOT_TOKEN_REGEX: Regex = Regex::new(r#""root_token"\s*:\s*"([^"]+)""#).unwrap();
}

/// Extract every `"root_token": "<value>"` occurrence, in document order.
///
/// The input is scanned as text rather than decoded as JSON, so repeated keys
/// and surrounding noise are tolerated and duplicates are kept.
pub fn parse_token_list_output(raw: &str) -> ParsedOutcome {
    let tokens: Vec<SecretString> = ROOT_TOKEN_REGEX
        .captures_iter(raw)
        .map(|cap| SecretString::from(&cap[1]))
        .collect();

    if tokens.is_empty() {
        return ParsedOutcome::NoTokens {
            raw_output: raw.to_string(),
        };
    }

    ParsedOutcome::TokenList { tokens }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn tokens(raw: &str) -> Vec<String> {
        match parse_token_list_output(raw) {
            ParsedOutcome::TokenList { tokens } => tokens
                .iter()
                .map(|t| t.expose_secret().to_string())
                .collect(),
            other => panic!("expected token list, got {}", other.kind()),
        }
    }

    #[test]
    fn test_tokens_in_document_order() {
        assert_eq!(
            tokens(r#"{"root_token": "t1", "other": "x", "root_token": "t2"}"#),
            vec!["t1", "t2"]
        );
    }

    #[test]
    fn test_duplicates_preserved() {
        assert_eq!(
            tokens(r#""root_token":"same" "root_token" : "same""#),
            vec!["same", "same"]
        );
    }

    #[test]
    fn test_vault_init_file() {
        let raw = r#"{
  "keys": ["a1b2"],
  "keys_base64": ["obI="],
  "root_token": "hvs.CAESIJ3kq"
}"#;
        assert_eq!(tokens(raw), vec!["hvs.CAESIJ3kq"]);
    }

    #[test]
    fn test_similar_keys_ignored() {
        assert_eq!(
            tokens(r#"{"root_tokens": "no", "xroot_token": "no", "root_token": "yes"}"#),
            vec!["yes"]
        );
    }

    #[test]
    fn test_zero_matches_is_no_tokens() {
        let raw = r#"{"root_token": ""}"#;
        match parse_token_list_output(raw) {
            ParsedOutcome::NoTokens { raw_output } => assert_eq!(raw_output, raw),
            other => panic!("expected no tokens, got {}", other.kind()),
        }
    }
}
