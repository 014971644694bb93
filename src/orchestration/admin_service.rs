//! Admin Service - one operation per container capability
//!
//! Every operation runs the same linear pipeline:
//! validate → build command → execute → parse → map to response or error.
//! Nothing is shared between calls except the immutable configuration.

use crate::core::{CommandRequest, CommandResult, CommandRunner, ContainerRole, ProxyConfig, ProxyError};
use crate::orchestration::responses::{ApiKeyResponse, ApiKeyResult, PasswordResponse, TokensResponse};
use crate::parsing::{
    ParsedOutcome, api_key, credential, parse_api_key_output, parse_credential_output,
    parse_token_list_output,
};
use crate::security::mask;
use crate::validation::{validate_api_key_name, validate_username};
use std::sync::Arc;

pub const NO_ROOT_TOKENS: &str = "No root tokens found.";

/// Proxies administrative actions to the managed containers
#[derive(Clone)]
pub struct AdminService {
    config: Arc<ProxyConfig>,
    runner: Arc<dyn CommandRunner>,
}

impl AdminService {
    /// Create a new AdminService
    ///
    /// # Arguments
    ///
    /// * `config` - Container names, paths and flag values
    /// * `runner` - Executes the built commands
    pub fn new(config: Arc<ProxyConfig>, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// Create an EdgeX proxy user and return its generated password
    pub async fn generate_password(&self, username: &str) -> Result<PasswordResponse, ProxyError> {
        validate_username(username)?;

        let edgex = &self.config.edgex;
        let request = CommandRequest::new(
            ContainerRole::EdgeProxy,
            [
                edgex.secrets_config_bin.as_str(),
                "proxy",
                "adduser",
                "--user",
                username,
                "--tokenTTL",
                edgex.token_ttl.as_str(),
                "--jwtTTL",
                edgex.jwt_ttl.as_str(),
                "--useRootToken",
            ],
        );

        let result = self.run(&request).await?;
        match parse_credential_output(&result.stdout) {
            ParsedOutcome::Credential {
                username: issued_to,
                password,
            } => {
                tracing::info!(
                    username,
                    issued_to = %issued_to,
                    password = %mask(&password),
                    "created edgex proxy user"
                );
                Ok(PasswordResponse {
                    message: format!("User {} created successfully.", username),
                    password,
                })
            }
            outcome => Err(Self::parse_error(
                outcome,
                credential::UNEXPECTED_RESPONSE,
                &result.stdout,
            )),
        }
    }

    /// Create a ChirpStack API key named `name`
    pub async fn create_api_key(&self, name: &str) -> Result<ApiKeyResponse, ProxyError> {
        validate_api_key_name(name)?;

        let request = CommandRequest::new(
            ContainerRole::NetworkServer,
            [
                "chirpstack",
                "--config",
                self.config.chirpstack.config_dir.as_str(),
                "create-api-key",
                "--name",
                name,
            ],
        );

        let result = self.run(&request).await?;
        match parse_api_key_output(&result.stdout) {
            ParsedOutcome::ApiKey { id, token } => {
                tracing::info!(
                    name,
                    id = id.as_deref().unwrap_or(""),
                    token = %token.as_ref().map(mask).unwrap_or_default(),
                    "created chirpstack api key"
                );
                Ok(ApiKeyResponse {
                    name: name.to_string(),
                    result: ApiKeyResult { id, token },
                })
            }
            outcome => Err(Self::parse_error(outcome, api_key::PARSE_FAILED, &result.stdout)),
        }
    }

    /// Read the root token(s) from the vault init file in the secret store
    pub async fn list_root_tokens(&self) -> Result<TokensResponse, ProxyError> {
        let request = CommandRequest::new(
            ContainerRole::SecretStore,
            ["cat", self.config.secret_store.root_token_path.as_str()],
        );

        let result = self.run(&request).await?;
        match parse_token_list_output(&result.stdout) {
            ParsedOutcome::TokenList { tokens } => {
                tracing::info!(count = tokens.len(), "read root tokens");
                Ok(TokensResponse { tokens })
            }
            ParsedOutcome::NoTokens { .. } => {
                tracing::warn!("no root tokens in secret store output");
                Err(ProxyError::EmptyResult {
                    message: NO_ROOT_TOKENS.to_string(),
                })
            }
            outcome => Err(Self::parse_error(outcome, NO_ROOT_TOKENS, &result.stdout)),
        }
    }

    /// Execute a request, turning a failed result into `ProxyError::Execution`
    async fn run(&self, request: &CommandRequest) -> Result<CommandResult, ProxyError> {
        let result = self.runner.execute(request).await;
        if !result.succeeded {
            return Err(ProxyError::Execution {
                message: result.stderr,
            });
        }
        Ok(result)
    }

    /// Parse error for an outcome the operation did not expect.
    ///
    /// `stdout` is the command output the outcome was parsed from; it becomes
    /// `raw_output` unless the parser already reported its own.
    fn parse_error(outcome: ParsedOutcome, fallback_reason: &str, stdout: &str) -> ProxyError {
        let error = match outcome {
            ParsedOutcome::ParseFailure { reason, raw_output } => {
                ProxyError::Parse { reason, raw_output }
            }
            other => {
                tracing::debug!(outcome = other.kind(), "parser returned a foreign outcome");
                ProxyError::Parse {
                    reason: fallback_reason.to_string(),
                    raw_output: stdout.to_string(),
                }
            }
        };
        tracing::warn!(code = error.code(), reason = %error, "command output did not parse");
        error
    }
}
