//! Configuration loader for edge-admin-proxy
//!
//! This module provides configuration loading, layering and validation.

use super::config::ProxyConfig;
use crate::core::error::ConfigError;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Configuration file looked up in the working directory
pub const CONFIG_FILENAME: &str = ".admin-proxy.yaml";

lazy_static! {
    /// Environment variable reference (${VAR_NAME})
    static ref ENV_VAR_REGEX: Regex = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

    /// Docker container names: [a-zA-Z0-9][a-zA-Z0-9_.-]*
    static ref CONTAINER_NAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.-]*$").unwrap();
}

/// Configuration load options
#[derive(Debug, Clone, Default)]
pub struct ConfigLoadOptions {
    /// Explicit config file; must exist when given
    pub config_path: Option<PathBuf>,

    /// Directory searched for `.admin-proxy.yaml` when no explicit path is given
    pub search_dir: Option<PathBuf>,

    /// Environment variables
    pub env: HashMap<String, String>,

    /// Bind address from the command line (highest priority)
    pub bind_override: Option<String>,
}

/// Configuration file loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from multiple sources with priority
    ///
    /// Priority (high to low):
    /// 1. CLI arguments
    /// 2. Environment variables
    /// 3. Config file (`--config` or ./.admin-proxy.yaml)
    /// 4. Default values
    pub async fn load(options: ConfigLoadOptions) -> Result<ProxyConfig, ConfigError> {
        let mut config = match &options.config_path {
            Some(path) => Self::load_config_file(path, &options.env).await?,
            None => {
                let dir = options
                    .search_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("."));
                let path = dir.join(CONFIG_FILENAME);
                if path.exists() {
                    Self::load_config_file(&path, &options.env).await?
                } else {
                    ProxyConfig::default()
                }
            }
        };

        Self::apply_env(&mut config, &options.env)?;

        if let Some(bind) = options.bind_override {
            config.server.bind = bind;
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file, expanding ${VAR} references
    async fn load_config_file(
        path: &Path,
        env: &HashMap<String, String>,
    ) -> Result<ProxyConfig, ConfigError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::ReadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut config: ProxyConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::expand_env_vars(&mut config, env);
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Apply ADMIN_PROXY_* environment overrides
    fn apply_env(
        config: &mut ProxyConfig,
        env: &HashMap<String, String>,
    ) -> Result<(), ConfigError> {
        let string_overrides: [(&str, &mut String); 6] = [
            ("ADMIN_PROXY_BIND", &mut config.server.bind),
            ("ADMIN_PROXY_DOCKER_BINARY", &mut config.runtime.binary),
            (
                "ADMIN_PROXY_EDGE_PROXY_CONTAINER",
                &mut config.containers.edge_proxy,
            ),
            (
                "ADMIN_PROXY_NETWORK_SERVER_CONTAINER",
                &mut config.containers.network_server,
            ),
            (
                "ADMIN_PROXY_SECRET_STORE_CONTAINER",
                &mut config.containers.secret_store,
            ),
            (
                "ADMIN_PROXY_ROOT_TOKEN_PATH",
                &mut config.secret_store.root_token_path,
            ),
        ];

        for (key, field) in string_overrides {
            if let Some(value) = env.get(key) {
                *field = value.clone();
            }
        }

        if let Some(raw) = env.get("ADMIN_PROXY_COMMAND_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "ADMIN_PROXY_COMMAND_TIMEOUT_SECS".to_string(),
                    message: format!("must be a positive integer: {e}"),
                })?;
            config.runtime.command_timeout_secs = Some(secs);
        }

        Ok(())
    }

    /// Expand ${VAR} references in every string setting
    fn expand_env_vars(config: &mut ProxyConfig, env: &HashMap<String, String>) {
        let fields = [
            &mut config.server.bind,
            &mut config.runtime.binary,
            &mut config.containers.edge_proxy,
            &mut config.containers.network_server,
            &mut config.containers.secret_store,
            &mut config.edgex.secrets_config_bin,
            &mut config.edgex.token_ttl,
            &mut config.edgex.jwt_ttl,
            &mut config.chirpstack.config_dir,
            &mut config.secret_store.root_token_path,
        ];

        for field in fields {
            *field = Self::expand_string(field, env);
        }
        for arg in config.runtime.exec_args.iter_mut() {
            *arg = Self::expand_string(arg, env);
        }
    }

    /// Expand environment variables in a single string
    fn expand_string(input: &str, env: &HashMap<String, String>) -> String {
        let mut result = input.to_string();
        for cap in ENV_VAR_REGEX.captures_iter(input) {
            let var_name = &cap[1];
            match env.get(var_name) {
                Some(value) => {
                    result = result.replace(&format!("${{{}}}", var_name), value);
                }
                None => tracing::warn!(var = var_name, "environment variable not found"),
            }
        }
        result
    }

    /// Validate configuration
    pub fn validate(config: &ProxyConfig) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if config.server.bind.parse::<SocketAddr>().is_err() {
            errors.push(format!(
                "server.bind '{}' is not a socket address",
                config.server.bind
            ));
        }

        if config.runtime.binary.trim().is_empty() {
            errors.push("runtime.binary must not be empty".to_string());
        }

        if config.runtime.command_timeout_secs == Some(0) {
            errors.push("runtime.commandTimeoutSecs must be greater than zero".to_string());
        }

        let containers = [
            ("containers.edgeProxy", &config.containers.edge_proxy),
            ("containers.networkServer", &config.containers.network_server),
            ("containers.secretStore", &config.containers.secret_store),
        ];
        for (field, name) in containers {
            if !CONTAINER_NAME_REGEX.is_match(name) {
                errors.push(format!("{field} '{name}' is not a valid container name"));
            }
        }

        if !config.secret_store.root_token_path.starts_with('/') {
            errors.push(format!(
                "secretStore.rootTokenPath '{}' must be an absolute path",
                config.secret_store.root_token_path
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_defaults_when_no_file() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::load(ConfigLoadOptions {
            search_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(config, ProxyConfig::default());
    }

    #[tokio::test]
    async fn test_project_file_is_picked_up() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "containers:\n  secretStore: vault-setup\n",
        )
        .unwrap();

        let config = ConfigLoader::load(ConfigLoadOptions {
            search_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(config.containers.secret_store, "vault-setup");
        assert_eq!(config.containers.edge_proxy, "edgex-security-proxy-setup");
    }

    #[tokio::test]
    async fn test_priority_cli_over_env_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proxy.yaml");
        std::fs::write(
            &path,
            "server:\n  bind: 127.0.0.1:7000\ncontainers:\n  edgeProxy: from-file\n  networkServer: from-file\n",
        )
        .unwrap();

        let config = ConfigLoader::load(ConfigLoadOptions {
            config_path: Some(path),
            env: env(&[
                ("ADMIN_PROXY_BIND", "127.0.0.1:7001"),
                ("ADMIN_PROXY_EDGE_PROXY_CONTAINER", "from-env"),
            ]),
            bind_override: Some("127.0.0.1:7002".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:7002");
        assert_eq!(config.containers.edge_proxy, "from-env");
        assert_eq!(config.containers.network_server, "from-file");
    }

    #[tokio::test]
    async fn test_env_var_expansion_in_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proxy.yaml");
        std::fs::write(
            &path,
            "secretStore:\n  rootTokenPath: ${VAULT_DIR}/resp-init.json\n",
        )
        .unwrap();

        let config = ConfigLoader::load(ConfigLoadOptions {
            config_path: Some(path),
            env: env(&[("VAULT_DIR", "/srv/vault")]),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(config.secret_store.root_token_path, "/srv/vault/resp-init.json");
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = ConfigLoader::load(ConfigLoadOptions {
            config_path: Some(dir.path().join("nope.yaml")),
            ..Default::default()
        })
        .await;

        assert!(matches!(result, Err(ConfigError::ReadFailed { .. })));
    }

    #[tokio::test]
    async fn test_malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proxy.yaml");
        std::fs::write(&path, "containers: [unterminated").unwrap();

        let result = ConfigLoader::load(ConfigLoadOptions {
            config_path: Some(path),
            ..Default::default()
        })
        .await;

        assert!(matches!(result, Err(ConfigError::ParseFailed { .. })));
    }

    #[tokio::test]
    async fn test_bad_timeout_env() {
        let dir = TempDir::new().unwrap();
        let result = ConfigLoader::load(ConfigLoadOptions {
            search_dir: Some(dir.path().to_path_buf()),
            env: env(&[("ADMIN_PROXY_COMMAND_TIMEOUT_SECS", "soon")]),
            ..Default::default()
        })
        .await;

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ProxyConfig::default();
        config.containers.network_server = "chirp stack; rm -rf /".to_string();
        config.runtime.binary = " ".to_string();
        config.runtime.command_timeout_secs = Some(0);
        config.secret_store.root_token_path = "relative/resp-init.json".to_string();
        config.server.bind = "localhost".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::Invalid { errors }) => assert_eq!(errors.len(), 5),
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(ConfigLoader::validate(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_expand_string_leaves_unknown_vars() {
        let expanded = ConfigLoader::expand_string("${MISSING}/x", &HashMap::new());
        assert_eq!(expanded, "${MISSING}/x");
    }
}
