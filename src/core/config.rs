//! Configuration structures and types for edge-admin-proxy
//!
//! Every container name, path and flag value the proxy hands to the
//! container runtime lives here, so a deployment can substitute them without
//! touching the handlers.

use super::traits::ContainerRole;
use serde::{Deserialize, Serialize};

/// Root configuration object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxyConfig {
    /// HTTP listener settings
    pub server: ServerConfig,

    /// Container runtime invocation
    pub runtime: RuntimeConfig,

    /// Names of the managed containers
    pub containers: ContainersConfig,

    /// EdgeX proxy user settings
    pub edgex: EdgexConfig,

    /// ChirpStack CLI settings
    pub chirpstack: ChirpstackConfig,

    /// Secret store settings
    pub secret_store: SecretStoreConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// Socket address to bind (default: "0.0.0.0:8000")
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

/// How commands reach a container.
///
/// The final argv is `binary exec_args... <container> args...`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Container runtime executable (default: "docker")
    pub binary: String,

    /// Arguments placed before the container name (default: ["exec"])
    pub exec_args: Vec<String>,

    /// Kill commands that run longer than this. Unset means no deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_timeout_secs: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
            exec_args: vec!["exec".to_string()],
            command_timeout_secs: None,
        }
    }
}

/// Names of the managed containers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainersConfig {
    pub edge_proxy: String,
    pub network_server: String,
    pub secret_store: String,
}

impl Default for ContainersConfig {
    fn default() -> Self {
        Self {
            edge_proxy: "edgex-security-proxy-setup".to_string(),
            network_server: "chirpstack-chirpstack-1".to_string(),
            secret_store: "edgex-security-secretstore-setup".to_string(),
        }
    }
}

impl ContainersConfig {
    /// Container name configured for a role
    pub fn name(&self, role: ContainerRole) -> &str {
        match role {
            ContainerRole::EdgeProxy => &self.edge_proxy,
            ContainerRole::NetworkServer => &self.network_server,
            ContainerRole::SecretStore => &self.secret_store,
        }
    }
}

/// EdgeX `secrets-config proxy adduser` flags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgexConfig {
    /// Path of the secrets-config tool inside the container
    pub secrets_config_bin: String,

    /// --tokenTTL value (default: "60")
    pub token_ttl: String,

    /// --jwtTTL value (default: "119m")
    pub jwt_ttl: String,
}

impl Default for EdgexConfig {
    fn default() -> Self {
        Self {
            secrets_config_bin: "./secrets-config".to_string(),
            token_ttl: "60".to_string(),
            jwt_ttl: "119m".to_string(),
        }
    }
}

/// ChirpStack CLI settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ChirpstackConfig {
    /// --config directory passed to the chirpstack binary
    pub config_dir: String,
}

impl Default for ChirpstackConfig {
    fn default() -> Self {
        Self {
            config_dir: "/etc/chirpstack".to_string(),
        }
    }
}

/// Secret store settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SecretStoreConfig {
    /// Vault init response file holding the root token(s)
    pub root_token_path: String,
}

impl Default for SecretStoreConfig {
    fn default() -> Self {
        Self {
            root_token_path: "/vault/config/assets/resp-init.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProxyConfig::default();
        assert_eq!(config.runtime.binary, "docker");
        assert_eq!(config.runtime.exec_args, vec!["exec".to_string()]);
        assert_eq!(config.runtime.command_timeout_secs, None);
        assert_eq!(config.containers.edge_proxy, "edgex-security-proxy-setup");
        assert_eq!(
            config.secret_store.root_token_path,
            "/vault/config/assets/resp-init.json"
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let yaml = r#"
containers:
  networkServer: chirpstack-test
runtime:
  commandTimeoutSecs: 15
"#;
        let config: ProxyConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.containers.network_server, "chirpstack-test");
        // untouched fields keep their defaults
        assert_eq!(config.containers.edge_proxy, "edgex-security-proxy-setup");
        assert_eq!(config.runtime.binary, "docker");
        assert_eq!(config.runtime.command_timeout_secs, Some(15));
        assert_eq!(config.edgex.jwt_ttl, "119m");
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let yaml = serde_yaml::to_string(&ProxyConfig::default()).unwrap();
        assert!(yaml.contains("rootTokenPath:"));
        assert!(yaml.contains("networkServer:"));
        assert!(!yaml.contains("commandTimeoutSecs"));
    }

    #[test]
    fn test_container_lookup() {
        let containers = ContainersConfig::default();
        assert_eq!(
            containers.name(ContainerRole::NetworkServer),
            "chirpstack-chirpstack-1"
        );
        assert_eq!(
            containers.name(ContainerRole::SecretStore),
            "edgex-security-secretstore-setup"
        );
    }
}
