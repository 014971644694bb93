//! ContainerCommandExecutor: runs commands inside the managed containers
//!
//! # Security Features
//!
//! - **Container whitelist**: only the three configured containers can be targeted
//! - **Program whitelist**: each container only runs the one program it is used for
//! - **Injection prevention**: arguments are passed as an argv vector to
//!   `tokio::process::Command`, never interpolated into a shell string
//! - **Optional timeout**: commands can be bounded; unbounded by default
//!
//! # Example
//!
//! ```rust,no_run
//! use edge_admin_proxy::core::{CommandRequest, CommandRunner, ContainerRole, ProxyConfig};
//! use edge_admin_proxy::security::ContainerCommandExecutor;
//!
//! # async fn run() {
//! let executor = ContainerCommandExecutor::from_config(&ProxyConfig::default());
//! let request = CommandRequest::new(
//!     ContainerRole::SecretStore,
//!     ["cat", "/vault/config/assets/resp-init.json"],
//! );
//! let result = executor.execute(&request).await;
//! println!("{}", result.stdout);
//! # }
//! ```

use crate::core::{CommandRequest, CommandResult, CommandRunner, ContainerRole, ProxyConfig};
use async_trait::async_trait;
use std::collections::HashMap;
use std::process::{Output, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Errors that can occur during command execution
#[derive(Error, Debug)]
pub enum CommandError {
    /// Program is not allowed to run in the target container
    #[error("Program '{program}' is not allowed in the {container} container")]
    ProgramNotAllowed {
        container: ContainerRole,
        program: String,
    },

    /// Command execution failed (e.g., runtime binary not found, permission denied)
    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),

    /// Command exceeded the timeout duration
    #[error("Command timeout after {0:?}")]
    Timeout(Duration),
}

/// Executes commands through the container runtime (`docker exec` by default)
#[derive(Debug, Clone)]
pub struct ContainerCommandExecutor {
    /// Runtime executable
    binary: String,
    /// Arguments placed between the binary and the container name
    exec_args: Vec<String>,
    /// Container name per role
    containers: HashMap<ContainerRole, String>,
    /// Program each container is allowed to run
    allowed_programs: HashMap<ContainerRole, String>,
    /// Optional timeout for command execution
    timeout: Option<Duration>,
}

impl ContainerCommandExecutor {
    /// Build an executor from the proxy configuration.
    pub fn from_config(config: &ProxyConfig) -> Self {
        let containers = ContainerRole::ALL
            .into_iter()
            .map(|role| (role, config.containers.name(role).to_string()))
            .collect();

        let allowed_programs = HashMap::from([
            (
                ContainerRole::EdgeProxy,
                config.edgex.secrets_config_bin.clone(),
            ),
            (ContainerRole::NetworkServer, "chirpstack".to_string()),
            (ContainerRole::SecretStore, "cat".to_string()),
        ]);

        Self {
            binary: config.runtime.binary.clone(),
            exec_args: config.runtime.exec_args.clone(),
            containers,
            allowed_programs,
            timeout: config.runtime.command_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Set command execution timeout.
    ///
    /// Commands exceeding this duration are killed and reported as failed.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Full argv (excluding the binary) for a request
    fn build_args(&self, request: &CommandRequest) -> Result<Vec<String>, CommandError> {
        let program = request.program();
        let allowed = self
            .allowed_programs
            .get(&request.container)
            .is_some_and(|p| p == program);
        if !allowed {
            return Err(CommandError::ProgramNotAllowed {
                container: request.container,
                program: program.to_string(),
            });
        }

        let container = self
            .containers
            .get(&request.container)
            .cloned()
            .unwrap_or_default();

        let mut args = self.exec_args.clone();
        args.push(container);
        args.extend(request.args.iter().cloned());
        Ok(args)
    }

    /// Run the request, surfacing launch failures and timeouts as `CommandError`
    async fn run(&self, request: &CommandRequest) -> Result<Output, CommandError> {
        let args = self.build_args(request)?;

        // Arguments are passed as Vec, never interpolated into shell strings
        let mut command = Command::new(&self.binary);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = command.output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output)
                .await
                .map_err(|_| CommandError::Timeout(limit))?,
            None => output.await,
        };

        output.map_err(|e| CommandError::ExecutionFailed(e.to_string()))
    }
}

#[async_trait]
impl CommandRunner for ContainerCommandExecutor {
    async fn execute(&self, request: &CommandRequest) -> CommandResult {
        tracing::debug!(
            container = %request.container,
            program = request.program(),
            "executing container command"
        );

        match self.run(request).await {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
                let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                let succeeded = output.status.success();

                if !succeeded {
                    if stderr.is_empty() {
                        stderr = format!("Command exited with {}", output.status);
                    }
                    tracing::warn!(
                        container = %request.container,
                        program = request.program(),
                        status = %output.status,
                        "container command failed"
                    );
                }

                CommandResult {
                    succeeded,
                    stdout,
                    stderr,
                }
            }
            Err(e) => {
                tracing::warn!(
                    container = %request.container,
                    program = request.program(),
                    error = %e,
                    "container command could not run"
                );
                CommandResult::failure(e.to_string())
            }
        }
    }
}
