//! Core traits and types for container command execution
//!
//! This module defines the seam between the request handlers and the
//! process layer: what to run (`CommandRequest`), what came back
//! (`CommandResult`), and who runs it (`CommandRunner`).

use async_trait::async_trait;
use std::fmt;

// ============================================================================
// Containers
// ============================================================================

/// The fixed set of containers this proxy is allowed to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerRole {
    /// EdgeX security proxy setup container (issues gateway users)
    EdgeProxy,
    /// ChirpStack network server (issues API keys)
    NetworkServer,
    /// EdgeX secret store setup container (holds the vault init file)
    SecretStore,
}

impl ContainerRole {
    pub const ALL: [ContainerRole; 3] = [
        ContainerRole::EdgeProxy,
        ContainerRole::NetworkServer,
        ContainerRole::SecretStore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EdgeProxy => "edge-proxy",
            Self::NetworkServer => "network-server",
            Self::SecretStore => "secret-store",
        }
    }
}

impl fmt::Display for ContainerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Requests and results
// ============================================================================

/// A command to run inside one of the managed containers.
///
/// Arguments are kept as discrete entries and are handed to the process
/// layer as an argv vector, never joined into a shell string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub container: ContainerRole,
    pub args: Vec<String>,
}

impl CommandRequest {
    pub fn new<I, S>(container: ContainerRole, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            container,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// First argument, used as a short label in logs
    pub fn program(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }
}

/// Outcome of a single command execution
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Executes commands against managed containers.
///
/// Implementations must fold every failure mode (launch failure, non-zero
/// exit, timeout) into a `CommandResult` with `succeeded == false`; callers
/// only ever inspect the result.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn execute(&self, request: &CommandRequest) -> CommandResult;
}
