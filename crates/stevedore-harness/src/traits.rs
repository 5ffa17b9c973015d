//! Boundary trait definitions
//!
//! The container runtime and command execution boundaries are the two
//! external seams of the harness. Both are object-safe async traits so
//! the lifecycle can run against the real `docker` CLI or against
//! recording fakes in tests.

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Fixed alternate daemon endpoint used for liveness probing
pub const DAEMON_PORT: u16 = 2377;

/// Opaque identifier of a container known to the runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    /// View the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ContainerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ContainerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A host-to-container port publication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub host: u16,
    pub container: u16,
}

/// Description of a detached container launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    /// Image reference to run
    pub image: String,
    /// Container name
    pub name: String,
    /// Run detached
    pub detach: bool,
    /// Published ports
    pub ports: Vec<PortMapping>,
    /// Arguments passed to the container's entrypoint
    pub args: Vec<String>,
}

/// Target of a remote command execution
///
/// When `daemon_port` is set, the command is routed through the alternate
/// daemon endpoint on that port instead of the default socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecTarget {
    pub host: String,
    pub daemon_port: Option<u16>,
}

impl ExecTarget {
    /// Target a host through the default daemon socket
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            daemon_port: None,
        }
    }

    /// Target a host through the alternate daemon endpoint on [`DAEMON_PORT`]
    pub fn via_daemon(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            daemon_port: Some(DAEMON_PORT),
        }
    }
}

/// Container runtime boundary
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Verify the runtime's host tooling is available
    fn check_prerequisites(&self) -> Result<()>;

    /// List every container on the host, running or stopped
    async fn list_all_containers(&self) -> Result<Vec<ContainerId>>;

    /// Forcibly remove a container
    async fn remove_container(&self, id: &ContainerId) -> Result<()>;

    /// Start a container as described by `spec`, returning its identifier
    async fn run_container(&self, spec: &RunSpec) -> Result<ContainerId>;
}

/// Command execution boundary
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute a shell command against the target, returning captured stdout
    async fn execute(&self, target: &ExecTarget, command: &str) -> Result<String>;
}
