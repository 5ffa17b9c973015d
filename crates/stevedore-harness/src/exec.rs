//! Shell command execution against a target host

use crate::error::{HarnessError, Result};
use crate::traits::{CommandExecutor, ExecTarget};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// [`CommandExecutor`] running commands through the local POSIX shell
///
/// When the target carries a daemon port, `DOCKER_HOST` is exported for
/// the child so docker invocations inside the command reach the alternate
/// endpoint instead of the default socket.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostShell;

impl HostShell {
    /// Create a new host shell executor
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for HostShell {
    async fn execute(&self, target: &ExecTarget, command: &str) -> Result<String> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);

        if let Some(port) = target.daemon_port {
            cmd.env("DOCKER_HOST", format!("tcp://{}:{}", target.host, port));
        }

        debug!(host = %target.host, command = %command, "executing host command");

        let output = cmd.output().await?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(HarnessError::command_failed(
                command,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr),
            ))
        }
    }
}
