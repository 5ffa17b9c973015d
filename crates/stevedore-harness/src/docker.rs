//! Container runtime over the `docker` CLI

use crate::error::{HarnessError, Result};
use crate::traits::{ContainerId, ContainerRuntime, RunSpec};
use crate::util::{command_exists, get_command_version};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

/// [`ContainerRuntime`] implementation shelling out to the `docker` binary
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerCli;

impl DockerCli {
    /// Create a new docker CLI runtime
    pub fn new() -> Self {
        Self
    }

    /// Run a docker subcommand, returning captured stdout on exit 0
    async fn docker(&self, args: &[&str]) -> Result<String> {
        debug!("Running: docker {}", args.join(" "));

        let output = Command::new("docker").args(args).output().await?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(HarnessError::command_failed(
                format!("docker {}", args.join(" ")),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr),
            ))
        }
    }
}

/// Build the `docker run` argument list for a launch spec
fn run_args(spec: &RunSpec) -> Vec<String> {
    let mut args = vec!["run".to_string()];

    if spec.detach {
        args.push("--detach".to_string());
    }

    for port in &spec.ports {
        args.push("--publish".to_string());
        args.push(format!("{}:{}", port.host, port.container));
    }

    args.push("--name".to_string());
    args.push(spec.name.clone());
    args.push(spec.image.clone());
    args.extend(spec.args.iter().cloned());

    args
}

/// Parse the id-per-line output of `docker ps -aq`
fn parse_container_ids(output: &str) -> Vec<ContainerId> {
    output
        .split_whitespace()
        .map(ContainerId::from)
        .collect()
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    fn check_prerequisites(&self) -> Result<()> {
        if !command_exists("docker") {
            return Err(HarnessError::missing_prerequisite(
                "docker",
                "Install Docker: https://docs.docker.com/get-docker/",
            ));
        }

        match get_command_version("docker", "--version") {
            Ok(version) => debug!(version = %version, "docker available"),
            Err(err) => warn!(error = %err, "could not determine docker version"),
        }

        Ok(())
    }

    async fn list_all_containers(&self) -> Result<Vec<ContainerId>> {
        let output = self.docker(&["ps", "-aq"]).await?;
        Ok(parse_container_ids(&output))
    }

    async fn remove_container(&self, id: &ContainerId) -> Result<()> {
        self.docker(&["rm", "-f", id.as_str()]).await.map(|_| ())
    }

    async fn run_container(&self, spec: &RunSpec) -> Result<ContainerId> {
        let args = run_args(spec);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        // `docker run --detach` prints the new container's id
        let stdout = self.docker(&arg_refs).await?;
        Ok(ContainerId::from(stdout.trim()))
    }
}
