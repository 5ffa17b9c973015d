//! Test lifecycle orchestration
//!
//! `TestHarness` is the surface a test-execution framework consumes: a
//! setup hook run before each test and a teardown hook run after it.
//! Failures propagate unmodified to the caller, which treats them as a
//! test failure.

use crate::config::HarnessConfig;
use crate::docker::DockerCli;
use crate::exec::HostShell;
use crate::probe::LivenessProbe;
use crate::reset::reset_host;
use crate::store::bootstrap_store;
use crate::traits::{CommandExecutor, ContainerId, ContainerRuntime, ExecTarget};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

/// Per-test lifecycle over a container runtime and command executor
pub struct TestHarness {
    runtime: Arc<dyn ContainerRuntime>,
    executor: Arc<dyn CommandExecutor>,
    config: HarnessConfig,
}

impl TestHarness {
    /// Create a harness over the real docker CLI and local shell
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_parts(Arc::new(DockerCli::new()), Arc::new(HostShell::new()), config)
    }

    /// Create a harness over explicit runtime and executor implementations
    pub fn with_parts(
        runtime: Arc<dyn ContainerRuntime>,
        executor: Arc<dyn CommandExecutor>,
        config: HarnessConfig,
    ) -> Self {
        Self {
            runtime,
            executor,
            config,
        }
    }

    /// Get the harness configuration
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Prepare the host for a test
    ///
    /// Checks runtime prerequisites, removes every container on the host,
    /// and bootstraps the coordination store bound to `host_ip`. The IP
    /// is an explicit parameter: the harness holds no ambient host state.
    pub async fn setup(&self, host_ip: &str) -> anyhow::Result<ContainerId> {
        self.runtime
            .check_prerequisites()
            .context("checking container runtime prerequisites")?;

        let removed = reset_host(&*self.runtime)
            .await
            .context("resetting container host before test")?;
        info!(removed, "host reset before test");

        let id = bootstrap_store(&*self.runtime, &self.config.store, host_ip)
            .await
            .context("bootstrapping coordination store")?;

        Ok(id)
    }

    /// Clean the host up after a test
    pub async fn teardown(&self) -> anyhow::Result<()> {
        let removed = reset_host(&*self.runtime)
            .await
            .context("resetting container host after test")?;
        info!(removed, "host reset after test");

        Ok(())
    }

    /// Wait until the daemon on `host` answers the probe command
    ///
    /// The command is routed through the alternate daemon endpoint and
    /// retried under the configured policy; only command failures are
    /// retried, anything else escapes immediately.
    pub async fn probe_daemon(&self, host: &str) -> anyhow::Result<()> {
        let target = ExecTarget::via_daemon(host);

        LivenessProbe::new(self.config.retry.clone())
            .with_command(self.config.probe_command.as_str())
            .wait_until_live(&*self.executor, &target)
            .await
            .with_context(|| format!("probing daemon on {host}"))?;

        Ok(())
    }
}
