//! Daemon liveness probing
//!
//! A probe wraps a remote command execution in the retry engine with a
//! kind filter that retries only command failures: a daemon that is still
//! coming up keeps failing the probe command until it answers, while any
//! other failure kind (permissions, missing tooling) escapes immediately.

use crate::error::HarnessError;
use crate::traits::{CommandExecutor, ExecTarget};
use stevedore_core::retry::{
    FailureKind, KindPredicate, RetryError, RetryExecutorBuilder, TracingObserver,
};
use stevedore_core::types::RetryPolicy;

/// Default probe command
pub const DEFAULT_PROBE_COMMAND: &str = "docker ps";

/// Bounded, kind-filtered liveness probe
#[derive(Debug, Clone)]
pub struct LivenessProbe {
    policy: RetryPolicy,
    command: String,
}

impl LivenessProbe {
    /// Create a probe running [`DEFAULT_PROBE_COMMAND`] under `policy`
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            command: DEFAULT_PROBE_COMMAND.to_string(),
        }
    }

    /// Replace the probe command
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Get the probe command
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run the probe command against `target` until it succeeds
    ///
    /// Only [`FailureKind::Execution`] failures are retried; every other
    /// kind escapes on first occurrence regardless of remaining budget.
    pub async fn wait_until_live(
        &self,
        executor: &dyn CommandExecutor,
        target: &ExecTarget,
    ) -> Result<(), RetryError<HarnessError>> {
        RetryExecutorBuilder::new()
            .with_policy(self.policy.clone())
            .with_predicate(KindPredicate::single(FailureKind::Execution))
            .with_observer(TracingObserver::new("liveness-probe"))
            .build()
            .execute(|| executor.execute(target, &self.command))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_defaults_and_override() {
        let probe = LivenessProbe::new(RetryPolicy::default());
        assert_eq!(probe.command(), "docker ps");

        let probe = probe.with_command("docker info");
        assert_eq!(probe.command(), "docker info");
    }
}
