//! Recording fakes for the harness boundaries
//!
//! These implement the runtime and executor traits without side effects:
//! scripted results go in, invocation logs come out.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use stevedore_harness::error::{HarnessError, Result};
use stevedore_harness::traits::{
    CommandExecutor, ContainerId, ContainerRuntime, ExecTarget, RunSpec,
};

/// A container runtime backed by an in-memory container list
pub struct FakeRuntime {
    containers: Mutex<Vec<ContainerId>>,
    removed: Mutex<Vec<ContainerId>>,
    launched: Mutex<Vec<RunSpec>>,
    fail_removal: Mutex<Option<ContainerId>>,
}

impl FakeRuntime {
    /// Create a runtime reporting the given containers on the host
    pub fn with_containers(ids: &[&str]) -> Self {
        Self {
            containers: Mutex::new(ids.iter().map(|id| ContainerId::from(*id)).collect()),
            removed: Mutex::new(Vec::new()),
            launched: Mutex::new(Vec::new()),
            fail_removal: Mutex::new(None),
        }
    }

    /// Create a runtime reporting an empty host
    pub fn empty() -> Self {
        Self::with_containers(&[])
    }

    /// Make removal of the given container fail
    pub fn fail_removal_of(&self, id: &str) {
        *self.fail_removal.lock().unwrap() = Some(ContainerId::from(id));
    }

    /// Containers removed so far, in removal order
    pub fn removed(&self) -> Vec<ContainerId> {
        self.removed.lock().unwrap().clone()
    }

    /// Launch specs recorded so far
    pub fn launched(&self) -> Vec<RunSpec> {
        self.launched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    fn check_prerequisites(&self) -> Result<()> {
        Ok(())
    }

    async fn list_all_containers(&self) -> Result<Vec<ContainerId>> {
        Ok(self.containers.lock().unwrap().clone())
    }

    async fn remove_container(&self, id: &ContainerId) -> Result<()> {
        if self.fail_removal.lock().unwrap().as_ref() == Some(id) {
            return Err(HarnessError::command_failed(
                format!("docker rm -f {id}"),
                Some(1),
                "device or resource busy",
            ));
        }

        self.containers.lock().unwrap().retain(|c| c != id);
        self.removed.lock().unwrap().push(id.clone());
        Ok(())
    }

    async fn run_container(&self, spec: &RunSpec) -> Result<ContainerId> {
        let mut launched = self.launched.lock().unwrap();
        launched.push(spec.clone());
        let id = ContainerId::from(format!("fake-{}-{}", spec.name, launched.len()));
        self.containers.lock().unwrap().push(id.clone());
        Ok(id)
    }
}

/// A command executor returning scripted results in order
///
/// Once the script is drained, further calls succeed with empty output.
pub struct FakeExecutor {
    script: Mutex<VecDeque<Result<String>>>,
    invocations: Mutex<Vec<(ExecTarget, String)>>,
}

impl FakeExecutor {
    /// Create an executor that answers with the given results in order
    pub fn scripted(results: Vec<Result<String>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Create an executor whose every call succeeds with empty output
    pub fn always_ok() -> Self {
        Self::scripted(Vec::new())
    }

    /// Recorded invocations, in call order
    pub fn invocations(&self) -> Vec<(ExecTarget, String)> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for FakeExecutor {
    async fn execute(&self, target: &ExecTarget, command: &str) -> Result<String> {
        self.invocations
            .lock()
            .unwrap()
            .push((target.clone(), command.to_string()));

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

/// A command failure, as the probe would see one from a daemon that is
/// not answering yet
pub fn command_failure(command: &str) -> HarnessError {
    HarnessError::command_failed(command, Some(1), "connection refused")
}
