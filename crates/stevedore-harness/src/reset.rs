//! Host state reset between tests

use crate::error::Result;
use crate::traits::ContainerRuntime;
use tracing::debug;

/// Remove every container on the host, running or stopped
///
/// Runs unconditionally before and after each test. Deletion failures are
/// not caught: the first failed removal aborts the reset and propagates,
/// leaving the remaining containers untouched. Returns the number of
/// containers removed.
pub async fn reset_host(runtime: &dyn ContainerRuntime) -> Result<usize> {
    let containers = runtime.list_all_containers().await?;
    let count = containers.len();

    for id in &containers {
        runtime.remove_container(id).await?;
    }

    debug!(removed = count, "removed all containers");
    Ok(count)
}
