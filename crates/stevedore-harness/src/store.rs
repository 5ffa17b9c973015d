//! Coordination-store bootstrap
//!
//! Launches the etcd container used by the networking product for shared
//! state. The launch is one-shot with a fixed flag set: client and peer
//! ports published, advertise URLs derived from the host's discovered IP,
//! and a hardcoded cluster token. No retry is applied.

use crate::error::Result;
use crate::traits::{ContainerId, ContainerRuntime, PortMapping, RunSpec};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Coordination-store container configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StoreConfig {
    /// Image to run
    #[serde(default = "default_image")]
    pub image: String,

    /// Container name on the host
    #[serde(default = "default_container_name")]
    pub container_name: String,

    /// Cluster member name
    #[serde(default = "default_member_name")]
    pub member_name: String,

    /// Client API port
    #[serde(default = "default_client_port")]
    pub client_port: u16,

    /// Peer communication port
    #[serde(default = "default_peer_port")]
    pub peer_port: u16,

    /// Token identifying the cluster
    #[serde(default = "default_cluster_token")]
    pub cluster_token: String,

    /// Initial cluster state
    #[serde(default = "default_cluster_state")]
    pub cluster_state: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            image: default_image(),
            container_name: default_container_name(),
            member_name: default_member_name(),
            client_port: default_client_port(),
            peer_port: default_peer_port(),
            cluster_token: default_cluster_token(),
            cluster_state: default_cluster_state(),
        }
    }
}

fn default_image() -> String {
    "quay.io/coreos/etcd:v2.0.11".to_string()
}
fn default_container_name() -> String {
    "etcd".to_string()
}
fn default_member_name() -> String {
    "node0".to_string()
}
fn default_client_port() -> u16 {
    2379
}
fn default_peer_port() -> u16 {
    2380
}
fn default_cluster_token() -> String {
    "etcd-cluster-2".to_string()
}
fn default_cluster_state() -> String {
    "new".to_string()
}

impl StoreConfig {
    /// Build the launch spec for this store on the given host
    ///
    /// The advertise URLs carry the host's discovered IP; the listen URLs
    /// bind all interfaces.
    pub fn run_spec(&self, host_ip: &str) -> RunSpec {
        RunSpec {
            image: self.image.clone(),
            name: self.container_name.clone(),
            detach: true,
            ports: vec![
                PortMapping {
                    host: self.client_port,
                    container: self.client_port,
                },
                PortMapping {
                    host: self.peer_port,
                    container: self.peer_port,
                },
            ],
            args: vec![
                format!("--name={}", self.member_name),
                format!(
                    "--advertise-client-urls=http://{}:{}",
                    host_ip, self.client_port
                ),
                format!("--listen-client-urls=http://0.0.0.0:{}", self.client_port),
                format!(
                    "--initial-advertise-peer-urls=http://{}:{}",
                    host_ip, self.peer_port
                ),
                format!("--listen-peer-urls=http://0.0.0.0:{}", self.peer_port),
                format!("--initial-cluster-token={}", self.cluster_token),
                format!(
                    "--initial-cluster={}=http://{}:{}",
                    self.member_name, host_ip, self.peer_port
                ),
                format!("--initial-cluster-state={}", self.cluster_state),
            ],
        }
    }
}

/// Launch the coordination-store container, one-shot
pub async fn bootstrap_store(
    runtime: &dyn ContainerRuntime,
    config: &StoreConfig,
    host_ip: &str,
) -> Result<ContainerId> {
    let spec = config.run_spec(host_ip);

    info!(
        image = %config.image,
        name = %config.container_name,
        host_ip = %host_ip,
        "starting coordination store"
    );

    runtime.run_container(&spec).await
}
