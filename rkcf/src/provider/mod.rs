pub mod cf;
pub mod node;
pub mod status;
pub mod store;

pub use cf::{CfProvider, NodeSettings};
pub use store::{PodStore, build_key, build_key_from_names};

use std::collections::HashMap;

use async_trait::async_trait;
use common::{
    NodeAddress, NodeCondition, NodeDaemonEndpoints, NodeStatus, PodStatus, PodTask,
};

use crate::error::ProviderError;

/// Callbacks a virtual-kubelet host drives to run pods on a backend.
///
/// `get_pod` and `get_pod_status` return `Ok(None)` for a pod the provider
/// does not know, which is not an error.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn create_pod(&self, pod: &PodTask) -> Result<(), ProviderError>;

    async fn update_pod(&self, pod: &PodTask) -> Result<(), ProviderError>;

    async fn delete_pod(&self, pod: &PodTask) -> Result<(), ProviderError>;

    async fn get_pod(&self, namespace: &str, name: &str)
    -> Result<Option<PodTask>, ProviderError>;

    async fn get_container_logs(
        &self,
        namespace: &str,
        pod_name: &str,
        container_name: &str,
        tail: usize,
    ) -> Result<String, ProviderError>;

    async fn get_pod_status(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<PodStatus>, ProviderError>;

    async fn get_pods(&self) -> Result<Vec<PodTask>, ProviderError>;

    fn capacity(&self) -> HashMap<String, String>;

    fn node_conditions(&self) -> Vec<NodeCondition>;

    fn node_addresses(&self) -> Vec<NodeAddress>;

    fn node_daemon_endpoints(&self) -> NodeDaemonEndpoints;

    fn operating_system(&self) -> String;

    /// Snapshot of everything the host publishes on the node object.
    fn node_status(&self) -> NodeStatus {
        NodeStatus {
            capacity: self.capacity(),
            addresses: self.node_addresses(),
            conditions: self.node_conditions(),
            daemon_endpoints: self.node_daemon_endpoints(),
            operating_system: self.operating_system(),
        }
    }
}
