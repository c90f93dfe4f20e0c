use std::collections::HashMap;

use common::PodTask;
use tokio::sync::RwLock;

use crate::error::ProviderError;

/// Builds the `"{namespace}-{name}"` key pods are stored under.
pub fn build_key_from_names(namespace: &str, name: &str) -> Result<String, ProviderError> {
    if namespace.is_empty() {
        return Err(ProviderError::MissingNamespace);
    }
    if name.is_empty() {
        return Err(ProviderError::MissingName);
    }
    Ok(format!("{namespace}-{name}"))
}

pub fn build_key(pod: &PodTask) -> Result<String, ProviderError> {
    build_key_from_names(&pod.metadata.namespace, &pod.metadata.name)
}

/// Last known spec of every pod the provider accepted.
///
/// Lives only in memory: a restart forgets every pod. All access goes through
/// one lock, so concurrent host callbacks see a consistent map.
#[derive(Default)]
pub struct PodStore {
    pods: RwLock<HashMap<String, PodTask>>,
}

impl PodStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the replaced pod, if any.
    pub async fn insert(&self, key: String, pod: PodTask) -> Option<PodTask> {
        self.pods.write().await.insert(key, pod)
    }

    pub async fn remove(&self, key: &str) -> Option<PodTask> {
        self.pods.write().await.remove(key)
    }

    pub async fn get(&self, key: &str) -> Option<PodTask> {
        self.pods.read().await.get(key).cloned()
    }

    pub async fn list(&self) -> Vec<PodTask> {
        self.pods.read().await.values().cloned().collect()
    }
}
