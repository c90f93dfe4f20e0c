use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use common::{NodeAddress, NodeCondition, NodeDaemonEndpoints, PodStatus, PodTask};
use tracing::{debug, error, info};

use super::store::{PodStore, build_key, build_key_from_names};
use super::{Provider, node, status};
use crate::cf::{
    AppUpdateRequest, CfClient, DockerAppCreateRequest, Org, OrgRequest, Platform, Space,
    SpaceRequest,
};
use crate::config::ProviderConfig;
use crate::error::ProviderError;

/// How the virtual node presents itself to the host.
#[derive(Debug, Clone)]
pub struct NodeSettings {
    pub node_name: String,
    pub internal_ip: String,
    pub daemon_endpoint_port: i32,
}

/// Runs every pod as a single docker-image application in one Cloud Foundry
/// space.
///
/// Only creation reaches the platform. Updates and deletes change the local
/// pod map alone, so the remote application keeps the spec it was created
/// with and outlives the pod.
pub struct CfProvider<P = CfClient> {
    node: NodeSettings,
    config: ProviderConfig,
    platform: P,
    pods: PodStore,
    org: Org,
    space: Space,
}

impl CfProvider<CfClient> {
    /// Build the API client from `config` and make sure the configured org and
    /// space exist. Fails if either cannot be found or created.
    pub async fn connect(config: ProviderConfig, node: NodeSettings) -> Result<Self, ProviderError> {
        let client = CfClient::with_tls_verification(
            config.api.clone(),
            &config.access_token,
            !config.skip_ssl_validation,
        )?;
        let mut provider = Self::new(config, client, node);
        provider.ensure_org_and_space().await?;
        Ok(provider)
    }
}

impl<P: Platform> CfProvider<P> {
    pub fn new(config: ProviderConfig, platform: P, node: NodeSettings) -> Self {
        Self {
            node,
            config,
            platform,
            pods: PodStore::new(),
            org: Org::default(),
            space: Space::default(),
        }
    }

    pub fn org(&self) -> &Org {
        &self.org
    }

    pub fn space(&self) -> &Space {
        &self.space
    }

    pub fn node_name(&self) -> &str {
        &self.node.node_name
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Look up the configured org and space, creating whichever is missing,
    /// and remember both. Safe to call repeatedly.
    pub async fn ensure_org_and_space(&mut self) -> Result<(), ProviderError> {
        let org_name = &self.config.org;
        let org = match self.platform.get_org_by_name(org_name).await? {
            Some(org) => org,
            None => {
                info!("org {org_name:?} not found, creating it");
                let req = OrgRequest {
                    name: org_name.clone(),
                };
                self.platform.create_org(&req).await?
            }
        };

        let space_name = &self.config.space;
        let space = match self.platform.get_space_by_name(space_name, &org.guid).await? {
            Some(space) => space,
            None => {
                info!("space {space_name:?} not found in org {org_name:?}, creating it");
                let req = SpaceRequest {
                    name: space_name.clone(),
                    organization_guid: org.guid.clone(),
                };
                self.platform.create_space(&req).await?
            }
        };

        info!(
            "using org {:?} ({}) and space {:?} ({})",
            org.name, org.guid, space.name, space.guid
        );
        self.org = org;
        self.space = space;
        Ok(())
    }

    async fn create_app(&self, req: &DockerAppCreateRequest) -> Result<(), ProviderError> {
        let app = self.platform.create_docker_app(req).await?;
        debug!("created app {} with guid {}", app.name, app.guid);

        self.platform
            .update_app(&app.guid, &AppUpdateRequest::started())
            .await
            .map_err(|source| ProviderError::StartApp {
                app: req.name.clone(),
                source,
            })?;
        Ok(())
    }
}

/// The image of the one container a pod may carry.
fn single_container_image(pod: &PodTask) -> Result<String, ProviderError> {
    let containers = &pod.spec.containers;
    match containers.len() {
        1 => Ok(containers[0].image.clone()),
        0 => Err(ProviderError::NoContainers {
            pod: pod.metadata.name.clone(),
        }),
        count => Err(ProviderError::TooManyContainers {
            pod: pod.metadata.name.clone(),
            count,
        }),
    }
}

#[async_trait]
impl<P: Platform> Provider for CfProvider<P> {
    async fn create_pod(&self, pod: &PodTask) -> Result<(), ProviderError> {
        info!("receive CreatePod {:?}", pod.metadata.name);

        let key = build_key(pod)?;
        let docker_image = single_container_image(pod)?;

        let req = DockerAppCreateRequest {
            name: pod.metadata.name.clone(),
            space_guid: self.space.guid.clone(),
            docker_image,
            diego: true,
        };
        if let Err(e) = self.create_app(&req).await {
            error!(
                "Failed to run pod {} as an app: {}",
                pod.metadata.name,
                e.detail()
            );
            return Err(e);
        }

        self.pods.insert(key, pod.clone()).await;
        Ok(())
    }

    async fn update_pod(&self, pod: &PodTask) -> Result<(), ProviderError> {
        info!("receive UpdatePod {:?}", pod.metadata.name);

        let key = build_key(pod)?;
        self.pods.insert(key, pod.clone()).await;
        Ok(())
    }

    async fn delete_pod(&self, pod: &PodTask) -> Result<(), ProviderError> {
        info!("receive DeletePod {:?}", pod.metadata.name);

        let key = build_key(pod)?;
        self.pods.remove(&key).await;
        Ok(())
    }

    async fn get_pod(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<PodTask>, ProviderError> {
        info!("receive GetPod {name:?}");

        let key = build_key_from_names(namespace, name)?;
        Ok(self.pods.get(&key).await)
    }

    async fn get_container_logs(
        &self,
        _namespace: &str,
        pod_name: &str,
        _container_name: &str,
        _tail: usize,
    ) -> Result<String, ProviderError> {
        info!("receive GetContainerLogs {pod_name:?}");
        Ok(String::new())
    }

    async fn get_pod_status(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<PodStatus>, ProviderError> {
        info!("receive GetPodStatus {name:?}");

        let pod = self.get_pod(namespace, name).await?;
        Ok(pod.map(|p| status::running_status(&p, Utc::now())))
    }

    async fn get_pods(&self) -> Result<Vec<PodTask>, ProviderError> {
        info!("receive GetPods");
        Ok(self.pods.list().await)
    }

    fn capacity(&self) -> HashMap<String, String> {
        node::capacity()
    }

    fn node_conditions(&self) -> Vec<NodeCondition> {
        node::node_conditions(Utc::now())
    }

    fn node_addresses(&self) -> Vec<NodeAddress> {
        node::node_addresses(&self.node.internal_ip)
    }

    fn node_daemon_endpoints(&self) -> NodeDaemonEndpoints {
        node::daemon_endpoints(self.node.daemon_endpoint_port)
    }

    fn operating_system(&self) -> String {
        node::OPERATING_SYSTEM_LINUX.to_string()
    }
}
