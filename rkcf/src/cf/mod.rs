pub mod client;
pub mod error;
pub mod types;

pub use client::CfClient;
pub use error::CfError;
pub use types::{
    App, AppUpdateRequest, DockerAppCreateRequest, Org, OrgRequest, Space, SpaceRequest,
};

use async_trait::async_trait;

/// The calls the provider makes against the application platform.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn get_org_by_name(&self, name: &str) -> Result<Option<Org>, CfError>;

    async fn create_org(&self, req: &OrgRequest) -> Result<Org, CfError>;

    async fn get_space_by_name(&self, name: &str, org_guid: &str)
    -> Result<Option<Space>, CfError>;

    async fn create_space(&self, req: &SpaceRequest) -> Result<Space, CfError>;

    async fn create_docker_app(&self, req: &DockerAppCreateRequest) -> Result<App, CfError>;

    async fn update_app(&self, guid: &str, req: &AppUpdateRequest) -> Result<App, CfError>;
}
