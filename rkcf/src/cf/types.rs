use serde::{Deserialize, Serialize};

/// `metadata` block of every CF v2 resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Meta {
    pub guid: String,
    pub url: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// CF v2 wire shape: `{"metadata": {...}, "entity": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Resource<T> {
    pub metadata: Meta,
    pub entity: T,
}

/// Paged list returned by the `GET` collection endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<T>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Org {
    pub guid: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Space {
    pub guid: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub name: String,
    pub organization_guid: String,
    #[serde(rename = "organization", alias = "org")]
    pub org_data: Resource<Org>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct App {
    pub guid: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub name: String,
    pub space_guid: String,
    pub docker_image: Option<String>,
    pub diego: bool,
    pub state: String,
    pub instances: i32,
    pub memory: i32,
    #[serde(rename = "space")]
    pub space_data: Resource<Space>,
}

impl Resource<Org> {
    pub fn into_org(self) -> Org {
        let mut org = self.entity;
        org.guid = self.metadata.guid;
        org.created_at = self.metadata.created_at;
        org.updated_at = self.metadata.updated_at;
        org
    }
}

impl Resource<Space> {
    pub fn into_space(self) -> Space {
        let mut space = self.entity;
        space.guid = self.metadata.guid;
        space.created_at = self.metadata.created_at;
        space.updated_at = self.metadata.updated_at;
        space.org_data.entity.guid = space.org_data.metadata.guid.clone();
        space
    }
}

/// Copies the server-assigned identifiers from the metadata blocks into the
/// entities, one level deep for the owning space and its org.
pub fn merge_app_resource(resource: Resource<App>) -> App {
    let mut app = resource.entity;
    app.guid = resource.metadata.guid;
    app.created_at = resource.metadata.created_at;
    app.updated_at = resource.metadata.updated_at;
    app.space_data.entity.guid = app.space_data.metadata.guid.clone();
    app.space_data.entity.org_data.entity.guid =
        app.space_data.entity.org_data.metadata.guid.clone();
    app
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DockerAppCreateRequest {
    pub name: String,
    pub space_guid: String,
    pub docker_image: String,
    pub diego: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_image: Option<String>,
}

impl AppUpdateRequest {
    pub const STARTED: &'static str = "STARTED";

    pub fn started() -> Self {
        Self {
            state: Some(Self::STARTED.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrgRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpaceRequest {
    pub name: String,
    pub organization_guid: String,
}
