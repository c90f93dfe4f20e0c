use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{ListResponse, Resource, merge_app_resource};
use super::{
    App, AppUpdateRequest, CfError, DockerAppCreateRequest, Org, OrgRequest, Platform, Space,
    SpaceRequest,
};

/// Thin client over the Cloud Foundry v2 REST API.
#[derive(Clone, Debug)]
pub struct CfClient {
    http: Client,
    api: String,
}

impl CfClient {
    pub fn new(api: impl Into<String>, access_token: impl AsRef<str>) -> Result<Self, CfError> {
        Self::with_tls_verification(api, access_token, true)
    }

    /// `verify_tls = false` accepts self-signed API certificates, as most
    /// local CF installs use.
    pub fn with_tls_verification(
        api: impl Into<String>,
        access_token: impl AsRef<str>,
        verify_tls: bool,
    ) -> Result<Self, CfError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let token = access_token.as_ref();
        if !token.is_empty() {
            headers.insert(AUTHORIZATION, format!("bearer {token}").parse()?);
        }

        let http = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|source| CfError::Request {
                context: "Error building http client".to_string(),
                source,
            })?;

        Ok(Self {
            http,
            api: api.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api)
    }

    async fn send_expecting(
        builder: RequestBuilder,
        expected: &[StatusCode],
        context: &str,
    ) -> Result<Response, CfError> {
        let res = builder.send().await.map_err(|source| CfError::Request {
            context: context.to_string(),
            source,
        })?;
        let status = res.status();
        if !expected.contains(&status) {
            let body = res.text().await.unwrap_or_default();
            return Err(CfError::UnexpectedStatus {
                context: context.to_string(),
                status,
                body,
            });
        }
        Ok(res)
    }

    async fn read_json<T: DeserializeOwned>(res: Response, what: &str) -> Result<T, CfError> {
        let body = res.bytes().await.map_err(|source| CfError::Request {
            context: format!("Error reading {what} http response body"),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| CfError::Decode {
            context: format!("Error deserializing {what} response"),
            source,
        })
    }
}

#[async_trait]
impl Platform for CfClient {
    async fn get_org_by_name(&self, name: &str) -> Result<Option<Org>, CfError> {
        let context = format!("Error requesting org {name}");
        let builder = self
            .http
            .get(self.url("/v2/organizations"))
            .query(&[("q", format!("name:{name}"))]);
        let res = Self::send_expecting(builder, &[StatusCode::OK], &context).await?;
        let list: ListResponse<Org> = Self::read_json(res, &format!("org {name}")).await?;
        Ok(list.resources.into_iter().next().map(|r| r.into_org()))
    }

    async fn create_org(&self, req: &OrgRequest) -> Result<Org, CfError> {
        debug!("creating org {}", req.name);
        let context = format!("Error creating org {}", req.name);
        let builder = self.http.post(self.url("/v2/organizations")).json(req);
        let res = Self::send_expecting(builder, &[StatusCode::CREATED], &context).await?;
        let org: Resource<Org> = Self::read_json(res, &format!("org {}", req.name)).await?;
        Ok(org.into_org())
    }

    async fn get_space_by_name(
        &self,
        name: &str,
        org_guid: &str,
    ) -> Result<Option<Space>, CfError> {
        let context = format!("Error requesting space {name} in org {org_guid}");
        let builder = self
            .http
            .get(self.url(&format!("/v2/organizations/{org_guid}/spaces")))
            .query(&[("q", format!("name:{name}"))]);
        let res = Self::send_expecting(builder, &[StatusCode::OK], &context).await?;
        let list: ListResponse<Space> = Self::read_json(res, &format!("space {name}")).await?;
        Ok(list.resources.into_iter().next().map(|r| r.into_space()))
    }

    async fn create_space(&self, req: &SpaceRequest) -> Result<Space, CfError> {
        debug!("creating space {} in org {}", req.name, req.organization_guid);
        let context = format!("Error creating space {}", req.name);
        let builder = self.http.post(self.url("/v2/spaces")).json(req);
        let res = Self::send_expecting(builder, &[StatusCode::CREATED], &context).await?;
        let space: Resource<Space> = Self::read_json(res, &format!("space {}", req.name)).await?;
        Ok(space.into_space())
    }

    async fn create_docker_app(&self, req: &DockerAppCreateRequest) -> Result<App, CfError> {
        debug!("creating app {} from image {}", req.name, req.docker_image);
        let context = format!("Error creating app {}", req.name);
        let builder = self.http.post(self.url("/v2/apps")).json(req);
        let res = Self::send_expecting(builder, &[StatusCode::CREATED], &context).await?;
        let app: Resource<App> = Self::read_json(res, &format!("app {}", req.name)).await?;
        Ok(merge_app_resource(app))
    }

    async fn update_app(&self, guid: &str, req: &AppUpdateRequest) -> Result<App, CfError> {
        let context = format!("Error updating app {guid}");
        let builder = self.http.put(self.url(&format!("/v2/apps/{guid}"))).json(req);
        let res =
            Self::send_expecting(builder, &[StatusCode::CREATED, StatusCode::OK], &context).await?;
        let app: Resource<App> = Self::read_json(res, &format!("app {guid}")).await?;
        Ok(merge_app_resource(app))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = CfClient::new("https://api.cf.example/", "token").unwrap();
        assert_eq!(client.api, "https://api.cf.example");
        assert_eq!(client.url("/v2/apps"), "https://api.cf.example/v2/apps");
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let err = CfClient::new("https://api.cf.example", "bad\ntoken").unwrap_err();
        assert!(matches!(err, CfError::InvalidToken(_)));
    }
}
