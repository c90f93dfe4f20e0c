#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use common::{ContainerSpec, ObjectMeta, PodSpec, PodTask};
use serde_json::{Value, json};

#[derive(Default)]
pub struct FakeCfState {
    // (guid, name)
    pub orgs: Mutex<Vec<(String, String)>>,
    // (guid, name, org guid)
    pub spaces: Mutex<Vec<(String, String, String)>>,
    // (guid, name, state)
    pub apps: Mutex<Vec<(String, String, String)>>,
    pub app_requests: Mutex<Vec<Value>>,
    pub auth_headers: Mutex<Vec<String>>,
    pub fail_app_create: AtomicBool,
    pub fail_org_create: AtomicBool,
    pub garbled_app_response: AtomicBool,
}

impl FakeCfState {
    pub fn fail_app_create(&self) {
        self.fail_app_create.store(true, Ordering::SeqCst);
    }

    pub fn fail_org_create(&self) {
        self.fail_org_create.store(true, Ordering::SeqCst);
    }

    pub fn garble_app_response(&self) {
        self.garbled_app_response.store(true, Ordering::SeqCst);
    }

    pub fn org_count(&self) -> usize {
        self.orgs.lock().unwrap().len()
    }

    pub fn space_count(&self) -> usize {
        self.spaces.lock().unwrap().len()
    }

    pub fn apps(&self) -> Vec<(String, String, String)> {
        self.apps.lock().unwrap().clone()
    }
}

/// A minimal Cloud Foundry v2 API served on an ephemeral local port.
pub struct FakeCf {
    pub addr: SocketAddr,
    pub state: Arc<FakeCfState>,
}

impl FakeCf {
    pub async fn start() -> Self {
        let state = Arc::new(FakeCfState::default());
        let app = Router::new()
            .route("/v2/organizations", get(list_orgs).post(create_org))
            .route("/v2/organizations/{guid}/spaces", get(list_spaces))
            .route("/v2/spaces", post(create_space))
            .route("/v2/apps", post(create_app))
            .route("/v2/apps/{guid}", put(update_app))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        FakeCf { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

type Shared = State<Arc<FakeCfState>>;

fn name_filter(query: &HashMap<String, String>) -> Option<String> {
    query
        .get("q")
        .and_then(|q| q.strip_prefix("name:"))
        .map(str::to_string)
}

fn record_auth(state: &FakeCfState, headers: &HeaderMap) {
    if let Some(v) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.auth_headers.lock().unwrap().push(v.to_string());
    }
}

fn org_resource(guid: &str, name: &str) -> Value {
    json!({
        "metadata": { "guid": guid, "url": format!("/v2/organizations/{guid}"),
                      "created_at": "2024-01-01T00:00:00Z", "updated_at": null },
        "entity": { "name": name, "status": "active" }
    })
}

fn space_resource(guid: &str, name: &str, org_guid: &str) -> Value {
    json!({
        "metadata": { "guid": guid, "url": format!("/v2/spaces/{guid}"),
                      "created_at": "2024-01-01T00:00:00Z" },
        "entity": { "name": name, "organization_guid": org_guid }
    })
}

fn app_resource(guid: &str, name: &str, state: &str, space_guid: &str) -> Value {
    json!({
        "metadata": { "guid": guid, "url": format!("/v2/apps/{guid}"),
                      "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:01Z" },
        "entity": {
            "name": name,
            "space_guid": space_guid,
            "diego": true,
            "state": state,
            "instances": 1,
            "space": {
                "metadata": { "guid": space_guid },
                "entity": {
                    "name": "space",
                    "organization": { "metadata": { "guid": "org-guid" }, "entity": { "name": "org" } }
                }
            }
        }
    })
}

fn list(resources: Vec<Value>) -> Json<Value> {
    Json(json!({ "total_results": resources.len(), "resources": resources }))
}

async fn list_orgs(
    State(state): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    record_auth(&state, &headers);
    let name = name_filter(&query);
    let orgs = state.orgs.lock().unwrap();
    list(
        orgs.iter()
            .filter(|(_, n)| name.as_deref().is_none_or(|want| want == n))
            .map(|(g, n)| org_resource(g, n))
            .collect(),
    )
}

async fn create_org(State(state): Shared, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if state.fail_org_create.load(Ordering::SeqCst) {
        return (StatusCode::FORBIDDEN, Json(json!({ "description": "forbidden" })));
    }
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let mut orgs = state.orgs.lock().unwrap();
    let guid = format!("org-{}", orgs.len() + 1);
    orgs.push((guid.clone(), name.clone()));
    (StatusCode::CREATED, Json(org_resource(&guid, &name)))
}

async fn list_spaces(
    State(state): Shared,
    Path(org_guid): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let name = name_filter(&query);
    let spaces = state.spaces.lock().unwrap();
    list(
        spaces
            .iter()
            .filter(|(_, n, o)| *o == org_guid && name.as_deref().is_none_or(|want| want == n))
            .map(|(g, n, o)| space_resource(g, n, o))
            .collect(),
    )
}

async fn create_space(State(state): Shared, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let org_guid = body["organization_guid"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    let mut spaces = state.spaces.lock().unwrap();
    let guid = format!("space-{}", spaces.len() + 1);
    spaces.push((guid.clone(), name.clone(), org_guid.clone()));
    (StatusCode::CREATED, Json(space_resource(&guid, &name, &org_guid)))
}

async fn create_app(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    record_auth(&state, &headers);
    state.app_requests.lock().unwrap().push(body.clone());
    if state.fail_app_create.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string());
    }
    if state.garbled_app_response.load(Ordering::SeqCst) {
        return (StatusCode::CREATED, "{not json".to_string());
    }
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let space_guid = body["space_guid"].as_str().unwrap_or_default().to_string();
    let mut apps = state.apps.lock().unwrap();
    let guid = format!("app-{}", apps.len() + 1);
    apps.push((guid.clone(), name.clone(), "STOPPED".to_string()));
    (
        StatusCode::CREATED,
        app_resource(&guid, &name, "STOPPED", &space_guid).to_string(),
    )
}

async fn update_app(
    State(state): Shared,
    Path(guid): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut apps = state.apps.lock().unwrap();
    let Some(app) = apps.iter_mut().find(|(g, _, _)| *g == guid) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "description": "unknown app" })));
    };
    if let Some(s) = body["state"].as_str() {
        app.2 = s.to_string();
    }
    (
        StatusCode::CREATED,
        Json(app_resource(&app.0, &app.1, &app.2, "space-1")),
    )
}

pub fn get_pod_config<T, S>(name: T, images: Vec<S>) -> PodTask
where
    T: Into<String>,
    S: Into<String>,
{
    let containers = images
        .into_iter()
        .enumerate()
        .map(|(i, image)| ContainerSpec {
            name: format!("main-container{}", i + 1),
            image: image.into(),
            ..Default::default()
        })
        .collect();
    PodTask {
        api_version: "v1".to_string(),
        kind: "Pod".to_string(),
        metadata: ObjectMeta {
            name: name.into(),
            namespace: "default".to_string(),
            labels: HashMap::from([("app".to_string(), "my-app".to_string())]),
            annotations: HashMap::new(),
        },
        spec: PodSpec {
            nodename: None,
            containers,
            init_containers: vec![],
        },
    }
}
