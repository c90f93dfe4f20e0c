use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::PodTask;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::error::ProviderError;
use crate::provider::Provider;

type SharedProvider = Arc<dyn Provider>;
type Reply = (StatusCode, Json<Value>);

/// HTTP surface the host uses to drive the provider.
pub fn router(provider: SharedProvider) -> Router {
    Router::new()
        .route(
            "/pods",
            get(list_pods)
                .post(create_pod)
                .put(update_pod)
                .delete(delete_pod),
        )
        .route("/pods/{namespace}/{name}", get(get_pod))
        .route("/pods/{namespace}/{name}/status", get(get_pod_status))
        .route(
            "/containerLogs/{namespace}/{pod}/{container}",
            get(get_container_logs),
        )
        .route("/node", get(get_node))
        .with_state(provider)
}

pub async fn serve(addr: SocketAddr, provider: SharedProvider) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Serving on {}", listener.local_addr()?);
    axum::serve(listener, router(provider)).await?;
    Ok(())
}

fn error_reply(e: ProviderError) -> Reply {
    let status = if e.is_invalid_pod() {
        StatusCode::BAD_REQUEST
    } else {
        error!("provider call failed: {}", e.detail());
        StatusCode::BAD_GATEWAY
    };
    (status, Json(json!({ "msg": e.detail() })))
}

fn not_found(namespace: &str, name: &str) -> Reply {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "msg": format!("pod {namespace}/{name} not found") })),
    )
}

fn ok<T: serde::Serialize>(value: T) -> Reply {
    match serde_json::to_value(value) {
        Ok(v) => (StatusCode::OK, Json(v)),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "msg": e.to_string() })),
        ),
    }
}

async fn create_pod(State(provider): State<SharedProvider>, Json(pod): Json<PodTask>) -> Reply {
    match provider.create_pod(&pod).await {
        Ok(()) => (StatusCode::CREATED, Json(json!({}))),
        Err(e) => error_reply(e),
    }
}

async fn update_pod(State(provider): State<SharedProvider>, Json(pod): Json<PodTask>) -> Reply {
    match provider.update_pod(&pod).await {
        Ok(()) => (StatusCode::OK, Json(json!({}))),
        Err(e) => error_reply(e),
    }
}

async fn delete_pod(State(provider): State<SharedProvider>, Json(pod): Json<PodTask>) -> Reply {
    match provider.delete_pod(&pod).await {
        Ok(()) => (StatusCode::OK, Json(json!({}))),
        Err(e) => error_reply(e),
    }
}

async fn list_pods(State(provider): State<SharedProvider>) -> Reply {
    match provider.get_pods().await {
        Ok(pods) => ok(pods),
        Err(e) => error_reply(e),
    }
}

async fn get_pod(
    State(provider): State<SharedProvider>,
    Path((namespace, name)): Path<(String, String)>,
) -> Reply {
    match provider.get_pod(&namespace, &name).await {
        Ok(Some(pod)) => ok(pod),
        Ok(None) => not_found(&namespace, &name),
        Err(e) => error_reply(e),
    }
}

async fn get_pod_status(
    State(provider): State<SharedProvider>,
    Path((namespace, name)): Path<(String, String)>,
) -> Reply {
    match provider.get_pod_status(&namespace, &name).await {
        Ok(Some(status)) => ok(status),
        Ok(None) => not_found(&namespace, &name),
        Err(e) => error_reply(e),
    }
}

#[derive(Debug, Deserialize)]
struct LogsQuery {
    // negative means no limit, same as 0
    #[serde(default)]
    tail: i64,
}

async fn get_container_logs(
    State(provider): State<SharedProvider>,
    Path((namespace, pod, container)): Path<(String, String, String)>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Reply {
    let tail = match query {
        Ok(Query(query)) => usize::try_from(query.tail).unwrap_or(0),
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "msg": rejection.body_text() })),
            );
        }
    };
    match provider
        .get_container_logs(&namespace, &pod, &container, tail)
        .await
    {
        Ok(logs) => ok(json!({ "logs": logs })),
        Err(e) => error_reply(e),
    }
}

async fn get_node(State(provider): State<SharedProvider>) -> Reply {
    ok(provider.node_status())
}
