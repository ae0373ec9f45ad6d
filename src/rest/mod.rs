// rest/mod.rs — Public REST API server.
//
// Axum HTTP server exposing the task CRUD endpoints over JSON.
//
// Endpoints:
//   POST   /tasks
//   GET    /tasks/show
//   PUT    /tasks/show
//   DELETE /tasks/delete
//   GET    /health
//   GET    /metrics

pub mod routes;

use anyhow::Result;
use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("REST API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Health + metrics (no body contracts beyond their own)
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::metrics::metrics))
        // Task CRUD — wrong verbs answer 405 with a JSON message
        .route(
            "/tasks",
            post(routes::tasks::create_tasks).fallback(method_not_allowed),
        )
        .route(
            "/tasks/show",
            get(routes::tasks::show_tasks)
                .put(routes::tasks::update_task)
                .fallback(method_not_allowed),
        )
        .route(
            "/tasks/delete",
            delete(routes::tasks::delete_task).fallback(method_not_allowed),
        )
        .fallback(unknown_path)
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "Method Not Allowed" })),
    )
}

async fn unknown_path() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not found" })),
    )
}
