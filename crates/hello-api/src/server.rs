// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP routing and listeners.
//!
//! | Method | Path | Request | Response |
//! |--------|------|---------|----------|
//! | POST | `/hello` | [`HelloId`] | [`Hello`](crate::models::Hello) |
//! | POST | `/newhello` | [`NewHello`] | [`Hello`](crate::models::Hello) |
//!
//! Anything else gets a JSON [`ApiError`]: 404 for an unknown path, 405 for a
//! known path with the wrong method.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::Response;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::handlers::dispatch;
use crate::models::{ApiError, HelloId, NewHello};
use crate::persistence::Store;

/// Router state: the store every handler operates on.
pub type AppState = Arc<dyn Store>;

/// Bind the API routes onto `router`.
pub fn register_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/hello", post(hello))
        .route("/newhello", post(new_hello))
}

async fn hello(State(store): State<AppState>, body: Bytes) -> Response {
    dispatch(body, |request: HelloId| async move {
        store.fetch_by_id(request).await
    })
    .await
}

async fn new_hello(State(store): State<AppState>, body: Bytes) -> Response {
    dispatch(body, |request: NewHello| async move {
        store.get_or_create_by_name(request).await
    })
    .await
}

/// Build the API router around `store`.
pub fn build_router(store: AppState) -> Router {
    with_fallbacks(register_routes(Router::new()))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Build the health check router serving an empty 200 on `GET path`.
///
/// `path` must be a literal route, as checked by
/// [`RunConfig::validate`](crate::config::RunConfig::validate).
pub fn health_router(path: &str) -> Router {
    with_fallbacks(Router::new().route(path, get(health)))
        .layer(TraceLayer::new_for_http())
}

fn with_fallbacks<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::NOT_FOUND.as_u16(),
        format!("no route matches {}", uri.path()),
    )
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED.as_u16(),
        format!("route {} does not handle method {}", uri.path(), method),
    )
}

/// Serve `router` on `addr` until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
