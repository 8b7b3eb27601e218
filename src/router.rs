use std::time::Instant;

use axum::{
    Json, Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{error, info, warn};

use crate::db::GroceryStore;
use crate::handlers::{items, lists};
use crate::types::Envelope;

/// Shared per-process state: the store (and its pool) is created once at
/// startup and injected into handlers, never constructed per call.
#[derive(Clone)]
pub struct CartState {
    pub store: GroceryStore,
}

impl CartState {
    pub fn new(store: GroceryStore) -> Self {
        Self { store }
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::<()>::failure("Resource not found", None)),
    )
        .into_response()
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let start = Instant::now();
    let resp = next.run(req).await;

    let status = resp.status();
    let latency_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        error!(
            "| {:>3} | {:^7} | {} | {}ms",
            status.as_u16(),
            method.as_str(),
            path,
            latency_ms
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {:^7} | {} | {}ms",
            status.as_u16(),
            method.as_str(),
            path,
            latency_ms
        );
    } else {
        info!(
            "| {:>3} | {:^7} | {} | {}ms",
            status.as_u16(),
            method.as_str(),
            path,
            latency_ms
        );
    }

    resp
}

pub fn cartd_router(state: CartState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/grocery_list", get(lists::list_all).post(lists::create))
        .route(
            "/grocery_list/{id}",
            get(lists::get_one).put(lists::update).delete(lists::delete),
        )
        .route(
            "/grocery_list/{id}/items",
            get(items::list_items)
                .post(items::add_item)
                .patch(items::bulk_update)
                .delete(items::bulk_delete),
        )
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
