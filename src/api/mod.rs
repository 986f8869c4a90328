//! HTTP handlers (JSON boundary) and router assembly.
//!
//! Every handler hands its work to a use case in [`crate::app`] on the
//! blocking pool, since the store is a synchronous SQLite connection.

mod bus;
mod bus_pass;
mod bus_stop;
mod contractor;
mod dashboard;
mod maintenance;
mod metro;
mod route;
mod user;

use crate::error::AppError;
use crate::infra::DbPool;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, Method, Request, StatusCode};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Shared handler state: the injected store handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<DbPool>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

/// `{"id": .., "message": ..}` returned with 201 by create endpoints.
#[derive(Debug, Serialize)]
pub struct CreatedResp {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResp {
    pub message: String,
}

impl MessageResp {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub(crate) fn created(id: i64, message: &str) -> (StatusCode, Json<CreatedResp>) {
    (
        StatusCode::CREATED,
        Json(CreatedResp {
            id,
            message: message.to_string(),
        }),
    )
}

/// Client and server failures share one status; only single-record lookups report 404.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        log::error!("request failed [{}]: {}", self.code(), self);
        (status, Json(self.to_serde())).into_response()
    }
}

/// Unwrap a JSON body, turning a malformed body into a validation error.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| AppError::Validation(e.body_text()))
}

/// Run a store operation on the blocking pool.
pub(crate) async fn run_blocking<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    F: FnOnce(&DbPool) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let pool = state.pool.clone();
    tokio::task::spawn_blocking(move || op(&pool))
        .await
        .map_err(|e| AppError::Unavailable(e.to_string()))?
}

async fn healthz_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn cors_middleware(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        let headers = resp.headers_mut();
        headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
        headers.insert(
            "access-control-allow-methods",
            HeaderValue::from_static("GET,POST,PUT,DELETE,OPTIONS"),
        );
        headers.insert(
            "access-control-allow-headers",
            HeaderValue::from_static("content-type"),
        );
        return resp;
    }
    let mut resp = next.run(req).await;
    resp.headers_mut()
        .insert("access-control-allow-origin", HeaderValue::from_static("*"));
    resp
}

async fn request_log_middleware(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();
    let resp = next.run(req).await;
    log::info!(
        "{} {} -> {} ({} ms)",
        method,
        path,
        resp.status().as_u16(),
        started.elapsed().as_millis()
    );
    resp
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/api/dashboard/stats", get(dashboard::stats_handler))
        .route(
            "/api/users",
            get(user::list_handler).post(user::create_handler),
        )
        .route(
            "/api/users/:id",
            get(user::get_handler)
                .put(user::update_handler)
                .delete(user::delete_handler),
        )
        .route(
            "/api/routes",
            get(route::list_handler).post(route::create_handler),
        )
        .route(
            "/api/routes/:id",
            get(route::get_handler)
                .put(route::update_handler)
                .delete(route::delete_handler),
        )
        .route("/api/routes/:id/stops", post(route::add_stop_handler))
        .route(
            "/api/buses",
            get(bus::list_handler).post(bus::create_handler),
        )
        .route(
            "/api/buses/:id",
            put(bus::update_handler).delete(bus::delete_handler),
        )
        .route(
            "/api/bus-passes",
            get(bus_pass::list_handler).post(bus_pass::issue_handler),
        )
        .route(
            "/api/bus-passes/:id",
            get(bus_pass::get_handler).delete(bus_pass::delete_handler),
        )
        .route(
            "/api/bus-stops",
            get(bus_stop::list_handler).post(bus_stop::create_handler),
        )
        .route(
            "/api/maintenance",
            get(maintenance::list_handler).post(maintenance::create_handler),
        )
        .route(
            "/api/metro-stops",
            get(metro::stop_list_handler).post(metro::stop_create_handler),
        )
        .route(
            "/api/metro-connections",
            get(metro::connection_list_handler).post(metro::connection_create_handler),
        )
        .route(
            "/api/contractors",
            get(contractor::list_handler).post(contractor::create_handler),
        )
        .layer(from_fn(cors_middleware))
        .layer(from_fn(request_log_middleware))
        .with_state(state)
}
