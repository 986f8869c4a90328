use super::{created, json_body, run_blocking, AppState, CreatedResp};
use crate::app::{bus_stop_create, bus_stop_list, BusStopCreateReq, BusStopDto};
use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub(crate) async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BusStopDto>>, AppError> {
    run_blocking(&state, bus_stop_list).await.map(Json)
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<BusStopCreateReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResp>), AppError> {
    let req = json_body(payload)?;
    let id = run_blocking(&state, move |pool| bus_stop_create(pool, req)).await?;
    Ok(created(id, "Bus stop created successfully"))
}
