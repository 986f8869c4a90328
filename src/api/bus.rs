use super::{created, json_body, run_blocking, AppState, CreatedResp, MessageResp};
use crate::app::{bus_create, bus_delete, bus_list, bus_update, BusCreateReq, BusDto, BusUpdateReq};
use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub(crate) async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BusDto>>, AppError> {
    run_blocking(&state, bus_list).await.map(Json)
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<BusCreateReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResp>), AppError> {
    let req = json_body(payload)?;
    let id = run_blocking(&state, move |pool| bus_create(pool, req)).await?;
    Ok(created(id, "Bus created successfully"))
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<BusUpdateReq>, JsonRejection>,
) -> Result<Json<MessageResp>, AppError> {
    let req = json_body(payload)?;
    run_blocking(&state, move |pool| bus_update(pool, id, req)).await?;
    Ok(Json(MessageResp::new("Bus updated successfully")))
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResp>, AppError> {
    run_blocking(&state, move |pool| bus_delete(pool, id)).await?;
    Ok(Json(MessageResp::new("Bus deleted successfully")))
}
