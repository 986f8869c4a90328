use super::{created, json_body, run_blocking, AppState, CreatedResp};
use crate::app::{
    metro_connection_create, metro_connection_list, metro_stop_create, metro_stop_list,
    MetroConnectionCreateReq, MetroConnectionDto, MetroStopCreateReq, MetroStopDto,
};
use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub(crate) async fn stop_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<MetroStopDto>>, AppError> {
    run_blocking(&state, metro_stop_list).await.map(Json)
}

pub(crate) async fn stop_create_handler(
    State(state): State<AppState>,
    payload: Result<Json<MetroStopCreateReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResp>), AppError> {
    let req = json_body(payload)?;
    let id = run_blocking(&state, move |pool| metro_stop_create(pool, req)).await?;
    Ok(created(id, "Metro stop created successfully"))
}

pub(crate) async fn connection_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<MetroConnectionDto>>, AppError> {
    run_blocking(&state, metro_connection_list).await.map(Json)
}

pub(crate) async fn connection_create_handler(
    State(state): State<AppState>,
    payload: Result<Json<MetroConnectionCreateReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResp>), AppError> {
    let req = json_body(payload)?;
    let id = run_blocking(&state, move |pool| metro_connection_create(pool, req)).await?;
    Ok(created(id, "Metro connection created successfully"))
}
