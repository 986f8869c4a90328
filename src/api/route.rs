use super::{created, json_body, run_blocking, AppState, CreatedResp, MessageResp};
use crate::app::{
    route_add_stop, route_create, route_delete, route_get, route_list, route_update,
    RouteAddStopReq, RouteCreateReq, RouteDto, RouteListItemDto, RouteUpdateReq,
};
use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub(crate) async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RouteListItemDto>>, AppError> {
    run_blocking(&state, route_list).await.map(Json)
}

pub(crate) async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RouteDto>, AppError> {
    run_blocking(&state, move |pool| route_get(pool, id))
        .await
        .map(Json)
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<RouteCreateReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResp>), AppError> {
    let req = json_body(payload)?;
    let id = run_blocking(&state, move |pool| route_create(pool, req)).await?;
    Ok(created(id, "Route created successfully"))
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<RouteUpdateReq>, JsonRejection>,
) -> Result<Json<MessageResp>, AppError> {
    let req = json_body(payload)?;
    run_blocking(&state, move |pool| route_update(pool, id, req)).await?;
    Ok(Json(MessageResp::new("Route updated successfully")))
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResp>, AppError> {
    run_blocking(&state, move |pool| route_delete(pool, id)).await?;
    Ok(Json(MessageResp::new("Route deleted successfully")))
}

pub(crate) async fn add_stop_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<RouteAddStopReq>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResp>), AppError> {
    let req = json_body(payload)?;
    run_blocking(&state, move |pool| route_add_stop(pool, id, req)).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResp::new("Stop added to route successfully")),
    ))
}
