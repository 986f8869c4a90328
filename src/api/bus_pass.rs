use super::{json_body, run_blocking, AppState, MessageResp};
use crate::app::{
    bus_pass_delete, bus_pass_get, bus_pass_issue, bus_pass_list, BusPassDto, BusPassIssueReq,
    BusPassIssuedDto,
};
use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub(crate) async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BusPassDto>>, AppError> {
    run_blocking(&state, bus_pass_list).await.map(Json)
}

pub(crate) async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BusPassDto>, AppError> {
    run_blocking(&state, move |pool| bus_pass_get(pool, id))
        .await
        .map(Json)
}

pub(crate) async fn issue_handler(
    State(state): State<AppState>,
    payload: Result<Json<BusPassIssueReq>, JsonRejection>,
) -> Result<(StatusCode, Json<BusPassIssuedDto>), AppError> {
    let req = json_body(payload)?;
    let issued = run_blocking(&state, move |pool| bus_pass_issue(pool, req)).await?;
    Ok((StatusCode::CREATED, Json(issued)))
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResp>, AppError> {
    run_blocking(&state, move |pool| bus_pass_delete(pool, id)).await?;
    Ok(Json(MessageResp::new("Bus pass deleted successfully")))
}
