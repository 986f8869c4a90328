use super::{created, json_body, run_blocking, AppState, CreatedResp, MessageResp};
use crate::app::{
    user_create, user_delete, user_get, user_list, user_update, UserCreateReq, UserDto,
    UserUpdateReq,
};
use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub(crate) async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserDto>>, AppError> {
    run_blocking(&state, user_list).await.map(Json)
}

pub(crate) async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserDto>, AppError> {
    run_blocking(&state, move |pool| user_get(pool, id))
        .await
        .map(Json)
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<UserCreateReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResp>), AppError> {
    let req = json_body(payload)?;
    let id = run_blocking(&state, move |pool| user_create(pool, req)).await?;
    Ok(created(id, "User created successfully"))
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UserUpdateReq>, JsonRejection>,
) -> Result<Json<MessageResp>, AppError> {
    let req = json_body(payload)?;
    run_blocking(&state, move |pool| user_update(pool, id, req)).await?;
    Ok(Json(MessageResp::new("User updated successfully")))
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResp>, AppError> {
    run_blocking(&state, move |pool| user_delete(pool, id)).await?;
    Ok(Json(MessageResp::new("User deleted successfully")))
}
