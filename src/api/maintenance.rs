use super::{created, json_body, run_blocking, AppState, CreatedResp};
use crate::app::{maintenance_create, maintenance_list, MaintenanceCreateReq, MaintenanceDto};
use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub(crate) async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaintenanceDto>>, AppError> {
    run_blocking(&state, maintenance_list).await.map(Json)
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<MaintenanceCreateReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResp>), AppError> {
    let req = json_body(payload)?;
    let id = run_blocking(&state, move |pool| maintenance_create(pool, req)).await?;
    Ok(created(id, "Maintenance record created successfully"))
}
