use super::{created, json_body, run_blocking, AppState, CreatedResp};
use crate::app::{contractor_create, contractor_list, ContractorCreateReq, ContractorDto};
use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub(crate) async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContractorDto>>, AppError> {
    run_blocking(&state, contractor_list).await.map(Json)
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<ContractorCreateReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResp>), AppError> {
    let req = json_body(payload)?;
    let id = run_blocking(&state, move |pool| contractor_create(pool, req)).await?;
    Ok(created(id, "Contractor created successfully"))
}
