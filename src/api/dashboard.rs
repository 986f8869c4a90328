use super::{run_blocking, AppState};
use crate::app::{dashboard_stats, DashboardStatsDto};
use crate::error::AppError;
use axum::extract::State;
use axum::Json;

pub(crate) async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<DashboardStatsDto>, AppError> {
    run_blocking(&state, dashboard_stats).await.map(Json)
}
