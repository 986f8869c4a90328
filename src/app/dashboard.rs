//! Dashboard totals.

use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DashboardStatsDto {
    pub total_users: i64,
    pub total_routes: i64,
    pub total_buses: i64,
    pub active_buses: i64,
    pub total_bus_stops: i64,
    pub total_metro_stops: i64,
    pub active_passes: i64,
    /// NULL (no maintenance yet) is reported as 0.
    pub total_maintenance_cost: f64,
}

pub fn dashboard_stats(pool: &DbPool) -> Result<DashboardStatsDto, AppError> {
    let conn = get_connection(pool)?;
    let stats = conn.query_row(
        "SELECT
            (SELECT COUNT(*) FROM User),
            (SELECT COUNT(*) FROM Route),
            (SELECT COUNT(*) FROM Bus),
            (SELECT COUNT(*) FROM Bus WHERE status = 'Active'),
            (SELECT COUNT(*) FROM BusStop),
            (SELECT COUNT(*) FROM MetroStop),
            (SELECT COUNT(*) FROM BusPass WHERE status = 'Active'),
            (SELECT COALESCE(SUM(cost), 0.0) FROM Maintenance)",
        [],
        |r| {
            Ok(DashboardStatsDto {
                total_users: r.get(0)?,
                total_routes: r.get(1)?,
                total_buses: r.get(2)?,
                active_buses: r.get(3)?,
                total_bus_stops: r.get(4)?,
                total_metro_stops: r.get(5)?,
                active_passes: r.get(6)?,
                total_maintenance_cost: r.get(7)?,
            })
        },
    )?;
    Ok(stats)
}
