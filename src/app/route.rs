//! Route use cases, including the route/stop link table.

use super::form;
use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RouteCreateReq {
    pub route_name: String,
    pub start_stop: Option<String>,
    pub end_stop: Option<String>,
    #[serde(default, deserialize_with = "form::opt_float")]
    pub total_distance: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RouteUpdateReq {
    pub route_name: Option<String>,
    pub start_stop: Option<String>,
    pub end_stop: Option<String>,
    #[serde(default, deserialize_with = "form::opt_float")]
    pub total_distance: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RouteAddStopReq {
    #[serde(deserialize_with = "form::int")]
    pub stop_id: i64,
    #[serde(default, deserialize_with = "form::opt_int")]
    pub stop_order: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RouteDto {
    pub route_id: i64,
    pub route_name: String,
    pub start_stop: String,
    pub end_stop: String,
    pub total_distance: Option<f64>,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct RouteListItemDto {
    #[serde(flatten)]
    pub route: RouteDto,
    pub bus_count: i64,
    pub stop_count: i64,
}

pub fn route_create(pool: &DbPool, req: RouteCreateReq) -> Result<i64, AppError> {
    let route_name = req.route_name.trim();
    if route_name.is_empty() {
        return Err(AppError::Validation("route_name is required".into()));
    }
    let status = req
        .status
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Active".to_string());

    let conn = get_connection(pool)?;
    conn.execute(
        "INSERT INTO Route (route_name, start_stop, end_stop, total_distance, status) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            route_name,
            req.start_stop.unwrap_or_default(),
            req.end_stop.unwrap_or_default(),
            req.total_distance,
            status
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Routes with how many buses run them and how many stops they serve.
pub fn route_list(pool: &DbPool) -> Result<Vec<RouteListItemDto>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(
        "SELECT r.route_id, r.route_name, r.start_stop, r.end_stop, r.total_distance, r.status,
                COUNT(DISTINCT b.bus_id) AS bus_count,
                COUNT(DISTINCT rbs.stop_id) AS stop_count
         FROM Route r
         LEFT JOIN Bus b ON r.route_id = b.route_id
         LEFT JOIN RouteBusStop rbs ON r.route_id = rbs.route_id
         GROUP BY r.route_id
         ORDER BY r.route_id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(RouteListItemDto {
            route: RouteDto {
                route_id: r.get(0)?,
                route_name: r.get(1)?,
                start_stop: r.get(2)?,
                end_stop: r.get(3)?,
                total_distance: r.get(4)?,
                status: r.get(5)?,
            },
            bus_count: r.get(6)?,
            stop_count: r.get(7)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn route_get(pool: &DbPool, route_id: i64) -> Result<RouteDto, AppError> {
    let conn = get_connection(pool)?;
    conn.query_row(
        "SELECT route_id, route_name, start_stop, end_stop, total_distance, status FROM Route WHERE route_id = ?1",
        [route_id],
        |r| {
            Ok(RouteDto {
                route_id: r.get(0)?,
                route_name: r.get(1)?,
                start_stop: r.get(2)?,
                end_stop: r.get(3)?,
                total_distance: r.get(4)?,
                status: r.get(5)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound("Route not found".into()))
}

pub fn route_update(pool: &DbPool, route_id: i64, req: RouteUpdateReq) -> Result<usize, AppError> {
    if let Some(name) = req.route_name.as_deref() {
        if name.trim().is_empty() {
            return Err(AppError::Validation("route_name is required".into()));
        }
    }
    let conn = get_connection(pool)?;
    let changed = conn.execute(
        "UPDATE Route SET route_name = COALESCE(?1, route_name), start_stop = COALESCE(?2, start_stop),
                end_stop = COALESCE(?3, end_stop), total_distance = COALESCE(?4, total_distance),
                status = COALESCE(?5, status)
         WHERE route_id = ?6",
        params![
            req.route_name.as_deref().map(str::trim),
            req.start_stop,
            req.end_stop,
            req.total_distance,
            req.status,
            route_id
        ],
    )?;
    Ok(changed)
}

/// Buses on the route are detached (route_id set to NULL), stop links removed.
pub fn route_delete(pool: &DbPool, route_id: i64) -> Result<usize, AppError> {
    let conn = get_connection(pool)?;
    Ok(conn.execute("DELETE FROM Route WHERE route_id = ?1", [route_id])?)
}

/// Link a bus stop to a route. Re-linking an existing pair updates its order.
pub fn route_add_stop(pool: &DbPool, route_id: i64, req: RouteAddStopReq) -> Result<(), AppError> {
    let conn = get_connection(pool)?;
    conn.execute(
        "INSERT INTO RouteBusStop (route_id, stop_id, stop_order) VALUES (?1, ?2, ?3)
         ON CONFLICT(route_id, stop_id) DO UPDATE SET stop_order = excluded.stop_order",
        params![route_id, req.stop_id, req.stop_order],
    )?;
    Ok(())
}
