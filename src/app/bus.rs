//! Bus fleet use cases.

use super::form;
use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use rusqlite::params;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct BusCreateReq {
    #[serde(default, deserialize_with = "form::opt_int")]
    pub route_id: Option<i64>,
    pub registration_no: String,
    #[serde(rename = "type")]
    pub bus_type: Option<String>,
    #[serde(default, deserialize_with = "form::opt_int")]
    pub capacity: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BusUpdateReq {
    #[serde(default, deserialize_with = "form::opt_int")]
    pub route_id: Option<i64>,
    pub registration_no: Option<String>,
    #[serde(rename = "type")]
    pub bus_type: Option<String>,
    #[serde(default, deserialize_with = "form::opt_int")]
    pub capacity: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BusDto {
    pub bus_id: i64,
    #[serde(default, deserialize_with = "form::opt_int")]
    pub route_id: Option<i64>,
    pub registration_no: String,
    #[serde(rename = "type")]
    pub bus_type: String,
    pub capacity: Option<i64>,
    pub status: String,
    pub route_name: Option<String>,
    pub start_stop: Option<String>,
    pub end_stop: Option<String>,
}

pub fn bus_create(pool: &DbPool, req: BusCreateReq) -> Result<i64, AppError> {
    let registration_no = req.registration_no.trim();
    if registration_no.is_empty() {
        return Err(AppError::Validation("registration_no is required".into()));
    }
    if matches!(req.capacity, Some(c) if c < 0) {
        return Err(AppError::Validation("capacity must not be negative".into()));
    }
    let status = req
        .status
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Active".to_string());

    let conn = get_connection(pool)?;
    conn.execute(
        "INSERT INTO Bus (route_id, registration_no, type, capacity, status) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            req.route_id,
            registration_no,
            req.bus_type.unwrap_or_default(),
            req.capacity,
            status
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Buses with their route's name and endpoints (NULL when unassigned).
pub fn bus_list(pool: &DbPool) -> Result<Vec<BusDto>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(
        "SELECT b.bus_id, b.route_id, b.registration_no, b.type, b.capacity, b.status,
                r.route_name, r.start_stop, r.end_stop
         FROM Bus b
         LEFT JOIN Route r ON b.route_id = r.route_id
         ORDER BY b.bus_id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(BusDto {
            bus_id: r.get(0)?,
            route_id: r.get(1)?,
            registration_no: r.get(2)?,
            bus_type: r.get(3)?,
            capacity: r.get(4)?,
            status: r.get(5)?,
            route_name: r.get(6)?,
            start_stop: r.get(7)?,
            end_stop: r.get(8)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn bus_update(pool: &DbPool, bus_id: i64, req: BusUpdateReq) -> Result<usize, AppError> {
    if matches!(req.capacity, Some(c) if c < 0) {
        return Err(AppError::Validation("capacity must not be negative".into()));
    }
    let conn = get_connection(pool)?;
    let changed = conn.execute(
        "UPDATE Bus SET route_id = COALESCE(?1, route_id), registration_no = COALESCE(?2, registration_no),
                type = COALESCE(?3, type), capacity = COALESCE(?4, capacity), status = COALESCE(?5, status)
         WHERE bus_id = ?6",
        params![
            req.route_id,
            req.registration_no.as_deref().map(str::trim),
            req.bus_type,
            req.capacity,
            req.status,
            bus_id
        ],
    )?;
    Ok(changed)
}

pub fn bus_delete(pool: &DbPool, bus_id: i64) -> Result<usize, AppError> {
    let conn = get_connection(pool)?;
    Ok(conn.execute("DELETE FROM Bus WHERE bus_id = ?1", [bus_id])?)
}
