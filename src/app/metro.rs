//! Metro station and connection use cases.

use super::form;
use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use rusqlite::params;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct MetroStopCreateReq {
    pub name: String,
    pub line: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetroStopDto {
    pub metro_stop_id: i64,
    pub name: String,
    pub line: String,
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct MetroConnectionCreateReq {
    #[serde(deserialize_with = "form::int")]
    pub start_metro_stop_id: i64,
    #[serde(deserialize_with = "form::int")]
    pub end_metro_stop_id: i64,
    #[serde(default, deserialize_with = "form::opt_float")]
    pub distance: Option<f64>,
    /// Minutes.
    #[serde(default, deserialize_with = "form::opt_int")]
    pub travel_time: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MetroConnectionDto {
    pub connection_id: i64,
    pub start_metro_stop_id: i64,
    pub end_metro_stop_id: i64,
    pub distance: Option<f64>,
    pub travel_time: Option<i64>,
    pub start_station: String,
    pub start_line: String,
    pub end_station: String,
    pub end_line: String,
}

pub fn metro_stop_create(pool: &DbPool, req: MetroStopCreateReq) -> Result<i64, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    let conn = get_connection(pool)?;
    conn.execute(
        "INSERT INTO MetroStop (name, line, location) VALUES (?1, ?2, ?3)",
        params![
            name,
            req.line.unwrap_or_default(),
            req.location.unwrap_or_default()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn metro_stop_list(pool: &DbPool) -> Result<Vec<MetroStopDto>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(
        "SELECT metro_stop_id, name, line, location FROM MetroStop ORDER BY metro_stop_id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(MetroStopDto {
            metro_stop_id: r.get(0)?,
            name: r.get(1)?,
            line: r.get(2)?,
            location: r.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn metro_connection_create(
    pool: &DbPool,
    req: MetroConnectionCreateReq,
) -> Result<i64, AppError> {
    if req.start_metro_stop_id == req.end_metro_stop_id {
        return Err(AppError::Validation(
            "a connection needs two different stations".into(),
        ));
    }
    let conn = get_connection(pool)?;
    conn.execute(
        "INSERT INTO MetroConnection (start_metro_stop_id, end_metro_stop_id, distance, travel_time) VALUES (?1, ?2, ?3, ?4)",
        params![
            req.start_metro_stop_id,
            req.end_metro_stop_id,
            req.distance,
            req.travel_time
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn metro_connection_list(pool: &DbPool) -> Result<Vec<MetroConnectionDto>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(
        "SELECT mc.connection_id, mc.start_metro_stop_id, mc.end_metro_stop_id, mc.distance, mc.travel_time,
                ms1.name AS start_station, ms1.line AS start_line,
                ms2.name AS end_station, ms2.line AS end_line
         FROM MetroConnection mc
         JOIN MetroStop ms1 ON mc.start_metro_stop_id = ms1.metro_stop_id
         JOIN MetroStop ms2 ON mc.end_metro_stop_id = ms2.metro_stop_id
         ORDER BY mc.connection_id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(MetroConnectionDto {
            connection_id: r.get(0)?,
            start_metro_stop_id: r.get(1)?,
            end_metro_stop_id: r.get(2)?,
            distance: r.get(3)?,
            travel_time: r.get(4)?,
            start_station: r.get(5)?,
            start_line: r.get(6)?,
            end_station: r.get(7)?,
            end_line: r.get(8)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
