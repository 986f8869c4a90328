//! Bus stop use cases.

use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use rusqlite::params;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct BusStopCreateReq {
    pub name: String,
    pub location: Option<String>,
    pub facilities: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BusStopDto {
    pub stop_id: i64,
    pub name: String,
    pub location: String,
    pub facilities: String,
    pub route_count: i64,
}

pub fn bus_stop_create(pool: &DbPool, req: BusStopCreateReq) -> Result<i64, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    let conn = get_connection(pool)?;
    conn.execute(
        "INSERT INTO BusStop (name, location, facilities) VALUES (?1, ?2, ?3)",
        params![
            name,
            req.location.unwrap_or_default(),
            req.facilities.unwrap_or_default()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn bus_stop_list(pool: &DbPool) -> Result<Vec<BusStopDto>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(
        "SELECT bs.stop_id, bs.name, bs.location, bs.facilities,
                COUNT(DISTINCT rbs.route_id) AS route_count
         FROM BusStop bs
         LEFT JOIN RouteBusStop rbs ON bs.stop_id = rbs.stop_id
         GROUP BY bs.stop_id
         ORDER BY bs.stop_id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(BusStopDto {
            stop_id: r.get(0)?,
            name: r.get(1)?,
            location: r.get(2)?,
            facilities: r.get(3)?,
            route_count: r.get(4)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
