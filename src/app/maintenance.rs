//! Maintenance record use cases.

use crate::domain::parse_date;
use super::form;
use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct MaintenanceCreateReq {
    #[serde(default, deserialize_with = "form::opt_int")]
    pub contractor_id: Option<i64>,
    #[serde(deserialize_with = "form::int")]
    pub bus_id: i64,
    pub details: Option<String>,
    pub maintenance_date: String,
    #[serde(default, deserialize_with = "form::opt_float")]
    pub cost: Option<f64>,
    pub entity_type: Option<String>,
    #[serde(default, deserialize_with = "form::opt_int")]
    pub entity_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MaintenanceDto {
    pub maintenance_id: i64,
    pub contractor_id: Option<i64>,
    pub bus_id: i64,
    pub details: String,
    pub maintenance_date: NaiveDate,
    pub cost: f64,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub registration_no: String,
    pub bus_type: String,
    pub contractor_name: Option<String>,
}

pub fn maintenance_create(pool: &DbPool, req: MaintenanceCreateReq) -> Result<i64, AppError> {
    let maintenance_date = parse_date("maintenance_date", &req.maintenance_date)?;
    let cost = req.cost.unwrap_or(0.0);
    if cost < 0.0 {
        return Err(AppError::Validation("cost must not be negative".into()));
    }

    let conn = get_connection(pool)?;
    let bus_exists = conn
        .query_row("SELECT 1 FROM Bus WHERE bus_id = ?1", [req.bus_id], |_| Ok(()))
        .optional()?
        .is_some();
    if !bus_exists {
        return Err(AppError::BusNotFound(req.bus_id));
    }

    conn.execute(
        "INSERT INTO Maintenance (contractor_id, bus_id, details, maintenance_date, cost, entity_type, entity_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            req.contractor_id,
            req.bus_id,
            req.details.unwrap_or_default(),
            maintenance_date,
            cost,
            req.entity_type,
            req.entity_id
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Maintenance history, most recent work first.
pub fn maintenance_list(pool: &DbPool) -> Result<Vec<MaintenanceDto>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(
        "SELECT m.maintenance_id, m.contractor_id, m.bus_id, m.details, m.maintenance_date, m.cost,
                m.entity_type, m.entity_id, b.registration_no, b.type AS bus_type, c.name AS contractor_name
         FROM Maintenance m
         JOIN Bus b ON m.bus_id = b.bus_id
         LEFT JOIN Contractor c ON m.contractor_id = c.contractor_id
         ORDER BY m.maintenance_date DESC, m.maintenance_id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(MaintenanceDto {
            maintenance_id: r.get(0)?,
            contractor_id: r.get(1)?,
            bus_id: r.get(2)?,
            details: r.get(3)?,
            maintenance_date: r.get(4)?,
            cost: r.get(5)?,
            entity_type: r.get(6)?,
            entity_id: r.get(7)?,
            registration_no: r.get(8)?,
            bus_type: r.get(9)?,
            contractor_name: r.get(10)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
