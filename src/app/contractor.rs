//! Maintenance contractor use cases.

use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use rusqlite::params;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ContractorCreateReq {
    pub name: String,
    pub contact_details: Option<String>,
    pub service_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContractorDto {
    pub contractor_id: i64,
    pub name: String,
    pub contact_details: String,
    pub service_type: String,
    pub total_jobs: i64,
    pub total_revenue: f64,
}

pub fn contractor_create(pool: &DbPool, req: ContractorCreateReq) -> Result<i64, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    let conn = get_connection(pool)?;
    conn.execute(
        "INSERT INTO Contractor (name, contact_details, service_type) VALUES (?1, ?2, ?3)",
        params![
            name,
            req.contact_details.unwrap_or_default(),
            req.service_type.unwrap_or_default()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Contractors with job count and billed total across their maintenance records.
pub fn contractor_list(pool: &DbPool) -> Result<Vec<ContractorDto>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(
        "SELECT c.contractor_id, c.name, c.contact_details, c.service_type,
                COUNT(m.maintenance_id) AS total_jobs,
                COALESCE(SUM(m.cost), 0.0) AS total_revenue
         FROM Contractor c
         LEFT JOIN Maintenance m ON c.contractor_id = m.contractor_id
         GROUP BY c.contractor_id
         ORDER BY c.contractor_id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(ContractorDto {
            contractor_id: r.get(0)?,
            name: r.get(1)?,
            contact_details: r.get(2)?,
            service_type: r.get(3)?,
            total_jobs: r.get(4)?,
            total_revenue: r.get(5)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
