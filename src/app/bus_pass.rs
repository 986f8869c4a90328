//! Bus pass use cases: issue, list, get, delete.
//!
//! Issuance is the one workflow with real invariants. The expiry date is
//! always derived from `(issue_date, pass_type)` inside the same transaction
//! that checks the owning user and inserts the row, so a pass is either fully
//! written with its derived expiry or not written at all.

use crate::domain::{parse_date, PassStatus, PassType};
use super::form;
use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use chrono::{Local, NaiveDate};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct BusPassIssueReq {
    #[serde(deserialize_with = "form::int")]
    pub user_id: i64,
    pub pass_type: String,
    /// `YYYY-MM-DD`; today's local date when absent or blank.
    #[serde(default, deserialize_with = "form::opt_text")]
    pub issue_date: Option<String>,
    /// Never accepted when non-blank; a client that sends one gets a clear error.
    #[serde(default, deserialize_with = "form::opt_text")]
    pub expiry_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BusPassIssuedDto {
    pub id: i64,
    pub message: String,
    pub expiry_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct BusPassDto {
    pub pass_id: i64,
    pub user_id: i64,
    pub pass_type: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: String,
    pub user_name: String,
    pub contact_info: String,
}

const PASS_SELECT: &str = "SELECT bp.pass_id, bp.user_id, bp.pass_type, bp.issue_date, bp.expiry_date, bp.status, u.name AS user_name, u.contact_info
     FROM BusPass bp
     JOIN User u ON bp.user_id = u.user_id";

fn map_pass(r: &Row<'_>) -> rusqlite::Result<BusPassDto> {
    Ok(BusPassDto {
        pass_id: r.get(0)?,
        user_id: r.get(1)?,
        pass_type: r.get(2)?,
        issue_date: r.get(3)?,
        expiry_date: r.get(4)?,
        status: r.get(5)?,
        user_name: r.get(6)?,
        contact_info: r.get(7)?,
    })
}

/// Issue a new pass: validate, derive expiry, insert, all or nothing.
pub fn bus_pass_issue(pool: &DbPool, req: BusPassIssueReq) -> Result<BusPassIssuedDto, AppError> {
    if req
        .expiry_date
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty())
    {
        return Err(AppError::Validation(
            "expiry_date is derived from pass_type and issue_date and cannot be supplied".into(),
        ));
    }
    let pass_type: PassType = req.pass_type.trim().parse()?;
    let issue_date = match req.issue_date.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => parse_date("issue_date", raw)?,
        None => Local::now().date_naive(),
    };

    log::info!(
        "issuing bus pass: user_id={} pass_type={} issue_date={}",
        req.user_id,
        pass_type,
        issue_date
    );

    let conn = get_connection(pool)?;
    let tx = conn.unchecked_transaction()?;

    let user_exists = tx
        .query_row(
            "SELECT 1 FROM User WHERE user_id = ?1",
            [req.user_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !user_exists {
        // tx drops here and rolls back
        return Err(AppError::UserNotFound(req.user_id));
    }

    let expiry_date = pass_type.expiry_for(issue_date)?;
    tx.execute(
        "INSERT INTO BusPass (user_id, pass_type, issue_date, expiry_date, status) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            req.user_id,
            pass_type.as_str(),
            issue_date,
            expiry_date,
            PassStatus::Active.as_str()
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    log::info!("bus pass {} issued, expires {}", id, expiry_date);
    Ok(BusPassIssuedDto {
        id,
        message: format!("Bus pass issued successfully. Expires on {}", expiry_date),
        expiry_date,
    })
}

/// All passes with owner name and contact, newest first.
pub fn bus_pass_list(pool: &DbPool) -> Result<Vec<BusPassDto>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(&format!("{} ORDER BY bp.pass_id DESC", PASS_SELECT))?;
    let rows = stmt.query_map([], map_pass)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn bus_pass_get(pool: &DbPool, pass_id: i64) -> Result<BusPassDto, AppError> {
    let conn = get_connection(pool)?;
    conn.query_row(
        &format!("{} WHERE bp.pass_id = ?1", PASS_SELECT),
        [pass_id],
        map_pass,
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("bus pass {}", pass_id)))
}

/// Remove a pass. Missing ids are not an error; returns rows removed.
pub fn bus_pass_delete(pool: &DbPool, pass_id: i64) -> Result<usize, AppError> {
    let conn = get_connection(pool)?;
    let removed = conn.execute("DELETE FROM BusPass WHERE pass_id = ?1", [pass_id])?;
    if removed == 0 {
        log::debug!("delete of bus pass {} matched no rows", pass_id);
    }
    Ok(removed)
}
