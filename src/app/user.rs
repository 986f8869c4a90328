//! User (pass holder) use cases.

use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UserCreateReq {
    pub name: String,
    pub contact_info: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserUpdateReq {
    pub name: Option<String>,
    pub contact_info: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub user_id: i64,
    pub name: String,
    pub contact_info: String,
    pub address: String,
}

fn map_user(r: &Row<'_>) -> rusqlite::Result<UserDto> {
    Ok(UserDto {
        user_id: r.get(0)?,
        name: r.get(1)?,
        contact_info: r.get(2)?,
        address: r.get(3)?,
    })
}

pub fn user_create(pool: &DbPool, req: UserCreateReq) -> Result<i64, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    let conn = get_connection(pool)?;
    conn.execute(
        "INSERT INTO User (name, contact_info, address) VALUES (?1, ?2, ?3)",
        params![
            name,
            req.contact_info.unwrap_or_default(),
            req.address.unwrap_or_default()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn user_list(pool: &DbPool) -> Result<Vec<UserDto>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt =
        conn.prepare("SELECT user_id, name, contact_info, address FROM User ORDER BY user_id DESC")?;
    let rows = stmt.query_map([], map_user)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn user_get(pool: &DbPool, user_id: i64) -> Result<UserDto, AppError> {
    let conn = get_connection(pool)?;
    conn.query_row(
        "SELECT user_id, name, contact_info, address FROM User WHERE user_id = ?1",
        [user_id],
        map_user,
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound("User not found".into()))
}

/// Update in place; fields left out keep their stored value. Unknown ids change nothing.
pub fn user_update(pool: &DbPool, user_id: i64, req: UserUpdateReq) -> Result<usize, AppError> {
    if let Some(name) = req.name.as_deref() {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name is required".into()));
        }
    }
    let conn = get_connection(pool)?;
    let changed = conn.execute(
        "UPDATE User SET name = COALESCE(?1, name), contact_info = COALESCE(?2, contact_info), address = COALESCE(?3, address) WHERE user_id = ?4",
        params![
            req.name.as_deref().map(str::trim),
            req.contact_info,
            req.address,
            user_id
        ],
    )?;
    Ok(changed)
}

/// Deleting a user also removes their passes (ON DELETE CASCADE).
pub fn user_delete(pool: &DbPool, user_id: i64) -> Result<usize, AppError> {
    let conn = get_connection(pool)?;
    Ok(conn.execute("DELETE FROM User WHERE user_id = ?1", [user_id])?)
}
