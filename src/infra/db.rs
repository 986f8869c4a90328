//! SQLite connection and migrations.

use crate::error::AppError;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// The single store handle shared by every request.
pub struct DbPool(pub Mutex<Connection>);

/// Initialize DB at path, run migrations, return the shared handle.
pub fn init_db(db_path: &Path) -> Result<DbPool, AppError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppError::Unavailable(e.to_string()))?;
    }
    let conn = Connection::open(db_path).map_err(|e| AppError::Unavailable(e.to_string()))?;
    prepare(conn)
}

/// In-memory database with the full schema applied.
pub fn init_test_db() -> DbPool {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    prepare(conn).expect("migrate in-memory db")
}

fn prepare(mut conn: Connection) -> Result<DbPool, AppError> {
    // Must be set outside a transaction; SQLite ignores it inside one.
    conn.pragma_update(None, "foreign_keys", "ON")?;
    run_migrations(&mut conn)?;
    Ok(DbPool(Mutex::new(conn)))
}

fn run_migrations(conn: &mut Connection) -> Result<(), AppError> {
    let tx = conn.transaction()?;

    // Ensure schema_migrations exists (first run)
    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
        [],
    )?;

    let applied: Vec<i32> = tx
        .prepare("SELECT version FROM schema_migrations ORDER BY version")?
        .query_map([], |r| r.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../migrations/0001_init.sql"))];

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        // The script's own INSERT INTO schema_migrations is skipped; we record it below.
        let statements = sql
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.contains("INSERT INTO schema_migrations"));
        for stmt in statements {
            tx.execute(stmt, [])?;
        }
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )?;
        log::info!("applied schema migration {}", version);
    }

    tx.commit()?;
    Ok(())
}

/// Lock the shared connection.
///
/// A poisoned lock means an earlier request panicked while holding it. Any
/// transaction it had open was rolled back when its `Transaction` dropped, so
/// the connection is reused and the poison flag cleared.
pub fn get_connection(pool: &DbPool) -> Result<MutexGuard<'_, Connection>, AppError> {
    match pool.0.lock() {
        Ok(guard) => Ok(guard),
        Err(poisoned) => {
            log::warn!("database connection lock was poisoned by a panicked request; recovering");
            pool.0.clear_poison();
            Ok(poisoned.into_inner())
        }
    }
}
