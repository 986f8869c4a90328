//! Server configuration from the environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub log_json: bool,
}

pub fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn default_db_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("transit-admin").join("transit.db")
}

impl ServerConfig {
    /// `TRANSIT_BIND` wins; otherwise `0.0.0.0:$PORT` (default 5001).
    pub fn from_env() -> Result<Self, String> {
        let bind_raw = match env::var("TRANSIT_BIND") {
            Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => {
                let port = match env::var("PORT") {
                    Ok(p) => p
                        .trim()
                        .parse::<u16>()
                        .map_err(|e| format!("invalid PORT {p}: {e}"))?,
                    Err(_) => DEFAULT_PORT,
                };
                format!("0.0.0.0:{port}")
            }
        };
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| format!("invalid bind addr {bind_raw}: {e}"))?;

        let db_path = env::var("TRANSIT_DB_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        Ok(Self {
            bind,
            db_path,
            log_json: env_bool("TRANSIT_LOG_JSON", false),
        })
    }
}
