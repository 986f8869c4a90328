pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

pub use api::{build_router, AppState};
pub use config::ServerConfig;
