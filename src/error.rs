//! Stable error codes for API clients.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Db(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("User {0} does not exist")]
    UserNotFound(i64),

    #[error("Bus {0} does not exist")]
    BusNotFound(i64),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "DB_ERROR",
            Self::Unavailable(_) => "STORE_UNAVAILABLE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::BusNotFound(_) => "BUS_NOT_FOUND",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }

    pub fn to_serde(&self) -> AppErrorDto {
        AppErrorDto {
            error: self.to_string(),
            code: self.code().to_string(),
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e.to_string())
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_serde().serialize(serializer)
    }
}

/// Wire shape of a failed request: `{"error": "...", "code": "..."}`.
#[derive(Debug, Serialize)]
pub struct AppErrorDto {
    pub error: String,
    pub code: String,
}
