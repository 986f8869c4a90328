//! Bus pass types, lifecycle status, and expiry derivation.

use crate::error::AppError;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar date format used on the wire and in the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Dates past this year do not fit the four-digit `YYYY` text form.
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassType {
    Weekly,
    Monthly,
    Quarterly,
    Annual,
}

impl PassType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Annual => "Annual",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Weekly, Self::Monthly, Self::Quarterly, Self::Annual]
    }

    /// Expiry date for a pass of this type issued on `issue_date`.
    ///
    /// Month-based offsets keep the day of month when the target month has it,
    /// otherwise they land on the last day of the target month
    /// (2024-01-31 + Monthly = 2024-02-29, 2024-02-29 + Annual = 2025-02-28).
    pub fn expiry_for(&self, issue_date: NaiveDate) -> Result<NaiveDate, AppError> {
        let expiry = match self {
            Self::Weekly => issue_date.checked_add_days(Days::new(7)),
            Self::Monthly => issue_date.checked_add_months(Months::new(1)),
            Self::Quarterly => issue_date.checked_add_months(Months::new(3)),
            Self::Annual => issue_date.checked_add_months(Months::new(12)),
        };
        expiry.filter(|d| d.year() <= MAX_YEAR).ok_or_else(|| {
            AppError::Validation(format!(
                "issue_date {} is out of range for a {} pass",
                issue_date,
                self.as_str()
            ))
        })
    }
}

impl FromStr for PassType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Weekly" => Ok(Self::Weekly),
            "Monthly" => Ok(Self::Monthly),
            "Quarterly" => Ok(Self::Quarterly),
            "Annual" => Ok(Self::Annual),
            other => Err(AppError::Validation(format!(
                "pass_type must be one of Weekly, Monthly, Quarterly, Annual (got {:?})",
                other
            ))),
        }
    }
}

impl fmt::Display for PassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PassStatus {
    #[default]
    Active,
    Expired,
    Cancelled,
}

impl PassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for PassStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Expired" => Ok(Self::Expired),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::Validation(format!("unknown pass status {:?}", other))),
        }
    }
}

/// Parse a caller-supplied calendar date (`YYYY-MM-DD`) for `field`.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    let trimmed = raw.trim();
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|e| {
        AppError::Validation(format!("{} {:?} is not a valid date: {}", field, trimmed, e))
    })?;
    if !(1..=MAX_YEAR).contains(&date.year()) {
        return Err(AppError::Validation(format!(
            "{} {:?} is outside years 0001-{}",
            field, trimmed, MAX_YEAR
        )));
    }
    Ok(date)
}
