//! Domain rules: pass types, pass status and the expiry offset table.

mod pass;

pub use pass::{parse_date, PassStatus, PassType, DATE_FORMAT};
