//! Command handlers, grouped by the screen they correspond to.

pub mod dashboard;
pub mod inventory;
pub mod sales;
pub mod session;
pub mod settings;
pub mod system;
pub mod users;

use chrono::NaiveDate;

use crate::cli::core::CommandError;

/// Fetches a required positional argument or fails with the usage line.
pub(crate) fn required<'a>(
    args: &'a [&str],
    index: usize,
    usage: &str,
) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::Usage(format!("Usage: {usage}")))
}

pub(crate) fn parse_id(raw: &str) -> Result<u64, CommandError> {
    raw.parse::<u64>()
        .map_err(|_| CommandError::Usage(format!("`{raw}` is not a record id")))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CommandError::Usage(format!("`{raw}` is not a date (expected YYYY-MM-DD)")))
}

pub(crate) fn parse_price(raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .map_err(|_| CommandError::Usage(format!("`{raw}` is not an amount")))
}

pub(crate) fn parse_quantity(raw: &str) -> Result<u32, CommandError> {
    raw.parse::<u32>()
        .map_err(|_| CommandError::Usage(format!("`{raw}` is not a quantity")))
}
