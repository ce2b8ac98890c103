// Entity Models - the four tables of a sales dataset
//
// Each entity is a read-only row deserialized straight from its CSV table.
// Column names follow the exported spreadsheets (Spanish headers), with
// English aliases accepted for hand-written fixtures.

pub mod sale;
pub mod product;
pub mod customer;

pub use sale::{SaleHeader, SaleLine};
pub use product::Product;
pub use customer::Customer;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

pub type SaleId = u64;
pub type ProductId = u64;
pub type CustomerId = u64;

// ============================================================================
// DATE PARSING
// ============================================================================

/// Parse a date cell as exported by spreadsheets or written by hand.
///
/// Supports YYYY-MM-DD, YYYY-MM-DD HH:MM:SS, YYYY-MM-DDTHH:MM:SS and
/// DD/MM/YYYY. Time of day is discarded.
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let date_str = date_str.trim();

    // Try YYYY-MM-DD
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Some(date);
    }

    // Try timestamps (spreadsheet exports keep a midnight time)
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(datetime.date());
        }
    }

    // Try DD/MM/YYYY
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%d/%m/%Y") {
        return Some(date);
    }

    None
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {:?}", raw)))
}

/// Amounts must be finite; "inf" and "NaN" parse as f64 but are not money.
pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = f64::deserialize(deserializer)?;
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(serde::de::Error::custom(format!("invalid amount: {}", amount)))
    }
}
