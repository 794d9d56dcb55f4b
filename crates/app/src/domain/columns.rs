//! Column decoding helpers shared by the repositories.

use std::str::FromStr;

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use roomkeeper::stay::Stay;
use sqlx::{Row, postgres::PgRow};

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_u32(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let value_i32: i32 = row.try_get(col)?;

    u32::try_from(value_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_date(row: &PgRow, col: &str) -> Result<Date, sqlx::Error> {
    Ok(row.try_get::<SqlxDate, _>(col)?.to_jiff())
}

pub(crate) fn try_get_stay(row: &PgRow, check_in: &str, check_out: &str) -> Result<Stay, sqlx::Error> {
    Stay::new(try_get_date(row, check_in)?, try_get_date(row, check_out)?).map_err(|e| {
        sqlx::Error::ColumnDecode {
            index: check_in.to_string(),
            source: Box::new(e),
        }
    })
}

pub(crate) fn try_get_status<S>(row: &PgRow, col: &str) -> Result<S, sqlx::Error>
where
    S: FromStr,
    S::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(col)?;

    value.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn amount_to_i64(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// `%value%` for `LIKE`/`ILIKE`, with the wildcard characters of `value` escaped.
pub(crate) fn contains_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{escaped}%")
}
