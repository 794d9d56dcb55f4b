//! Request parameter parsing shared by handlers.

use jiff::civil::Date;
use salvo::prelude::StatusError;

use roomkeeper::stay::Stay;

use crate::extensions::*;

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
pub(crate) fn parse_date(value: &str, field: &str) -> Result<Date, StatusError> {
    value
        .trim()
        .parse::<Date>()
        .or_400(&format!("could not parse \"{field}\" as a date"))
}

/// Parse a check-in/check-out pair into a stay.
pub(crate) fn parse_stay(check_in: &str, check_out: &str) -> Result<Stay, StatusError> {
    let check_in = parse_date(check_in, "check_in")?;
    let check_out = parse_date(check_out, "check_out")?;

    Stay::new(check_in, check_out).or_400("check-in must be before check-out")
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_parse_stay_accepts_ordered_dates() -> TestResult {
        let stay = parse_stay("2026-03-01", "2026-03-04")?;

        assert_eq!(stay.check_in(), date(2026, 3, 1));
        assert_eq!(stay.nights(), 3);

        Ok(())
    }

    #[test]
    fn test_parse_stay_rejects_reversed_dates() {
        let error = parse_stay("2026-03-04", "2026-03-01").err();

        assert_eq!(
            error.map(|e| e.brief),
            Some("check-in must be before check-out".to_string())
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("tomorrow", "check_in").is_err(), "expected parse failure");
    }
}
