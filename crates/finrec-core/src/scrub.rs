//! Raw value scrubbing: currency strings, feed dates, composite keys.
//!
//! Feed extracts arrive with accounting notation (`£(56,789.12)`),
//! thousands separators and stray annotations. The scrubbers reduce a
//! cell to something parseable and report failures as values carrying the
//! offending input, so call sites choose between propagating and the
//! pipeline's usual log-and-default policy (`float_or_zero`,
//! `int_or_zero`, `date_or`).

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use finrec_model::fields::MISSING;

/// Feed date format: `dd/mm/yyyy`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Far-future sentinel used for unparseable record dates, so malformed
/// dates sort after every real movement instead of aborting the run.
pub fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 12, 31).expect("static sentinel date")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse numeric value from {raw:?}")]
pub struct NumericParseError {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse dd/mm/yyyy date from {raw:?}")]
pub struct DateParseError {
    pub raw: String,
}

/// Strips everything but digits, `.` and `-` from a numeric string.
///
/// An opening parenthesis becomes a leading minus sign (accounting
/// negative notation); currency symbols, thousands separators, letters
/// and remaining punctuation are dropped.
pub fn clean_numeric_str(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '(' => cleaned.push('-'),
            '0'..='9' | '.' | '-' => cleaned.push(ch),
            _ => {}
        }
    }
    cleaned
}

/// Scrubs and parses a currency/quantity string to a 5 dp float.
pub fn parse_float(raw: &str) -> Result<f64, NumericParseError> {
    let cleaned = clean_numeric_str(raw);
    cleaned
        .parse::<f64>()
        .map(|value| round_to(value, 5))
        .map_err(|_| NumericParseError {
            raw: raw.to_string(),
        })
}

/// Scrubs and parses an integer string, truncating any decimal part.
pub fn parse_int(raw: &str) -> Result<i64, NumericParseError> {
    let cleaned = clean_numeric_str(raw);
    let integer_part = cleaned.split('.').next().unwrap_or("");
    integer_part
        .parse::<i64>()
        .map_err(|_| NumericParseError {
            raw: raw.to_string(),
        })
}

/// Log-and-default wrapper over [`parse_float`].
pub fn float_or_zero(raw: &str) -> f64 {
    match parse_float(raw) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "defaulting value to 0");
            0.0
        }
    }
}

/// Log-and-default wrapper over [`parse_int`].
pub fn int_or_zero(raw: &str) -> i64 {
    match parse_int(raw) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "defaulting value to 0");
            0
        }
    }
}

/// Parses a `dd/mm/yyyy` feed date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| DateParseError {
        raw: raw.to_string(),
    })
}

/// Returns the parsed date, or the supplied default on empty input or
/// format mismatch (mismatches are logged; empty input is routine).
pub fn date_or(raw: &str, default: NaiveDate) -> NaiveDate {
    if raw.trim().is_empty() {
        return default;
    }
    match parse_date(raw) {
        Ok(date) => date,
        Err(error) => {
            warn!(%error, "defaulting record date");
            default
        }
    }
}

/// Scrubs descriptions: drops double quotes, trims trailing whitespace.
pub fn clean_description(raw: &str) -> String {
    raw.replace('"', "").trim_end().to_string()
}

/// Builds a `prefix_suffix` join key, substituting the `MISSING` sentinel
/// for an empty or absent component. Keys are therefore always non-empty
/// and join-safe, at the cost of over-matching rows where both sides are
/// legitimately absent.
pub fn composite_key(prefix: &str, suffix: &str) -> String {
    let p = if prefix.is_empty() { MISSING } else { prefix };
    let s = if suffix.is_empty() { MISSING } else { suffix };
    format!("{p}_{s}")
}

/// Rounds to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accounting_negatives_become_leading_minus() {
        assert_eq!(parse_float("£(56,789.12)").unwrap(), -56789.12);
        assert_eq!(parse_float("(12)").unwrap(), -12.0);
    }

    #[test]
    fn currency_and_separators_are_stripped() {
        assert_eq!(parse_float("£1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_float("  45 CS ").unwrap(), 45.0);
        assert_eq!(parse_int("1,234").unwrap(), 1234);
    }

    #[test]
    fn int_parse_truncates_decimals() {
        assert_eq!(parse_int("-123.99").unwrap(), -123);
        assert_eq!(parse_int("0.5").unwrap(), 0);
    }

    #[test]
    fn parse_failures_carry_the_raw_value() {
        let err = parse_float("invalid").unwrap_err();
        assert_eq!(err.raw, "invalid");
        assert_eq!(float_or_zero("invalid"), 0.0);
        assert_eq!(int_or_zero(""), 0);
    }

    #[test]
    fn feed_dates_parse_day_first() {
        assert_eq!(
            parse_date("01/01/2023").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert!(parse_date("2023-01-01").is_err());
    }

    #[test]
    fn date_or_defaults_on_empty_and_mismatch() {
        let sentinel = max_date();
        assert_eq!(date_or("", sentinel), sentinel);
        assert_eq!(date_or("13/13/2023", sentinel), sentinel);
        assert_eq!(
            date_or("28/02/2023", sentinel),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
    }

    #[test]
    fn composite_key_substitutes_sentinels() {
        assert_eq!(composite_key("60330045", "MM012345"), "60330045_MM012345");
        assert_eq!(composite_key("", "MM012345"), "MISSING_MM012345");
        assert_eq!(composite_key("60330045", ""), "60330045_MISSING");
        assert_eq!(composite_key("", ""), "MISSING_MISSING");
    }

    #[test]
    fn descriptions_lose_quotes_and_trailing_space() {
        assert_eq!(clean_description("\"Beef, diced\"  "), "Beef, diced");
    }
}
