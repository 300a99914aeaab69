use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Day-first formats come before ISO so "05/01/2024" is the 5th of January
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Largest accepted commission magnitude (one quadrillion). Keeps every sum
/// and difference over an upload far inside `Decimal`'s range.
pub const MAX_COMMISSION: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Parses a commission cell such as `R$1.234,56`, `1.234,56`, `-R$ 5,00` or `12.5`.
///
/// With a comma present, `.` is a thousands separator and `,` the decimal
/// separator. Without one, a single `.` is a decimal point and several are
/// thousands separators. Values beyond [`MAX_COMMISSION`] are rejected.
pub fn parse_commission(raw: &str, currency_marker: &str) -> Option<Decimal> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let (mut negative, mut rest) = match compact.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, compact.as_str()),
    };
    if !currency_marker.is_empty() {
        rest = rest.strip_prefix(currency_marker).unwrap_or(rest);
    }
    if let Some(r) = rest.strip_prefix('-') {
        if negative {
            return None;
        }
        negative = true;
        rest = r;
    }

    if !rest.chars().any(|c| c.is_ascii_digit())
        || !rest.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let normalized = if let Some((integer, fraction)) = rest.split_once(',') {
        if fraction.contains(',') || fraction.contains('.') {
            return None;
        }
        format!("{}.{}", integer.replace('.', ""), fraction)
    } else if rest.matches('.').count() > 1 {
        rest.replace('.', "")
    } else {
        rest.to_string()
    };

    let value = Decimal::from_str(&normalized).ok()?;
    if value.abs() > MAX_COMMISSION {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Parses a day-first timestamp (`DD/MM/YYYY[ HH:MM[:SS]]`), also accepting
/// dashes and ISO dates. Date-only cells land at midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

pub fn parse_quantity(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_commission_locale_format() {
        assert_eq!(parse_commission("R$1.234,56", "R$"), Some(dec("1234.56")));
        assert_eq!(parse_commission("R$ 1.234,56", "R$"), Some(dec("1234.56")));
        assert_eq!(parse_commission("1.234,56", "R$"), Some(dec("1234.56")));
        assert_eq!(parse_commission("R$100,00", "R$"), Some(dec("100")));
        assert_eq!(parse_commission("0,5", "R$"), Some(dec("0.5")));
        assert_eq!(parse_commission("R$1.234.567,89", "R$"), Some(dec("1234567.89")));
    }

    #[test]
    fn test_parse_commission_bare_numeric() {
        assert_eq!(parse_commission("12.5", "R$"), Some(dec("12.5")));
        assert_eq!(parse_commission("42", "R$"), Some(dec("42")));
        assert_eq!(parse_commission(" 7 ", "R$"), Some(dec("7")));
        assert_eq!(parse_commission("1.234.567", "R$"), Some(dec("1234567")));
    }

    #[test]
    fn test_parse_commission_negative() {
        assert_eq!(parse_commission("-R$ 5,00", "R$"), Some(dec("-5")));
        assert_eq!(parse_commission("R$-5,00", "R$"), Some(dec("-5")));
        assert_eq!(parse_commission("-R$-5,00", "R$"), None);
    }

    #[test]
    fn test_parse_commission_rejects_garbage() {
        assert_eq!(parse_commission("", "R$"), None);
        assert_eq!(parse_commission("R$", "R$"), None);
        assert_eq!(parse_commission("nan", "R$"), None);
        assert_eq!(parse_commission("US$ 10,00", "R$"), None);
        assert_eq!(parse_commission("1,234,56", "R$"), None);
        assert_eq!(parse_commission("1,23.4", "R$"), None);
    }

    #[test]
    fn test_parse_commission_out_of_range() {
        assert_eq!(MAX_COMMISSION, dec("1000000000000000"));
        assert_eq!(parse_commission("1.000.000.000.000.000", "R$"), Some(MAX_COMMISSION));
        assert_eq!(parse_commission("-R$ 1.000.000.000.000.000,00", "R$"), Some(-MAX_COMMISSION));
        assert_eq!(parse_commission("1000000000000000.01", "R$"), None);
        assert_eq!(parse_commission("79228162514264337593543950335", "R$"), None);
        assert_eq!(parse_commission("-79228162514264337593543950335", "R$"), None);
        // beyond Decimal itself
        assert_eq!(parse_commission("792281625142643375935439503350", "R$"), None);
    }

    #[test]
    fn test_parse_timestamp_day_first() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|d| d.and_hms_opt(14, 30, 0));
        assert_eq!(parse_timestamp("05/01/2024 14:30"), expected);
        assert_eq!(parse_timestamp("05/01/2024 14:30:00"), expected);
        assert_eq!(parse_timestamp("05-01-2024 14:30"), expected);
        assert_eq!(parse_timestamp("2024-01-05 14:30:00"), expected);
    }

    #[test]
    fn test_parse_timestamp_date_only() {
        assert_eq!(
            parse_timestamp(" 31/12/2023 "),
            NaiveDate::from_ymd_opt(2023, 12, 31).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
    }

    #[test]
    fn test_parse_timestamp_invalid_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("--"), None);
        assert_eq!(parse_timestamp("31/02/2024"), None);
        assert_eq!(parse_timestamp("13/13/2024 10:00"), None);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 3 "), Some(3));
        assert_eq!(parse_quantity("2,5"), None);
        assert_eq!(parse_quantity(""), None);
    }
}
