use rust_decimal::{Decimal, RoundingStrategy};

/// Groups thousands with dots: `1234567` -> `1.234.567`
pub fn format_number(n: usize) -> String {
    group_thousands(&n.to_string())
}

/// Formats an amount the way the export displays it: `R$ 1.234,56`.
/// Rounds half away from zero to centavos.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = rounded.abs().to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    let fraction = format!("{:0<2}", fraction);

    format!("{}R$ {},{}", sign, group_thousands(integer), fraction)
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(Decimal::new(123456, 2)), "R$ 1.234,56");
        assert_eq!(format_brl(Decimal::new(100, 0)), "R$ 100,00");
        assert_eq!(format_brl(Decimal::new(5, 1)), "R$ 0,50");
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_brl(Decimal::new(123456789, 2)), "R$ 1.234.567,89");
    }

    #[test]
    fn test_format_brl_negative_and_rounding() {
        assert_eq!(format_brl(Decimal::new(-123456, 2)), "-R$ 1.234,56");
        assert_eq!(format_brl(Decimal::new(12345, 3)), "R$ 12,35");
        assert_eq!(format_brl(Decimal::new(-1, 3)), "R$ 0,00");
    }
}
