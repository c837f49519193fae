//! Number formatting for cards and summaries.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a USD amount with no fractional digits, e.g. `$1,200,000`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_thousands(&digits))
}

/// Compact notation with at most one fractional digit: `950`, `1.5K`, `2M`, `3.4B`.
///
/// Rounding that reaches 1000 carries into the next unit: `999_950` reads `1M`.
pub fn format_compact_number(value: f64) -> String {
    const UNITS: [(f64, &str); 5] = [(1.0, ""), (1e3, "K"), (1e6, "M"), (1e9, "B"), (1e12, "T")];

    let abs = value.abs();
    let round = |scale: f64| (abs / scale * 10.0).round() / 10.0;

    let mut unit = UNITS.iter().rposition(|(scale, _)| abs >= *scale).unwrap_or(0);
    let mut scaled = round(UNITS[unit].0);
    if scaled >= 1000.0 && unit + 1 < UNITS.len() {
        unit += 1;
        scaled = round(UNITS[unit].0);
    }

    let sign = if value < 0.0 && scaled != 0.0 { "-" } else { "" };
    format!("{sign}{}{}", trim_fraction(scaled), UNITS[unit].1)
}

/// Budget range in compact currency, e.g. `$500K - $2M`.
pub fn format_compact_range(min: Decimal, max: Decimal) -> String {
    let compact = |amount: Decimal| {
        let value = amount.to_f64().unwrap_or_default();
        let text = format_compact_number(value);
        match text.strip_prefix('-') {
            Some(rest) => format!("-${rest}"),
            None => format!("${text}"),
        }
    };
    format!("{} - {}", compact(min), compact(max))
}

/// File size in megabytes with one decimal, e.g. `2.4 MB`.
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
}

fn trim_fraction(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(dec!(500000)), "$500,000");
        assert_eq!(format_currency(dec!(2000000)), "$2,000,000");
        assert_eq!(format_currency(dec!(999)), "$999");
        assert_eq!(format_currency(dec!(0)), "$0");
    }

    #[test]
    fn currency_rounds_to_whole_dollars() {
        assert_eq!(format_currency(dec!(1234.5)), "$1,235");
        assert_eq!(format_currency(dec!(1234.49)), "$1,234");
    }

    #[test]
    fn currency_negative() {
        assert_eq!(format_currency(dec!(-1500)), "-$1,500");
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(format_compact_number(950.0), "950");
        assert_eq!(format_compact_number(1500.0), "1.5K");
        assert_eq!(format_compact_number(2_000_000.0), "2M");
        assert_eq!(format_compact_number(1_620_000.0), "1.6M");
        assert_eq!(format_compact_number(3_400_000_000.0), "3.4B");
        assert_eq!(format_compact_number(-1500.0), "-1.5K");
    }

    #[test]
    fn compact_numbers_carry_into_next_unit() {
        assert_eq!(format_compact_number(999_950.0), "1M");
        assert_eq!(format_compact_number(999.96), "1K");
        assert_eq!(format_compact_number(999_949.0), "999.9K");
        assert_eq!(format_compact_number(999.94), "999.9");
        assert_eq!(format_compact_number(999_999_999.0), "1B");
        assert_eq!(format_compact_number(-999_950.0), "-1M");
    }

    #[test]
    fn compact_numbers_near_zero() {
        assert_eq!(format_compact_number(0.0), "0");
        assert_eq!(format_compact_number(0.04), "0");
        assert_eq!(format_compact_number(-0.04), "0");
    }

    #[test]
    fn compact_range_prefixes_dollars() {
        assert_eq!(format_compact_range(dec!(500000), dec!(2000000)), "$500K - $2M");
        assert_eq!(format_compact_range(dec!(0), dec!(1250000)), "$0 - $1.3M");
    }

    #[test]
    fn file_size_in_megabytes() {
        assert_eq!(format_file_size(2_500_000), "2.4 MB");
        assert_eq!(format_file_size(1_800_000), "1.7 MB");
        assert_eq!(format_file_size(0), "0.0 MB");
    }
}
