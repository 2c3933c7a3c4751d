//! Tolerant numeric parsing for form input
//!
//! Calculator fields are recomputed on every keystroke, so empty, malformed,
//! or negative input must never abort a calculation. Such input is read as zero,
//! and the returned [`Parsed`] records that a fallback happened so callers can
//! warn the user.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A parsed value together with whether it was coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parsed<T> {
    /// The value to compute with
    pub value: T,
    /// True when the input was empty, malformed, or negative and `value` is the zero fallback
    pub was_fallback: bool,
}

impl<T> Parsed<T> {
    /// Input parsed as-is
    pub fn exact(value: T) -> Self {
        Self {
            value,
            was_fallback: false,
        }
    }

    /// Input rejected, `value` is the fallback
    pub fn fallback(value: T) -> Self {
        Self {
            value,
            was_fallback: true,
        }
    }
}

/// Parse a non-negative decimal, falling back to zero.
///
/// Accepts `.` or `,` as decimal separator, plus `1.234,56` and `1.234.567`
/// style grouping. A single dot is always the decimal separator, as in a
/// browser number field: `1.500` reads as 1.5, not 1500.
pub fn parse_numeric_or_zero(input: &str) -> Parsed<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Parsed::fallback(Decimal::ZERO);
    }

    match Decimal::from_str(&normalize_separators(trimmed)) {
        Ok(value) if value.is_sign_negative() && !value.is_zero() => {
            Parsed::fallback(Decimal::ZERO)
        }
        Ok(value) => Parsed::exact(value.normalize()),
        Err(_) => Parsed::fallback(Decimal::ZERO),
    }
}

/// Parse a unit count (extensions, channels, cores), falling back to zero.
///
/// A fractional part is truncated without being flagged, so `1.500` counts
/// as 1.
pub fn parse_count_or_zero(input: &str) -> Parsed<u32> {
    let parsed = parse_numeric_or_zero(input);
    if parsed.was_fallback {
        return Parsed::fallback(0);
    }

    match parsed.value.trunc().to_u32() {
        Some(count) => Parsed::exact(count),
        None => Parsed::fallback(0),
    }
}

fn normalize_separators(input: &str) -> String {
    match (input.contains('.'), input.contains(',')) {
        // 1.234,56
        (true, true) => input.replace('.', "").replace(',', "."),
        // 12,5
        (false, true) => input.replace(',', "."),
        // 1.234.567
        (true, false) if is_dot_grouped(input) => input.replace('.', ""),
        _ => input.to_string(),
    }
}

/// Two or more dots, with every group after the first exactly three digits
fn is_dot_grouped(input: &str) -> bool {
    let all_digits = |group: &str| group.bytes().all(|b| b.is_ascii_digit());
    let mut groups = input.split('.');
    let first = groups.next().unwrap_or_default();
    let rest: Vec<&str> = groups.collect();

    rest.len() >= 2
        && (1..=3).contains(&first.len())
        && all_digits(first)
        && rest.iter().all(|group| group.len() == 3 && all_digits(group))
}
