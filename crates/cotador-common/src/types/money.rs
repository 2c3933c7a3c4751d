//! Money helpers - Brazilian Real rounding and display
//!
//! Display must match `Intl.NumberFormat('pt-BR', { style: 'currency', currency: 'BRL' })`:
//! `R$`, a no-break space, `.` as thousands separator, `,` as decimal separator,
//! always two fraction digits, half-away-from-zero rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Currency symbol for BRL
pub const CURRENCY_SYMBOL: &str = "R$";

/// Separator between symbol and amount (U+00A0 NO-BREAK SPACE)
pub const SYMBOL_SEPARATOR: char = '\u{a0}';

/// Fraction digits displayed for BRL
pub const FRACTION_DIGITS: u32 = 2;

/// Round an amount to centavos, half away from zero
#[inline]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
}

/// `percent`% of `amount`, where `percent` is given in percentage points
///
/// `None` when the product leaves `Decimal` range.
#[inline]
pub fn percent_of(amount: Decimal, percent: Decimal) -> Option<Decimal> {
    amount.checked_mul(percent)?.checked_div(dec!(100))
}

/// Format an amount as Brazilian Real, e.g. `R$ 1.234,56`
pub fn format_brl(amount: Decimal) -> String {
    let mut rounded = round_currency(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(FRACTION_DIGITS);

    let plain = rounded.to_string();
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut out = String::with_capacity(plain.len() + 8);
    if negative {
        out.push('-');
    }
    out.push_str(CURRENCY_SYMBOL);
    out.push(SYMBOL_SEPARATOR);
    out.push_str(&group_thousands(int_part));
    out.push(',');
    out.push_str(frac_part);
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Decimal wrapper that displays as BRL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Brl(pub Decimal);

impl std::fmt::Display for Brl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_brl(self.0))
    }
}

impl From<Decimal> for Brl {
    fn from(value: Decimal) -> Self {
        Brl(value)
    }
}
