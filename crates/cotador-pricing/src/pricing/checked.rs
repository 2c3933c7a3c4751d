//! Overflow-checked arithmetic for the pricing formulas
//!
//! Rates are editable and form inputs are unbounded, so a product or sum can
//! leave `Decimal` range. Each helper reports that as [`Unpriced::Overflow`]
//! naming the amount being computed.

use super::outcome::Unpriced;
use cotador_common::percent_of;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Largest setup or monthly amount a single service may be priced at
///
/// Keeps proposal totals far from `Decimal` range.
pub const MAX_SERVICE_AMOUNT: Decimal = dec!(1000000000000);

pub(crate) fn mul(a: Decimal, b: Decimal, item: &str) -> Result<Decimal, Unpriced> {
    a.checked_mul(b).ok_or_else(|| Unpriced::overflow(item))
}

pub(crate) fn add(a: Decimal, b: Decimal, item: &str) -> Result<Decimal, Unpriced> {
    a.checked_add(b).ok_or_else(|| Unpriced::overflow(item))
}

pub(crate) fn sub(a: Decimal, b: Decimal, item: &str) -> Result<Decimal, Unpriced> {
    a.checked_sub(b).ok_or_else(|| Unpriced::overflow(item))
}

pub(crate) fn percent(amount: Decimal, percent: Decimal, item: &str) -> Result<Decimal, Unpriced> {
    percent_of(amount, percent).ok_or_else(|| Unpriced::overflow(item))
}

/// Reject a final amount above [`MAX_SERVICE_AMOUNT`]
pub(crate) fn bounded(amount: Decimal, item: &str) -> Result<Decimal, Unpriced> {
    if amount.abs() > MAX_SERVICE_AMOUNT {
        return Err(Unpriced::overflow(item));
    }
    Ok(amount)
}
