//! A single price cell: a fixed amount, or "consult sales"
//!
//! Some rate-table cells have no list price and must be negotiated. They are
//! kept distinct from zero so a free item and an unpriced one never collapse
//! into the same value.

use crate::pricing::outcome::Unpriced;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Marker written in configuration files for negotiated cells
pub const CONSULT_SALES_MARKER: &str = "consult_sales";

/// Price cell in a rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RateRepr", into = "RateRepr")]
pub enum Rate {
    Fixed(Decimal),
    ConsultSales,
}

impl Rate {
    /// Fixed amount, if any
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Rate::Fixed(amount) => Some(*amount),
            Rate::ConsultSales => None,
        }
    }

    /// Fixed amount, or an unpriced outcome naming `item`
    pub fn require(&self, item: impl FnOnce() -> String) -> Result<Decimal, Unpriced> {
        self.amount()
            .ok_or_else(|| Unpriced::ConsultSales { item: item() })
    }

    pub fn is_consult_sales(&self) -> bool {
        matches!(self, Rate::ConsultSales)
    }
}

impl From<Decimal> for Rate {
    fn from(amount: Decimal) -> Self {
        Rate::Fixed(amount)
    }
}

/// On-disk form: a number, or the marker string
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RateRepr {
    Amount(Decimal),
    Marker(String),
}

impl TryFrom<RateRepr> for Rate {
    type Error = String;

    fn try_from(repr: RateRepr) -> Result<Self, Self::Error> {
        match repr {
            RateRepr::Amount(amount) => Ok(Rate::Fixed(amount)),
            RateRepr::Marker(marker) if marker == CONSULT_SALES_MARKER => Ok(Rate::ConsultSales),
            RateRepr::Marker(other) => Err(format!(
                "expected an amount or '{}', got '{}'",
                CONSULT_SALES_MARKER, other
            )),
        }
    }
}

impl From<Rate> for RateRepr {
    fn from(rate: Rate) -> Self {
        match rate {
            Rate::Fixed(amount) => RateRepr::Amount(amount),
            Rate::ConsultSales => RateRepr::Marker(CONSULT_SALES_MARKER.to_string()),
        }
    }
}
