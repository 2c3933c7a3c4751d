//! Commercial policy for virtual machines: markup, commission, setup, and
//! contract-length discounts

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Discount granted for a contract length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDiscount {
    pub months: u32,
    /// Discount in percentage points
    pub percent: Decimal,
}

/// VM pricing policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Markup over tax-inclusive cost, in percentage points
    pub markup_percent: Decimal,
    /// Salesperson commission over the final price, in percentage points
    pub commission_percent: Decimal,
    /// Flat one-time setup fee
    pub setup_fee: Decimal,
    /// Exact-match schedule; unlisted lengths get no discount
    pub contract_discounts: Vec<ContractDiscount>,
}

impl PricingPolicy {
    /// Discount for a contract length, in percentage points
    pub fn contract_discount(&self, months: u32) -> Decimal {
        self.contract_discounts
            .iter()
            .find(|d| d.months == months)
            .map(|d| d.percent)
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        let schedule = [(12, dec!(0)), (24, dec!(5)), (36, dec!(10)), (48, dec!(15)), (60, dec!(20))];

        Self {
            markup_percent: dec!(30),
            commission_percent: dec!(3),
            setup_fee: Decimal::ZERO,
            contract_discounts: schedule
                .into_iter()
                .map(|(months, percent)| ContractDiscount { months, percent })
                .collect(),
        }
    }
}
