//! Price breakdown shared by every product line

use super::checked;
use super::outcome::Unpriced;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A labelled amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub label: String,
    pub amount: Decimal,
}

impl Charge {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Computed price of one configured service
///
/// `total_monthly` is always `base_monthly` plus every entry in `addons`.
/// Entries in `details` explain how the price was reached and are never added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// One-time amount
    pub setup: Decimal,
    /// Recurring amount before add-ons
    pub base_monthly: Decimal,
    /// Recurring add-ons, included in the total
    pub addons: Vec<Charge>,
    /// Informational lines, not included in the total
    pub details: Vec<Charge>,
    /// Recurring total
    pub total_monthly: Decimal,
}

impl PriceBreakdown {
    pub fn new(setup: Decimal, base_monthly: Decimal) -> Self {
        Self {
            setup,
            base_monthly,
            addons: Vec::new(),
            details: Vec::new(),
            total_monthly: base_monthly,
        }
    }

    /// Add a recurring charge; zero amounts are skipped
    pub fn with_addon(
        mut self,
        label: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, Unpriced> {
        if !amount.is_zero() {
            let label = label.into();
            self.total_monthly = checked::add(self.total_monthly, amount, &label)?;
            self.addons.push(Charge::new(label, amount));
        }
        Ok(self)
    }

    /// Reject a breakdown whose amounts exceed the per-service ceiling
    pub(crate) fn bounded(self, item: &str) -> Result<Self, Unpriced> {
        checked::bounded(self.setup, item)?;
        checked::bounded(self.total_monthly, item)?;
        Ok(self)
    }

    /// Add an informational line
    pub fn with_detail(mut self, label: impl Into<String>, amount: Decimal) -> Self {
        self.details.push(Charge::new(label, amount));
        self
    }

    /// Sum of add-on charges
    pub fn addons_total(&self) -> Decimal {
        self.addons.iter().map(|c| c.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_addons_accumulate_details_do_not() {
        let breakdown = PriceBreakdown::new(dec!(100), dec!(300))
            .with_addon("Aparelhos", dec!(70))
            .and_then(|b| b.with_addon("Agente IA", dec!(0)))
            .unwrap()
            .with_detail("Comissão", dec!(9));

        assert_eq!(breakdown.total_monthly, dec!(370));
        assert_eq!(breakdown.addons.len(), 1);
        assert_eq!(breakdown.addons_total(), dec!(70));
        assert_eq!(breakdown.details.len(), 1);
        assert_eq!(breakdown.setup, dec!(100));
    }

    #[test]
    fn test_addon_past_range() {
        let result =
            PriceBreakdown::new(dec!(0), Decimal::MAX).with_addon("Aparelhos", dec!(1));
        assert_eq!(result, Err(Unpriced::overflow("Aparelhos")));
    }
}
