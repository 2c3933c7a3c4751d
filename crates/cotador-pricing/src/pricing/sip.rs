//! SIP trunk pricing

use super::breakdown::PriceBreakdown;
use super::checked;
use super::outcome::{PriceOutcome, RateTableKind, Unpriced};
use crate::rates::{SipPlanKind, SipRates};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options chosen for a SIP trunk quote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipConfig {
    /// Key into the SIP plan table
    pub plan: String,
    pub with_equipment: bool,
    pub additional_channels: u32,
    pub include_setup: bool,
}

impl SipConfig {
    pub fn new(plan: impl Into<String>) -> Self {
        Self {
            plan: plan.into(),
            include_setup: true,
            ..Default::default()
        }
    }

    pub fn with_equipment(mut self) -> Self {
        self.with_equipment = true;
        self
    }

    pub fn with_additional_channels(mut self, channels: u32) -> Self {
        self.additional_channels = channels;
        self
    }

    pub fn without_setup(mut self) -> Self {
        self.include_setup = false;
        self
    }
}

/// Price a SIP trunk configuration
///
/// Extra channels are only charged on metered plans; unlimited plans
/// include them.
pub fn price_sip(config: &SipConfig, rates: &SipRates) -> PriceOutcome<PriceBreakdown> {
    compute(config, rates).into()
}

fn compute(config: &SipConfig, rates: &SipRates) -> Result<PriceBreakdown, Unpriced> {
    let plan = rates
        .plans
        .get(&config.plan)
        .ok_or_else(|| Unpriced::unknown_key(RateTableKind::SipPlans, &config.plan))?;

    let monthly_rate = match (&plan.monthly_with_equipment, config.with_equipment) {
        (Some(with_equipment), true) => with_equipment,
        _ => &plan.monthly_base,
    };
    let monthly = monthly_rate.require(|| format!("{} monthly", plan.name))?;

    let setup = if config.include_setup {
        plan.setup_fee.require(|| format!("{} setup", plan.name))?
    } else {
        Decimal::ZERO
    };

    let extra = match plan.kind {
        SipPlanKind::Metered if config.additional_channels > 0 => checked::mul(
            Decimal::from(config.additional_channels),
            rates.per_channel_rate,
            "SIP channels",
        )?,
        _ => Decimal::ZERO,
    };

    debug!(
        plan = %config.plan,
        kind = ?plan.kind,
        additional_channels = config.additional_channels,
        %extra,
        "SIP plan resolved"
    );

    let mut breakdown = PriceBreakdown::new(setup, monthly).with_addon(
        format!("{} canais adicionais", config.additional_channels),
        extra,
    )?;
    if config.with_equipment && plan.monthly_with_equipment.is_none() {
        breakdown = breakdown.with_detail("Equipamento não disponível para este plano", Decimal::ZERO);
    }
    breakdown.bounded(&plan.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::Rate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_metered_plan_charges_extra_channels() {
        let rates = SipRates::default();
        let config = SipConfig::new("franquia_4").with_additional_channels(3);
        let breakdown = price_sip(&config, &rates).priced().unwrap();

        // 250 + 3 x 20
        assert_eq!(breakdown.total_monthly, dec!(310));
        assert_eq!(breakdown.base_monthly, dec!(250));
        assert_eq!(breakdown.setup, dec!(500));
    }

    #[test]
    fn test_unlimited_plan_includes_channels() {
        let rates = SipRates::default();
        let config = SipConfig::new("ilimitado_10").with_additional_channels(3);
        let breakdown = price_sip(&config, &rates).priced().unwrap();

        assert_eq!(breakdown.total_monthly, dec!(890));
        assert!(breakdown.addons.is_empty());
    }

    #[test]
    fn test_equipment_price() {
        let rates = SipRates::default();
        let breakdown = price_sip(&SipConfig::new("franquia_10").with_equipment(), &rates)
            .priced()
            .unwrap();
        assert_eq!(breakdown.base_monthly, dec!(520));

        // Plan without an equipment price falls back to the base price
        let breakdown = price_sip(&SipConfig::new("franquia_30").with_equipment(), &rates)
            .priced()
            .unwrap();
        assert_eq!(breakdown.base_monthly, dec!(1150));
        assert_eq!(breakdown.details.len(), 1);
    }

    #[test]
    fn test_unknown_plan_is_unpriced() {
        let rates = SipRates::default();
        let outcome = price_sip(&SipConfig::new("ouro"), &rates);
        assert_eq!(
            outcome.unpriced(),
            Some(&Unpriced::unknown_key(RateTableKind::SipPlans, "ouro"))
        );
    }

    #[test]
    fn test_negotiated_setup() {
        let rates = SipRates::default();
        assert!(!price_sip(&SipConfig::new("ilimitado_30"), &rates).is_priced());

        let breakdown = price_sip(&SipConfig::new("ilimitado_30").without_setup(), &rates)
            .priced()
            .unwrap();
        assert_eq!(breakdown.setup, dec!(0));
        assert_eq!(breakdown.total_monthly, dec!(2300));
    }

    #[test]
    fn test_edited_rates_are_used() {
        let mut rates = SipRates::default();
        rates.per_channel_rate = dec!(25);
        if let Some(plan) = rates.plans.get_mut("franquia_4") {
            plan.monthly_base = Rate::Fixed(dec!(260));
        }

        let config = SipConfig::new("franquia_4").with_additional_channels(2);
        let breakdown = price_sip(&config, &rates).priced().unwrap();
        assert_eq!(breakdown.total_monthly, dec!(310));
    }

    #[test]
    fn test_oversized_channel_rate_is_unpriced() {
        let mut rates = SipRates::default();
        rates.per_channel_rate = Decimal::MAX;

        let config = SipConfig::new("franquia_4").with_additional_channels(3);
        let outcome = price_sip(&config, &rates);
        assert_eq!(outcome.unpriced(), Some(&Unpriced::overflow("SIP channels")));

        // Unlimited plans never multiply the channel rate
        let config = SipConfig::new("ilimitado_10").with_additional_channels(3);
        assert!(price_sip(&config, &rates).is_priced());
    }
}
