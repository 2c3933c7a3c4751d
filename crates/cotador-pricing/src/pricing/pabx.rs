//! Hosted PABX pricing
//!
//! ```text
//! tier         = resolve_tier(extensions)
//! setup        = include_setup ? tier.setup : 0
//! base_monthly = tier.monthly_per_extension * extensions + tier.hosting_fee
//! devices      = include_devices ? device_quantity * device_unit_rate : 0
//! ai_agent     = include_ai_agent ? ai_plans[plan].monthly_cost : 0
//! total        = base_monthly + devices + ai_agent
//! ```

use super::breakdown::PriceBreakdown;
use super::checked;
use super::outcome::{PriceOutcome, RateTableKind, Unpriced};
use crate::rates::{resolve_tier, PabxRates};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options chosen for a PABX quote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PabxConfig {
    pub extensions: u32,
    pub include_setup: bool,
    pub include_devices: bool,
    pub device_quantity: u32,
    pub include_ai_agent: bool,
    /// Key into the AI plan table
    pub ai_plan: Option<String>,
}

impl PabxConfig {
    pub fn new(extensions: u32) -> Self {
        Self {
            extensions,
            include_setup: true,
            ..Default::default()
        }
    }

    pub fn with_devices(mut self, quantity: u32) -> Self {
        self.include_devices = true;
        self.device_quantity = quantity;
        self
    }

    pub fn with_ai_agent(mut self, plan: impl Into<String>) -> Self {
        self.include_ai_agent = true;
        self.ai_plan = Some(plan.into());
        self
    }

    pub fn without_setup(mut self) -> Self {
        self.include_setup = false;
        self
    }
}

/// Price a PABX configuration
pub fn price_pabx(config: &PabxConfig, rates: &PabxRates) -> PriceOutcome<PriceBreakdown> {
    compute(config, rates).into()
}

fn compute(config: &PabxConfig, rates: &PabxRates) -> Result<PriceBreakdown, Unpriced> {
    let tier = resolve_tier(config.extensions, &rates.tiers)?;
    let tier_label = format!("{}-{} ramais", tier.min, tier.max);

    let setup = if config.include_setup {
        tier.setup
            .require(|| format!("PABX setup ({})", tier_label))?
    } else {
        Decimal::ZERO
    };

    let per_extension = tier
        .monthly_per_extension
        .require(|| format!("PABX monthly ({})", tier_label))?;
    let extensions_cost = checked::mul(
        per_extension,
        Decimal::from(config.extensions),
        "PABX extensions",
    )?;
    let base_monthly = checked::add(extensions_cost, tier.hosting_fee, "PABX monthly")?;

    let device_cost = if config.include_devices {
        checked::mul(
            Decimal::from(config.device_quantity),
            rates.device_unit_rate,
            "PABX devices",
        )?
    } else {
        Decimal::ZERO
    };

    let (ai_label, ai_cost) = if config.include_ai_agent {
        let key = config.ai_plan.as_deref().unwrap_or_default();
        let plan = rates
            .ai_plans
            .get(key)
            .ok_or_else(|| Unpriced::unknown_key(RateTableKind::AiAgentPlans, key))?;
        let cost = plan
            .monthly_cost
            .require(|| format!("AI agent plan {}", plan.name))?;
        (plan.name.clone(), cost)
    } else {
        (String::new(), Decimal::ZERO)
    };

    debug!(
        extensions = config.extensions,
        tier = %tier_label,
        %per_extension,
        "PABX tier resolved"
    );

    PriceBreakdown::new(setup, base_monthly)
        .with_addon(format!("Aluguel de {} aparelhos", config.device_quantity), device_cost)?
        .with_addon(ai_label, ai_cost)?
        .with_detail(
            format!("{} ramais x {}", config.extensions, per_extension),
            extensions_cost,
        )
        .with_detail("Hospedagem", tier.hosting_fee)
        .bounded("PABX")
}
