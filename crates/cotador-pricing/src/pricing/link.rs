//! Dedicated internet link pricing (radio and fiber)

use super::breakdown::PriceBreakdown;
use super::outcome::{PriceOutcome, RateTableKind, Unpriced};
use crate::rates::{LinkKind, LinkRates};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options chosen for an internet link quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub kind: LinkKind,
    pub speed_mbps: u32,
    pub contract_months: u32,
    pub include_setup: bool,
}

impl LinkConfig {
    pub fn new(kind: LinkKind, speed_mbps: u32, contract_months: u32) -> Self {
        Self {
            kind,
            speed_mbps,
            contract_months,
            include_setup: true,
        }
    }

    pub fn without_setup(mut self) -> Self {
        self.include_setup = false;
        self
    }
}

/// Price an internet link
pub fn price_link(config: &LinkConfig, rates: &LinkRates) -> PriceOutcome<PriceBreakdown> {
    compute(config, rates).into()
}

fn compute(config: &LinkConfig, rates: &LinkRates) -> Result<PriceBreakdown, Unpriced> {
    let label = format!("{} {} Mbps", config.kind.as_str(), config.speed_mbps);

    let row = rates
        .rows(config.kind)
        .iter()
        .find(|row| row.speed_mbps == config.speed_mbps)
        .ok_or_else(|| Unpriced::unknown_key(RateTableKind::LinkSpeeds, &label))?;

    let term = row.term(config.contract_months).ok_or_else(|| {
        Unpriced::unknown_key(
            RateTableKind::LinkTerms,
            format!("{} / {} meses", label, config.contract_months),
        )
    })?;

    let monthly = term
        .monthly
        .require(|| format!("{} monthly ({} months)", label, config.contract_months))?;

    let setup = if config.include_setup {
        row.setup.require(|| format!("{} setup", label))?
    } else {
        Decimal::ZERO
    };

    debug!(link = %label, months = config.contract_months, %monthly, "Link priced");

    PriceBreakdown::new(setup, monthly)
        .with_detail(format!("Contrato de {} meses", config.contract_months), monthly)
        .bounded(&label)
}
