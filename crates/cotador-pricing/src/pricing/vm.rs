//! Virtual machine pricing
//!
//! Raw infrastructure cost is grossed up by the tax regime, marked up, and
//! then discounted by contract length:
//!
//! ```text
//! cost_with_tax     = base_cost * (1 + tax / 100)
//! price_with_markup = cost_with_tax * (1 + markup / 100)
//! final_monthly     = price_with_markup * (1 - discount(months) / 100)
//! ```
//!
//! Markup value and commission are reported alongside but never subtracted.

use super::breakdown::{Charge, PriceBreakdown};
use super::checked;
use super::outcome::{PriceOutcome, RateTableKind, Unpriced};
use crate::rates::{NetworkTier, PricingPolicy, StorageType, VmRates};
use cotador_common::TaxSettings;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options chosen for a virtual machine quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmConfig {
    pub cpu_cores: u32,
    pub ram_gb: u32,
    pub storage_type: StorageType,
    pub storage_gb: u32,
    pub network: NetworkTier,
    /// OS name as listed in the license table
    pub os: String,
    pub contract_months: u32,
    pub backup_gb: u32,
    pub additional_ip: bool,
    pub snapshot: bool,
    pub vpn_site_to_site: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            cpu_cores: 2,
            ram_gb: 4,
            storage_type: StorageType::HddSas,
            storage_gb: 50,
            network: NetworkTier::Gbps1,
            os: "Ubuntu".to_string(),
            contract_months: 12,
            backup_gb: 0,
            additional_ip: false,
            snapshot: false,
            vpn_site_to_site: false,
        }
    }
}

impl VmConfig {
    pub fn is_windows(&self) -> bool {
        self.os.to_ascii_lowercase().contains("windows")
    }
}

/// Every intermediate value of a VM calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmQuote {
    /// Raw cost before tax
    pub base_cost: Decimal,
    /// Components of `base_cost`
    pub cost_lines: Vec<Charge>,
    /// Effective tax, in percentage points
    pub effective_tax_rate: Decimal,
    pub cost_with_tax: Decimal,
    pub markup_value: Decimal,
    pub price_with_markup: Decimal,
    pub contract_discount_percent: Decimal,
    pub discount_value: Decimal,
    /// Monthly price offered to the client
    pub final_monthly: Decimal,
    /// Informational; not netted out of the price
    pub commission_value: Decimal,
    pub setup: Decimal,
}

impl VmQuote {
    /// Collapse into the common breakdown shape
    pub fn breakdown(&self) -> PriceBreakdown {
        let mut breakdown = PriceBreakdown::new(self.setup, self.final_monthly);
        for line in &self.cost_lines {
            breakdown = breakdown.with_detail(line.label.clone(), line.amount);
        }
        breakdown
            .with_detail("Custo base", self.base_cost)
            .with_detail(
                format!("Impostos ({}%)", self.effective_tax_rate.normalize()),
                self.cost_with_tax - self.base_cost,
            )
            .with_detail("Markup", self.markup_value)
            .with_detail(
                format!("Desconto contratual ({}%)", self.contract_discount_percent.normalize()),
                self.discount_value,
            )
            .with_detail("Comissão", self.commission_value)
    }
}

/// Price a virtual machine
pub fn price_vm(
    config: &VmConfig,
    rates: &VmRates,
    tax: &TaxSettings,
    policy: &PricingPolicy,
) -> PriceOutcome<VmQuote> {
    compute(config, rates, tax, policy).into()
}

fn compute(
    config: &VmConfig,
    rates: &VmRates,
    tax: &TaxSettings,
    policy: &PricingPolicy,
) -> Result<VmQuote, Unpriced> {
    let license = rates
        .os_license(&config.os)
        .ok_or_else(|| Unpriced::unknown_key(RateTableKind::OsLicenses, &config.os))?;

    let vcpu_rate = if config.is_windows() {
        rates.vcpu_windows
    } else {
        rates.vcpu_linux
    };

    let resource = |units: u32, rate: Decimal, label: String| {
        checked::mul(rate, Decimal::from(units), &label).map(|amount| Charge::new(label, amount))
    };
    let mut cost_lines = vec![
        resource(config.cpu_cores, vcpu_rate, format!("{} vCPU", config.cpu_cores))?,
        resource(config.ram_gb, rates.ram_per_gb, format!("{} GB RAM", config.ram_gb))?,
        resource(
            config.storage_gb,
            rates.storage.rate(config.storage_type),
            format!("{} GB armazenamento", config.storage_gb),
        )?,
        Charge::new("Rede", rates.network.surcharge(config.network)),
        Charge::new(format!("Licença {}", license.name), license.monthly_fee),
        resource(
            config.backup_gb,
            rates.backup_per_gb,
            format!("{} GB backup", config.backup_gb),
        )?,
    ];
    for (enabled, label, amount) in [
        (config.additional_ip, "IP adicional", rates.additional_ip),
        (config.snapshot, "Snapshot", rates.snapshot),
        (config.vpn_site_to_site, "VPN site-to-site", rates.vpn_site_to_site),
    ] {
        if enabled {
            cost_lines.push(Charge::new(label, amount));
        }
    }
    cost_lines.retain(|line| !line.amount.is_zero());

    let base_cost = cost_lines.iter().try_fold(Decimal::ZERO, |sum, line| {
        checked::add(sum, line.amount, "VM base cost")
    })?;
    let effective_tax_rate = tax
        .effective_rate()
        .ok_or_else(|| Unpriced::overflow("VM tax rate"))?;
    let tax_value = checked::percent(base_cost, effective_tax_rate, "VM taxes")?;
    let cost_with_tax = checked::add(base_cost, tax_value, "VM cost with tax")?;
    let markup_value = checked::percent(cost_with_tax, policy.markup_percent, "VM markup")?;
    let price_with_markup = checked::add(cost_with_tax, markup_value, "VM price with markup")?;
    let contract_discount_percent = policy.contract_discount(config.contract_months);
    let discount_value =
        checked::percent(price_with_markup, contract_discount_percent, "VM contract discount")?;
    let final_monthly = checked::sub(price_with_markup, discount_value, "VM monthly")?;
    let commission_value =
        checked::percent(final_monthly, policy.commission_percent, "VM commission")?;

    checked::bounded(final_monthly, "VM monthly")?;
    checked::bounded(policy.setup_fee, "VM setup")?;

    debug!(
        os = %license.name,
        %base_cost,
        %effective_tax_rate,
        %final_monthly,
        "VM priced"
    );

    Ok(VmQuote {
        base_cost,
        cost_lines,
        effective_tax_rate,
        cost_with_tax,
        markup_value,
        price_with_markup,
        contract_discount_percent,
        discount_value,
        final_monthly,
        commission_value,
        setup: policy.setup_fee,
    })
}
