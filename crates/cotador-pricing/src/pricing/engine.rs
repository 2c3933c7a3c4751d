//! Pricing engine dispatching service configurations to the product calculators

use super::breakdown::PriceBreakdown;
use super::link::{price_link, LinkConfig};
use super::outcome::PriceOutcome;
use super::pabx::{price_pabx, PabxConfig};
use super::sip::{price_sip, SipConfig};
use super::vm::{price_vm, VmConfig, VmQuote};
use crate::rates::RateBook;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Product line of a quoted service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Pabx,
    SipTrunk,
    VirtualMachine,
    InternetLink,
}

impl ProductType {
    /// Display name used in proposals
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Pabx => "PABX em nuvem",
            ProductType::SipTrunk => "Tronco SIP",
            ProductType::VirtualMachine => "Máquina virtual",
            ProductType::InternetLink => "Link de internet",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A configured service, one variant per product line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "product", rename_all = "snake_case")]
pub enum ServiceConfiguration {
    Pabx(PabxConfig),
    Sip(SipConfig),
    Vm(VmConfig),
    Link(LinkConfig),
}

impl ServiceConfiguration {
    pub fn product_type(&self) -> ProductType {
        match self {
            ServiceConfiguration::Pabx(_) => ProductType::Pabx,
            ServiceConfiguration::Sip(_) => ProductType::SipTrunk,
            ServiceConfiguration::Vm(_) => ProductType::VirtualMachine,
            ServiceConfiguration::Link(_) => ProductType::InternetLink,
        }
    }

    /// Short human description, used as the default line item text
    pub fn describe(&self) -> String {
        match self {
            ServiceConfiguration::Pabx(c) => format!("PABX em nuvem - {} ramais", c.extensions),
            ServiceConfiguration::Sip(c) => format!("Tronco SIP - {}", c.plan),
            ServiceConfiguration::Vm(c) => format!(
                "VM {} vCPU / {} GB RAM / {} GB - {}",
                c.cpu_cores, c.ram_gb, c.storage_gb, c.os
            ),
            ServiceConfiguration::Link(c) => format!(
                "Link {} {} Mbps - {} meses",
                c.kind.as_str(),
                c.speed_mbps,
                c.contract_months
            ),
        }
    }
}

/// A priced service together with the configuration that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceQuote {
    pub configuration: ServiceConfiguration,
    pub breakdown: PriceBreakdown,
}

impl ServiceQuote {
    pub fn product_type(&self) -> ProductType {
        self.configuration.product_type()
    }
}

/// Prices service configurations against an editable rate book
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    rates: RateBook,
}

impl PricingEngine {
    pub fn new(rates: RateBook) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateBook {
        &self.rates
    }

    /// Edit rates in place; later quotes see the change
    pub fn rates_mut(&mut self) -> &mut RateBook {
        &mut self.rates
    }

    /// Price any service configuration
    #[instrument(skip(self), fields(product = %configuration.product_type()))]
    pub fn quote(&self, configuration: &ServiceConfiguration) -> PriceOutcome<ServiceQuote> {
        let outcome = match configuration {
            ServiceConfiguration::Pabx(config) => price_pabx(config, &self.rates.pabx),
            ServiceConfiguration::Sip(config) => price_sip(config, &self.rates.sip),
            ServiceConfiguration::Vm(config) => self.quote_vm(config).map(|quote| quote.breakdown()),
            ServiceConfiguration::Link(config) => price_link(config, &self.rates.links),
        };

        match &outcome {
            PriceOutcome::Priced(breakdown) => debug!(
                setup = %breakdown.setup,
                monthly = %breakdown.total_monthly,
                "Service priced"
            ),
            PriceOutcome::Unpriced(reason) => debug!(%reason, "Service has no price"),
        }

        outcome.map(|breakdown| ServiceQuote {
            configuration: configuration.clone(),
            breakdown,
        })
    }

    /// Price a VM keeping every intermediate value
    pub fn quote_vm(&self, config: &VmConfig) -> PriceOutcome<VmQuote> {
        price_vm(config, &self.rates.vm, &self.rates.tax, &self.rates.policy)
    }
}
