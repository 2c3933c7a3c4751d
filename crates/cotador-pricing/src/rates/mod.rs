//! Rate tables
//!
//! Every price the engine uses comes from a [`RateBook`] passed in by the
//! caller. Nothing is process-wide: the salesperson edits a book at runtime
//! and each calculation reads the book it is handed.
//!
//! A book is loaded in layers: built-in defaults, then an optional TOML/JSON
//! file, then `COTADOR__<section>__<field>` environment variables.

pub mod policy;
pub mod rate;
pub mod tables;
pub mod tier;

pub use policy::{ContractDiscount, PricingPolicy};
pub use rate::{Rate, CONSULT_SALES_MARKER};
pub use tables::{
    AiAgentPlan, LinkKind, LinkRates, LinkSpeedRow, NetworkRates, NetworkTier, OsLicense,
    PabxRates, PabxTier, SipPlan, SipPlanKind, SipRates, StorageRates, StorageType, TermPrice,
    VmRates,
};
pub use tier::{resolve_tier, validate_tiers, Bracket};

use config::{Config, Environment, File, FileFormat};
use cotador_common::{CotadorError, Result, TaxSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable prefix for rate overrides
pub const ENV_PREFIX: &str = "COTADOR";

/// Separator between prefix, section, and field in override variables
pub const ENV_SEPARATOR: &str = "__";

/// All rate tables and commercial settings consumed by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBook {
    pub pabx: PabxRates,
    pub sip: SipRates,
    pub vm: VmRates,
    pub links: LinkRates,
    /// Tax settings applied to VM cost
    pub tax: TaxSettings,
    /// Markup, commission, and contract discounts for VMs
    pub policy: PricingPolicy,
}

impl RateBook {
    /// Load defaults, then `path` (if any), then environment overrides
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Self::defaults_source()?);

        if let Some(path) = path {
            info!(path = %path.display(), "Loading rate overrides from file");
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        Self::finish(builder.build().map_err(config_error)?)
    }

    /// Load defaults overlaid with an in-memory TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(Self::defaults_source()?)
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(config_error)?;

        Self::finish(config)
    }

    fn defaults_source() -> Result<Config> {
        Config::try_from(&RateBook::default()).map_err(config_error)
    }

    fn finish(config: Config) -> Result<Self> {
        let book: RateBook = config.try_deserialize().map_err(config_error)?;
        book.validate()?;
        debug!(
            pabx_tiers = book.pabx.tiers.len(),
            sip_plans = book.sip.plans.len(),
            os_licenses = book.vm.os_licenses.len(),
            "Rate book loaded"
        );
        Ok(book)
    }

    /// Check structural invariants of every table
    pub fn validate(&self) -> Result<()> {
        validate_tiers("pabx", &self.pabx.tiers)?;

        for (kind, rows) in [
            (LinkKind::Radio, &self.links.radio),
            (LinkKind::Fiber, &self.links.fiber),
        ] {
            let mut speeds = HashSet::new();
            for row in rows {
                if !speeds.insert(row.speed_mbps) {
                    return Err(CotadorError::Config(format!(
                        "{} link speed {} Mbps listed twice",
                        kind.as_str(),
                        row.speed_mbps
                    )));
                }
                if row.terms.is_empty() {
                    return Err(CotadorError::Config(format!(
                        "{} link speed {} Mbps has no contract terms",
                        kind.as_str(),
                        row.speed_mbps
                    )));
                }
            }
        }

        let mut months = HashSet::new();
        for discount in &self.policy.contract_discounts {
            if !months.insert(discount.months) {
                return Err(CotadorError::Config(format!(
                    "contract discount for {} months listed twice",
                    discount.months
                )));
            }
        }

        Ok(())
    }
}

fn config_error(err: config::ConfigError) -> CotadorError {
    CotadorError::Config(err.to_string())
}
