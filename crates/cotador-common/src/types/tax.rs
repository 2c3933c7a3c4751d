//! Tax regimes - Brazilian corporate tax presets
//!
//! A regime is a named preset for three percentage components:
//! - PIS/COFINS: turnover contributions
//! - ISS: municipal service tax
//! - CSLL/IR: income tax and social contribution
//!
//! The effective rate is the plain sum of the three, applied multiplicatively
//! over base cost. Selecting a regime overwrites the components; afterwards each
//! component can be edited on its own and the last write wins.

use crate::error::CotadorError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Corporate tax regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    LucroReal,
    LucroPresumido,
    LucroRealReduzido,
    SimplesNacional,
}

impl TaxRegime {
    /// Every selectable regime, in display order
    pub const ALL: [TaxRegime; 4] = [
        TaxRegime::LucroReal,
        TaxRegime::LucroPresumido,
        TaxRegime::LucroRealReduzido,
        TaxRegime::SimplesNacional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegime::LucroReal => "lucro_real",
            TaxRegime::LucroPresumido => "lucro_presumido",
            TaxRegime::LucroRealReduzido => "lucro_real_reduzido",
            TaxRegime::SimplesNacional => "simples_nacional",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            TaxRegime::LucroReal => "Lucro Real",
            TaxRegime::LucroPresumido => "Lucro Presumido",
            TaxRegime::LucroRealReduzido => "Lucro Real Reduzido",
            TaxRegime::SimplesNacional => "Simples Nacional",
        }
    }

    /// Preset components written when the regime is selected
    pub fn default_components(&self) -> TaxComponents {
        match self {
            TaxRegime::LucroReal => TaxComponents::new(dec!(3.65), dec!(5.00), dec!(8.88)),
            TaxRegime::LucroPresumido => TaxComponents::new(dec!(3.65), dec!(5.00), dec!(7.68)),
            TaxRegime::LucroRealReduzido => {
                TaxComponents::new(dec!(3.65), dec!(2.00), dec!(8.88))
            }
            // Single DAS rate, carried on the turnover component
            TaxRegime::SimplesNacional => TaxComponents::new(dec!(6.00), dec!(0), dec!(0)),
        }
    }
}

impl Default for TaxRegime {
    fn default() -> Self {
        TaxRegime::LucroReal
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxRegime {
    type Err = CotadorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaxRegime::ALL
            .into_iter()
            .find(|regime| regime.as_str() == s.trim())
            .ok_or_else(|| CotadorError::Config(format!("Unknown tax regime: {}", s)))
    }
}

/// The three tax components, in percentage points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComponents {
    pub pis_cofins: Decimal,
    pub iss: Decimal,
    pub csll_ir: Decimal,
}

impl TaxComponents {
    pub fn new(pis_cofins: Decimal, iss: Decimal, csll_ir: Decimal) -> Self {
        Self {
            pis_cofins,
            iss,
            csll_ir,
        }
    }

    /// Effective tax rate in percentage points
    ///
    /// `None` when hand-edited components sum past `Decimal` range.
    #[inline]
    pub fn effective_rate(&self) -> Option<Decimal> {
        self.pis_cofins
            .checked_add(self.iss)?
            .checked_add(self.csll_ir)
    }
}

/// Tax configuration as edited by the salesperson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSettings {
    /// Last regime selected (components may have been edited since)
    pub regime: TaxRegime,
    pub components: TaxComponents,
}

impl TaxSettings {
    pub fn for_regime(regime: TaxRegime) -> Self {
        Self {
            regime,
            components: regime.default_components(),
        }
    }

    /// Select a regime, overwriting all three components with its presets
    pub fn select_regime(&mut self, regime: TaxRegime) {
        debug!(from = %self.regime, to = %regime, "Tax regime selected");
        self.regime = regime;
        self.components = regime.default_components();
    }

    /// Effective tax rate in percentage points
    pub fn effective_rate(&self) -> Option<Decimal> {
        self.components.effective_rate()
    }

    /// Whether components differ from the selected regime's presets
    pub fn is_customized(&self) -> bool {
        self.components != self.regime.default_components()
    }
}

impl Default for TaxSettings {
    fn default() -> Self {
        Self::for_regime(TaxRegime::default())
    }
}
