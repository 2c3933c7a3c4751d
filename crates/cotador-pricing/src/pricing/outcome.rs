//! Tagged pricing outcomes
//!
//! "No price for this input" is an expected answer, not a failure: the
//! salesperson picks a plan that was removed, types 1200 extensions, or hits a
//! negotiated cell. Pricing functions return [`PriceOutcome::Unpriced`] for
//! those cases so a caller can never mistake them for a zero price.

use cotador_common::PricingError;
use serde::{Deserialize, Serialize};

/// Rate table a lookup key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTableKind {
    AiAgentPlans,
    SipPlans,
    OsLicenses,
    LinkSpeeds,
    LinkTerms,
}

impl RateTableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateTableKind::AiAgentPlans => "ai_agent_plans",
            RateTableKind::SipPlans => "sip_plans",
            RateTableKind::OsLicenses => "os_licenses",
            RateTableKind::LinkSpeeds => "link_speeds",
            RateTableKind::LinkTerms => "link_terms",
        }
    }
}

impl std::fmt::Display for RateTableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a configuration has no price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unpriced {
    /// Selected key is absent from the rate table
    UnknownKey { table: RateTableKind, key: String },
    /// Unit count falls outside every tier
    TierNotFound { count: u32, highest_max: Option<u32> },
    /// Table cell is negotiated case by case
    ConsultSales { item: String },
    /// Inputs or rates push an amount past the supported range
    Overflow { item: String },
}

impl Unpriced {
    pub fn unknown_key(table: RateTableKind, key: impl Into<String>) -> Self {
        Unpriced::UnknownKey {
            table,
            key: key.into(),
        }
    }

    pub fn overflow(item: impl Into<String>) -> Self {
        Unpriced::Overflow { item: item.into() }
    }
}

impl From<Unpriced> for PricingError {
    fn from(unpriced: Unpriced) -> Self {
        match unpriced {
            Unpriced::UnknownKey { table, key } => PricingError::UnknownKey {
                table: table.to_string(),
                key,
            },
            Unpriced::TierNotFound { count, highest_max } => {
                PricingError::TierNotFound { count, highest_max }
            }
            Unpriced::ConsultSales { item } => PricingError::ConsultSales { item },
            Unpriced::Overflow { item } => PricingError::Overflow { item },
        }
    }
}

impl std::fmt::Display for Unpriced {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&PricingError::from(self.clone()), f)
    }
}

/// Result of a pricing function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum PriceOutcome<T> {
    Priced(T),
    Unpriced(Unpriced),
}

impl<T> PriceOutcome<T> {
    pub fn is_priced(&self) -> bool {
        matches!(self, PriceOutcome::Priced(_))
    }

    pub fn priced(self) -> Option<T> {
        match self {
            PriceOutcome::Priced(value) => Some(value),
            PriceOutcome::Unpriced(_) => None,
        }
    }

    pub fn as_priced(&self) -> Option<&T> {
        match self {
            PriceOutcome::Priced(value) => Some(value),
            PriceOutcome::Unpriced(_) => None,
        }
    }

    pub fn unpriced(&self) -> Option<&Unpriced> {
        match self {
            PriceOutcome::Priced(_) => None,
            PriceOutcome::Unpriced(reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PriceOutcome<U> {
        match self {
            PriceOutcome::Priced(value) => PriceOutcome::Priced(f(value)),
            PriceOutcome::Unpriced(reason) => PriceOutcome::Unpriced(reason),
        }
    }

    /// Convert to a `Result` for callers that propagate with `?`
    pub fn into_result(self) -> Result<T, PricingError> {
        match self {
            PriceOutcome::Priced(value) => Ok(value),
            PriceOutcome::Unpriced(reason) => Err(reason.into()),
        }
    }
}

impl<T> From<Result<T, Unpriced>> for PriceOutcome<T> {
    fn from(result: Result<T, Unpriced>) -> Self {
        match result {
            Ok(value) => PriceOutcome::Priced(value),
            Err(reason) => PriceOutcome::Unpriced(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        let outcome: PriceOutcome<u32> =
            PriceOutcome::Unpriced(Unpriced::unknown_key(RateTableKind::SipPlans, "gold"));
        let err = outcome.into_result().unwrap_err();
        assert_eq!(
            err,
            PricingError::UnknownKey {
                table: "sip_plans".to_string(),
                key: "gold".to_string()
            }
        );

        assert_eq!(PriceOutcome::Priced(7).into_result(), Ok(7));
    }

    #[test]
    fn test_serialized_shape() {
        let outcome: PriceOutcome<u32> = PriceOutcome::Unpriced(Unpriced::TierNotFound {
            count: 1200,
            highest_max: Some(1000),
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "unpriced");
        assert_eq!(json["value"]["reason"], "tier_not_found");
        assert_eq!(json["value"]["count"], 1200);
    }

    #[test]
    fn test_display_matches_error() {
        let unpriced = Unpriced::ConsultSales {
            item: "PABX setup".to_string(),
        };
        assert_eq!(
            unpriced.to_string(),
            "Price for PABX setup must be negotiated with sales"
        );
    }
}
