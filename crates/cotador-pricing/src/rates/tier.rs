//! Tier resolution over bracketed unit counts

use crate::pricing::outcome::Unpriced;
use cotador_common::{CotadorError, PricingError, Result};

/// A bracket `[min, max]` of unit counts, both ends inclusive
pub trait Bracket {
    fn min(&self) -> u32;
    fn max(&self) -> u32;

    fn contains(&self, count: u32) -> bool {
        self.min() <= count && count <= self.max()
    }
}

/// Select the first tier whose bracket contains `count`.
///
/// Counts outside every bracket are unpriced, never clamped to the nearest tier.
pub fn resolve_tier<T: Bracket>(count: u32, tiers: &[T]) -> std::result::Result<&T, Unpriced> {
    tiers
        .iter()
        .find(|tier| tier.contains(count))
        .ok_or_else(|| Unpriced::TierNotFound {
            count,
            highest_max: tiers.iter().map(Bracket::max).max(),
        })
}

/// Check that tiers are well-formed, ascending, and non-overlapping
pub fn validate_tiers<T: Bracket>(table: &str, tiers: &[T]) -> Result<()> {
    if tiers.is_empty() {
        return Err(invalid(format!("{} has no tiers", table)));
    }

    for tier in tiers {
        if tier.min() > tier.max() {
            return Err(invalid(format!(
                "{} tier {}-{} has min above max",
                table,
                tier.min(),
                tier.max()
            )));
        }
    }

    for pair in tiers.windows(2) {
        if pair[1].min() <= pair[0].max() {
            return Err(invalid(format!(
                "{} tiers {}-{} and {}-{} overlap or are out of order",
                table,
                pair[0].min(),
                pair[0].max(),
                pair[1].min(),
                pair[1].max()
            )));
        }
    }

    Ok(())
}

fn invalid(message: String) -> CotadorError {
    CotadorError::Pricing(PricingError::InvalidTierTable(message))
}
