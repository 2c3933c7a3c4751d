//! Proposal model

use chrono::{DateTime, Utc};
use cotador_common::ContactInfo;
use cotador_pricing::{PriceBreakdown, ProductType, ServiceConfiguration};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned by the proposal store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(pub String);

impl ProposalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProposalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One priced service in a proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalLineItem {
    /// Time-ordered id (UUIDv7)
    pub id: Uuid,
    pub description: String,
    pub setup_amount: Decimal,
    pub monthly_amount: Decimal,
    pub product_type: ProductType,
    /// Configuration that produced the price, when known
    #[serde(default)]
    pub configuration: Option<ServiceConfiguration>,
    pub added_at: DateTime<Utc>,
}

impl ProposalLineItem {
    pub fn from_breakdown(
        breakdown: &PriceBreakdown,
        description: impl Into<String>,
        product_type: ProductType,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            description: description.into(),
            setup_amount: breakdown.setup,
            monthly_amount: breakdown.total_monthly,
            product_type,
            configuration: None,
            added_at: Utc::now(),
        }
    }
}

/// Snapshot of a proposal as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Absent until the store assigns one
    #[serde(default)]
    pub id: Option<ProposalId>,
    pub client: ContactInfo,
    pub account_manager: ContactInfo,
    pub items: Vec<ProposalLineItem>,
    pub total_setup: Decimal,
    pub total_monthly: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// User id of the salesperson who saved it
    pub owner: String,
}

impl Proposal {
    /// Setup and monthly totals summed over the items
    pub fn item_totals(&self) -> (Decimal, Decimal) {
        sum_items(&self.items)
    }

    /// Whether stored totals match the items
    pub fn totals_consistent(&self) -> bool {
        self.item_totals() == (self.total_setup, self.total_monthly)
    }
}

pub(crate) fn sum_items(items: &[ProposalLineItem]) -> (Decimal, Decimal) {
    items.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(setup, monthly), item| (setup + item.setup_amount, monthly + item.monthly_amount),
    )
}
