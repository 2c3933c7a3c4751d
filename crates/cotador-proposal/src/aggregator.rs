//! Proposal aggregation
//!
//! Collects priced services into the proposal being edited and keeps its
//! totals in step with the items.

use crate::proposal::{sum_items, Proposal, ProposalId, ProposalLineItem};
use crate::store::ProposalStore;
use chrono::{DateTime, Utc};
use cotador_common::{ContactInfo, Result, ValidationError};
use cotador_pricing::{PriceBreakdown, ProductType, ServiceQuote};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Working state of the proposal being edited
///
/// One aggregator per editing session; it is not shared between sessions.
#[derive(Debug, Clone)]
pub struct ProposalAggregator {
    id: Option<ProposalId>,
    client: ContactInfo,
    account_manager: ContactInfo,
    items: Vec<ProposalLineItem>,
    total_setup: Decimal,
    total_monthly: Decimal,
    created_at: DateTime<Utc>,
}

impl Default for ProposalAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalAggregator {
    pub fn new() -> Self {
        Self {
            id: None,
            client: ContactInfo::default(),
            account_manager: ContactInfo::default(),
            items: Vec::new(),
            total_setup: Decimal::ZERO,
            total_monthly: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Option<&ProposalId> {
        self.id.as_ref()
    }

    pub fn client(&self) -> &ContactInfo {
        &self.client
    }

    pub fn account_manager(&self) -> &ContactInfo {
        &self.account_manager
    }

    pub fn items(&self) -> &[ProposalLineItem] {
        &self.items
    }

    pub fn total_setup(&self) -> Decimal {
        self.total_setup
    }

    pub fn total_monthly(&self) -> Decimal {
        self.total_monthly
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a priced item; identical items may be added more than once
    pub fn add_line_item(
        &mut self,
        breakdown: &PriceBreakdown,
        description: impl Into<String>,
        product_type: ProductType,
    ) -> Uuid {
        let item = ProposalLineItem::from_breakdown(breakdown, description, product_type);
        self.push(item)
    }

    /// Append a quoted service, keeping its configuration
    pub fn add_quote(&mut self, quote: &ServiceQuote, description: impl Into<String>) -> Uuid {
        let mut item =
            ProposalLineItem::from_breakdown(&quote.breakdown, description, quote.product_type());
        item.configuration = Some(quote.configuration.clone());
        self.push(item)
    }

    fn push(&mut self, item: ProposalLineItem) -> Uuid {
        let id = item.id;
        debug!(
            item_id = %id,
            product = ?item.product_type,
            setup = %item.setup_amount,
            monthly = %item.monthly_amount,
            "Line item added"
        );
        self.items.push(item);
        self.recompute_totals();
        id
    }

    /// Remove an item by id; unknown ids are ignored
    pub fn remove_line_item(&mut self, id: Uuid) -> Option<ProposalLineItem> {
        let removed = self
            .items
            .iter()
            .position(|item| item.id == id)
            .map(|index| self.items.remove(index));

        match &removed {
            Some(item) => debug!(item_id = %item.id, "Line item removed"),
            None => debug!(item_id = %id, "Line item not present"),
        }
        self.recompute_totals();
        removed
    }

    pub fn clear_items(&mut self) {
        self.items.clear();
        self.recompute_totals();
    }

    /// Start a new proposal, forgetting the persisted id
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("Proposal reset");
    }

    pub fn set_client(&mut self, client: ContactInfo) {
        self.client = client;
    }

    pub fn set_account_manager(&mut self, account_manager: ContactInfo) {
        self.account_manager = account_manager;
    }

    fn recompute_totals(&mut self) {
        let (setup, monthly) = sum_items(&self.items);
        self.total_setup = setup;
        self.total_monthly = monthly;
    }

    /// Names of identity fields still blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("client.name", self.client.has_name()),
            ("client.email", self.client.has_email()),
            ("account_manager.name", self.account_manager.has_name()),
            ("account_manager.email", self.account_manager.has_email()),
        ]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(field, _)| field)
        .collect()
    }

    /// Snapshot the working state as a proposal owned by `owner`
    pub fn to_proposal(&self, owner: impl Into<String>) -> Result<Proposal> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing).into());
        }

        Ok(Proposal {
            id: self.id.clone(),
            client: self.client.clone(),
            account_manager: self.account_manager.clone(),
            items: self.items.clone(),
            total_setup: self.total_setup,
            total_monthly: self.total_monthly,
            created_at: self.created_at,
            updated_at: Utc::now(),
            owner: owner.into(),
        })
    }

    /// Replace the working state with a stored proposal
    ///
    /// Totals are recomputed from the items rather than trusted.
    pub fn load_proposal(&mut self, proposal: Proposal) {
        if !proposal.totals_consistent() {
            let (setup, monthly) = proposal.item_totals();
            warn!(
                id = ?proposal.id,
                stored_setup = %proposal.total_setup,
                stored_monthly = %proposal.total_monthly,
                item_setup = %setup,
                item_monthly = %monthly,
                "Stored totals do not match items; using item totals"
            );
        }

        self.id = proposal.id;
        self.client = proposal.client;
        self.account_manager = proposal.account_manager;
        self.items = proposal.items;
        self.created_at = proposal.created_at;
        self.recompute_totals();

        debug!(id = ?self.id, items = self.items.len(), "Proposal loaded");
    }

    /// Persist the working state, creating it on first save
    #[instrument(skip(self, store, owner), fields(id = ?self.id))]
    pub async fn save(
        &mut self,
        store: &dyn ProposalStore,
        owner: impl Into<String>,
    ) -> Result<ProposalId> {
        let proposal = self.to_proposal(owner)?;

        let id = match self.id.clone() {
            Some(id) => {
                store.update(&id, proposal).await?;
                id
            }
            None => {
                let id = store.create(proposal).await?;
                self.id = Some(id.clone());
                id
            }
        };

        info!(
            %id,
            items = self.items.len(),
            total_monthly = %self.total_monthly,
            "Proposal saved"
        );
        Ok(id)
    }

    /// Delete the persisted proposal and start over
    ///
    /// Without a persisted id this only resets the working state.
    #[instrument(skip(self, store), fields(id = ?self.id))]
    pub async fn delete(&mut self, store: &dyn ProposalStore) -> Result<()> {
        if let Some(id) = self.id.clone() {
            store.delete(&id).await?;
            info!(%id, "Proposal deleted");
        }
        self.reset();
        Ok(())
    }
}
