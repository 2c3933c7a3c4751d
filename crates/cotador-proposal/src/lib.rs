//! # Cotador Proposal
//!
//! Assembles priced services into a client proposal and persists it through
//! a [`ProposalStore`].
//!
//! ## Invariants
//!
//! - `total_setup` and `total_monthly` always equal the sums over the items
//! - line items are immutable once added; they can only be removed
//! - a proposal has no id until the store assigns one

pub mod aggregator;
pub mod proposal;
pub mod store;
pub mod workflow;

pub use aggregator::ProposalAggregator;
pub use proposal::{Proposal, ProposalId, ProposalLineItem};
pub use store::{InMemoryProposalStore, ProposalStore, StoreError};
pub use workflow::{InvalidTransition, QuoteAction, QuoteFlow, QuoteStep};
