//! # Cotador Pricing
//!
//! Rate tables and pricing calculators for the telecom product lines.
//!
//! ## Product lines
//!
//! - PABX: tiered per-extension price, hosting, devices, AI agent
//! - SIP trunk: plan price, equipment, extra channels on metered plans
//! - Virtual machine: resource cost, then tax, markup, contract discount
//! - Internet link: speed and contract term lookup
//!
//! ## Outcomes
//!
//! A configuration that has no price (unknown plan, count outside every tier,
//! negotiated cell) yields [`PriceOutcome::Unpriced`], never a zero amount.

pub mod forms;
pub mod pricing;
pub mod rates;

pub use forms::{FieldFallback, FormRead, FormReader};
pub use pricing::{
    price_link, price_pabx, price_sip, price_vm, Charge, LinkConfig, PabxConfig, PriceBreakdown,
    PriceOutcome, PricingEngine, ProductType, RateTableKind, ServiceConfiguration, ServiceQuote,
    SipConfig, Unpriced, VmConfig, VmQuote,
};
pub use rates::{PricingPolicy, Rate, RateBook};
