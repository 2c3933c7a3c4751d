//! Per-product pricing functions and the dispatching engine
//!
//! Every function is pure: it reads the rate tables it is given and returns a
//! [`PriceOutcome`].

pub mod breakdown;
pub mod checked;
pub mod engine;
pub mod link;
pub mod outcome;
pub mod pabx;
pub mod sip;
pub mod vm;

pub use breakdown::{Charge, PriceBreakdown};
pub use checked::MAX_SERVICE_AMOUNT;
pub use engine::{PricingEngine, ProductType, ServiceConfiguration, ServiceQuote};
pub use link::{price_link, LinkConfig};
pub use outcome::{PriceOutcome, RateTableKind, Unpriced};
pub use pabx::{price_pabx, PabxConfig};
pub use sip::{price_sip, SipConfig};
pub use vm::{price_vm, VmConfig, VmQuote};
