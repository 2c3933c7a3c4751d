//! # Cotador Common
//!
//! Shared types, errors, and money helpers for the Cotador quoting engine.
//!
//! ## Core Types
//!
//! - [`TaxRegime`]/[`TaxSettings`]: Brazilian tax presets and their editable components
//! - [`Parsed`]: tolerant numeric parsing with an explicit fallback flag
//! - [`ContactInfo`]/[`UserIdentity`]: client, account manager, and logged-in user
//!
//! ## Money
//!
//! Every amount is a [`rust_decimal::Decimal`]. Display goes through
//! [`format_brl`], which reproduces `pt-BR` / `BRL` currency formatting.

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{CotadorError, PricingError, Result, ValidationError};
pub use types::{
    identity::{ContactInfo, UserIdentity, UserRole},
    money::{format_brl, percent_of, round_currency, Brl},
    numeric::{parse_count_or_zero, parse_numeric_or_zero, Parsed},
    tax::{TaxComponents, TaxRegime, TaxSettings},
};

/// Cotador version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
