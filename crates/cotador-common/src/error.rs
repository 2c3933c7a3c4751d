//! Error types for the Cotador engine
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

/// Result type alias using CotadorError
pub type Result<T> = std::result::Result<T, CotadorError>;

/// Unified error type for Cotador operations
#[derive(Debug, Error)]
pub enum CotadorError {
    // Pricing errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Proposal store errors
    #[error("Store error: {0}")]
    Store(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A configuration that cannot be priced.
///
/// Pricing functions report these as a tagged outcome; this error form exists
/// for callers that prefer to propagate with `?`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Key '{key}' not found in {table} rate table")]
    UnknownKey { table: String, key: String },

    #[error("No tier covers {count} units (highest tier ends at {})", .highest_max.map(|m| m.to_string()).unwrap_or_else(|| "none".into()))]
    TierNotFound {
        count: u32,
        highest_max: Option<u32>,
    },

    #[error("Price for {item} must be negotiated with sales")]
    ConsultSales { item: String },

    #[error("Amount for {item} is outside the supported range")]
    Overflow { item: String },

    #[error("Invalid tier table: {0}")]
    InvalidTierTable(String),
}

/// Validation errors raised when finalizing a proposal
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required fields are blank: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl From<serde_json::Error> for CotadorError {
    fn from(err: serde_json::Error) -> Self {
        CotadorError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for CotadorError {
    fn from(err: std::io::Error) -> Self {
        CotadorError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for CotadorError {
    fn from(err: anyhow::Error) -> Self {
        CotadorError::Internal(err.to_string())
    }
}
