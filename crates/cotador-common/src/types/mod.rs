//! Core data types shared by the pricing engine and the proposal aggregator

pub mod identity;
pub mod money;
pub mod numeric;
pub mod tax;
