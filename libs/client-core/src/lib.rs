//! Client Core: Marketplace computation layer
//!
//! Provides deterministic, client-side computation for:
//! - Deposit grouping, summing and collateral selection
//! - Order ladder construction from order snapshots
//! - Investor trade screen state and order commands
//! - Role onboarding
//! - Decoding ledger payloads and encoding ledger commands
//!
//! # Determinism
//! All functions are pure: no system time, no RNG, no external calls.
//! Each call recomputes its result from the full snapshot it is given.
//! Uses `Decimal` (fixed-point) throughout; groups iterate in first-seen
//! order (`IndexMap`), price levels in price order (`BTreeMap`).

pub mod config;
pub mod deposits;
pub mod order_ladder;
pub mod ledger;
pub mod trade;
pub mod onboarding;
pub mod format;

pub use config::{ClientConfig, InvalidQuantityPolicy};
pub use deposits::DepositAggregator;
pub use order_ladder::{MarketDataMap, MarketLevel};

/// Crate version constant
pub const CLIENT_CORE_VERSION: &str = "1.0.0";
