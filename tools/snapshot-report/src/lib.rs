//! Snapshot report tool
//!
//! Reads a ledger snapshot document and prints the views the marketplace
//! front-end derives from it.
//!
//! # Modules
//! - `cli`: Command-line arguments and config overrides
//! - `config`: Report configuration file
//! - `logging`: Tracing subscriber setup
//! - `report`: Deposit summaries, order ladder and trade screen

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;

/// Crate version constant
pub const VERSION: &str = "1.0.0";
