//! Types library for the marketplace client
//!
//! Strongly typed mirrors of the ledger contracts the marketplace front-end
//! observes. Loosely typed payloads coming from the ledger client are mapped
//! into these types at the boundary, before any aggregation runs.
//!
//! # Modules
//! - `ids`: Ledger identifiers (ContractId, Party, Id)
//! - `numeric`: Fixed-point decimal types (Price, Quantity)
//! - `contract`: Contract envelope (`contractId` + payload)
//! - `deposit`: Asset deposits held in accounts
//! - `order`: Exchange orders and order kind
//! - `token`: Issued tokens and token pairs
//! - `role`: Marketplace roles
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod contract;
pub mod deposit;
pub mod order;
pub mod token;
pub mod role;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::contract::*;
    pub use crate::deposit::*;
    pub use crate::order::*;
    pub use crate::token::*;
    pub use crate::role::*;
    pub use crate::errors::*;
}
