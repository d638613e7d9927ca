//! Marketplace roles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user picks when entering the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketRole {
    Investor,
    Issuer,
    Custodian,
}

impl MarketRole {
    pub const ALL: [MarketRole; 3] = [
        MarketRole::Investor,
        MarketRole::Issuer,
        MarketRole::Custodian,
    ];

    /// Name as written to the ledger and shown to the user
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketRole::Investor => "Investor",
            MarketRole::Issuer => "Issuer",
            MarketRole::Custodian => "Custodian",
        }
    }

    /// Dashboard route for the role, e.g. `/role/investor`
    pub fn route(&self) -> String {
        format!("/role/{}", self.as_str().to_lowercase())
    }

    /// Custodian dashboards are not available yet
    pub fn is_selectable(&self) -> bool {
        !matches!(self, MarketRole::Custodian)
    }
}

impl fmt::Display for MarketRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
