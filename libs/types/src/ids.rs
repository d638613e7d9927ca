//! Identifier types for ledger entities
//!
//! Contract ids and parties are opaque strings assigned by the ledger. The
//! client never mints them, it only carries them from snapshots back into
//! commands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger contract identifier
///
/// Changes every time a contract is archived and re-created, so it is only
/// valid for the snapshot it was observed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(String);

impl ContractId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContractId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ContractId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Ledger party (user, operator, exchange, custodian ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Party(String);

impl Party {
    pub fn new(party: impl Into<String>) -> Self {
        Self(party.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Party {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Versioned ledger identifier for accounts and assets
///
/// Two ids name the same entity when their labels match; the client only
/// ever compares labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id {
    #[serde(default)]
    pub signatories: Vec<Party>,
    pub label: String,
    #[serde(default = "Id::initial_version")]
    pub version: String,
}

impl Id {
    /// Create an unsigned, initial-version id with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            signatories: Vec::new(),
            label: label.into(),
            version: Self::initial_version(),
        }
    }

    /// Attach signatories to the id
    pub fn signed_by(mut self, signatories: impl IntoIterator<Item = Party>) -> Self {
        self.signatories = signatories.into_iter().collect();
        self
    }

    fn initial_version() -> String {
        "0".to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
