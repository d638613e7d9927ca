//! Asset deposit types
//!
//! A deposit asserts that an account holds a quantity of an asset. The
//! quantity stays as the ledger's decimal string; it is parsed by whoever
//! aggregates it so that a single bad deposit can be reported against its
//! contract id.

use crate::contract::ContractInfo;
use crate::errors::ParseDecimalError;
use crate::ids::{Id, Party};
use crate::numeric::Quantity;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Account at a provider (custodian or exchange)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Id,
    pub provider: Party,
    pub owner: Party,
}

impl Account {
    /// Label of an account the owner holds with the provider,
    /// e.g. `'Alice'@'Exchange'`
    pub fn label_for(owner: &Party, provider: &Party) -> String {
        format!("'{}'@'{}'", owner, provider)
    }
}

/// Quantity of an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Id,
    pub quantity: String,
}

impl Asset {
    pub fn new(label: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            id: Id::new(label),
            quantity: quantity.into(),
        }
    }

    pub fn parsed_quantity(&self) -> Result<Quantity, ParseDecimalError> {
        Quantity::from_str(&self.quantity)
    }
}

/// Payload of an asset deposit contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDeposit {
    pub account: Account,
    pub asset: Asset,
    #[serde(default)]
    pub observers: Vec<Party>,
}

impl AssetDeposit {
    pub fn account_label(&self) -> &str {
        &self.account.id.label
    }

    pub fn asset_label(&self) -> &str {
        &self.asset.id.label
    }

    pub fn provider(&self) -> &Party {
        &self.account.provider
    }
}

/// A deposit observed in a snapshot
pub type DepositRecord = ContractInfo<AssetDeposit>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "contractId": "#12:0",
            "payload": {
                "account": {
                    "id": { "signatories": ["Bank"], "label": "'Alice'@'Bank'", "version": "0" },
                    "provider": "Bank",
                    "owner": "Alice"
                },
                "asset": {
                    "id": { "signatories": ["Issuer"], "label": "USD", "version": "0" },
                    "quantity": "100.50"
                },
                "observers": ["Operator"]
            }
        })
    }

    #[test]
    fn test_deposit_from_ledger_json() {
        let deposit: DepositRecord = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(deposit.contract_id.as_str(), "#12:0");
        assert_eq!(deposit.data.account_label(), "'Alice'@'Bank'");
        assert_eq!(deposit.data.asset_label(), "USD");
        assert_eq!(deposit.data.provider(), &Party::from("Bank"));
        assert_eq!(
            deposit.data.asset.parsed_quantity().unwrap().to_string(),
            "100.5"
        );
    }

    #[test]
    fn test_observers_default_to_empty() {
        let mut json = sample_json();
        json["payload"].as_object_mut().unwrap().remove("observers");
        let deposit: DepositRecord = serde_json::from_value(json).unwrap();
        assert!(deposit.data.observers.is_empty());
    }

    #[test]
    fn test_account_label_format() {
        let label = Account::label_for(&Party::from("a"), &Party::from("ex"));
        assert_eq!(label, "'a'@'ex'");
    }

    #[test]
    fn test_bad_quantity_is_reported() {
        let asset = Asset::new("USD", "1,000");
        assert_eq!(asset.parsed_quantity().unwrap_err().value, "1,000");
    }
}
