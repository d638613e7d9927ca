//! Error types for the marketplace client
//!
//! Every error here is a data-integrity fault in a ledger snapshot or in
//! user input. None of them is transient: retrying with the same input
//! yields the same error.

use crate::ids::ContractId;
use crate::order::OrderKind;
use crate::numeric::Price;
use thiserror::Error;

/// A string that is not a base-10 decimal number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a decimal number: {value:?}")]
pub struct ParseDecimalError {
    pub value: String,
}

/// Top-level client error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Invalid quantity {value:?} on contract {contract_id}")]
    InvalidQuantity {
        contract_id: ContractId,
        value: String,
    },

    #[error("Invalid price {value:?} on contract {contract_id}")]
    InvalidPrice {
        contract_id: ContractId,
        value: String,
    },

    #[error("Total of {asset} overflows at contract {contract_id}")]
    QuantityOverflow {
        asset: String,
        contract_id: ContractId,
    },

    #[error("Price level {price} already holds {existing} orders, contract {contract_id} is {incoming}")]
    MixedKindAtPriceLevel {
        price: Price,
        existing: OrderKind,
        incoming: OrderKind,
        contract_id: ContractId,
    },

    #[error("Payload does not match template {template}: {reason}")]
    SchemaMismatch { template: String, reason: String },

    #[error("Invalid {field}: {value:?}")]
    InvalidInput { field: String, value: String },

    #[error("No deposits selected as collateral")]
    NoCollateral,

    #[error("Role {role} is not available")]
    RoleUnavailable { role: String },
}

impl DataError {
    /// Whether the error points at an inconsistent ledger snapshot rather
    /// than at user input
    pub fn is_integrity_fault(&self) -> bool {
        matches!(
            self,
            DataError::InvalidQuantity { .. }
                | DataError::InvalidPrice { .. }
                | DataError::QuantityOverflow { .. }
                | DataError::MixedKindAtPriceLevel { .. }
                | DataError::SchemaMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_error_display() {
        let err = ParseDecimalError {
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "not a decimal number: \"abc\"");
    }

    #[test]
    fn test_mixed_kind_display() {
        let err = DataError::MixedKindAtPriceLevel {
            price: Price::from_u64(10),
            existing: OrderKind::Bid,
            incoming: OrderKind::Offer,
            contract_id: ContractId::new("#7:0"),
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("bid"));
        assert!(msg.contains("offer"));
        assert!(msg.contains("#7:0"));
    }

    #[test]
    fn test_integrity_classification() {
        assert!(DataError::SchemaMismatch {
            template: "Order".to_string(),
            reason: "missing field".to_string(),
        }
        .is_integrity_fault());
        assert!(DataError::QuantityOverflow {
            asset: "USD".to_string(),
            contract_id: ContractId::new("#2:0"),
        }
        .is_integrity_fault());
        assert!(!DataError::NoCollateral.is_integrity_fault());
        assert!(!DataError::InvalidInput {
            field: "price".to_string(),
            value: "-1".to_string(),
        }
        .is_integrity_fault());
        assert!(!DataError::RoleUnavailable {
            role: "Custodian".to_string()
        }
        .is_integrity_fault());
    }
}
