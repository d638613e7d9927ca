//! Contract envelope
//!
//! The ledger client yields active contracts as `{ "contractId", "payload" }`.
//! `ContractInfo` keeps that shape with a typed payload.

use crate::ids::ContractId;
use serde::{Deserialize, Serialize};

/// An active contract observed in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo<T> {
    pub contract_id: ContractId,
    #[serde(rename = "payload")]
    pub data: T,
}

impl<T> ContractInfo<T> {
    pub fn new(contract_id: impl Into<ContractId>, data: T) -> Self {
        Self {
            contract_id: contract_id.into(),
            data,
        }
    }
}
