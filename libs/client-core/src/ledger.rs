//! Ledger boundary: payload decoding and command encoding
//!
//! The ledger client hands out contracts as loosely typed JSON. They are
//! decoded here into typed records before anything else touches them; a
//! payload that does not fit its template fails with `SchemaMismatch`.
//! Quantities and prices are kept as strings at this stage and validated by
//! the aggregations that consume them.
//!
//! Commands go the other way: tuple keys and arguments are encoded the way
//! the ledger's JSON API expects (`{"_1": .., "_2": ..}` for tuples).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use types::contract::ContractInfo;
use types::deposit::DepositRecord;
use types::errors::DataError;
use types::order::OrderRecord;
use types::token::TokenRecord;

/// Qualified template names used by the marketplace.
pub mod templates {
    pub const ASSET_DEPOSIT: &str = "DA.Finance.Asset:AssetDeposit";
    pub const ORDER: &str = "Marketplace.Trading:Order";
    pub const TOKEN: &str = "Marketplace.Token:Token";
    pub const EXCHANGE_PARTICIPANT: &str = "Marketplace.ExchangeParticipant:ExchangeParticipant";
    pub const USER_SESSION: &str = "Marketplace.Onboarding:UserSession";
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode `{ "contractId", "payload" }` values of one template.
pub fn decode_contracts<T>(template: &str, contracts: &[Value]) -> Result<Vec<ContractInfo<T>>, DataError>
where
    T: DeserializeOwned,
{
    let decoded = contracts
        .iter()
        .enumerate()
        .map(|(index, contract)| {
            ContractInfo::<T>::deserialize(contract).map_err(|err| DataError::SchemaMismatch {
                template: template.to_string(),
                reason: format!("contract #{index}: {err}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(template, contracts = decoded.len(), "contracts decoded");
    Ok(decoded)
}

pub fn decode_deposits(contracts: &[Value]) -> Result<Vec<DepositRecord>, DataError> {
    decode_contracts(templates::ASSET_DEPOSIT, contracts)
}

pub fn decode_orders(contracts: &[Value]) -> Result<Vec<OrderRecord>, DataError> {
    decode_contracts(templates::ORDER, contracts)
}

pub fn decode_tokens(contracts: &[Value]) -> Result<Vec<TokenRecord>, DataError> {
    decode_contracts(templates::TOKEN, contracts)
}

/// Raw snapshot as delivered by the subscription layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSnapshot {
    pub deposits: Vec<Value>,
    pub orders: Vec<Value>,
    pub tokens: Vec<Value>,
}

/// Decoded snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub deposits: Vec<DepositRecord>,
    pub orders: Vec<OrderRecord>,
    pub tokens: Vec<TokenRecord>,
}

impl Snapshot {
    pub fn decode(raw: &RawSnapshot) -> Result<Self, DataError> {
        Ok(Self {
            deposits: decode_deposits(&raw.deposits)?,
            orders: decode_orders(&raw.orders)?,
            tokens: decode_tokens(&raw.tokens)?,
        })
    }

    /// Parse and decode a snapshot document.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let raw: RawSnapshot = serde_json::from_str(json).map_err(|err| DataError::SchemaMismatch {
            template: "snapshot".to_string(),
            reason: err.to_string(),
        })?;
        Self::decode(&raw)
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode a sequence as a ledger tuple: `{"_1": a, "_2": b, ...}`.
pub fn wrap_tuple<I>(items: I) -> Value
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let fields: Map<String, Value> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| (format!("_{}", index + 1), item.into()))
        .collect();
    Value::Object(fields)
}

/// A command to submit to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum LedgerCommand {
    /// Exercise a choice on the contract with the given key.
    #[serde(rename_all = "camelCase")]
    ExerciseByKey {
        template_id: String,
        choice: String,
        key: Value,
        argument: Value,
    },
    /// Create a contract.
    #[serde(rename_all = "camelCase")]
    Create { template_id: String, payload: Value },
}

impl LedgerCommand {
    pub fn template_id(&self) -> &str {
        match self {
            LedgerCommand::ExerciseByKey { template_id, .. } => template_id,
            LedgerCommand::Create { template_id, .. } => template_id,
        }
    }

    pub fn choice(&self) -> Option<&str> {
        match self {
            LedgerCommand::ExerciseByKey { choice, .. } => Some(choice),
            LedgerCommand::Create { .. } => None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
