//! Exchange order types

use crate::contract::ContractInfo;
use crate::errors::ParseDecimalError;
use crate::ids::Party;
use crate::numeric::{Price, Quantity};
use crate::token::TokenPair;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order kind (bid or offer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    /// Buy the base token
    Bid,
    /// Sell the base token
    Offer,
}

impl OrderKind {
    /// Map the ledger's `isBid` flag to a kind
    pub fn from_is_bid(is_bid: bool) -> Self {
        if is_bid {
            OrderKind::Bid
        } else {
            OrderKind::Offer
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderKind::Bid => "bid",
            OrderKind::Offer => "offer",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of an order contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub exchange: Party,
    #[serde(rename = "exchParticipant")]
    pub participant: Party,
    pub pair: TokenPair,
    pub is_bid: bool,
    #[serde(default)]
    pub order_id: String,
    pub price: String,
    pub qty: String,
}

impl Order {
    pub fn kind(&self) -> OrderKind {
        OrderKind::from_is_bid(self.is_bid)
    }

    pub fn parsed_price(&self) -> Result<Price, ParseDecimalError> {
        Price::from_str(&self.price)
    }

    pub fn parsed_qty(&self) -> Result<Quantity, ParseDecimalError> {
        Quantity::from_str(&self.qty)
    }
}

/// An order observed in a snapshot
pub type OrderRecord = ContractInfo<Order>;
