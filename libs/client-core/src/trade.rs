//! Investor trade screen: collateral, precisions and order commands
//!
//! A bid spends the quote token and an offer spends the base token, so each
//! side draws its collateral from the investor's exchange account deposits
//! of the matching asset.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use std::str::FromStr;
use tracing::debug;
use types::deposit::{Account, DepositRecord};
use types::errors::DataError;
use types::ids::{ContractId, Party};
use types::numeric::{Price, Quantity};
use types::order::OrderKind;
use types::token::{TokenPair, TokenRecord};

use crate::deposits::filter_for_account_and_asset;
use crate::ledger::{templates, wrap_tuple, LedgerCommand};

pub const PLACE_BID_CHOICE: &str = "ExchangeParticipant_PlaceBid";
pub const PLACE_OFFER_CHOICE: &str = "ExchangeParticipant_PlaceOffer";

/// Quantity precision of both sides of a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PairPrecision {
    pub base: u32,
    pub quote: u32,
}

/// An investor trading one pair on one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeContext {
    exchange: Party,
    operator: Party,
    investor: Party,
    pair: TokenPair,
}

impl TradeContext {
    pub fn new(exchange: Party, operator: Party, investor: Party, pair: TokenPair) -> Self {
        Self {
            exchange,
            operator,
            investor,
            pair,
        }
    }

    pub fn pair(&self) -> &TokenPair {
        &self.pair
    }

    /// Label of the investor's account at the exchange.
    pub fn account_label(&self) -> String {
        Account::label_for(&self.investor, &self.exchange)
    }

    /// Label of the asset an order of `kind` is collateralized with.
    pub fn collateral_asset(&self, kind: OrderKind) -> &str {
        match kind {
            OrderKind::Bid => &self.pair.quote.label,
            OrderKind::Offer => &self.pair.base.label,
        }
    }

    /// Deposits that may back an order of `kind`.
    pub fn eligible_deposits<'a>(
        &self,
        kind: OrderKind,
        deposits: &'a [DepositRecord],
    ) -> Vec<&'a DepositRecord> {
        filter_for_account_and_asset(deposits, &self.account_label(), self.collateral_asset(kind))
    }

    pub fn bid_deposits<'a>(&self, deposits: &'a [DepositRecord]) -> Vec<&'a DepositRecord> {
        self.eligible_deposits(OrderKind::Bid, deposits)
    }

    pub fn offer_deposits<'a>(&self, deposits: &'a [DepositRecord]) -> Vec<&'a DepositRecord> {
        self.eligible_deposits(OrderKind::Offer, deposits)
    }

    /// Precisions of the pair's tokens; a token missing from the snapshot
    /// counts as precision 0.
    pub fn precision(&self, tokens: &[TokenRecord]) -> PairPrecision {
        let lookup = |label: &str| {
            tokens
                .iter()
                .find(|t| t.data.id.label == label)
                .map(|t| t.data.quantity_precision)
                .unwrap_or_else(|| {
                    debug!(token = label, "token not in snapshot, precision 0");
                    0
                })
        };
        PairPrecision {
            base: lookup(&self.pair.base.label),
            quote: lookup(&self.pair.quote.label),
        }
    }

    pub fn place_bid(
        &self,
        deposit_cids: &[ContractId],
        price: &str,
        amount: &str,
    ) -> Result<LedgerCommand, DataError> {
        self.place_order(OrderKind::Bid, deposit_cids, price, amount)
    }

    pub fn place_offer(
        &self,
        deposit_cids: &[ContractId],
        price: &str,
        amount: &str,
    ) -> Result<LedgerCommand, DataError> {
        self.place_order(OrderKind::Offer, deposit_cids, price, amount)
    }

    /// Exercise-by-key command placing an order through the investor's
    /// exchange participant contract.
    ///
    /// Price and amount must be positive decimals and at least one
    /// collateral deposit must be given.
    pub fn place_order(
        &self,
        kind: OrderKind,
        deposit_cids: &[ContractId],
        price: &str,
        amount: &str,
    ) -> Result<LedgerCommand, DataError> {
        let price = price.trim();
        let amount = amount.trim();
        validate_positive("price", price, Price::from_str(price).map(|p| p.as_decimal()).ok())?;
        validate_positive("amount", amount, Quantity::from_str(amount).map(|q| q.as_decimal()).ok())?;
        if deposit_cids.is_empty() {
            return Err(DataError::NoCollateral);
        }

        let choice = match kind {
            OrderKind::Bid => PLACE_BID_CHOICE,
            OrderKind::Offer => PLACE_OFFER_CHOICE,
        };
        let key = wrap_tuple([
            self.exchange.as_str(),
            self.operator.as_str(),
            self.investor.as_str(),
        ]);
        let argument = json!({
            "price": price,
            "amount": amount,
            "depositCids": deposit_cids,
            "pair": self.pair,
        });

        debug!(
            %kind,
            pair = %self.pair.symbol(),
            deposits = deposit_cids.len(),
            "order command built"
        );
        Ok(LedgerCommand::ExerciseByKey {
            template_id: templates::EXCHANGE_PARTICIPANT.to_string(),
            choice: choice.to_string(),
            key,
            argument,
        })
    }
}

fn validate_positive(field: &str, raw: &str, value: Option<Decimal>) -> Result<(), DataError> {
    match value {
        Some(v) if v > Decimal::ZERO => Ok(()),
        _ => Err(DataError::InvalidInput {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}
