//! Order ladder: price-keyed market data built from an order snapshot
//!
//! Uses `BTreeMap` keyed by `Price` so levels iterate in price order.
//! A price level holds orders of a single kind; a snapshot with a bid and an
//! offer at the same price is rejected as a whole.
//!
//! The map is rebuilt from the complete snapshot on every change. There is
//! no incremental add/remove path.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, error};
use types::errors::DataError;
use types::numeric::Price;
use types::order::{OrderKind, OrderRecord};

/// A single price level in the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketLevel {
    /// The price of this level.
    pub price: Price,
    /// Kind shared by every order at this level.
    pub kind: OrderKind,
    /// Number of orders at this level.
    pub order_count: u32,
}

/// Price → level map for ladder display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MarketDataMap {
    levels: BTreeMap<Price, MarketLevel>,
}

impl MarketDataMap {
    /// Fold an order snapshot into price levels, in input order.
    ///
    /// Fails with `MixedKindAtPriceLevel` on the first order whose kind
    /// differs from the level it lands on, and with `InvalidPrice` on a
    /// price that is not a decimal. No partial map is returned.
    pub fn build<'a, I>(orders: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut map = Self::default();
        let mut applied = 0usize;
        for order in orders {
            map.apply(order)?;
            applied += 1;
        }

        debug!(orders = applied, levels = map.len(), "market data built");
        Ok(map)
    }

    fn apply(&mut self, order: &OrderRecord) -> Result<(), DataError> {
        let price = order
            .data
            .parsed_price()
            .map_err(|err| DataError::InvalidPrice {
                contract_id: order.contract_id.clone(),
                value: err.value,
            })?;
        let kind = order.data.kind();

        match self.levels.entry(price) {
            Entry::Occupied(mut occupied) => {
                let level = occupied.get_mut();
                if level.kind != kind {
                    error!(
                        price = %price,
                        existing = %level.kind,
                        incoming = %kind,
                        contract_id = %order.contract_id,
                        "price level holds both bids and offers"
                    );
                    return Err(DataError::MixedKindAtPriceLevel {
                        price,
                        existing: level.kind,
                        incoming: kind,
                        contract_id: order.contract_id.clone(),
                    });
                }
                level.order_count += 1;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(MarketLevel {
                    price,
                    kind,
                    order_count: 1,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, price: &Price) -> Option<&MarketLevel> {
        self.levels.get(price)
    }

    /// Number of price levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels in ascending price order.
    pub fn iter(&self) -> impl Iterator<Item = &MarketLevel> {
        self.levels.values()
    }

    /// Levels in descending price order (ladder order, offers on top).
    pub fn levels_descending(&self) -> Vec<&MarketLevel> {
        self.levels.values().rev().collect()
    }

    /// Highest bid level.
    pub fn best_bid(&self) -> Option<&MarketLevel> {
        self.levels.values().rev().find(|l| l.kind == OrderKind::Bid)
    }

    /// Lowest offer level.
    pub fn best_offer(&self) -> Option<&MarketLevel> {
        self.levels.values().find(|l| l.kind == OrderKind::Offer)
    }

    /// Orders across all levels.
    pub fn total_orders(&self) -> u64 {
        self.levels.values().map(|l| u64::from(l.order_count)).sum()
    }

    /// Ladder rows in descending price order, keeping at most `depth`
    /// levels of each kind closest to the spread.
    pub fn ladder(&self, depth: Option<usize>) -> Vec<&MarketLevel> {
        let depth = depth.unwrap_or(usize::MAX);
        let offers = self
            .levels
            .values()
            .filter(|l| l.kind == OrderKind::Offer)
            .take(depth);
        let bids = self
            .levels
            .values()
            .rev()
            .filter(|l| l.kind == OrderKind::Bid)
            .take(depth);

        let mut rows: Vec<&MarketLevel> = offers.chain(bids).collect();
        rows.sort_by(|a, b| b.price.cmp(&a.price));
        rows
    }
}

/// Build market data from an order snapshot.
pub fn build_market_data<'a, I>(orders: I) -> Result<MarketDataMap, DataError>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    MarketDataMap::build(orders)
}
