//! Derived views of one snapshot

use std::fmt;

use client_core::deposits::{accumulate, render_summary, DepositSummary};
use client_core::format::{precise_input_steps, InputSteps};
use client_core::ledger::Snapshot;
use client_core::trade::PairPrecision;
use client_core::{DepositAggregator, MarketDataMap, MarketLevel};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;
use types::errors::DataError;
use types::ids::ContractId;
use types::numeric::Price;

use crate::config::ReportConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderLine {
    pub provider: String,
    pub deposits: usize,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeLine {
    pub pair: String,
    pub account: String,
    pub bid_collateral: Vec<ContractId>,
    pub offer_collateral: Vec<ContractId>,
    pub precision: PairPrecision,
    pub base_steps: InputSteps,
    pub quote_steps: InputSteps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub deposit_summary: String,
    pub providers: Vec<ProviderLine>,
    pub ladder: Vec<MarketLevel>,
    pub best_bid: Option<Price>,
    pub best_offer: Option<Price>,
    pub total_orders: u64,
    pub trade: Option<TradeLine>,
}

impl Report {
    /// Compute every view; the first data-integrity fault aborts the report.
    pub fn build(snapshot: &Snapshot, config: &ReportConfig) -> Result<Self, DataError> {
        let aggregator = DepositAggregator::from_config(&config.client);

        // One parse per deposit feeds both the overall and per-provider totals.
        let mut overall = DepositSummary::new();
        let mut by_provider: IndexMap<String, (usize, DepositSummary)> = IndexMap::new();
        for deposit in &snapshot.deposits {
            let quantity = aggregator.quantity(deposit)?;
            accumulate(&mut overall, deposit, quantity)?;

            let (count, summary) = by_provider
                .entry(deposit.data.provider().to_string())
                .or_default();
            *count += 1;
            accumulate(summary, deposit, quantity)?;
        }

        let deposit_summary = render_summary(&overall);
        let providers = by_provider
            .into_iter()
            .map(|(provider, (deposits, summary))| ProviderLine {
                provider,
                deposits,
                summary: render_summary(&summary),
            })
            .collect();

        let market = MarketDataMap::build(&snapshot.orders)?;
        let ladder = market
            .ladder(config.client.ladder_depth)
            .into_iter()
            .copied()
            .collect();

        let trade = config.trade.as_ref().map(|settings| {
            let ctx = settings.context();
            let cids = |records: Vec<&types::deposit::DepositRecord>| {
                records.into_iter().map(|d| d.contract_id.clone()).collect()
            };
            let precision = ctx.precision(&snapshot.tokens);
            TradeLine {
                pair: ctx.pair().symbol(),
                account: ctx.account_label(),
                bid_collateral: cids(ctx.bid_deposits(&snapshot.deposits)),
                offer_collateral: cids(ctx.offer_deposits(&snapshot.deposits)),
                precision,
                base_steps: precise_input_steps(precision.base),
                quote_steps: precise_input_steps(precision.quote),
            }
        });

        info!(
            deposits = snapshot.deposits.len(),
            orders = snapshot.orders.len(),
            levels = market.len(),
            "report built"
        );

        Ok(Self {
            deposit_summary,
            providers,
            ladder,
            best_bid: market.best_bid().map(|l| l.price),
            best_offer: market.best_offer().map(|l| l.price),
            total_orders: market.total_orders(),
            trade,
        })
    }
}

fn join_cids(cids: &[ContractId]) -> String {
    if cids.is_empty() {
        return "-".to_string();
    }
    cids.iter().map(ContractId::as_str).collect::<Vec<_>>().join(", ")
}

fn or_dash(price: Option<Price>) -> String {
    price.map_or_else(|| "-".to_string(), |p| p.to_string())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deposits: {}", self.deposit_summary)?;
        for line in &self.providers {
            writeln!(f, "  {} ({}): {}", line.provider, line.deposits, line.summary)?;
        }

        writeln!(
            f,
            "Ladder: {} orders, best bid {}, best offer {}",
            self.total_orders,
            or_dash(self.best_bid),
            or_dash(self.best_offer)
        )?;
        for level in &self.ladder {
            writeln!(f, "  {:<5} {:>14} x{}", level.kind, level.price.to_string(), level.order_count)?;
        }

        if let Some(trade) = &self.trade {
            writeln!(f, "Trade {} as {}", trade.pair, trade.account)?;
            writeln!(f, "  bid collateral:   {}", join_cids(&trade.bid_collateral))?;
            writeln!(f, "  offer collateral: {}", join_cids(&trade.offer_collateral))?;
            writeln!(
                f,
                "  precision: base {} (step {}), quote {} (step {})",
                trade.precision.base,
                trade.base_steps.step,
                trade.precision.quote,
                trade.quote_steps.step
            )?;
        }
        Ok(())
    }
}
