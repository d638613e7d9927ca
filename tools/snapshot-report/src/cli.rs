use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use client_core::InvalidQuantityPolicy;

use crate::config::{ReportConfig, TradeSettings};
use crate::logging::LogFormat;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text report
    #[default]
    Text,
    /// JSON document
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "snapshot-report")]
#[command(about = "Deposit summaries and order ladders for a marketplace ledger snapshot")]
#[command(version = "1.0.0")]
pub struct Cli {
    /// Snapshot file: { "deposits": [..], "orders": [..], "tokens": [..] }
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Report configuration file (JSON)
    #[arg(short, long, env = "SNAPSHOT_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override log format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Report output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Leave deposits with invalid quantities out of the totals
    #[arg(long)]
    pub skip_invalid: bool,

    /// Ladder levels shown per side
    #[arg(long)]
    pub depth: Option<usize>,

    /// Investor party for the trade section
    #[arg(long, requires_all = ["exchange", "operator", "pair"])]
    pub investor: Option<String>,

    /// Exchange party for the trade section
    #[arg(long, requires = "investor")]
    pub exchange: Option<String>,

    /// Operator party for the trade section
    #[arg(long, requires = "investor")]
    pub operator: Option<String>,

    /// Traded pair as BASE/QUOTE
    #[arg(long, requires = "investor")]
    pub pair: Option<String>,
}

impl Cli {
    /// Config file (if any) with command-line overrides applied.
    pub fn resolve_config(&self) -> anyhow::Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::load(path)?,
            None => ReportConfig::default(),
        };

        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if self.skip_invalid {
            config.client.invalid_quantity = InvalidQuantityPolicy::Skip;
        }
        if self.depth.is_some() {
            config.client.ladder_depth = self.depth;
        }
        if let Some(trade) = self.trade_settings()? {
            config.trade = Some(trade);
        }

        config.client.validate()?;
        Ok(config)
    }

    fn trade_settings(&self) -> anyhow::Result<Option<TradeSettings>> {
        let (Some(investor), Some(exchange), Some(operator), Some(pair)) =
            (&self.investor, &self.exchange, &self.operator, &self.pair)
        else {
            return Ok(None);
        };

        let (base, quote) = pair
            .split_once('/')
            .filter(|(b, q)| !b.is_empty() && !q.is_empty())
            .ok_or_else(|| anyhow::anyhow!("pair must look like BASE/QUOTE, got {pair:?}"))?;

        Ok(Some(TradeSettings {
            exchange: exchange.clone(),
            operator: operator.clone(),
            investor: investor.clone(),
            base: base.to_string(),
            quote: quote.to_string(),
        }))
    }
}
