//! Report configuration
//!
//! Loaded from an optional JSON file; command-line flags override file
//! values. Every field has a default.

use std::fs;
use std::path::Path;

use anyhow::Context;
use client_core::trade::TradeContext;
use client_core::ClientConfig;
use serde::Deserialize;
use types::ids::{Id, Party};
use types::token::TokenPair;

use crate::logging::LogFormat;

/// Trade screen to report on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TradeSettings {
    pub exchange: String,
    pub operator: String,
    pub investor: String,
    pub base: String,
    pub quote: String,
}

impl TradeSettings {
    pub fn context(&self) -> TradeContext {
        TradeContext::new(
            Party::new(self.exchange.as_str()),
            Party::new(self.operator.as_str()),
            Party::new(self.investor.as_str()),
            TokenPair::new(Id::new(self.base.as_str()), Id::new(self.quote.as_str())),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub log_format: LogFormat,
    pub client: ClientConfig,
    pub trade: Option<TradeSettings>,
}

impl ReportConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid report config")?;
        config.client.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("loading config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::InvalidQuantityPolicy;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::from_json("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.trade.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = ReportConfig::from_json(
            r#"{
                "log_format": "compact",
                "client": { "invalid_quantity": "skip", "ladder_depth": 3 },
                "trade": {
                    "exchange": "Exchange",
                    "operator": "Operator",
                    "investor": "Alice",
                    "base": "BTC",
                    "quote": "USD"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.log_format, LogFormat::Compact);
        assert_eq!(config.client.invalid_quantity, InvalidQuantityPolicy::Skip);
        assert_eq!(config.client.ladder_depth, Some(3));

        let ctx = config.trade.unwrap().context();
        assert_eq!(ctx.account_label(), "'Alice'@'Exchange'");
        assert_eq!(ctx.pair().symbol(), "BTC/USD");
    }

    #[test]
    fn test_invalid_depth_rejected() {
        assert!(ReportConfig::from_json(r#"{"client":{"ladder_depth":0}}"#).is_err());
    }
}
