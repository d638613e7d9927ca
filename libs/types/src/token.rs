//! Issued token types

use crate::contract::ContractInfo;
use crate::ids::{Id, Party};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Payload of a token contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: Id,
    #[serde(default)]
    pub description: String,
    /// Number of decimals a quantity of this token may carry
    #[serde(deserialize_with = "precision_from_ledger")]
    pub quantity_precision: u32,
    pub issuer: Party,
    #[serde(default)]
    pub is_public: bool,
}

/// A token observed in a snapshot
pub type TokenRecord = ContractInfo<Token>;

/// Ledger integers arrive as JSON strings; plain numbers are accepted too.
/// A precision finer than `Decimal` can carry is rejected.
fn precision_from_ledger<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u32),
        Text(String),
    }

    let precision = match Raw::deserialize(deserializer)? {
        Raw::Int(n) => n,
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid quantity precision {s:?}")))?,
    };
    if precision > Decimal::MAX_SCALE {
        return Err(D::Error::custom(format!(
            "quantity precision {precision} exceeds {}",
            Decimal::MAX_SCALE
        )));
    }
    Ok(precision)
}

/// Base/quote pair traded on an exchange
///
/// Encoded on the ledger as a tuple: `{"_1": base, "_2": quote}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(rename = "_1")]
    pub base: Id,
    #[serde(rename = "_2")]
    pub quote: Id,
}

impl TokenPair {
    pub fn new(base: Id, quote: Id) -> Self {
        Self { base, quote }
    }

    /// `BASE/QUOTE`, as shown in the trade screen title
    pub fn symbol(&self) -> String {
        format!("{}/{}", self.base.label, self.quote.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_from_string_or_number() {
        let from_text: Token = serde_json::from_value(serde_json::json!({
            "id": { "label": "BTC" },
            "quantityPrecision": "8",
            "issuer": "Issuer"
        }))
        .unwrap();
        assert_eq!(from_text.quantity_precision, 8);

        let from_int: Token = serde_json::from_value(serde_json::json!({
            "id": { "label": "USD" },
            "quantityPrecision": 2,
            "issuer": "Issuer",
            "isPublic": true
        }))
        .unwrap();
        assert_eq!(from_int.quantity_precision, 2);
        assert!(from_int.is_public);
    }

    #[test]
    fn test_precision_rejects_non_integer() {
        let result: Result<Token, _> = serde_json::from_value(serde_json::json!({
            "id": { "label": "BTC" },
            "quantityPrecision": "eight",
            "issuer": "Issuer"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_precision_capped_at_decimal_scale() {
        let token = |precision: serde_json::Value| {
            serde_json::from_value::<Token>(serde_json::json!({
                "id": { "label": "BTC" },
                "quantityPrecision": precision,
                "issuer": "Issuer"
            }))
        };
        assert_eq!(token(serde_json::json!("28")).unwrap().quantity_precision, 28);
        assert!(token(serde_json::json!("29")).is_err());
        assert!(token(serde_json::json!("4000000000")).is_err());
        assert!(token(serde_json::json!(4_000_000_000u32)).is_err());
    }

    #[test]
    fn test_pair_tuple_encoding() {
        let pair = TokenPair::new(Id::new("BTC"), Id::new("USD"));
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["_1"]["label"], "BTC");
        assert_eq!(json["_2"]["label"], "USD");
        assert_eq!(pair.symbol(), "BTC/USD");
    }
}
