//! Deposit aggregation: grouping, summing and filtering by account
//!
//! Groups keep the first-seen order of their keys and the snapshot order of
//! their members, so a summary reads in the same order as the deposit list
//! the user sees.

use indexmap::IndexMap;
use tracing::{debug, warn};
use types::deposit::DepositRecord;
use types::errors::DataError;
use types::numeric::Quantity;

use crate::config::{ClientConfig, InvalidQuantityPolicy};

/// Deposits grouped under a string key, in first-seen key order.
pub type DepositGroups<'a> = IndexMap<String, Vec<&'a DepositRecord>>;

/// Total quantity per asset label, in first-seen label order.
pub type DepositSummary = IndexMap<String, Quantity>;

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Partition deposits by `key_fn`.
///
/// Every deposit lands in exactly one group; relative order inside a group
/// follows the input.
pub fn group_by<'a, I, F>(deposits: I, mut key_fn: F) -> DepositGroups<'a>
where
    I: IntoIterator<Item = &'a DepositRecord>,
    F: FnMut(&DepositRecord) -> String,
{
    let mut groups = DepositGroups::new();
    for deposit in deposits {
        groups.entry(key_fn(deposit)).or_default().push(deposit);
    }
    groups
}

/// Group deposits by the party providing the account.
pub fn group_by_provider<'a, I>(deposits: I) -> DepositGroups<'a>
where
    I: IntoIterator<Item = &'a DepositRecord>,
{
    group_by(deposits, |d| d.data.provider().to_string())
}

/// Group deposits by asset label.
pub fn group_by_asset<'a, I>(deposits: I) -> DepositGroups<'a>
where
    I: IntoIterator<Item = &'a DepositRecord>,
{
    group_by(deposits, |d| d.data.asset_label().to_string())
}

/// Deposits held in `account_label` for `asset_label`.
///
/// Both labels must match exactly (case-sensitive). Used to pick the
/// deposits that may back a bid (quote asset) or an offer (base asset).
pub fn filter_for_account_and_asset<'a, I>(
    deposits: I,
    account_label: &str,
    asset_label: &str,
) -> Vec<&'a DepositRecord>
where
    I: IntoIterator<Item = &'a DepositRecord>,
{
    deposits
        .into_iter()
        .filter(|d| d.data.account_label() == account_label)
        .filter(|d| d.data.asset_label() == asset_label)
        .collect()
}

// ---------------------------------------------------------------------------
// Summing
// ---------------------------------------------------------------------------

/// Sums deposit quantities per asset.
///
/// Quantities are parsed as decimals and added exactly. What happens to a
/// quantity that does not parse is decided by the aggregator's
/// [`InvalidQuantityPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepositAggregator {
    policy: InvalidQuantityPolicy,
}

impl DepositAggregator {
    pub fn new(policy: InvalidQuantityPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.invalid_quantity)
    }

    pub fn policy(&self) -> InvalidQuantityPolicy {
        self.policy
    }

    /// Total quantity of a set of deposits, regardless of asset.
    pub fn sum<'a, I>(&self, deposits: I) -> Result<Quantity, DataError>
    where
        I: IntoIterator<Item = &'a DepositRecord>,
    {
        let mut total = Quantity::zero();
        for deposit in deposits {
            if let Some(quantity) = self.quantity(deposit)? {
                total = checked_total(total, quantity, deposit)?;
            }
        }
        Ok(total)
    }

    /// Total quantity per asset label.
    ///
    /// A label whose deposits were all skipped still appears, with a zero
    /// total.
    pub fn sum_by_asset<'a, I>(&self, deposits: I) -> Result<DepositSummary, DataError>
    where
        I: IntoIterator<Item = &'a DepositRecord>,
    {
        let mut summary = DepositSummary::new();
        for deposit in deposits {
            let quantity = self.quantity(deposit)?;
            accumulate(&mut summary, deposit, quantity)?;
        }

        debug!(assets = summary.len(), "deposit summary computed");
        Ok(summary)
    }

    /// `"USD: 150.5, EUR: 10"`, in first-seen label order.
    pub fn summary_text<'a, I>(&self, deposits: I) -> Result<String, DataError>
    where
        I: IntoIterator<Item = &'a DepositRecord>,
    {
        Ok(render_summary(&self.sum_by_asset(deposits)?))
    }

    /// Parsed quantity of one deposit; `None` when the policy skips it.
    ///
    /// Callers folding the same deposit into several summaries parse it once
    /// here and pass the result to [`accumulate`].
    pub fn quantity(&self, deposit: &DepositRecord) -> Result<Option<Quantity>, DataError> {
        match deposit.data.asset.parsed_quantity() {
            Ok(quantity) => Ok(Some(quantity)),
            Err(err) => match self.policy {
                InvalidQuantityPolicy::Fail => Err(DataError::InvalidQuantity {
                    contract_id: deposit.contract_id.clone(),
                    value: err.value,
                }),
                InvalidQuantityPolicy::Skip => {
                    warn!(
                        contract_id = %deposit.contract_id,
                        asset = deposit.data.asset_label(),
                        quantity = %err.value,
                        "skipping deposit with invalid quantity"
                    );
                    Ok(None)
                }
            },
        }
    }
}

/// Sum per asset with the default (failing) policy.
pub fn sum_by_asset<'a, I>(deposits: I) -> Result<DepositSummary, DataError>
where
    I: IntoIterator<Item = &'a DepositRecord>,
{
    DepositAggregator::default().sum_by_asset(deposits)
}

/// Summary text with the default (failing) policy.
pub fn summary_text<'a, I>(deposits: I) -> Result<String, DataError>
where
    I: IntoIterator<Item = &'a DepositRecord>,
{
    DepositAggregator::default().summary_text(deposits)
}

/// Add a parsed deposit quantity into `summary` under its asset label.
///
/// The label is recorded even when `quantity` is `None`, so skipped deposits
/// still show up with a zero total.
pub fn accumulate(
    summary: &mut DepositSummary,
    deposit: &DepositRecord,
    quantity: Option<Quantity>,
) -> Result<(), DataError> {
    let total = summary
        .entry(deposit.data.asset_label().to_string())
        .or_insert_with(Quantity::zero);
    if let Some(quantity) = quantity {
        *total = checked_total(*total, quantity, deposit)?;
    }
    Ok(())
}

fn checked_total(total: Quantity, quantity: Quantity, deposit: &DepositRecord) -> Result<Quantity, DataError> {
    total.checked_add(quantity).ok_or_else(|| DataError::QuantityOverflow {
        asset: deposit.data.asset_label().to_string(),
        contract_id: deposit.contract_id.clone(),
    })
}

/// Join `label: total` entries with `", "`.
pub fn render_summary(summary: &DepositSummary) -> String {
    summary
        .iter()
        .map(|(label, total)| format!("{}: {}", label, total))
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use types::deposit::{Account, Asset, AssetDeposit};
    use types::ids::{Id, Party};

    fn deposit(cid: &str, account: &str, provider: &str, asset: &str, qty: &str) -> DepositRecord {
        DepositRecord::new(
            cid,
            AssetDeposit {
                account: Account {
                    id: Id::new(account),
                    provider: Party::from(provider),
                    owner: Party::from("Alice"),
                },
                asset: Asset::new(asset, qty),
                observers: Vec::new(),
            },
        )
    }

    fn ids(records: &[&DepositRecord]) -> Vec<String> {
        records.iter().map(|d| d.contract_id.to_string()).collect()
    }

    fn sample() -> Vec<DepositRecord> {
        vec![
            deposit("#1", "'a'@'ex'", "Bank", "USD", "100.5"),
            deposit("#2", "'a'@'ex'", "Bank", "USD", "50"),
            deposit("#3", "'b'@'ex'", "Broker", "EUR", "10"),
        ]
    }

    #[test]
    fn test_summary_text_in_first_seen_order() {
        let deposits = sample();
        assert_eq!(summary_text(&deposits).unwrap(), "USD: 150.5, EUR: 10");
    }

    #[test]
    fn test_summary_of_empty_snapshot() {
        let deposits: Vec<DepositRecord> = Vec::new();
        assert!(sum_by_asset(&deposits).unwrap().is_empty());
        assert_eq!(summary_text(&deposits).unwrap(), "");
    }

    #[test]
    fn test_group_by_asset_preserves_order() {
        let deposits = vec![
            deposit("#1", "acc", "Bank", "USD", "1"),
            deposit("#2", "acc", "Bank", "EUR", "1"),
            deposit("#3", "acc", "Bank", "USD", "1"),
        ];
        let groups = group_by_asset(&deposits);
        let labels: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["USD", "EUR"]);
        assert_eq!(ids(&groups["USD"]), vec!["#1", "#3"]);
        assert_eq!(ids(&groups["EUR"]), vec!["#2"]);
    }

    #[test]
    fn test_group_by_provider() {
        let deposits = sample();
        let groups = group_by_provider(&deposits);
        assert_eq!(groups.len(), 2);
        assert_eq!(ids(&groups["Bank"]), vec!["#1", "#2"]);
        assert_eq!(ids(&groups["Broker"]), vec!["#3"]);
    }

    #[test]
    fn test_group_by_custom_key() {
        let deposits = sample();
        let groups = group_by(&deposits, |d| d.data.account_label().to_uppercase());
        assert!(groups.contains_key("'A'@'EX'"));
        assert!(groups.contains_key("'B'@'EX'"));
    }

    #[test]
    fn test_filter_matches_both_labels_exactly() {
        let deposits = vec![
            deposit("#1", "'a'@'ex'", "ex", "USD", "1"),
            deposit("#2", "'b'@'ex'", "ex", "USD", "1"),
            deposit("#3", "'a'@'ex'", "ex", "EUR", "1"),
            deposit("#4", "'a'@'ex'", "ex", "usd", "1"),
            deposit("#5", "'a'@'ex'", "ex", "USD", "2"),
        ];
        let eligible = filter_for_account_and_asset(&deposits, "'a'@'ex'", "USD");
        assert_eq!(ids(&eligible), vec!["#1", "#5"]);

        let none = filter_for_account_and_asset(&deposits, "'A'@'ex'", "USD");
        assert!(none.is_empty());
    }

    #[test]
    fn test_fail_policy_reports_contract() {
        let mut deposits = sample();
        deposits.push(deposit("#bad", "'a'@'ex'", "Bank", "USD", "lots"));

        let err = sum_by_asset(&deposits).unwrap_err();
        assert_eq!(
            err,
            DataError::InvalidQuantity {
                contract_id: "#bad".into(),
                value: "lots".to_string(),
            }
        );
    }

    #[test]
    fn test_skip_policy_drops_contribution() {
        let mut deposits = sample();
        deposits.push(deposit("#bad", "'a'@'ex'", "Bank", "USD", "lots"));
        deposits.push(deposit("#gbp", "'a'@'ex'", "Bank", "GBP", "n/a"));

        let aggregator = DepositAggregator::new(InvalidQuantityPolicy::Skip);
        let summary = aggregator.sum_by_asset(&deposits).unwrap();
        assert_eq!(summary["USD"].to_string(), "150.5");
        assert!(summary["GBP"].is_zero());
        assert_eq!(
            aggregator.summary_text(&deposits).unwrap(),
            "USD: 150.5, EUR: 10, GBP: 0"
        );
    }

    #[test]
    fn test_aggregator_from_config() {
        let config = ClientConfig {
            invalid_quantity: InvalidQuantityPolicy::Skip,
            ..ClientConfig::default()
        };
        assert_eq!(
            DepositAggregator::from_config(&config).policy(),
            InvalidQuantityPolicy::Skip
        );
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        const MAX: &str = "79228162514264337593543950335";
        let deposits = vec![
            deposit("#1", "acc", "Bank", "USD", MAX),
            deposit("#2", "acc", "Bank", "EUR", MAX),
            deposit("#3", "acc", "Bank", "USD", MAX),
        ];

        let err = sum_by_asset(&deposits).unwrap_err();
        assert_eq!(
            err,
            DataError::QuantityOverflow {
                asset: "USD".to_string(),
                contract_id: "#3".into(),
            }
        );
        assert!(summary_text(&deposits).is_err());
        assert!(DepositAggregator::default().sum(&deposits[..2]).is_err());

        let single = sum_by_asset(&deposits[..2]).unwrap();
        assert_eq!(single["USD"].to_string(), MAX);
    }

    #[test]
    fn test_near_miss_syntax_is_invalid_quantity() {
        for qty in ["1_000", "1,000", "0.12345678901234567890123456789012"] {
            let deposits = vec![deposit("#q", "acc", "Bank", "USD", qty)];
            assert_eq!(
                sum_by_asset(&deposits).unwrap_err(),
                DataError::InvalidQuantity {
                    contract_id: "#q".into(),
                    value: qty.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_accumulate_shares_one_parse() {
        let mut deposits = sample();
        deposits.push(deposit("#bad", "'a'@'ex'", "Bank", "GBP", "lots"));
        let aggregator = DepositAggregator::new(InvalidQuantityPolicy::Skip);

        let mut overall = DepositSummary::new();
        let mut bank = DepositSummary::new();
        for d in &deposits {
            let quantity = aggregator.quantity(d).unwrap();
            accumulate(&mut overall, d, quantity).unwrap();
            if d.data.provider().as_str() == "Bank" {
                accumulate(&mut bank, d, quantity).unwrap();
            }
        }
        assert_eq!(render_summary(&overall), "USD: 150.5, EUR: 10, GBP: 0");
        assert_eq!(render_summary(&bank), "USD: 150.5, GBP: 0");
        assert_eq!(overall, aggregator.sum_by_asset(&deposits).unwrap());
    }

    #[test]
    fn test_sum_is_exact() {
        let deposits = vec![
            deposit("#1", "acc", "Bank", "BTC", "0.1"),
            deposit("#2", "acc", "Bank", "BTC", "0.2"),
        ];
        let summary = sum_by_asset(&deposits).unwrap();
        assert_eq!(summary["BTC"].to_string(), "0.3");
    }
}
