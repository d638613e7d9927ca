//! Input formatting helpers for order and issuance forms

use rust_decimal::Decimal;
use serde::Serialize;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Prefix `word` with "a" or "an".
pub fn indefinite_article(word: &str) -> String {
    match word.chars().next() {
        None => String::new(),
        Some(first) if VOWELS.contains(&first.to_ascii_lowercase()) => format!("an {word}"),
        Some(_) => format!("a {word}"),
    }
}

/// Fractional digits of `value`, ignoring trailing zeros.
pub fn count_decimals(value: Decimal) -> u32 {
    value.normalize().scale()
}

/// Step and placeholder for a numeric input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSteps {
    pub step: String,
    pub placeholder: String,
}

/// Input steps for a quantity with `precision` decimals:
/// precision 2 gives step `0.01` and placeholder `0.00`.
///
/// Precision is capped at the finest scale a `Decimal` quantity holds.
pub fn precise_input_steps(precision: u32) -> InputSteps {
    let precision = precision.min(Decimal::MAX_SCALE);
    if precision == 0 {
        return InputSteps {
            step: "1".to_string(),
            placeholder: "0".to_string(),
        };
    }

    let zeros = precision as usize;
    InputSteps {
        step: format!("0.{}1", "0".repeat(zeros - 1)),
        placeholder: format!("0.{}", "0".repeat(zeros)),
    }
}
