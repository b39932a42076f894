//! Display formatting for money amounts.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYMBOL: &str = "₹";
const GROUP_SEPARATOR: char = ',';
const MAX_FRACTION_DIGITS: usize = 2;

/// How integer digits are grouped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DigitGrouping {
    /// Last three digits, then groups of two (`12,34,567`).
    #[default]
    Indian,
    /// Groups of three (`1,234,567`).
    Western,
}

impl std::str::FromStr for DigitGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indian" | "en-in" => Ok(DigitGrouping::Indian),
            "western" | "en-us" => Ok(DigitGrouping::Western),
            other => Err(format!("unknown digit grouping `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub grouping: DigitGrouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL, DigitGrouping::Indian)
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, grouping: DigitGrouping) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
        }
    }

    /// `₹12,34,567.5`: at most two fraction digits, trailing zeros dropped.
    pub fn format(&self, amount: f64) -> String {
        let body = format_number(amount.abs(), self.grouping);
        if amount < 0.0 && body != "0" {
            format!("-{}{}", self.symbol, body)
        } else {
            format!("{}{}", self.symbol, body)
        }
    }

    /// Prefixes the magnitude with an explicit sign, e.g. `-₹120`.
    pub fn format_signed(&self, sign: char, amount: f64) -> String {
        format!("{}{}{}", sign, self.symbol, format_number(amount.abs(), self.grouping))
    }
}

/// Formats a non-negative value without a symbol.
pub fn format_number(value: f64, grouping: DigitGrouping) -> String {
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };
    let grouped = match grouping {
        DigitGrouping::Indian => group_indian(int_part),
        DigitGrouping::Western => group_thousands(int_part),
    };
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{grouped}.{frac_part}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, GROUP_SEPARATOR);
        }
        grouped.insert(0, ch);
    }
    grouped
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped.push(GROUP_SEPARATOR);
    grouped.push_str(tail);
    grouped
}
