use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::category::{CategoryId, CategoryView, FALLBACK_LABEL};
use crate::domain::common::{de_amount, Identifiable};

pub type TransactionId = String;

/// Direction of money movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Expense,
    Income,
}

impl TransactionKind {
    pub fn sign(self) -> char {
        match self {
            TransactionKind::Expense => '-',
            TransactionKind::Income => '+',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        })
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" | "exp" | "out" => Ok(TransactionKind::Expense),
            "income" | "inc" | "in" => Ok(TransactionKind::Income),
            other => Err(format!("unknown transaction type `{other}`")),
        }
    }
}

/// A recorded money movement. `date` and `time` are stamped once from the
/// local clock when the record is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(deserialize_with = "de_amount")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub category: CategoryId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub time: String,
}

impl Transaction {
    pub fn stamped(
        id: TransactionId,
        amount: f64,
        note: Option<String>,
        category: CategoryId,
        kind: TransactionKind,
        at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            amount,
            note: note.filter(|n| !n.trim().is_empty()),
            category,
            kind,
            date: at.date(),
            time: display_time(at),
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Row title: the note when present, else the category label. Blank
    /// notes from older records count as absent.
    pub fn title(&self, category: &CategoryView<'_>) -> String {
        if let Some(note) = self.note.as_deref().filter(|n| !n.trim().is_empty()) {
            return note.to_string();
        }
        if category.known {
            category.label.to_string()
        } else {
            FALLBACK_LABEL.to_string()
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

/// 12-hour local display time in the `hh:mm am` style.
pub fn display_time(at: NaiveDateTime) -> String {
    at.format("%I:%M %P").to_string()
}

/// Unvalidated input collected by an entry form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDraft {
    pub amount: String,
    pub note: String,
    pub category: Option<CategoryId>,
    pub kind: TransactionKind,
}

impl TransactionDraft {
    pub fn expense(amount: impl Into<String>, category: impl Into<CategoryId>) -> Self {
        Self {
            amount: amount.into(),
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn income(amount: impl Into<String>, category: impl Into<CategoryId>) -> Self {
        Self {
            kind: TransactionKind::Income,
            ..Self::expense(amount, category)
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}
