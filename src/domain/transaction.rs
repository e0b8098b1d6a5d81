//! The transaction record and the draft used to create or edit one.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::category::CategoryRegistry;

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Japanese label used in tables and CSV exports.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "収入",
            TransactionKind::Expense => "支出",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "収入" => Ok(TransactionKind::Income),
            "expense" | "支出" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction kind `{other}`")),
        }
    }
}

/// A single recorded income or expense entry.
///
/// The serialized field names (`type`, `timestamp`) match the JSON layout the
/// original browser app stored under its localStorage key, so existing data
/// files load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Millisecond clock value at creation time, unique within one store.
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Category code such as `food`; labels live in [`CategoryRegistry`].
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(id: i64, draft: TransactionDraft) -> Self {
        Self {
            id,
            kind: draft.kind,
            category: draft.category,
            amount: draft.amount,
            description: draft.description,
            date: draft.date,
            created_at: Utc::now(),
        }
    }

    /// Applies the editable fields of `draft`, leaving id and creation time alone.
    pub fn apply(&mut self, draft: TransactionDraft) {
        self.kind = draft.kind;
        self.category = draft.category;
        self.amount = draft.amount;
        self.description = draft.description;
        self.date = draft.date;
    }

    /// Amount with income counted positive and expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// The user-editable fields of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

impl TransactionDraft {
    /// Checks the draft against the registry before it reaches the store.
    ///
    /// Stored data is trusted as-is; only new input goes through here.
    pub fn validate(&self, registry: &CategoryRegistry) -> Result<(), String> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(format!(
                "amount must be a non-negative number, got `{}`",
                self.amount
            ));
        }
        if !registry.contains(self.kind, &self.category) {
            return Err(format!(
                "unknown {} category `{}`",
                self.kind, self.category
            ));
        }
        Ok(())
    }
}
