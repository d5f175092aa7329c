use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

use super::category::Category;

pub type TransactionId = u64;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded income or expense. Never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn from_draft(
        id: TransactionId,
        draft: TransactionDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            description: draft.description,
            amount: draft.amount,
            category: draft.category,
            kind: draft.kind,
            date: draft.date,
            created_at,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the direction applied: positive for income, negative for expense.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn key(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            "" => Err(LedgerError::validation("type is required")),
            other => Err(LedgerError::validation(format!(
                "type must be `income` or `expense`, got `{other}`"
            ))),
        }
    }
}

/// Validated input for a new transaction. Holding one means every field
/// already satisfies the ledger invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    description: String,
    amount: f64,
    category: Category,
    kind: TransactionKind,
    date: NaiveDate,
}

impl TransactionDraft {
    pub fn new(
        description: impl AsRef<str>,
        amount: f64,
        category: Category,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Result<Self> {
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(LedgerError::validation("description is required"));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::validation(format!(
                "amount must be a positive number, got {amount}"
            )));
        }
        Ok(Self {
            description: description.to_string(),
            amount,
            category,
            kind,
            date,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Raw field values as captured by an entry form, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub kind: String,
    pub date: String,
}

impl TransactionForm {
    /// Blank form with `expense` selected and the date set to `today`.
    pub fn reset(today: NaiveDate) -> Self {
        Self {
            kind: TransactionKind::Expense.key().to_string(),
            date: today.format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    pub fn parse(&self) -> Result<TransactionDraft> {
        let amount = parse_amount(&self.amount)?;
        let category: Category = self.category.parse()?;
        let kind: TransactionKind = self.kind.parse()?;
        let date = parse_date(&self.date)?;
        TransactionDraft::new(&self.description, amount, category, kind, date)
    }
}

fn parse_amount(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LedgerError::validation("amount is required"));
    }
    raw.parse::<f64>()
        .map_err(|_| LedgerError::validation(format!("amount `{raw}` is not a number")))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LedgerError::validation("date is required"));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| LedgerError::validation(format!("date `{raw}` is not YYYY-MM-DD")))
}
