use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

use super::{category::Category, transaction::Transaction, transaction::TransactionKind};

/// Either every value or one specific value; parses from `"all"` or a key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = LedgerError>,
{
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            value.parse().map(Selection::Only)
        }
    }
}

/// View restriction applied to the transaction list. Never persisted and
/// never applied to totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Filter {
    pub category: Selection<Category>,
    #[serde(rename = "type")]
    pub kind: Selection<TransactionKind>,
}

impl Filter {
    pub fn new(category: Selection<Category>, kind: Selection<TransactionKind>) -> Self {
        Self { category, kind }
    }

    pub fn category(category: Category) -> Self {
        Self::new(Selection::Only(category), Selection::All)
    }

    pub fn kind(kind: TransactionKind) -> Self {
        Self::new(Selection::All, Selection::Only(kind))
    }

    /// Parses raw select-box values such as `("food", "all")`.
    pub fn parse(category: &str, kind: &str) -> Result<Self, LedgerError> {
        Ok(Self::new(category.parse()?, kind.parse()?))
    }

    pub fn is_cleared(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.category.matches(&txn.category) && self.kind.matches(&txn.kind)
    }
}
