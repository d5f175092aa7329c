use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

use super::transaction::TransactionKind;

/// Fixed set of categories a transaction can be filed under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Healthcare,
    Education,
    Salary,
    Freelance,
    Investment,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Bills,
        Category::Healthcare,
        Category::Education,
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Other,
    ];

    /// Lowercase key used in persisted data and form values.
    pub fn key(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Bills => "bills",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::Other => "other",
        }
    }

    /// Capitalised label for list and chart legends.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investment => "Investment",
            Category::Other => "Other",
        }
    }

    /// The type a form should preselect for this category. Only a hint: any
    /// category may be recorded as either type.
    pub fn suggested_kind(self) -> TransactionKind {
        match self {
            Category::Salary | Category::Freelance | Category::Investment => {
                TransactionKind::Income
            }
            _ => TransactionKind::Expense,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        if needle.is_empty() {
            return Err(LedgerError::validation("category is required"));
        }
        Category::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(needle))
            .ok_or_else(|| LedgerError::validation(format!("unknown category `{needle}`")))
    }
}
