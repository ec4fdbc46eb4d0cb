//! Transaction model
//!
//! A ledger entry: income or expense, paid through one of the accounts and
//! optionally filed under a category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use crate::error::ExpenseError;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("Income"),
            Self::Expense => f.pad("Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(ExpenseError::Parse(format!(
                "Unknown transaction type '{}' (expected income or expense)",
                other
            ))),
        }
    }
}

/// Where the money moved through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Account {
    #[default]
    Bank,
    Cash,
    MobileMoney,
}

impl Account {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bank => "Bank",
            Self::Cash => "Cash",
            Self::MobileMoney => "Mobile Money",
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Account {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "bank" => Ok(Self::Bank),
            "cash" => Ok(Self::Cash),
            "mobilemoney" | "mobile" | "momo" => Ok(Self::MobileMoney),
            _ => Err(ExpenseError::Parse(format!(
                "Unknown account '{}' (expected bank, cash or mobile-money)",
                s.trim()
            ))),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Calendar date of the transaction
    pub date: NaiveDate,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Amount, non-negative when entered through the service layer
    pub amount: Money,

    /// Account the money moved through
    pub account: Account,

    /// Category, if any. May dangle after the category is deleted.
    pub category_id: Option<CategoryId>,

    #[serde(default)]
    pub description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Materialize a new transaction with a fresh id
    pub fn from_new(new: NewTransaction) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            date: new.date,
            kind: new.kind,
            amount: new.amount,
            account: new.account,
            category_id: new.category_id,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount,
            self.description
        )
    }
}

/// Everything needed to record a transaction except its id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub kind: TransactionType,
    pub amount: Money,
    pub account: Account,
    pub category_id: Option<CategoryId>,
    pub description: String,
}

impl NewTransaction {
    pub fn new(date: NaiveDate, kind: TransactionType, amount: Money, account: Account) -> Self {
        Self {
            date,
            kind,
            amount,
            account,
            category_id: None,
            description: String::new(),
        }
    }

    pub fn income(date: NaiveDate, amount: Money) -> Self {
        Self::new(date, TransactionType::Income, amount, Account::Bank)
    }

    pub fn expense(date: NaiveDate, amount: Money) -> Self {
        Self::new(date, TransactionType::Expense, amount, Account::Bank)
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.account = account;
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub kind: Option<TransactionType>,
    pub amount: Option<Money>,
    pub account: Option<Account>,
    /// `Some(None)` clears the category
    pub category_id: Option<Option<CategoryId>>,
    pub description: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merge this patch into `txn`
    pub fn apply_to(&self, txn: &mut Transaction) {
        if let Some(date) = self.date {
            txn.date = date;
        }
        if let Some(kind) = self.kind {
            txn.kind = kind;
        }
        if let Some(amount) = self.amount {
            txn.amount = amount;
        }
        if let Some(account) = self.account {
            txn.account = account;
        }
        if let Some(category_id) = self.category_id {
            txn.category_id = category_id;
        }
        if let Some(description) = &self.description {
            txn.description = description.clone();
        }
        txn.updated_at = Utc::now();
    }
}
