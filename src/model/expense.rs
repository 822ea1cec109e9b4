use crate::error::ExpenseError;
use crate::model::month::DATE_FORMAT;
use crate::model::{Amount, Category, MonthKey};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// The opaque, unique identifier of an expense.
#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Generates a new random identifier. Two calls never collide, no matter how close together
    /// they are made.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ExpenseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single logged expense. This is also the persisted shape: `{id, amount, category, date}`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,
    amount: Amount,
    category: Category,
    /// The spending date as `YYYY-MM-DD`, kept exactly as it was given.
    date: String,
}

impl Expense {
    pub fn new(id: ExpenseId, amount: Amount, category: Category, date: impl Into<String>) -> Self {
        Self {
            id,
            amount,
            category,
            date: date.into(),
        }
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::of(&self.date)
    }

    /// Replaces everything but the id.
    pub(crate) fn set(&mut self, amount: Amount, category: Category, date: String) {
        self.amount = amount;
        self.category = category;
        self.date = date;
    }
}

/// Parses user input into an amount that is greater than zero.
pub fn parse_amount(input: &str) -> Result<Amount, ExpenseError> {
    let amount: Amount = input
        .parse()
        .map_err(|_| ExpenseError::InvalidAmount(input.trim().to_string()))?;
    validate_amount(amount)
}

pub(crate) fn validate_amount(amount: Amount) -> Result<Amount, ExpenseError> {
    if amount.is_positive() {
        Ok(amount)
    } else {
        Err(ExpenseError::InvalidAmount(amount.value().to_string()))
    }
}

/// Checks that `date` is a real `YYYY-MM-DD` date that is not after today.
pub(crate) fn validate_date(date: &str) -> Result<NaiveDate, ExpenseError> {
    let trimmed = date.trim();
    // chrono accepts unpadded fields, stored dates must be exactly YYYY-MM-DD
    if trimmed.len() != 10 {
        return Err(ExpenseError::InvalidDate(trimmed.to_string()));
    }
    let parsed = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ExpenseError::InvalidDate(trimmed.to_string()))?;
    if parsed > Local::now().date_naive() {
        return Err(ExpenseError::FutureDate(trimmed.to_string()));
    }
    Ok(parsed)
}
