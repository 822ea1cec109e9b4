//! Month keys and the date helpers that bucket expenses by calendar month.
//!
//! A month key is the `YYYY-MM` prefix of a `YYYY-MM-DD` date. Keys compare as strings, which for
//! well-formed keys is also chronological order.

use crate::model::Expense;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The chrono format of a spending date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A `YYYY-MM` key bucketing expenses by calendar month.
///
/// Keys derived from stored dates are not validated, so a malformed date produces a malformed key
/// rather than an error. Use `FromStr` to get a validated key from user input.
#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    /// The month key of today's date in the local calendar.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Takes the first seven characters of `date`. No validation is performed.
    pub fn of(date: &str) -> Self {
        let end = date
            .char_indices()
            .nth(7)
            .map(|(ix, _)| ix)
            .unwrap_or(date.len());
        Self(date[..end].to_string())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first day of the month, if the key is well-formed.
    pub fn first_day(&self) -> Option<NaiveDate> {
        let (y, m) = self.0.split_once('-')?;
        if y.len() != 4 || m.len() != 2 {
            return None;
        }
        NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, 1)
    }

    /// A long label such as `February 2025`. Malformed keys are labeled with the raw key.
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(day) => day.format("%B %Y").to_string(),
            None => self.0.clone(),
        }
    }

    /// A short label such as `Feb 2025`. Malformed keys are labeled with the raw key.
    pub fn short_label(&self) -> String {
        match self.first_day() {
            Some(day) => day.format("%b %Y").to_string(),
            None => self.0.clone(),
        }
    }

    /// The month before this one, wrapping into the previous year.
    pub fn previous(&self) -> Option<Self> {
        let first = self.first_day()?;
        let (y, m) = if first.month() == 1 {
            (first.year() - 1, 12)
        } else {
            (first.year(), first.month() - 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1).map(Self::from_date)
    }

    /// The month after this one, wrapping into the next year.
    pub fn next(&self) -> Option<Self> {
        let first = self.first_day()?;
        let (y, m) = if first.month() == 12 {
            (first.year() + 1, 1)
        } else {
            (first.year(), first.month() + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1).map(Self::from_date)
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = MonthKey(s.trim().to_string());
        anyhow::ensure!(
            key.first_day().is_some(),
            "Invalid month '{s}', expected the form YYYY-MM"
        );
        Ok(key)
    }
}

/// A selectable month together with its human-readable label.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MonthOption {
    pub key: MonthKey,
    pub label: String,
}

/// Today's month key, `YYYY-MM`, in the local calendar.
pub fn current_month_key() -> MonthKey {
    MonthKey::current()
}

/// The month key of a `YYYY-MM-DD` date string.
pub fn month_key_of(date: &str) -> MonthKey {
    MonthKey::of(date)
}

/// Today's date as `YYYY-MM-DD` in the local calendar.
pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Every month worth offering for selection: the current month, `extra` if given, and the month
/// of every expense. Deduplicated and sorted most recent first.
pub fn month_options(expenses: &[Expense], extra: Option<&MonthKey>) -> Vec<MonthOption> {
    let mut keys = BTreeSet::new();
    keys.insert(MonthKey::current());
    if let Some(extra) = extra {
        keys.insert(extra.clone());
    }
    keys.extend(expenses.iter().map(Expense::month_key));

    keys.into_iter()
        .rev()
        .map(|key| MonthOption {
            label: key.label(),
            key,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Category, ExpenseId};

    fn expense(date: &str) -> Expense {
        Expense::new(
            ExpenseId::from("x"),
            Amount::from_str("10").unwrap(),
            Category::Food,
            date,
        )
    }

    #[test]
    fn test_month_key_of() {
        assert_eq!(month_key_of("2025-02-14").as_str(), "2025-02");
        assert_eq!(month_key_of("2025-02").as_str(), "2025-02");
    }

    #[test]
    fn test_month_key_of_malformed_input() {
        assert_eq!(month_key_of("Feb 14").as_str(), "Feb 14");
        assert_eq!(month_key_of("").as_str(), "");
        assert_eq!(month_key_of("14/02/2025").as_str(), "14/02/2");
        // multi-byte characters must not split
        assert_eq!(month_key_of("ééééééééé").as_str(), "ééééééé");
    }

    #[test]
    fn test_current_month_key_shape() {
        let key = current_month_key();
        assert_eq!(key.as_str().len(), 7);
        assert!(key.first_day().is_some());
        assert_eq!(key, month_key_of(&today()));
    }

    #[test]
    fn test_labels() {
        let key = MonthKey::from_str("2025-02").unwrap();
        assert_eq!(key.label(), "February 2025");
        assert_eq!(key.short_label(), "Feb 2025");
        let bad = month_key_of("oops");
        assert_eq!(bad.label(), "oops");
    }

    #[test]
    fn test_from_str_validates() {
        assert!(MonthKey::from_str("2025-13").is_err());
        assert!(MonthKey::from_str("2025-1").is_err());
        assert!(MonthKey::from_str("February").is_err());
        assert_eq!(MonthKey::from_str(" 2024-12 ").unwrap().as_str(), "2024-12");
    }

    #[test]
    fn test_previous_and_next_wrap_years() {
        let jan = MonthKey::from_str("2025-01").unwrap();
        assert_eq!(jan.previous().unwrap().as_str(), "2024-12");
        assert_eq!(jan.next().unwrap().as_str(), "2025-02");
        let dec = MonthKey::from_str("2024-12").unwrap();
        assert_eq!(dec.next().unwrap().as_str(), "2025-01");
        assert!(month_key_of("junk").next().is_none());
    }

    #[test]
    fn test_month_options_empty_has_current_month() {
        let options = month_options(&[], None);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].key, current_month_key());
    }

    #[test]
    fn test_month_options_sorted_and_deduplicated() {
        let expenses = vec![
            expense("2024-11-02"),
            expense("2025-01-05"),
            expense("2024-11-30"),
        ];
        let extra = MonthKey::from_str("2023-06").unwrap();
        let options = month_options(&expenses, Some(&extra));
        let keys: Vec<&str> = options.iter().map(|o| o.key.as_str()).collect();

        let current = current_month_key();
        let mut expected = vec![current.as_str(), "2025-01", "2024-11", "2023-06"];
        expected.sort_by(|a, b| b.cmp(a));
        expected.dedup();
        assert_eq!(keys, expected);

        let nov = options.iter().find(|o| o.key.as_str() == "2024-11").unwrap();
        assert_eq!(nov.label, "November 2024");
    }
}
