//! Error types.
//!
//! Fallible plumbing (files, serialization, configuration) returns `anyhow` errors with context.
//! Rejections of user input are typed as `ExpenseError` so that callers can tell them apart and
//! show them as validation messages.

use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The ways a new or edited expense can be rejected.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ExpenseError {
    /// The amount is not a number greater than zero.
    InvalidAmount(String),
    /// The date is not a calendar date of the form `YYYY-MM-DD`.
    InvalidDate(String),
    /// The date is after today.
    FutureDate(String),
}

impl Display for ExpenseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseError::InvalidAmount(a) => {
                write!(f, "Invalid amount '{a}': please enter a positive amount")
            }
            ExpenseError::InvalidDate(d) => {
                write!(f, "Invalid date '{d}': expected the form YYYY-MM-DD")
            }
            ExpenseError::FutureDate(d) => {
                write!(f, "Invalid date '{d}': expenses cannot be dated in the future")
            }
        }
    }
}

impl std::error::Error for ExpenseError {}
