//! SpendTrack: a personal expense tracker.
//!
//! Expenses are kept in an `ExpenseBook` that is loaded from, and written back to, an
//! `ExpenseStore`. The `report` functions derive month views and totals from the collection, and
//! the `commands` expose all of it through the `spendtrack` CLI.

pub mod args;
pub mod book;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod report;
pub mod store;
mod utils;


pub use book::ExpenseBook;
pub use config::Config;
pub use error::{Error, ExpenseError, Result};
