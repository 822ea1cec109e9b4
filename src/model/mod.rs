//! Types that represent the core data model, such as `Expense`, `Amount` and `MonthKey`.
mod amount;
mod category;
mod expense;
pub mod month;

pub use amount::{Amount, AmountError};
pub use category::{Category, EmptyCategory};
pub use expense::{parse_amount, Expense, ExpenseId};
pub(crate) use expense::{validate_amount, validate_date};
pub use month::{current_month_key, month_key_of, month_options, today, MonthKey, MonthOption};
