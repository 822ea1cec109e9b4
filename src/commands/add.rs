use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::{parse_amount, Expense};
use crate::{Config, Result};

/// Logs a new expense. The date defaults to today.
///
/// # Errors
/// - Returns an error if the amount is not a number greater than zero.
/// - Returns an error if the date is malformed or in the future.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Expense>> {
    let amount = parse_amount(args.amount())?;
    let mut book = config.open_book().await;
    if let Some(date) = args.date() {
        book.select_date(date)?;
    }
    let date = book.selected_date().to_string();
    let expense = book.add(amount, args.category().clone(), &date)?.clone();
    book.flush().await;

    let message = format!(
        "Added {} for {} on {} (ID {})",
        config.money(expense.amount()),
        expense.category(),
        expense.date(),
        expense.id()
    );
    Ok(Out::new(message, expense))
}
