use crate::args::EditArgs;
use crate::commands::Out;
use crate::model::{parse_amount, Expense, ExpenseId};
use crate::{Config, Result};
use tracing::info;

/// Changes the amount, category or date of an expense. Fields that are not given keep their
/// current values, as does the ID and the position of the expense in the collection.
///
/// An ID that does not exist is not an error: nothing changes and the output has no structure.
///
/// # Errors
/// - Returns an error if a new amount is not a number greater than zero.
/// - Returns an error if the resulting date is malformed or in the future.
pub async fn edit(config: Config, args: EditArgs) -> Result<Out<Expense>> {
    let id = ExpenseId::from(args.id());
    let mut book = config.open_book().await;
    let Some(current) = book.get(&id).cloned() else {
        return Ok(format!("No expense with ID '{id}', nothing changed").into());
    };

    if args.amount().is_none() && args.category().is_none() && args.date().is_none() {
        info!("Nothing to change, pass --amount, --category or --date");
        return Ok(Out::new(format!("Expense {id} is unchanged"), current));
    }

    let amount = match args.amount() {
        Some(amount) => parse_amount(amount)?,
        None => current.amount(),
    };
    let category = args
        .category()
        .cloned()
        .unwrap_or_else(|| current.category().clone());
    let date = args.date().unwrap_or(current.date());

    book.edit(&id, amount, category, date)?;
    book.flush().await;

    match book.get(&id) {
        Some(edited) => {
            let message = format!(
                "Updated expense {id}: {} for {} on {}",
                config.money(edited.amount()),
                edited.category(),
                edited.date()
            );
            Ok(Out::new(message, edited.clone()))
        }
        None => Ok(format!("No expense with ID '{id}', nothing changed").into()),
    }
}
