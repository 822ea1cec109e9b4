//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::{plural, Out};
use crate::model::ExpenseId;
use crate::{Config, Result};
use tracing::info;

/// Deletes one or more expenses by ID. IDs that do not exist are skipped.
///
/// Returns the IDs that were deleted.
pub async fn delete(config: Config, args: DeleteArgs) -> Result<Out<Vec<String>>> {
    let mut book = config.open_book().await;
    let mut deleted = Vec::new();
    for id in args.ids() {
        let id = ExpenseId::from(id.as_str());
        if book.delete(&id) {
            deleted.push(id.to_string());
        } else {
            info!("No expense with ID '{id}', skipping");
        }
    }
    book.flush().await;

    let count = deleted.len();
    let message = format!("Deleted {count} expense{}", plural(count, "s"));
    Ok(Out::new(message, deleted))
}
