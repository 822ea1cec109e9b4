//! The in-memory expense collection and the selection state that the user interface works with.

use crate::error::ExpenseError;
use crate::model::{
    month_options, today, validate_amount, validate_date, Amount, Category, Expense, ExpenseId,
    MonthKey, MonthOption,
};
use crate::report::{self, MonthSummary};
use crate::store::ExpenseStore;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// The expense collection for a session, newest first.
///
/// An `ExpenseBook` only exists once the stored collection has been loaded, so nothing can mutate
/// it before then. Every mutation snapshots the collection and writes it to the store in the
/// background. Writes are applied in the order the mutations were made, their failures are logged
/// and otherwise ignored, and `flush` waits for the ones still in flight.
///
/// Mutations spawn tokio tasks and must be made from within a tokio runtime.
#[derive(Debug)]
pub struct ExpenseBook {
    store: ExpenseStore,
    expenses: Vec<Expense>,
    selected_month: MonthKey,
    selected_date: String,
    pending: Option<JoinHandle<()>>,
}

impl ExpenseBook {
    /// Loads the collection from `store`. Missing or malformed data gives an empty book.
    pub async fn open(store: ExpenseStore) -> Self {
        let expenses = store.load().await;
        debug!("Opened expense book with {} expenses", expenses.len());
        Self {
            store,
            expenses,
            selected_month: MonthKey::current(),
            selected_date: today(),
            pending: None,
        }
    }

    /// All expenses, newest first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    /// Logs a new expense at the front of the collection and returns it.
    ///
    /// # Errors
    /// Rejects an amount that is not greater than zero, and a date that is malformed or in the
    /// future. Nothing changes when an error is returned.
    pub fn add(
        &mut self,
        amount: Amount,
        category: Category,
        date: &str,
    ) -> Result<&Expense, ExpenseError> {
        let amount = validate_amount(amount)?;
        validate_date(date)?;
        let expense = Expense::new(ExpenseId::generate(), amount, category, date.trim());
        debug!("Adding expense {}", expense.id());
        self.expenses.insert(0, expense);
        self.persist();
        Ok(&self.expenses[0])
    }

    /// Removes the expense with `id`. Returns `false`, and leaves the collection as it was, if there
    /// is no such expense.
    pub fn delete(&mut self, id: &ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id() != id);
        let removed = self.expenses.len() != before;
        if removed {
            debug!("Deleted expense {id}");
        } else {
            trace!("No expense {id} to delete");
        }
        self.persist();
        removed
    }

    /// Replaces the amount, category and date of the expense with `id`, keeping its id and its
    /// position. Returns `false` if there is no such expense, which is not an error whatever the
    /// other arguments are.
    ///
    /// # Errors
    /// Same validation as `add`. Nothing changes when an error is returned.
    pub fn edit(
        &mut self,
        id: &ExpenseId,
        amount: Amount,
        category: Category,
        date: &str,
    ) -> Result<bool, ExpenseError> {
        let Some(expense) = self.expenses.iter_mut().find(|e| e.id() == id) else {
            trace!("No expense {id} to edit");
            return Ok(false);
        };
        let amount = validate_amount(amount)?;
        validate_date(date)?;
        expense.set(amount, category, date.trim().to_string());
        debug!("Edited expense {id}");
        self.persist();
        Ok(true)
    }

    pub fn select_month(&mut self, month: MonthKey) {
        trace!("Selected month {month}");
        self.selected_month = month;
    }

    pub fn selected_month(&self) -> &MonthKey {
        &self.selected_month
    }

    /// Moves the selection one month back. Returns `false` if the selected month is malformed.
    pub fn select_previous_month(&mut self) -> bool {
        match self.selected_month.previous() {
            Some(month) => {
                self.select_month(month);
                true
            }
            None => false,
        }
    }

    /// Whether a month after the selected one may be selected. Months after the current month
    /// never have expenses, so the current month is as far forward as the selection goes.
    pub fn can_select_next_month(&self) -> bool {
        self.selected_month < MonthKey::current()
    }

    /// Moves the selection one month forward. Returns `false`, and leaves the selection as it
    /// was, when the selected month is already the current month.
    pub fn select_next_month(&mut self) -> bool {
        if !self.can_select_next_month() {
            trace!("Already at the current month");
            return false;
        }
        match self.selected_month.next() {
            Some(month) => {
                self.select_month(month);
                true
            }
            None => false,
        }
    }

    /// Selects the date that new expenses are logged on.
    pub fn select_date(&mut self, date: &str) -> Result<(), ExpenseError> {
        validate_date(date)?;
        trace!("Selected date {date}");
        self.selected_date = date.trim().to_string();
        Ok(())
    }

    pub fn selected_date(&self) -> &str {
        &self.selected_date
    }

    /// The expenses in the selected month, newest first.
    pub fn filtered(&self) -> Vec<&Expense> {
        report::filter_by_month(&self.expenses, &self.selected_month)
    }

    /// The total spent in the selected month.
    pub fn total(&self) -> Amount {
        report::total(self.filtered())
    }

    /// The months that can be selected. Always includes the current and the selected month.
    pub fn month_options(&self) -> Vec<MonthOption> {
        month_options(&self.expenses, Some(&self.selected_month))
    }

    pub fn monthly_summary(&self) -> Vec<MonthSummary> {
        report::monthly_summary(&self.expenses)
    }

    /// Waits for every background write started so far.
    pub async fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            if let Err(e) = pending.await {
                warn!("A background save did not finish: {e}");
            }
        }
    }

    fn persist(&mut self) {
        let snapshot = self.expenses.clone();
        let store = self.store.clone();
        let previous = self.pending.take();
        self.pending = Some(tokio::spawn(async move {
            if let Some(previous) = previous {
                if let Err(e) = previous.await {
                    warn!("A background save did not finish: {e}");
                }
            }
            if let Err(e) = store.save(&snapshot).await {
                warn!("Unable to save expenses: {e:#}");
            }
        }));
    }
}
