//! These structs provide the CLI interface for the spendtrack CLI.

use crate::commands::OutputFormat;
use crate::model::{Category, MonthKey};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// spendtrack: A command-line tool for logging personal expenses.
///
/// Log what you spend with an amount, a category and the date you spent it. Expenses are kept in
/// a single JSON file in your data directory, and can be listed month by month with a running
/// total, edited, deleted, and summarized per month.
///
/// Run `spendtrack init` once to create the data directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. By default the data directory is
    /// $HOME/spendtrack. If you want it somewhere else, pass --spendtrack-home or set
    /// SPENDTRACK_HOME.
    Init(InitArgs),
    /// Log a new expense.
    Add(AddArgs),
    /// Change the amount, category or date of an expense.
    Edit(EditArgs),
    /// Delete one or more expenses by ID.
    Delete(DeleteArgs),
    /// List the expenses of a month along with the month's total.
    List(ListArgs),
    /// Show the months that have expenses.
    Months,
    /// Show the total spent in each month.
    Summary(SummaryArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where spendtrack data and configuration is held. Defaults to ~/spendtrack
    #[arg(long, env = "SPENDTRACK_HOME", default_value_t = default_spendtrack_home())]
    spendtrack_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, spendtrack_home: PathBuf) -> Self {
        Self {
            log_level,
            spendtrack_home: spendtrack_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn spendtrack_home(&self) -> &DisplayPath {
        &self.spendtrack_home
    }
}

/// (Not shown): Args for the `spendtrack init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The symbol shown in front of amounts.
    #[arg(long, default_value = crate::config::DEFAULT_CURRENCY)]
    currency: String,
}

impl InitArgs {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

/// (Not shown): Args for the `spendtrack add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// How much was spent, e.g. 500 or 1,250.50. Must be greater than zero.
    #[arg(allow_hyphen_values = true)]
    amount: String,

    /// One of Food, Transport, Bills, Entertainment or Other. Use "Other: <label>" for a custom
    /// label.
    #[arg(long, short, default_value_t = Category::Food)]
    category: Category,

    /// The date of the expense as YYYY-MM-DD. Defaults to today. Cannot be in the future.
    #[arg(long, short)]
    date: Option<String>,
}

impl AddArgs {
    pub fn new(amount: impl Into<String>, category: Category, date: Option<String>) -> Self {
        Self {
            amount: amount.into(),
            category,
            date,
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// (Not shown): Args for the `spendtrack edit` command. Fields that are not given keep their
/// current values.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// The ID of the expense to edit.
    id: String,

    /// The new amount. Must be greater than zero.
    #[arg(long, short, allow_hyphen_values = true)]
    amount: Option<String>,

    /// The new category.
    #[arg(long, short)]
    category: Option<Category>,

    /// The new date as YYYY-MM-DD. Cannot be in the future.
    #[arg(long, short)]
    date: Option<String>,
}

impl EditArgs {
    pub fn new(
        id: impl Into<String>,
        amount: Option<String>,
        category: Option<Category>,
        date: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            category,
            date,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Option<&str> {
        self.amount.as_deref()
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// (Not shown): Args for the `spendtrack delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The IDs of the expenses to delete. IDs that do not exist are skipped.
    #[arg(required = true, num_args = 1..)]
    ids: Vec<String>,
}

impl DeleteArgs {
    pub fn new<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// (Not shown): Args for the `spendtrack list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// The month to list as YYYY-MM. Defaults to the current month.
    #[arg(long, short)]
    month: Option<MonthKey>,

    /// List the month before --month (or before the current month).
    #[arg(long, short, conflicts_with = "next")]
    previous: bool,

    /// List the month after --month. Months after the current month cannot be listed.
    #[arg(long, short)]
    next: bool,

    /// How to print the expenses.
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ListArgs {
    pub fn new(month: Option<MonthKey>, format: OutputFormat) -> Self {
        Self {
            month,
            previous: false,
            next: false,
            format,
        }
    }

    /// Steps one month back from the given month.
    pub fn with_previous(mut self) -> Self {
        self.previous = true;
        self.next = false;
        self
    }

    /// Steps one month forward from the given month.
    pub fn with_next(mut self) -> Self {
        self.next = true;
        self.previous = false;
        self
    }

    pub fn month(&self) -> Option<&MonthKey> {
        self.month.as_ref()
    }

    pub fn is_previous(&self) -> bool {
        self.previous
    }

    pub fn is_next(&self) -> bool {
        self.next
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// (Not shown): Args for the `spendtrack summary` command.
#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// How to print the summary.
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl SummaryArgs {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

fn default_spendtrack_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("spendtrack"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --spendtrack-home or SPENDTRACK_HOME instead of relying on the \
                default directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("spendtrack")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
