//! Configuration file handling for SpendTrack.
//!
//! The configuration file is stored at `$SPENDTRACK_HOME/config.json` and holds the display
//! currency and the location of the expenses file.

use crate::book::ExpenseBook;
use crate::store::{ExpenseStore, FileSlot};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "spendtrack";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const EXPENSES_JSON: &str = "expenses.json";
pub(crate) const DEFAULT_CURRENCY: &str = "Rs.";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SPENDTRACK_HOME` and from there it loads `$SPENDTRACK_HOME/config.json`. It
/// provides the paths of the files kept in the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and an initial `config.json` with default settings, and
    /// `currency` as the display currency.
    ///
    /// # Errors
    /// - Returns an error if a `config.json` already exists in `dir`.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, currency: &str) -> Result<Self> {
        // Create the directory if it does not exist
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the spendtrack home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile {
            currency: currency.trim().to_string(),
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;
        debug!("Created {}", config_path.display());

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `spendtrack_home` exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    pub async fn load(spendtrack_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = spendtrack_home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "The spendtrack home directory is missing '{}'. Run `spendtrack init` first.",
                maybe_relative.display()
            )
        }
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}'. Run `spendtrack init` first.",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The symbol shown in front of amounts, e.g. `Rs.`.
    pub fn currency(&self) -> &str {
        &self.config_file.currency
    }

    /// Returns the stored `expenses_path` if it is absolute, otherwise resolves it against the
    /// home directory.
    pub fn expenses_path(&self) -> PathBuf {
        let p = self.config_file.expenses_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// The store that keeps expenses in `expenses_path`.
    pub fn store(&self) -> ExpenseStore {
        ExpenseStore::new(FileSlot::new(self.expenses_path()))
    }

    /// Loads the stored expenses into a new `ExpenseBook`.
    pub async fn open_book(&self) -> ExpenseBook {
        ExpenseBook::open(self.store()).await
    }

    /// Formats `amount` with the configured currency symbol.
    pub fn money(&self, amount: crate::model::Amount) -> String {
        format!("{} {amount}", self.currency())
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "spendtrack",
///   "config_version": 1,
///   "currency": "Rs.",
///   "expenses_path": "expenses.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "spendtrack"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The symbol shown in front of amounts
    #[serde(default = "default_currency")]
    currency: String,

    /// Path to the expenses file (optional, relative to the home directory or absolute)
    /// Defaults to $SPENDTRACK_HOME/expenses.json if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    expenses_path: Option<PathBuf>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency: default_currency(),
            expenses_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or is not a spendtrack config
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;
        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config version {} is unsupported. Is a newer version of spendtrack available?",
            config.config_version
        );

        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    fn expenses_path(&self) -> PathBuf {
        self.expenses_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(EXPENSES_JSON))
    }
}
