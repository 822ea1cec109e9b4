//! The persisted store: a single key-value slot holding the whole expense collection as JSON.
//!
//! The `Slot` trait is the seam between the collection and the storage medium. `FileSlot` keeps the
//! value in a file in the data directory, `MemorySlot` keeps it in memory.

use crate::model::Expense;
use crate::{utils, Result};
use anyhow::Context;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, trace, warn};

/// The key under which the expense collection is stored.
pub const EXPENSES_KEY: &str = "@spendtrack/expenses";

/// A single storage slot whose value is replaced wholesale on every write.
#[async_trait::async_trait]
pub trait Slot: Debug + Send + Sync {
    /// Returns the stored value, or `None` if nothing has been stored yet.
    async fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored value.
    async fn write(&self, value: String) -> Result<()>;
}

/// A `Slot` backed by a file. Writes go to a sibling temp file that is then renamed over the
/// target, so a reader never sees a half-written document.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl Slot for FileSlot {
    async fn read(&self) -> Result<Option<String>> {
        if !self.path.is_file() {
            trace!("No file at {}", self.path.display());
            return Ok(None);
        }
        utils::read(&self.path).await.map(Some)
    }

    async fn write(&self, value: String) -> Result<()> {
        let temp = self.temp_path();
        utils::write(&temp, value).await?;
        utils::rename(&temp, &self.path).await
    }
}

/// A `Slot` that lives only as long as the process. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(value.into()))),
        }
    }

    /// The current value, for inspection in tests.
    pub fn value(&self) -> Option<String> {
        self.value.lock().ok().and_then(|v| v.clone())
    }
}

#[async_trait::async_trait]
impl Slot for MemorySlot {
    async fn read(&self) -> Result<Option<String>> {
        Ok(self.value())
    }

    async fn write(&self, value: String) -> Result<()> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("The in-memory slot lock is poisoned"))?;
        *guard = Some(value);
        Ok(())
    }
}

/// Reads and writes the expense collection in its slot.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    slot: Arc<dyn Slot>,
}

impl ExpenseStore {
    pub fn new(slot: impl Slot + 'static) -> Self {
        Self {
            slot: Arc::new(slot),
        }
    }

    /// A store that keeps nothing beyond the current process.
    pub fn in_memory() -> Self {
        Self::new(MemorySlot::new())
    }

    /// Loads the stored collection. A missing, unreadable or malformed value is not an error: it
    /// yields an empty collection.
    pub async fn load(&self) -> Vec<Expense> {
        let raw = match self.slot.read().await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Nothing stored under {EXPENSES_KEY}, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!("Unable to read {EXPENSES_KEY}, starting empty: {e:#}");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Expense>>(&raw) {
            Ok(expenses) => {
                debug!("Loaded {} expenses", expenses.len());
                expenses
            }
            Err(e) => {
                warn!("Ignoring malformed data under {EXPENSES_KEY}: {e}");
                Vec::new()
            }
        }
    }

    /// Replaces the stored collection with `expenses`.
    pub async fn save(&self, expenses: &[Expense]) -> Result<()> {
        let json = serde_json::to_string(expenses).context("Unable to serialize expenses")?;
        self.slot
            .write(json)
            .await
            .with_context(|| format!("Unable to save {EXPENSES_KEY}"))?;
        trace!("Saved {} expenses", expenses.len());
        Ok(())
    }
}
