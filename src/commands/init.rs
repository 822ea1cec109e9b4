use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and an initial `config.json` file with default settings.
///
/// # Arguments
/// - `spendtrack_home` - The directory that will be the root of data directory, e.g.
///   `$HOME/spendtrack`
/// - `currency` - The symbol shown in front of amounts, e.g. `Rs.`
///
/// # Errors
/// - Returns an error if the directory has already been initialized.
/// - Returns an error if any file operations fail.
pub async fn init(spendtrack_home: &Path, currency: &str) -> Result<Out<()>> {
    let config = Config::create(spendtrack_home, currency)
        .await
        .context("Unable to create the data directory and configs")?;
    Ok(format!(
        "Successfully created the spendtrack directory at '{}'",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("spendtrack");
        let out = init(&home, "EUR").await.unwrap();
        assert!(out.message().starts_with("Successfully created"));

        let config = Config::load(&home).await.unwrap();
        assert_eq!(config.currency(), "EUR");
        assert!(!config.expenses_path().exists());
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), "Rs.").await.unwrap();
        assert!(init(dir.path(), "Rs.").await.is_err());
    }
}
