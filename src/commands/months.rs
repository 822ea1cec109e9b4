use crate::commands::Out;
use crate::model::MonthOption;
use crate::{Config, Result};

/// Shows the months that can be listed: the current month and every month that has expenses,
/// most recent first.
pub async fn months(config: Config) -> Result<Out<Vec<MonthOption>>> {
    let book = config.open_book().await;
    let options = book.month_options();
    let message = options
        .iter()
        .map(|o| format!("{}  {}", o.key, o.label))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(message, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{current_month_key, Category};
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_months_empty() {
        let env = TestEnv::new().await;
        let out = months(env.config()).await.unwrap();
        let options = out.structure().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].key, current_month_key());
    }

    #[tokio::test]
    async fn test_months() {
        let env = TestEnv::new().await;
        env.insert_expense("1", Category::Food, "2025-01-05").await;
        env.insert_expense("2", Category::Food, "2025-02-10").await;
        env.insert_expense("3", Category::Food, "2025-01-20").await;

        let out = months(env.config()).await.unwrap();
        let keys: Vec<&str> = out
            .structure()
            .unwrap()
            .iter()
            .map(|o| o.key.as_str())
            .collect();
        assert_eq!(&keys[1..], &["2025-02", "2025-01"]);
        assert!(out.message().ends_with("2025-02  February 2025\n2025-01  January 2025"));
    }
}
