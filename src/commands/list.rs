//! The `list` command shows the expenses of one month.

use crate::args::ListArgs;
use crate::commands::{plural, render, OutputFormat, Out};
use crate::model::{Amount, Category, Expense, MonthKey};
use crate::report;
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The expenses of a month along with what they add up to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthListing {
    pub month: MonthKey,
    pub label: String,
    pub total: Amount,
    pub count: usize,
    pub categories: Vec<CategoryTotal>,
    /// Newest first.
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Amount,
}

const HEADERS: [&str; 4] = ["Date", "Category", "Amount", "ID"];
const CSV_HEADERS: [&str; 4] = ["date", "category", "amount", "id"];

/// Lists the expenses dated in the given month, or the current month if none is given. With
/// `--previous` or `--next` the month before or after that one is listed instead.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<MonthListing>> {
    let mut book = config.open_book().await;
    if let Some(month) = args.month() {
        book.select_month(month.clone());
    }
    if args.is_previous() {
        book.select_previous_month();
    } else if args.is_next() && !book.select_next_month() {
        info!("{} is the latest month", book.selected_month().label());
    }

    let filtered = book.filtered();
    let categories = report::category_totals(filtered.iter().copied())
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    let expenses: Vec<Expense> = filtered.into_iter().cloned().collect();
    let month = book.selected_month().clone();
    let listing = MonthListing {
        label: month.label(),
        month,
        total: book.total(),
        count: expenses.len(),
        categories,
        expenses,
    };

    let message = match args.format() {
        OutputFormat::Table => table(&config, &listing),
        OutputFormat::Json => render::json(&listing)?,
        OutputFormat::Csv => {
            let rows: Vec<Vec<String>> = listing
                .expenses
                .iter()
                .map(|e| {
                    vec![
                        e.date().to_string(),
                        e.category().to_string(),
                        e.amount().value().to_string(),
                        e.id().to_string(),
                    ]
                })
                .collect();
            render::csv(&CSV_HEADERS, &rows)?
        }
    };
    Ok(Out::new(message, listing))
}

fn table(config: &Config, listing: &MonthListing) -> String {
    if listing.expenses.is_empty() {
        return format!("No expenses in {}", listing.label);
    }

    let rows: Vec<Vec<String>> = listing
        .expenses
        .iter()
        .map(|e| {
            vec![
                e.date().to_string(),
                e.category().to_string(),
                config.money(e.amount()),
                e.id().to_string(),
            ]
        })
        .collect();

    let mut out = render::table(&HEADERS, &rows);
    out.push_str(&format!(
        "\n\nTotal for {}: {} ({} expense{})",
        listing.label,
        config.money(listing.total),
        listing.count,
        plural(listing.count, "s")
    ));
    for c in &listing.categories {
        out.push_str(&format!("\n- {}: {}", c.category, config.money(c.total)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::current_month_key;
    use crate::test::TestEnv;
    use std::str::FromStr;

    async fn seeded() -> TestEnv {
        let env = TestEnv::new().await;
        env.insert_expense("100", Category::Food, "2025-01-05").await;
        env.insert_expense("200", Category::Bills, "2025-02-10").await;
        env.insert_expense("50.25", Category::Food, "2025-02-11").await;
        env
    }

    fn month(s: &str) -> Option<MonthKey> {
        Some(MonthKey::from_str(s).unwrap())
    }

    #[tokio::test]
    async fn test_list_month() {
        let env = seeded().await;
        let out = list(env.config(), ListArgs::new(month("2025-02"), OutputFormat::Table))
            .await
            .unwrap();

        let listing = out.structure().unwrap();
        assert_eq!(listing.label, "February 2025");
        assert_eq!(listing.count, 2);
        assert_eq!(listing.total, Amount::from_str("250.25").unwrap());
        assert_eq!(listing.expenses[0].date(), "2025-02-11");
        assert_eq!(
            listing.categories,
            vec![
                CategoryTotal {
                    category: Category::Food,
                    total: Amount::from_str("50.25").unwrap()
                },
                CategoryTotal {
                    category: Category::Bills,
                    total: Amount::from_str("200").unwrap()
                },
            ]
        );

        let message = out.message();
        assert!(message.starts_with("| Date"));
        assert!(message.contains("Total for February 2025: Rs. 250.25 (2 expenses)"));
        assert!(message.ends_with("- Bills: Rs. 200.00"));
    }

    #[tokio::test]
    async fn test_list_empty_month() {
        let env = seeded().await;
        let out = list(env.config(), ListArgs::new(month("2024-07"), OutputFormat::Table))
            .await
            .unwrap();
        assert_eq!(out.message(), "No expenses in July 2024");
        let listing = out.structure().unwrap();
        assert_eq!(listing.total, Amount::ZERO);
        assert!(listing.categories.is_empty());
    }

    #[tokio::test]
    async fn test_list_defaults_to_current_month() {
        let env = seeded().await;
        let out = list(env.config(), ListArgs::new(None, OutputFormat::Json))
            .await
            .unwrap();
        let listing = out.structure().unwrap();
        assert_eq!(listing.month, current_month_key());

        let parsed: MonthListing = serde_json::from_str(out.message()).unwrap();
        assert_eq!(&parsed, listing);
    }

    #[tokio::test]
    async fn test_list_previous_month() {
        let env = seeded().await;
        let args = ListArgs::new(month("2025-02"), OutputFormat::Table).with_previous();
        let out = list(env.config(), args).await.unwrap();
        let listing = out.structure().unwrap();
        assert_eq!(listing.month.as_str(), "2025-01");
        assert_eq!(listing.total, Amount::from_str("100").unwrap());
    }

    #[tokio::test]
    async fn test_list_next_month() {
        let env = seeded().await;
        let args = ListArgs::new(month("2025-01"), OutputFormat::Table).with_next();
        let out = list(env.config(), args).await.unwrap();
        let listing = out.structure().unwrap();
        assert_eq!(listing.month.as_str(), "2025-02");
        assert_eq!(listing.count, 2);
    }

    #[tokio::test]
    async fn test_list_next_stays_on_current_month() {
        let env = seeded().await;
        let args = ListArgs::new(None, OutputFormat::Json).with_next();
        let out = list(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap().month, current_month_key());
    }

    #[tokio::test]
    async fn test_list_csv() {
        let env = seeded().await;
        let out = list(env.config(), ListArgs::new(month("2025-01"), OutputFormat::Csv))
            .await
            .unwrap();
        let id = &out.structure().unwrap().expenses[0].id().to_string();
        assert_eq!(
            out.message(),
            format!("date,category,amount,id\n2025-01-05,Food,100,{id}")
        );
    }
}
