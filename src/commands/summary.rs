use crate::args::SummaryArgs;
use crate::commands::{render, OutputFormat, Out};
use crate::report::MonthSummary;
use crate::{Config, Result};

/// Shows the total spent in each month that has expenses, most recent month first.
pub async fn summary(config: Config, args: SummaryArgs) -> Result<Out<Vec<MonthSummary>>> {
    let book = config.open_book().await;
    let months = book.monthly_summary();

    let message = match args.format() {
        OutputFormat::Table if months.is_empty() => "No expenses yet".to_string(),
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = months
                .iter()
                .map(|m| {
                    vec![
                        m.label.clone(),
                        m.count.to_string(),
                        config.money(m.total),
                    ]
                })
                .collect();
            render::table(&["Month", "Expenses", "Total"], &rows)
        }
        OutputFormat::Json => render::json(&months)?,
        OutputFormat::Csv => {
            let rows: Vec<Vec<String>> = months
                .iter()
                .map(|m| {
                    vec![
                        m.key.to_string(),
                        m.label.clone(),
                        m.count.to_string(),
                        m.total.value().to_string(),
                    ]
                })
                .collect();
            render::csv(&["month", "label", "count", "total"], &rows)?
        }
    };
    Ok(Out::new(message, months))
}
