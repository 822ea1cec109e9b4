//! Renders rows of cells as a markdown table, CSV or JSON.

use crate::Result;
use anyhow::{anyhow, Context};
use serde::Serialize;

/// A markdown table with every column padded to its widest cell.
pub(super) fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(&widths, headers.iter().copied()));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(format!("|-{}-|", rule.join("-|-")));
    for row in rows {
        lines.push(line(&widths, row.iter().map(String::as_str)));
    }
    lines.join("\n")
}

fn line<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let padded: Vec<String> = widths
        .iter()
        .zip(cells)
        .map(|(&width, cell)| format!("{cell:<width$}"))
        .collect();
    format!("| {} |", padded.join(" | "))
}

/// CSV text with a header row.
pub(super) fn csv(headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers)
        .context("Unable to write the CSV header")?;
    for row in rows {
        writer
            .write_record(row)
            .context("Unable to write a CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Unable to finish the CSV output: {}", e.error()))?;
    let text = String::from_utf8(bytes).context("The CSV output is not valid UTF-8")?;
    Ok(text.trim_end().to_string())
}

pub(super) fn json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Unable to serialize the output as JSON")
}
