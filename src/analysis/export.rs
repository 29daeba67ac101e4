//! JSON export of statistics and CSV export of the run history.

use super::statistics::HistoryStats;
use crate::run::{Quantity, RunHistory, RunRecord};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export statistics to a JSON file.
///
/// The output is pretty-printed for human readability.
pub fn export_to_json(stats: &HistoryStats, output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(stats).context("Failed to serialize statistics to JSON")?;

    let mut file = File::create(output_path)
        .context(format!("Failed to create JSON file: {}", output_path.display()))?;

    file.write_all(json.as_bytes())
        .context("Failed to write JSON data")?;

    Ok(())
}

/// CSV header row.
const CSV_HEADER: &str = "timestamp,date,tier,wave,hours,killed_by,\
coins,coins_per_hour,coins_per_wave,\
cash,cash_per_hour,cash_per_wave,\
cells,cells_per_hour,cells_per_wave,\
reroll_shards,reroll_shards_per_hour,reroll_shards_per_wave,\
damage_taken,damage_dealt,notes";

/// Writes the whole history as CSV, one row per run in history order.
pub fn export_to_csv(history: &RunHistory, output_path: &Path) -> Result<()> {
    let mut file = File::create(output_path)
        .context(format!("Failed to create CSV file: {}", output_path.display()))?;

    writeln!(file, "{}", CSV_HEADER).context("Failed to write CSV header")?;
    for record in history.records() {
        writeln!(file, "{}", csv_row(record)).context("Failed to write CSV row")?;
    }

    Ok(())
}

fn csv_row(record: &RunRecord) -> String {
    let date = chrono::DateTime::from_timestamp_millis(record.run_timestamp)
        .map(|dt| dt.with_timezone(&chrono::Local).format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default();

    let mut fields = vec![
        record.run_timestamp.to_string(),
        date,
        record.tier.clone(),
        record.wave_text(),
        record.duration_text(),
        record.killed_by.clone(),
    ];
    for quantity in Quantity::ALL {
        let stats = record.quantity(quantity);
        fields.push(stats.display.clone());
        fields.push(stats.per_hour.clone());
        fields.push(stats.per_wave.clone());
    }
    fields.push(record.damage_taken.display.clone());
    fields.push(record.damage_dealt.display.clone());
    fields.push(record.notes.clone());

    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quotes a field when it contains a separator, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
