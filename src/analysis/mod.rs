//! Statistics, exports, and charts over the run history.
//!
//! This module provides:
//! - Per-quantity statistics of hourly rates (mean, median, std_dev, quartiles)
//! - JSON export of statistics and CSV export of the history
//! - A PNG trend chart of hourly rates across runs

pub mod charts;
pub mod config;
pub mod export;
pub mod statistics;

pub use statistics::HistoryStats;

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use crate::run::RunHistory;

/// Writes `statistics.json` and `history.csv` into `output_dir`.
///
/// Returns (csv_path, json_path).
pub fn export_all(history: &RunHistory, output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let csv_path = output_dir.join("history.csv");
    let json_path = output_dir.join("statistics.json");

    let stats = HistoryStats::from_history(history);

    export::export_to_csv(history, &csv_path)?;
    crate::log(&format!("History CSV saved: {}", csv_path.display()));

    export::export_to_json(&stats, &json_path)?;
    crate::log(&format!("Statistics JSON saved: {}", json_path.display()));

    Ok((csv_path, json_path))
}

/// Generates `rates.png` in `output_dir`, reading chart_config.json from `config_dir`.
pub fn generate_chart(history: &RunHistory, output_dir: &Path, config_dir: &Path) -> Result<PathBuf> {
    if history.is_empty() {
        return Err(anyhow!("No runs in history"));
    }

    let config_path = config_dir.join("chart_config.json");
    if !config_path.exists() {
        // Leave a reference copy the user can edit
        if let Err(e) = config::ChartConfig::save_default(&config_path) {
            crate::log(&format!("Could not write default chart config: {}", e));
        }
    }
    let chart_config = config::ChartConfig::load(&config_path);

    let stats = HistoryStats::from_history(history);
    let chart_path = output_dir.join("rates.png");
    charts::generate_rate_chart(history, &stats, &chart_path, &chart_config)?;
    crate::log(&format!("Chart saved: {}", chart_path.display()));

    Ok(chart_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::builder::build;
    use tempfile::tempdir;

    #[test]
    fn test_export_all_writes_both_files() {
        let mut history = RunHistory::new();
        history.append(build("Wave 5\nReal Time 1h 0m 0s\nCells Earned 50\n", 1));

        let dir = tempdir().unwrap();
        let (csv_path, json_path) = export_all(&history, dir.path()).unwrap();

        assert!(csv_path.exists());
        assert!(json_path.exists());
    }

    #[test]
    fn test_generate_chart_empty_history_errors() {
        let dir = tempdir().unwrap();
        assert!(generate_chart(&RunHistory::new(), dir.path(), dir.path()).is_err());
    }
}
