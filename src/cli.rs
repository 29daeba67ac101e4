//! Command-line arguments and dispatch.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::analysis::{self, HistoryStats};
use crate::ocr;
use crate::run::import::ImportOutcome;
use crate::run::{import_batch, HistoryStore, KeyValueStore, RunHistory};

/// Turns OCR text of end-of-run summaries into a run history.
#[derive(Parser, Debug)]
#[command(
    name = "tower-run-stats",
    version,
    about = "Run history and hourly rates from OCR'd run summaries"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build runs from OCR text files or directories of them
    Import {
        #[arg(required = true, value_name = "PATH")]
        inputs: Vec<PathBuf>,
    },
    /// Print stored runs
    List,
    /// Replace the notes of one run
    Note {
        /// Run timestamp in epoch milliseconds
        timestamp: i64,
        #[arg(value_name = "TEXT")]
        notes: Vec<String>,
    },
    /// Delete one run
    Remove {
        /// Run timestamp in epoch milliseconds
        timestamp: i64,
    },
    /// Print hourly rate statistics and save statistics.json
    Stats,
    /// Write history.csv and statistics.json
    Export,
    /// Write rates.png
    Chart,
}

/// Where commands read and write their files.
pub struct Workspace<'a> {
    pub export_dir: &'a Path,
    pub config_dir: &'a Path,
    pub text_extensions: &'a [String],
}

/// Runs one command against the history store.
///
/// A corrupt stored history fails here before anything is written back.
pub fn execute<S: KeyValueStore>(
    command: Command,
    store: &mut HistoryStore<S>,
    workspace: &Workspace,
) -> Result<()> {
    let mut history = store.load()?;

    match command {
        Command::Import { inputs } => {
            import_files(&mut history, &inputs, workspace.text_extensions)?;
            store.save(&history)?;
        }
        Command::List => print_history(&history),
        Command::Note { timestamp, notes } => {
            if !history.set_notes(timestamp, &notes.join(" ")) {
                bail!("No run with timestamp {}", timestamp);
            }
            store.save(&history)?;
            println!("Updated notes for run {}", timestamp);
        }
        Command::Remove { timestamp } => {
            if !history.remove(timestamp) {
                bail!("No run with timestamp {}", timestamp);
            }
            store.save(&history)?;
            println!("Removed run {}", timestamp);
        }
        Command::Stats => {
            let stats = HistoryStats::from_history(&history);
            print_stats(&stats);
            let json_path = workspace.export_dir.join("statistics.json");
            analysis::export::export_to_json(&stats, &json_path)?;
            println!("Statistics saved to {}", json_path.display());
        }
        Command::Export => {
            let (csv_path, json_path) = analysis::export_all(&history, workspace.export_dir)?;
            println!("Wrote {} and {}", csv_path.display(), json_path.display());
        }
        Command::Chart => {
            let chart_path =
                analysis::generate_chart(&history, workspace.export_dir, workspace.config_dir)?;
            println!("Wrote {}", chart_path.display());
        }
    }

    Ok(())
}

/// Reads every input file in order and imports the readable ones.
/// Unreadable files are reported and skipped.
fn import_files(history: &mut RunHistory, inputs: &[PathBuf], extensions: &[String]) -> Result<()> {
    let paths = ocr::collect_paths(inputs, extensions)?;

    let mut captures = Vec::with_capacity(paths.len());
    for path in &paths {
        match ocr::read_capture(path) {
            Ok(capture) => captures.push(capture),
            Err(e) => {
                crate::log(&format!("Skipping {}: {:#}", path.display(), e));
                println!("Skipped {}: {:#}", path.display(), e);
            }
        }
    }

    let summary = import_batch(history, &captures);
    for result in &summary.results {
        if result.outcome == ImportOutcome::Duplicate {
            println!(
                "Already stored: {} (run {})",
                result.path.display(),
                result.run_timestamp
            );
        }
    }
    println!(
        "Imported {} run(s), {} duplicate(s), {} skipped",
        summary.inserted(),
        summary.duplicates(),
        paths.len() - captures.len()
    );
    Ok(())
}

fn print_history(history: &RunHistory) {
    if history.is_empty() {
        println!("No runs stored.");
        return;
    }

    println!(
        "{:<15} {:>5} {:>6} {:>6} {:>10} {:>10} {:>10} {:>10}  notes",
        "timestamp", "tier", "wave", "hours", "coins", "coins/h", "cells/h", "cash/h"
    );
    for record in history.records() {
        println!(
            "{:<15} {:>5} {:>6} {:>6} {:>10} {:>10} {:>10} {:>10}  {}",
            record.run_timestamp,
            record.tier,
            record.wave_text(),
            record.duration_text(),
            record.coins.display,
            record.coins.per_hour,
            record.cells.per_hour,
            record.cash.per_hour,
            record.notes
        );
    }
}

fn print_stats(stats: &HistoryStats) {
    println!("{} run(s)", stats.total_runs);
    for rate in &stats.quantities {
        println!(
            "{:<14} n={:<4} mean {:>10}  median {:>10}  min {:>10}  max {:>10}  (unreadable: {})",
            rate.quantity.name(),
            rate.count,
            ocr::encode(rate.mean),
            ocr::encode(rate.median),
            ocr::encode(rate.min),
            ocr::encode(rate.max),
            rate.unparseable
        );
    }
}
