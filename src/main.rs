//! Tower Run Stats
//!
//! Turns OCR text of end-of-run summary screenshots into typed run records,
//! keeps a deduplicated run history, and derives per-hour/per-wave rates.

mod analysis;
mod cli;
mod config;
mod ocr;
mod paths;
mod run;

use anyhow::Result;
use clap::Parser;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

use run::{FileStore, HistoryStore};

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("tower_run_stats.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        log(&format!("[PANIC]{} {}", location, msg));
    }));

    let args = cli::Cli::parse();

    // Ensure output directories exist
    paths::ensure_directories()?;

    config::init_config();
    let config = config::get_config();

    let data_dir = paths::get_data_dir();
    let store_path = config.store_path(data_dir);
    log(&format!("Using store: {}", store_path.display()));

    let mut store = HistoryStore::new(FileStore::new(store_path), config.history_key.clone());
    let export_dir = paths::get_exports_dir();
    let workspace = cli::Workspace {
        export_dir: &export_dir,
        config_dir: data_dir,
        text_extensions: &config.text_extensions,
    };

    if let Err(e) = cli::execute(args.command, &mut store, &workspace) {
        if e.downcast_ref::<run::CorruptHistoryError>().is_some() {
            log(&format!(
                "Stored history in {} could not be read and was left untouched: {}",
                store.inner().path().display(),
                e
            ));
        }
        return Err(e);
    }

    Ok(())
}
