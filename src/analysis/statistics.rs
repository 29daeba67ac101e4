//! Statistics over hourly rates across the run history.
//!
//! Calculates mean, median, min, max, standard deviation, and quartiles of
//! each tracked quantity's per-hour rate.

use crate::run::{Quantity, RunHistory};
use serde::Serialize;

/// Statistics for one quantity's per-hour rate.
#[derive(Debug, Clone, Serialize)]
pub struct RateStats {
    /// Which quantity these numbers describe
    pub quantity: Quantity,
    /// Number of runs with a usable rate
    pub count: usize,
    /// Runs skipped because the amount or duration was unreadable
    pub unparseable: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Median (middle value)
    pub median: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Standard deviation (population)
    pub std_dev: f64,
    /// First quartile (25th percentile)
    pub quartile_1: f64,
    /// Third quartile (75th percentile)
    pub quartile_3: f64,
    /// Run with the highest rate
    pub best_run: Option<i64>,
}

/// Statistics for the whole history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryStats {
    /// Total number of runs
    pub total_runs: usize,
    /// One entry per tracked quantity
    pub quantities: Vec<RateStats>,
}

impl HistoryStats {
    pub fn from_history(history: &RunHistory) -> Self {
        let quantities = Quantity::ALL
            .iter()
            .map(|&quantity| {
                let samples = hourly_rates(history, quantity);
                let unparseable = history.len() - samples.len();
                calculate_rate_stats(quantity, &samples, unparseable)
            })
            .collect();

        HistoryStats {
            total_runs: history.len(),
            quantities,
        }
    }

    pub fn get(&self, quantity: Quantity) -> Option<&RateStats> {
        self.quantities.iter().find(|s| s.quantity == quantity)
    }
}

/// (run timestamp, per-hour rate) for every run with a usable rate, in history order.
pub fn hourly_rates(history: &RunHistory, quantity: Quantity) -> Vec<(i64, f64)> {
    history
        .records()
        .iter()
        .filter_map(|record| {
            record
                .quantity(quantity)
                .hourly_rate(record.duration_hours)
                .value()
                .map(|rate| (record.run_timestamp, rate))
        })
        .collect()
}

fn calculate_rate_stats(quantity: Quantity, samples: &[(i64, f64)], unparseable: usize) -> RateStats {
    if samples.is_empty() {
        return RateStats {
            quantity,
            count: 0,
            unparseable,
            mean: 0.0,
            median: 0.0,
            min: 0.0,
            max: 0.0,
            std_dev: 0.0,
            quartile_1: 0.0,
            quartile_3: 0.0,
            best_run: None,
        };
    }

    let count = samples.len();

    let mut sorted: Vec<f64> = samples.iter().map(|&(_, v)| v).collect();
    sorted.sort_by(f64::total_cmp);

    let min = sorted[0];
    let max = sorted[count - 1];
    let mean = sorted.iter().sum::<f64>() / count as f64;

    let variance = sorted
        .iter()
        .map(|&v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    // Earliest run wins ties
    let best_run = samples
        .iter()
        .fold(None, |best: Option<(i64, f64)>, &(ts, v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((ts, v)),
        })
        .map(|(ts, _)| ts);

    RateStats {
        quantity,
        count,
        unparseable,
        mean,
        median: calculate_median(&sorted),
        min,
        max,
        std_dev: variance.sqrt(),
        quartile_1: calculate_percentile(&sorted, 25.0),
        quartile_3: calculate_percentile(&sorted, 75.0),
        best_run,
    }
}

/// Calculate median from sorted values.
fn calculate_median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 0 {
        let mid = n / 2;
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Calculate percentile using linear interpolation.
fn calculate_percentile(sorted: &[f64], percentile: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0];
    }

    let index = (percentile / 100.0) * (n - 1) as f64;
    let lower_idx = index.floor() as usize;
    let upper_idx = index.ceil() as usize;

    if lower_idx == upper_idx {
        sorted[lower_idx]
    } else {
        let frac = index.fract();
        sorted[lower_idx] + (sorted[upper_idx] - sorted[lower_idx]) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::builder::build;

    fn history_with_coins(runs: &[(i64, &str, &str)]) -> RunHistory {
        let mut history = RunHistory::new();
        for &(ts, time, coins) in runs {
            history.append(build(
                &format!("Wave 10\nReal Time {}\nCoins Earned {}\n", time, coins),
                ts,
            ));
        }
        history
    }

    #[test]
    fn test_hourly_rates_skip_unparseable() {
        let history = history_with_coins(&[
            (1, "1h 0m 0s", "1K"),
            (2, "2h 0m 0s", "???"),
            (3, "0h 0m 0s", "5K"),
            (4, "2h 0m 0s", "4K"),
        ]);

        let rates = hourly_rates(&history, Quantity::Coins);
        assert_eq!(rates, vec![(1, 1000.0), (4, 2000.0)]);
    }

    #[test]
    fn test_history_stats() {
        let history = history_with_coins(&[
            (1, "1h 0m 0s", "1K"),
            (2, "1h 0m 0s", "2K"),
            (3, "1h 0m 0s", "3K"),
            (4, "1h 0m 0s", "4K"),
            (5, "1h 0m 0s", "5K"),
            (6, "1h 0m 0s", "oops"),
        ]);

        let stats = HistoryStats::from_history(&history);
        let coins = stats.get(Quantity::Coins).unwrap();

        assert_eq!(stats.total_runs, 6);
        assert_eq!(coins.count, 5);
        assert_eq!(coins.unparseable, 1);
        assert!((coins.mean - 3000.0).abs() < 0.001);
        assert!((coins.median - 3000.0).abs() < 0.001);
        assert!((coins.min - 1000.0).abs() < 0.001);
        assert!((coins.max - 5000.0).abs() < 0.001);
        assert!((coins.std_dev - 1414.2).abs() < 0.1);
        assert!((coins.quartile_1 - 2000.0).abs() < 0.001);
        assert!((coins.quartile_3 - 4000.0).abs() < 0.001);
        assert_eq!(coins.best_run, Some(5));
    }

    #[test]
    fn test_empty_quantity() {
        let history = history_with_coins(&[(1, "1h 0m 0s", "1K")]);
        let stats = HistoryStats::from_history(&history);
        let cash = stats.get(Quantity::Cash).unwrap();

        assert_eq!(cash.count, 0);
        assert_eq!(cash.unparseable, 1);
        assert_eq!(cash.best_run, None);
    }

    #[test]
    fn test_best_run_tie_keeps_earliest() {
        let samples = vec![(7, 10.0), (8, 10.0), (9, 5.0)];
        let stats = calculate_rate_stats(Quantity::Cells, &samples, 0);
        assert_eq!(stats.best_run, Some(7));
    }

    #[test]
    fn test_median_even() {
        assert!((calculate_median(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 0.001);
    }

    #[test]
    fn test_percentile_interpolates() {
        // index = 0.25 * 3 = 0.75 -> 1 + (2 - 1) * 0.75
        assert!((calculate_percentile(&[1.0, 2.0, 3.0, 4.0], 25.0) - 1.75).abs() < 0.001);
    }
}
