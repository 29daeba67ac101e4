//! Chart generation using plotters.
//!
//! Draws one panel per tracked quantity with its per-hour rate across runs
//! (in history order) and a horizontal line at the mean.
//! Styling is configurable via chart_config.json.

use super::config::ChartConfig;
use super::statistics::{hourly_rates, HistoryStats};
use crate::ocr::codec;
use crate::run::{Quantity, RunHistory};
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

fn rgb(color: [u8; 3]) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

/// Y-axis range with 10% headroom on both sides, never below zero.
fn y_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let range = max - min;
    // Flat series still needs some height
    let pad = if range > 0.0 { range * 0.1 } else { max.abs().max(1.0) * 0.1 };
    ((min - pad).max(0.0), max + pad)
}

/// Generate the rate trend chart for all quantities into one PNG.
pub fn generate_rate_chart(
    history: &RunHistory,
    stats: &HistoryStats,
    output_path: &Path,
    config: &ChartConfig,
) -> Result<()> {
    let panels = Quantity::ALL.len() as u32;
    let height = config.layout.title_height + config.layout.panel_height * panels;

    let root = BitMapBackend::new(output_path, (config.layout.chart_width, height))
        .into_drawing_area();
    root.fill(&WHITE)
        .context("Failed to fill chart background")?;

    let (title_area, body) = root.split_vertically(config.layout.title_height);
    let title = format!("Hourly Rates ({} runs)", stats.total_runs);
    let title_font = ("sans-serif", config.font.title_size)
        .into_font()
        .style(FontStyle::Bold);
    title_area.draw_text(&title, &title_font.color(&BLACK), (20, 10))?;

    let areas = body.split_evenly((panels as usize, 1));
    for (area, quantity) in areas.iter().zip(Quantity::ALL) {
        let rates: Vec<f64> = hourly_rates(history, quantity)
            .into_iter()
            .map(|(_, rate)| rate)
            .collect();
        let mean = stats.get(quantity).map(|s| s.mean);
        draw_rate_panel(area, quantity, &rates, mean, config)?;
    }

    root.present().context("Failed to save chart")?;
    Ok(())
}

fn draw_rate_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    quantity: Quantity,
    rates: &[f64],
    mean: Option<f64>,
    config: &ChartConfig,
) -> Result<()> {
    let line_color = rgb(config.colors.line);
    let mean_color = rgb(config.colors.mean);
    let grid_color = rgb(config.colors.grid_color);

    area.fill(&rgb(config.colors.light_gray_bg))?;

    let caption = format!("{} per hour (n = {})", quantity.name(), rates.len());
    let (y_min, y_max) = y_range(rates);
    let x_max = rates.len().max(2) as f64 - 1.0;

    let mut chart = ChartBuilder::on(area)
        .caption(&caption, ("sans-serif", config.font.caption_size))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0f64..x_max, y_min..y_max)
        .context("Failed to build rate panel")?;

    chart
        .configure_mesh()
        .x_desc("Run")
        .x_label_formatter(&|x| format!("{:.0}", x + 1.0))
        .y_label_formatter(&|y| codec::encode(*y))
        .label_style(("sans-serif", config.font.axis_label_size).into_font())
        .light_line_style(grid_color)
        .bold_line_style(grid_color.mix(0.8))
        .draw()
        .context("Failed to draw mesh")?;

    if rates.is_empty() {
        return Ok(());
    }

    let points: Vec<(f64, f64)> = rates
        .iter()
        .enumerate()
        .map(|(i, &rate)| (i as f64, rate))
        .collect();

    chart.draw_series(LineSeries::new(points.iter().copied(), line_color.stroke_width(2)))?;
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 3, line_color.filled())),
    )?;

    if let Some(mean) = mean {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, mean), (x_max, mean)],
            mean_color.mix(0.7).stroke_width(1),
        )))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_range_pads() {
        let (lo, hi) = y_range(&[100.0, 200.0]);
        assert!((lo - 90.0).abs() < 1e-9);
        assert!((hi - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_y_range_clamps_at_zero() {
        let (lo, _) = y_range(&[1.0, 100.0]);
        assert_eq!(lo, 0.0);
    }

    #[test]
    fn test_y_range_flat_and_empty() {
        let (lo, hi) = y_range(&[500.0]);
        assert!(lo < 500.0 && hi > 500.0);
        assert_eq!(y_range(&[]), (0.0, 1.0));
    }
}
