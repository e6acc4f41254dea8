use chrono::{DateTime, Duration, Utc};
use minifb::{Key, Window, WindowOptions};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::ChartConfig;
use crate::models::ChartSeries;
use crate::utils::ChartError;

/// More time labels than this get thinned out
const MAX_TIME_TICKS: usize = 48;

/// Image format, picked from the output file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Png,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Written(PathBuf),
    /// Shown in a window which has since been closed
    Displayed,
    /// Nothing to draw
    Skipped,
}

/// Price axis bounds with 10% headroom, never below zero for positive prices
pub fn padded_price_range(min_price: f64, max_price: f64) -> Range<f64> {
    let span = max_price - min_price;
    let padding = if span > 0.0 {
        span * 0.1
    } else {
        (max_price.abs() * 0.1).max(1.0)
    };

    let lower = if min_price >= 0.0 {
        (min_price - padding).max(0.0)
    } else {
        min_price - padding
    };
    lower..max_price + padding
}

/// Block axis bounds; a single block is widened by one
pub fn block_range(xs: &[u64]) -> Option<Range<u64>> {
    let min = *xs.iter().min()?;
    let max = *xs.iter().max()?;
    if min == max {
        Some(min..max.saturating_add(1))
    } else {
        Some(min..max)
    }
}

/// Time axis bounds; a single instant is widened by one hour
pub fn time_range(xs: &[DateTime<Utc>]) -> Option<Range<DateTime<Utc>>> {
    let min = *xs.iter().min()?;
    let max = *xs.iter().max()?;
    if min == max {
        Some(min..max + Duration::hours(1))
    } else {
        Some(min..max)
    }
}

/// Label positions on whole multiples of `interval_hours` inside `range`
pub fn time_ticks(range: &Range<DateTime<Utc>>, interval_hours: u32) -> Vec<DateTime<Utc>> {
    let step = i64::from(interval_hours.max(1)) * 3600;
    let start = range.start.timestamp();
    let end = range.end.timestamp();

    let first = start.div_euclid(step) * step + if start.rem_euclid(step) == 0 { 0 } else { step };
    let mut ticks: Vec<DateTime<Utc>> = (0..)
        .map(|i| first + i * step)
        .take_while(|&t| t <= end)
        .filter_map(|t| DateTime::<Utc>::from_timestamp(t, 0))
        .collect();

    if ticks.is_empty() {
        ticks = vec![range.start, range.end];
    }

    if ticks.len() > MAX_TIME_TICKS {
        let stride = ticks.len().div_ceil(MAX_TIME_TICKS);
        debug!(
            "{} labels at {}h spacing is too many, showing every {}th",
            ticks.len(),
            interval_hours,
            stride
        );
        ticks = ticks.into_iter().step_by(stride).collect();
    }

    ticks
}

fn render_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Pack plotters' RGB bytes into the 0RGB words minifb expects
pub fn rgb_to_frame(rgb: &[u8]) -> Vec<u32> {
    rgb.chunks_exact(3)
        .map(|p| u32::from(p[0]) << 16 | u32::from(p[1]) << 8 | u32::from(p[2]))
        .collect()
}

/// Draw the series to `config.output`, or in a window when no output is set
pub fn render_chart(series: &ChartSeries, config: &ChartConfig) -> Result<RenderOutcome, ChartError> {
    if series.is_empty() {
        warn!("No price samples to plot, skipping chart");
        return Ok(RenderOutcome::Skipped);
    }
    if let Some(index) = series.prices().iter().position(|p| !p.is_finite()) {
        return Err(ChartError::Render(format!("price at record {} is not finite", index)));
    }

    match &config.output {
        Some(path) => write_chart(series, config, path),
        None => show_chart(series, config),
    }
}

fn write_chart(series: &ChartSeries, config: &ChartConfig, path: &Path) -> Result<RenderOutcome, ChartError> {
    let size = (config.width, config.height);
    let format = OutputFormat::from_path(path);
    debug!("Rendering {} points as {:?} ({}x{})", series.len(), format, size.0, size.1);

    match format {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_on(&root, series, config)?;
        }
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_on(&root, series, config)?;
        }
    }

    info!("📈 Chart written to {}", path.display());
    Ok(RenderOutcome::Written(path.to_path_buf()))
}

/// Blocks until the window is closed or Escape is pressed
fn show_chart(series: &ChartSeries, config: &ChartConfig) -> Result<RenderOutcome, ChartError> {
    let (width, height) = (config.width as usize, config.height as usize);
    let mut rgb = vec![0u8; width * height * 3];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (config.width, config.height)).into_drawing_area();
        draw_on(&root, series, config)?;
    }
    let frame = rgb_to_frame(&rgb);

    let mut window = Window::new(&config.title, width, height, WindowOptions::default())
        .map_err(|e| ChartError::Display(e.to_string()))?;
    window.set_target_fps(30);
    info!("📈 Showing chart, close the window or press Esc to exit");

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window
            .update_with_buffer(&frame, width, height)
            .map_err(|e| ChartError::Display(e.to_string()))?;
    }

    debug!("Chart window closed");
    Ok(RenderOutcome::Displayed)
}

fn draw_on<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &ChartSeries,
    config: &ChartConfig,
) -> Result<(), ChartError> {
    root.fill(&WHITE).map_err(render_error)?;

    match series {
        ChartSeries::Blocks { xs, ys } => draw_blocks(root, xs, ys, config)?,
        ChartSeries::Times { xs, ys } => draw_times(root, xs, ys, config)?,
    }

    root.present().map_err(render_error)
}

fn draw_blocks<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    xs: &[u64],
    ys: &[f64],
    config: &ChartConfig,
) -> Result<(), ChartError> {
    let x_range = block_range(xs).ok_or_else(|| render_error("empty block range"))?;
    let y_range = price_axis(ys);

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(if config.rotate_labels { 80 } else { 40 })
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_error)?;

    let label_font = ("sans-serif", 12).into_font();
    let label_style = if config.rotate_labels {
        label_font.transform(FontTransform::Rotate90)
    } else {
        label_font
    };

    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .x_label_style(label_style)
        .draw()
        .map_err(render_error)?;

    let points: Vec<(u64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(render_error)?;

    if config.show_markers {
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 3, BLUE.filled())))
            .map_err(render_error)?;
    }

    Ok(())
}

fn draw_times<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    xs: &[DateTime<Utc>],
    ys: &[f64],
    config: &ChartConfig,
) -> Result<(), ChartError> {
    let x_range = time_range(xs).ok_or_else(|| render_error("empty time range"))?;
    let ticks: Vec<i64> = time_ticks(&x_range, config.tick_interval_hours)
        .iter()
        .map(DateTime::timestamp)
        .collect();
    let tick_count = ticks.len();
    let y_range = price_axis(ys);

    // Plotted on epoch seconds so the labels land exactly on the tick positions
    let epoch_range = x_range.start.timestamp()..x_range.end.timestamp();

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(if config.rotate_labels { 90 } else { 40 })
        .y_label_area_size(70)
        .build_cartesian_2d(epoch_range.with_key_points(ticks), y_range)
        .map_err(render_error)?;

    let label_font = ("sans-serif", 12).into_font();
    let label_style = if config.rotate_labels {
        label_font.transform(FontTransform::Rotate90)
    } else {
        label_font
    };
    let format_label = |secs: &i64| {
        DateTime::<Utc>::from_timestamp(*secs, 0)
            .map(|dt| dt.format(&config.date_format).to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .x_labels(tick_count)
        .x_label_formatter(&format_label)
        .x_label_style(label_style)
        .draw()
        .map_err(render_error)?;

    let points: Vec<(i64, f64)> = xs
        .iter()
        .map(DateTime::timestamp)
        .zip(ys.iter().copied())
        .collect();
    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(render_error)?;

    if config.show_markers {
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 3, BLUE.filled())))
            .map_err(render_error)?;
    }

    Ok(())
}

fn price_axis(ys: &[f64]) -> Range<f64> {
    let min_price = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    padded_price_range(min_price, max_price)
}
