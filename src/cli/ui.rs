use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::trend::TrendPoint;

/// Glyphs for sparklines, lowest to highest.
const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Width of the bar column in the trend table.
const BAR_WIDTH: usize = 24;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Creates a right-aligned cell for a rate value.
pub fn rate_cell(rate: f64) -> Cell {
    Cell::new(format!("{rate:.4}")).set_alignment(CellAlignment::Right)
}

/// Creates a new spinner for a single indeterminate task.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}

/// Scales `value` between `min` and `max` into `steps` buckets. A flat
/// series maps everything to the top bucket.
fn scale(value: f64, min: f64, max: f64, steps: usize) -> usize {
    let span = max - min;
    if span <= f64::EPSILON {
        return steps - 1;
    }
    let normalized = (value - min) / span;
    ((normalized * (steps - 1) as f64).round() as usize).min(steps - 1)
}

/// Renders a series as a one-line sparkline.
pub fn sparkline(values: &[f64]) -> String {
    if values.is_empty() {
        return String::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .map(|v| SPARK_GLYPHS[scale(*v, min, max, SPARK_GLYPHS.len())])
        .collect()
}

/// Renders a trend as a day/rate/bar table.
pub fn trend_table(points: &[TrendPoint]) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![header_cell("Day"), header_cell("Rate"), header_cell("")]);

    let min = points.iter().map(|p| p.rate).fold(f64::INFINITY, f64::min);
    let max = points
        .iter()
        .map(|p| p.rate)
        .fold(f64::NEG_INFINITY, f64::max);

    for point in points {
        let length = scale(point.rate, min, max, BAR_WIDTH) + 1;
        let bar = "█".repeat(length);
        table.add_row(vec![
            Cell::new(&point.label),
            rate_cell(point.rate),
            Cell::new(bar).fg(Color::Green),
        ]);
    }
    table
}
