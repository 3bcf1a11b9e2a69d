//! Plain-text line chart of actual and predicted prices

use price_forecast::assemble::{ACTUAL_COLUMN, PREDICTED_COLUMN};
use price_forecast::CombinedSeries;
use std::fmt::Write;

pub const ACTUAL_MARK: char = '*';
pub const PREDICTED_MARK: char = 'o';

/// Space reserved left of the plot for the price axis
const AXIS_LABEL_WIDTH: usize = 10;
const MIN_PLOT_WIDTH: usize = 8;
const MIN_PLOT_HEIGHT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiChart {
    width: usize,
    height: usize,
}

impl AsciiChart {
    /// `width` counts the axis labels, `height` counts plot rows only
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width
                .saturating_sub(AXIS_LABEL_WIDTH + 2)
                .max(MIN_PLOT_WIDTH),
            height: height.max(MIN_PLOT_HEIGHT),
        }
    }

    pub fn plot_width(&self) -> usize {
        self.width
    }

    pub fn plot_height(&self) -> usize {
        self.height
    }

    pub fn render(&self, series: &CombinedSeries) -> String {
        let rows = series.rows();
        let values: Vec<f64> = rows
            .iter()
            .flat_map(|r| r.actual.into_iter().chain(r.predicted))
            .collect();
        if values.is_empty() {
            return "(nothing to plot)\n".to_string();
        }

        let mut low = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if (high - low).abs() < f64::EPSILON {
            low -= 1.0;
            high += 1.0;
        }

        let mut grid = vec![vec![' '; self.width]; self.height];
        for (i, row) in rows.iter().enumerate() {
            let col = self.column(i, rows.len());
            // Predicted first so an actual mark wins on a shared cell
            for (value, mark) in [(row.predicted, PREDICTED_MARK), (row.actual, ACTUAL_MARK)] {
                if let Some(v) = value {
                    let line = self.line(v, low, high);
                    grid[line][col] = mark;
                }
            }
        }

        let mut out = String::new();
        for (line, cells) in grid.iter().enumerate() {
            let label = if line == 0 {
                format!("{:>w$.2}", high, w = AXIS_LABEL_WIDTH)
            } else if line == self.height - 1 {
                format!("{:>w$.2}", low, w = AXIS_LABEL_WIDTH)
            } else if line == self.height / 2 {
                let mid = high - (high - low) * line as f64 / (self.height - 1) as f64;
                format!("{:>w$.2}", mid, w = AXIS_LABEL_WIDTH)
            } else {
                " ".repeat(AXIS_LABEL_WIDTH)
            };
            let plot: String = cells.iter().collect();
            let _ = writeln!(out, "{} |{}", label, plot.trim_end());
        }
        let _ = writeln!(
            out,
            "{} +{}",
            " ".repeat(AXIS_LABEL_WIDTH),
            "-".repeat(self.width)
        );

        if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
            let first = first.date.to_string();
            let last = last.date.to_string();
            let gap = self.width.saturating_sub(first.len() + last.len()).max(1);
            if rows.len() > 1 {
                let _ = writeln!(
                    out,
                    "{}  {}{}{}",
                    " ".repeat(AXIS_LABEL_WIDTH),
                    first,
                    " ".repeat(gap),
                    last
                );
            } else {
                let _ = writeln!(out, "{}  {}", " ".repeat(AXIS_LABEL_WIDTH), first);
            }
        }

        let _ = writeln!(
            out,
            "{}  {} {}   {} {}",
            " ".repeat(AXIS_LABEL_WIDTH),
            ACTUAL_MARK,
            ACTUAL_COLUMN,
            PREDICTED_MARK,
            PREDICTED_COLUMN
        );
        out
    }

    fn column(&self, index: usize, count: usize) -> usize {
        if count <= 1 {
            return 0;
        }
        index * (self.width - 1) / (count - 1)
    }

    fn line(&self, value: f64, low: f64, high: f64) -> usize {
        let scaled = (high - value) / (high - low) * (self.height - 1) as f64;
        (scaled.round().max(0.0) as usize).min(self.height - 1)
    }
}

impl Default for AsciiChart {
    fn default() -> Self {
        Self::new(72, 18)
    }
}
