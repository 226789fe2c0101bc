//! ASCII plotting for terminal output.
//!
//! A fixed-size character grid: enough to eyeball the forecast path and its
//! band in a terminal, and deterministic for snapshot tests.
//!
//! Plot elements:
//! - actual observations: `o`, joined by `-`
//! - forecasts: `*`, joined to the last actual by `.`
//! - confidence bounds: `:`

use chrono::NaiveDate;

use crate::domain::InflationObservation;

/// Render a combined actual + forecast series.
pub fn render_forecast_plot(rows: &[InflationObservation], width: usize, height: usize) -> String {
    let Some(mut canvas) = Canvas::fit(rows, width.max(10), height.max(5)) else {
        return "Plot: (no data)\n".to_string();
    };

    // Bounds first so the lines route around them.
    for f in rows.iter().filter(|r| r.is_forecast()) {
        for bound in [f.lower_bound, f.upper_bound].into_iter().flatten() {
            let cell = canvas.cell(f.date, bound);
            canvas.put(cell, ':');
        }
    }

    let actual: Vec<Cell> = rows
        .iter()
        .filter(|r| !r.is_forecast())
        .map(|r| canvas.cell(r.date, r.value))
        .collect();
    canvas.polyline(&actual, '-');

    let forecast: Vec<Cell> = actual
        .last()
        .copied()
        .into_iter()
        .chain(rows.iter().filter(|r| r.is_forecast()).map(|r| canvas.cell(r.date, r.value)))
        .collect();
    canvas.polyline(&forecast, '.');

    for r in rows {
        let cell = canvas.cell(r.date, r.value);
        canvas.put(cell, if r.is_forecast() { '*' } else { 'o' });
    }

    canvas.render()
}

type Cell = (usize, usize);

/// Fixed-size character grid over a date x value window.
struct Canvas {
    grid: Vec<Vec<char>>,
    first: NaiveDate,
    last: NaiveDate,
    y_min: f64,
    y_max: f64,
}

impl Canvas {
    fn fit(rows: &[InflationObservation], width: usize, height: usize) -> Option<Self> {
        let first = rows.iter().map(|r| r.date).min()?;
        let last = rows.iter().map(|r| r.date).max()?;

        let (lo, hi) = rows
            .iter()
            .flat_map(|r| [Some(r.value), r.lower_bound, r.upper_bound])
            .flatten()
            .filter(|y| y.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
        let (lo, hi) = if !lo.is_finite() {
            (0.0, 1.0)
        } else if hi > lo {
            (lo, hi)
        } else {
            (lo - 1.0, lo + 1.0)
        };
        // 5% headroom so extremes are not drawn on the border rows.
        let pad = ((hi - lo) * 0.05).max(1e-12);

        Some(Self {
            grid: vec![vec![' '; width]; height],
            first,
            last,
            y_min: lo - pad,
            y_max: hi + pad,
        })
    }

    fn width(&self) -> usize {
        self.grid[0].len()
    }

    fn height(&self) -> usize {
        self.grid.len()
    }

    fn cell(&self, date: NaiveDate, y: f64) -> Cell {
        let span_days = (self.last - self.first).num_days();
        let u = if span_days > 0 {
            (date - self.first).num_days() as f64 / span_days as f64
        } else {
            0.5
        };
        let v = ((y - self.y_min) / (self.y_max - self.y_min)).clamp(0.0, 1.0);

        let col = (u.clamp(0.0, 1.0) * (self.width() - 1) as f64).round() as usize;
        // Row 0 is the top of the chart.
        let row = ((1.0 - v) * (self.height() - 1) as f64).round() as usize;
        (col, row)
    }

    fn put(&mut self, (col, row): Cell, ch: char) {
        self.grid[row][col] = ch;
    }

    /// Connect consecutive cells, filling only blank cells.
    fn polyline(&mut self, cells: &[Cell], ch: char) {
        for pair in cells.windows(2) {
            let ((c0, r0), (c1, r1)) = (pair[0], pair[1]);
            let (dc, dr) = (c1 as f64 - c0 as f64, r1 as f64 - r0 as f64);
            let steps = dc.abs().max(dr.abs()) as usize;
            for i in 0..=steps {
                let t = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
                let col = (c0 as f64 + dc * t).round() as usize;
                let row = (r0 as f64 + dr * t).round() as usize;
                if self.grid[row][col] == ' ' {
                    self.grid[row][col] = ch;
                }
            }
        }
    }

    fn render(self) -> String {
        let mut out = format!(
            "Plot: date=[{}, {}] | y=[{:.2}, {:.2}]%\n",
            self.first, self.last, self.y_min, self.y_max
        );
        for row in self.grid {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}
