//! Text Chart Surface
//!
//! Draws bar and line charts with box-drawing characters for a terminal.

use super::{ChartId, ChartKind, ChartSpec, ChartSurface};

const DEFAULT_WIDTH: usize = 64;
const DEFAULT_HEIGHT: usize = 10;

/// Number of labelled y gridlines on line charts
const Y_GRIDLINES: usize = 5;

/// Single-chart text surface
#[derive(Debug)]
pub struct TextChartSurface {
    width: usize,
    height: usize,
    next_id: u64,
    current: Option<(ChartId, String)>,
}

impl Default for TextChartSurface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl TextChartSurface {
    /// Surface `width` columns wide; line charts use `height` rows
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(24),
            height: height.max(Y_GRIDLINES),
            next_id: 0,
            current: None,
        }
    }

    /// Current drawing, if a chart is mounted
    pub fn render(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, drawing)| drawing.as_str())
    }

    /// Handle of the mounted chart
    pub fn current(&self) -> Option<ChartId> {
        self.current.as_ref().map(|(id, _)| *id)
    }

    fn draw(&self, spec: &ChartSpec) -> String {
        let mut out = String::new();
        out.push_str(&format!("{} ({})\n", spec.series_name, spec.kind));

        if spec.labels.is_empty() {
            out.push_str("(no data)\n");
        } else {
            match spec.kind {
                ChartKind::Bar => self.draw_bars(spec, &mut out),
                ChartKind::Line => self.draw_line(spec, &mut out),
            }
        }

        if spec.show_legend {
            let marker = match spec.kind {
                ChartKind::Bar => '■',
                ChartKind::Line => '●',
            };
            out.push_str(&format!("{} {}\n", marker, spec.series_name));
        }

        out
    }

    fn draw_bars(&self, spec: &ChartSpec, out: &mut String) {
        let label_width = spec
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let bar_width = self.width.saturating_sub(label_width + 14).max(10);

        let scale = spec
            .values
            .iter()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));

        for (i, label) in spec.labels.iter().enumerate() {
            let value = spec.values.get(i).copied().unwrap_or(f64::NAN);
            let len = if value.is_nan() {
                0
            } else if value.is_infinite() || scale == 0.0 {
                if value == 0.0 {
                    0
                } else {
                    bar_width
                }
            } else {
                ((value.abs() / scale) * bar_width as f64).round() as usize
            };
            let fill = if value < 0.0 { '▒' } else { '█' };

            out.push_str(&format!(
                "{:>w$} │{} {}\n",
                label,
                fill.to_string().repeat(len),
                format_value(value),
                w = label_width
            ));
        }
    }

    fn draw_line(&self, spec: &ChartSpec, out: &mut String) {
        let finite: Vec<f64> = spec.values.iter().copied().filter(|v| v.is_finite()).collect();
        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if finite.is_empty() {
            lo = 0.0;
            hi = 1.0;
        }
        if spec.begin_at_zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        if hi == lo {
            hi = lo + 1.0;
        }

        let rows = self.height;
        let y_value = |row: usize| hi - (row as f64 / (rows - 1) as f64) * (hi - lo);
        let row_of = |v: f64| (((hi - v) / (hi - lo)) * (rows - 1) as f64).round() as usize;

        let y_labels: Vec<(usize, String)> = (0..Y_GRIDLINES)
            .map(|k| {
                let row = (k * (rows - 1) + (Y_GRIDLINES - 1) / 2) / (Y_GRIDLINES - 1);
                (row, format_value(y_value(row)))
            })
            .collect();
        let y_width = y_labels.iter().map(|(_, l)| l.len()).max().unwrap_or(1);

        let n = spec.labels.len();
        let plot_width = self.width.saturating_sub(y_width + 2).max(n);
        let step = (plot_width / n).clamp(1, 6);
        let cols = (n - 1) * step + 1;

        let mut grid = vec![vec![' '; cols]; rows];
        let points: Vec<Option<(usize, usize)>> = (0..n)
            .map(|i| {
                spec.values
                    .get(i)
                    .copied()
                    .filter(|v| v.is_finite())
                    .map(|v| (i * step, row_of(v)))
            })
            .collect();

        // Dots between neighbouring points, then the points over them
        for pair in points.windows(2) {
            if let [Some((c0, r0)), Some((c1, r1))] = pair {
                for c in (c0 + 1)..*c1 {
                    let t = (c - c0) as f64 / (c1 - c0) as f64;
                    let r = (*r0 as f64 + t * (*r1 as f64 - *r0 as f64)).round() as usize;
                    grid[r][c] = '·';
                }
            }
        }
        for (col, row) in points.iter().flatten() {
            grid[*row][*col] = '●';
        }

        for (row, line) in grid.iter().enumerate() {
            let plotted: String = line.iter().collect();
            match y_labels.iter().find(|(r, _)| *r == row) {
                Some((_, label)) => {
                    out.push_str(&format!("{:>w$} ┤{}\n", label, plotted.trim_end(), w = y_width))
                }
                None => out.push_str(&format!("{:>w$} │{}\n", "", plotted.trim_end(), w = y_width)),
            }
        }
        out.push_str(&format!("{:>w$} └{}\n", "", "─".repeat(cols), w = y_width));

        let first = &spec.labels[0];
        let mut x_axis = format!("{:>w$}  {}", "", first, w = y_width);
        if n > 1 {
            let last = &spec.labels[n - 1];
            let used = first.chars().count();
            let gap = cols.saturating_sub(used + last.chars().count()).max(1);
            x_axis.push_str(&" ".repeat(gap));
            x_axis.push_str(last);
        }
        out.push_str(&x_axis);
        out.push('\n');
    }
}

impl ChartSurface for TextChartSurface {
    fn create(&mut self, spec: &ChartSpec) -> ChartId {
        if let Some((old, _)) = &self.current {
            tracing::warn!(chart = %old, "Chart surface still in use, drawing over it");
        }

        self.next_id += 1;
        let id = ChartId(self.next_id);
        self.current = Some((id, self.draw(spec)));
        id
    }

    fn destroy(&mut self, id: ChartId) {
        if self.current() == Some(id) {
            self.current = None;
        }
    }
}

/// Axis and bar value text
fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
