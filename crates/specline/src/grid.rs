//! Background grid, axes and tick labels.
//!
//! Ticks are evenly spaced at a fixed count across the visible window, so
//! the grid moves with pan and zoom. Everything is emitted in normalized
//! plot space as a single vertex run drawn before any series.

use crate::range::DataRange;
use glam::Vec2;
use specline_core::profiling::profile_function;
use specline_render::{Color, LineVertex, Pixmap, Projection};

/// Grid and axis appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Number of ticks along x, including both ends.
    pub x_ticks: usize,
    /// Number of ticks along y, including both ends.
    pub y_ticks: usize,
    /// Space around the unit plot, in plot units.
    pub margin: f32,
    pub grid_color: Color,
    pub axis_color: Color,
    /// Grid line width in logical pixels.
    pub grid_width: f32,
    /// Axis line width in logical pixels.
    pub axis_width: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            x_ticks: 8,
            y_ticks: 5,
            margin: 0.08,
            grid_color: Color::rgba(0.5, 0.5, 0.5, 0.25),
            axis_color: Color::rgba(0.8, 0.8, 0.8, 1.0),
            grid_width: 1.0,
            axis_width: 1.5,
        }
    }
}

impl GridConfig {
    pub fn with_ticks(mut self, x_ticks: usize, y_ticks: usize) -> Self {
        self.x_ticks = x_ticks;
        self.y_ticks = y_ticks;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_colors(mut self, grid: Color, axis: Color) -> Self {
        self.grid_color = grid;
        self.axis_color = axis;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// A tick label for the host to render as text.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub axis: Axis,
    /// Data value at the tick.
    pub value: f64,
    pub text: String,
    /// Anchor in normalized plot space: on the bottom edge for x ticks,
    /// on the left edge for y ticks.
    pub position: Vec2,
}

/// A tick value and its normalized position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub position: f32,
}

/// `count` evenly spaced ticks across `range`, endpoints included.
///
/// A degenerate range, or `count == 1`, yields a single tick at the center.
pub fn ticks(range: DataRange, count: usize) -> Vec<Tick> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 || range.is_degenerate() {
        return vec![Tick {
            value: range.center(),
            position: 0.5,
        }];
    }

    let steps = (count - 1) as f64;
    (0..count)
        .map(|i| {
            let t = i as f64 / steps;
            Tick {
                value: range.denormalize(t),
                position: t as f32,
            }
        })
        .collect()
}

/// Format a tick value with just enough decimals to tell neighbors apart.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).clamp(0.0, 6.0) as usize
    } else {
        2
    };
    let text = format!("{:.*}", decimals, value);
    // Avoid "-0" and "-0.00".
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

/// Grid, axes and labels for one view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Background {
    vertices: Vec<LineVertex>,
    labels: Vec<TickLabel>,
}

impl Background {
    pub fn build(
        visible_x: DataRange,
        range_y: DataRange,
        config: &GridConfig,
        pixel_ratio: f32,
    ) -> Self {
        profile_function!();

        let grid_width = config.grid_width * pixel_ratio;
        let axis_width = config.axis_width * pixel_ratio;
        let mut vertices = Vec::new();
        let mut labels = Vec::new();

        let mut line = |a: Vec2, b: Vec2, color: Color, width: f32| {
            vertices.push(LineVertex::new(a, color, width));
            vertices.push(LineVertex::new(b, color, width));
            vertices.push(LineVertex::break_marker());
        };

        let x_ticks = ticks(visible_x, config.x_ticks);
        let x_step = visible_x.width() / config.x_ticks.saturating_sub(1).max(1) as f64;
        for tick in &x_ticks {
            line(
                Vec2::new(tick.position, 0.0),
                Vec2::new(tick.position, 1.0),
                config.grid_color,
                grid_width,
            );
            labels.push(TickLabel {
                axis: Axis::X,
                value: tick.value,
                text: format_tick(tick.value, x_step),
                position: Vec2::new(tick.position, 0.0),
            });
        }

        let y_ticks = ticks(range_y, config.y_ticks);
        let y_step = range_y.width() / config.y_ticks.saturating_sub(1).max(1) as f64;
        for tick in &y_ticks {
            line(
                Vec2::new(0.0, tick.position),
                Vec2::new(1.0, tick.position),
                config.grid_color,
                grid_width,
            );
            labels.push(TickLabel {
                axis: Axis::Y,
                value: tick.value,
                text: format_tick(tick.value, y_step),
                position: Vec2::new(0.0, tick.position),
            });
        }

        line(Vec2::ZERO, Vec2::X, config.axis_color, axis_width);
        line(Vec2::ZERO, Vec2::Y, config.axis_color, axis_width);

        Self { vertices, labels }
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn labels(&self) -> &[TickLabel] {
        &self.labels
    }

    pub fn rasterize(&self, pixmap: &mut Pixmap, projection: &Projection) {
        pixmap.draw_polylines(&self.vertices, projection, 1.0);
    }
}
