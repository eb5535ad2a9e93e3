use std::f64::consts::{FRAC_PI_2, TAU};

use statfut_api::chart::RadarSeries;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Terminal cells are roughly twice as tall as wide; the x radius is
/// stretched to keep the polygon visually round.
const ASPECT: f64 = 2.0;

/// Columns reserved on each side of the plot for the rim labels.
const LABEL_GUTTER: u16 = 10;

/// Smallest area the widget will draw into. Below this the labels collide
/// with the polygon and the chart stops being readable.
pub const MIN_WIDTH: u16 = 2 * LABEL_GUTTER + 8;
pub const MIN_HEIGHT: u16 = 9;

// ---------------------------------------------------------------------------
// RadarView widget
// ---------------------------------------------------------------------------

/// Renders a closed polar polygon: one spoke per metric, the first axis
/// pointing up and the rest proceeding clockwise, with the value polygon
/// drawn over dotted axis spokes.
pub struct RadarView<'a> {
    pub series: &'a RadarSeries,
}

impl Widget for RadarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let n = self.series.metrics.len();
        if n < 3 || area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return;
        }

        let cx = f64::from(area.x) + f64::from(area.width) / 2.0;
        let cy = f64::from(area.y) + f64::from(area.height) / 2.0;
        let ry = (f64::from(area.height) / 2.0 - 1.5).max(1.0);
        let rx = (f64::from(area.width) / 2.0 - f64::from(LABEL_GUTTER))
            .min(ry * ASPECT)
            .max(2.0);

        let spoke_style = Style::default().fg(Color::DarkGray);
        let label_style = Style::default().fg(Color::Gray);
        let edge_style = Style::default().fg(Color::Cyan);
        let vertex_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        // Dotted spokes with the metric label just past the rim.
        for (i, metric) in self.series.metrics.iter().enumerate() {
            let (ux, uy) = unit_point(i, n);
            for step in 1..=4 {
                let t = f64::from(step) / 4.0;
                let (px, py) = project(cx, cy, rx, ry, ux, uy, t);
                put_char(buf, area, px, py, '·', spoke_style);
            }
            place_label(buf, area, cx, cy, rx, ry, ux, uy, metric.label, label_style);
        }

        let (px, py) = project(cx, cy, rx, ry, 0.0, 0.0, 0.0);
        put_char(buf, area, px, py, '+', spoke_style);

        // The closed value polygon.
        let vertices: Vec<(i32, i32)> = self
            .series
            .metrics
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let (ux, uy) = unit_point(i, n);
                let t = fraction(m.value, self.series.axis_max);
                project(cx, cy, rx, ry, ux, uy, t)
            })
            .collect();

        for i in 0..n {
            let from = vertices[i];
            let to = vertices[(i + 1) % n];
            draw_line(buf, area, from, to, '•', edge_style);
        }
        for &(vx, vy) in &vertices {
            put_char(buf, area, vx, vy, '◆', vertex_style);
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry helpers
// ---------------------------------------------------------------------------

/// Unit-circle direction of axis `i` of `n`: axis 0 points straight up,
/// later axes proceed clockwise.
fn unit_point(i: usize, n: usize) -> (f64, f64) {
    let angle = -FRAC_PI_2 + TAU * i as f64 / n as f64;
    (angle.cos(), angle.sin())
}

/// Fraction of the axis length for a value on the `[0, axis_max]` range.
/// Out-of-range values clamp; a non-positive axis reads as zero.
fn fraction(value: f64, axis_max: f64) -> f64 {
    if axis_max <= 0.0 {
        return 0.0;
    }
    (value / axis_max).clamp(0.0, 1.0)
}

/// Map a unit direction scaled by `t` into cell coordinates.
fn project(cx: f64, cy: f64, rx: f64, ry: f64, ux: f64, uy: f64, t: f64) -> (i32, i32) {
    (
        (cx + ux * rx * t).round() as i32,
        (cy + uy * ry * t).round() as i32,
    )
}

#[allow(clippy::too_many_arguments)]
fn place_label(
    buf: &mut Buffer,
    area: Rect,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    ux: f64,
    uy: f64,
    label: &str,
    style: Style,
) {
    let (rim_x, rim_y) = project(cx, cy, rx + 1.0, ry, ux, uy, 1.0);
    let len = label.chars().count() as i32;

    // Left-side labels grow leftwards, top/bottom labels center on the spoke.
    let mut x = if ux < -0.3 {
        rim_x - len
    } else if ux <= 0.3 {
        rim_x - len / 2
    } else {
        rim_x + 1
    };
    let y = rim_y.clamp(i32::from(area.y), i32::from(area.y + area.height) - 1);

    let min_x = i32::from(area.x);
    let max_x = i32::from(area.x + area.width);
    x = x.clamp(min_x, (max_x - len).max(min_x));

    for (offset, ch) in label.chars().enumerate() {
        put_char(buf, area, x + offset as i32, y, ch, style);
    }
}

/// Integer Bresenham between two cell positions, clipped to the area.
fn draw_line(buf: &mut Buffer, area: Rect, from: (i32, i32), to: (i32, i32), ch: char, style: Style) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let dy = -(y1 - y).abs();
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put_char(buf, area, x, y, ch, style);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn put_char(buf: &mut Buffer, area: Rect, x: i32, y: i32, ch: char, style: Style) {
    if x < i32::from(area.x)
        || y < i32::from(area.y)
        || x >= i32::from(area.x + area.width)
        || y >= i32::from(area.y + area.height)
    {
        return;
    }
    if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
        cell.set_char(ch);
        cell.set_style(style);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_axis_points_straight_up() {
        let (ux, uy) = unit_point(0, 6);
        assert!(ux.abs() < 1e-9);
        assert!((uy + 1.0).abs() < 1e-9);
    }

    #[test]
    fn axes_are_evenly_spaced() {
        // Axis 3 of 6 is the reflection of axis 0: straight down.
        let (ux, uy) = unit_point(3, 6);
        assert!(ux.abs() < 1e-9);
        assert!((uy - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fraction_scales_within_the_axis() {
        assert_eq!(fraction(0.6, 1.2), 0.5);
        assert_eq!(fraction(0.0, 1.2), 0.0);
        assert_eq!(fraction(1.2, 1.2), 1.0);
    }

    #[test]
    fn fraction_clamps_out_of_range_values() {
        assert_eq!(fraction(5.0, 1.0), 1.0);
        assert_eq!(fraction(-1.0, 1.0), 0.0);
    }

    #[test]
    fn degenerate_axis_reads_as_zero() {
        assert_eq!(fraction(1.0, 0.0), 0.0);
        assert_eq!(fraction(1.0, -2.0), 0.0);
    }

    #[test]
    fn full_value_lands_on_the_rim() {
        let (x, y) = project(40.0, 12.0, 20.0, 10.0, 0.0, -1.0, 1.0);
        assert_eq!((x, y), (40, 2));
        let (x, y) = project(40.0, 12.0, 20.0, 10.0, 1.0, 0.0, 1.0);
        assert_eq!((x, y), (60, 12));
    }

    #[test]
    fn zero_value_stays_at_the_center() {
        let (x, y) = project(40.0, 12.0, 20.0, 10.0, 1.0, 0.0, 0.0);
        assert_eq!((x, y), (40, 12));
    }
}
