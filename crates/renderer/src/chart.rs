//! Area-path computation for the stock history chart.
//!
//! Produces an SVG path string: a smooth centripetal Catmull-Rom topline
//! through the observations, closed down to a flat baseline at the value
//! scale's zero position. Zero or one observations yield a degenerate path
//! rather than an error.

use locator_common::StockObservation;

use crate::scale::{LinearScale, TimeScale};

/// Horizontal extent of the plotted area, in card units.
pub const CHART_WIDTH: f64 = 325.0;
/// Vertical extent of the chart viewport, in card units.
pub const CHART_HEIGHT: f64 = 128.0;

/// Quantity axis never tops out below this, so sparse data still reads at a
/// sensible scale.
const MIN_QUANTITY_CEILING: f64 = 10.0;

const CATMULL_ROM_ALPHA: f64 = 0.5;

/// Compute the filled-area path for a stock history, oldest observation first.
pub fn stock_area_path(observations: &[StockObservation]) -> String {
    if observations.is_empty() {
        return String::new();
    }

    let date_scale = TimeScale::new(
        (
            observations[0].reported_at,
            observations[observations.len() - 1].reported_at,
        ),
        (0.0, CHART_WIDTH),
    );

    let max_quantity = observations
        .iter()
        .map(|o| o.quantity as f64)
        .fold(f64::NEG_INFINITY, f64::max);

    let value_scale = LinearScale::new(
        (-1.0, max_quantity.max(MIN_QUANTITY_CEILING)),
        (CHART_HEIGHT, CHART_HEIGHT / 6.0),
    )
    .nice();

    let baseline = value_scale.range().0;

    let points: Vec<(f64, f64)> = observations
        .iter()
        .map(|o| {
            (
                date_scale.scale(o.reported_at),
                value_scale.scale(o.quantity as f64),
            )
        })
        .collect();

    let mut path = catmull_rom_path(&points);
    path.push_str(&format!(
        "L{},{}L{},{}Z",
        fmt(points[points.len() - 1].0),
        fmt(baseline),
        fmt(points[0].0),
        fmt(baseline),
    ));
    path
}

/// Smooth open path through the given points.
fn catmull_rom_path(points: &[(f64, f64)]) -> String {
    let mut d = format!("M{},{}", fmt(points[0].0), fmt(points[0].1));

    let n = points.len();
    for i in 0..n.saturating_sub(1) {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];

        let (c1, c2) = catmull_rom_controls(p0, p1, p2, p3);
        d.push_str(&format!(
            "C{},{},{},{},{},{}",
            fmt(c1.0),
            fmt(c1.1),
            fmt(c2.0),
            fmt(c2.1),
            fmt(p2.0),
            fmt(p2.1),
        ));
    }

    d
}

/// Cubic Bezier control points for the Catmull-Rom segment p1 -> p2.
///
/// Duplicated neighbor points (at the ends of the sequence) collapse the
/// corresponding chord length to zero, which degrades the control point to
/// the segment endpoint itself.
fn catmull_rom_controls(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
) -> ((f64, f64), (f64, f64)) {
    let l01_2a = dist_sq(p0, p1).powf(CATMULL_ROM_ALPHA);
    let l12_2a = dist_sq(p1, p2).powf(CATMULL_ROM_ALPHA);
    let l23_2a = dist_sq(p2, p3).powf(CATMULL_ROM_ALPHA);
    let l01_a = l01_2a.sqrt();
    let l12_a = l12_2a.sqrt();
    let l23_a = l23_2a.sqrt();

    let mut c1 = p1;
    let mut c2 = p2;

    if l01_a > f64::EPSILON {
        let a = 2.0 * l01_2a + 3.0 * l01_a * l12_a + l12_2a;
        let n = 3.0 * l01_a * (l01_a + l12_a);
        c1 = (
            (p1.0 * a - p0.0 * l12_2a + p2.0 * l01_2a) / n,
            (p1.1 * a - p0.1 * l12_2a + p2.1 * l01_2a) / n,
        );
    }

    if l23_a > f64::EPSILON {
        let b = 2.0 * l23_2a + 3.0 * l23_a * l12_a + l12_2a;
        let m = 3.0 * l23_a * (l23_a + l12_a);
        c2 = (
            (p2.0 * b + p1.0 * l23_2a - p3.0 * l12_2a) / m,
            (p2.1 * b + p1.1 * l23_2a - p3.1 * l12_2a) / m,
        );
    }

    (c1, c2)
}

fn dist_sq(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    dx * dx + dy * dy
}

/// Compact coordinate formatting for path data.
fn fmt(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
