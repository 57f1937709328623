//! Clipping an infinite line against a polygon, expressed as sorted
//! parameter intervals along the line.
//!
//! Crossing parameters are collected against every ring (exterior and
//! holes), then the gaps between consecutive crossings are classified by
//! testing their midpoints for containment. Degenerate intervals are kept as
//! touch points.

use crate::geometry::line::{solve_line_line_2d, Line2};
use crate::geometry::polygon::Polygon2;
use crate::math::{Point2, Tolerance};
use crate::operations::boolean;

/// A closed parameter interval `[start, end]` along a line; `start == end`
/// marks a single touch point.
pub type Interval = (f64, f64);

fn collect_ring_crossings(
    line: &Line2,
    ring: &[Point2],
    tol: Tolerance,
    crossings: &mut Vec<f64>,
) {
    let n = ring.len();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let edge = b - a;
        if tol.is_zero(edge.norm()) {
            continue;
        }
        match solve_line_line_2d(line.origin(), line.direction(), &a, &edge, tol) {
            Some((t, u)) => {
                if u >= -tol.0 && u <= 1.0 + tol.0 {
                    crossings.push(t);
                }
            }
            None => {
                // Edge parallel to the line; if collinear, both endpoints
                // bound an overlap stretch.
                if line.contains(&a, tol) {
                    crossings.push(line.param_at(&a, tol));
                    crossings.push(line.param_at(&b, tol));
                }
            }
        }
    }
}

/// Computes the intervals of `line` that lie inside `polygon` (holes
/// excluded), sorted by parameter.
#[must_use]
pub fn line_polygon_intervals(line: &Line2, polygon: &Polygon2, tol: Tolerance) -> Vec<Interval> {
    let mut crossings = Vec::new();
    collect_ring_crossings(line, polygon.exterior(), tol, &mut crossings);
    for hole in polygon.holes() {
        collect_ring_crossings(line, hole.exterior(), tol, &mut crossings);
    }

    crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    crossings.dedup_by(|a, b| (*a - *b).abs() < tol.0);

    if crossings.is_empty() {
        // A line inside a bounded polygon must cross its boundary, so no
        // crossings means no intersection at all.
        return Vec::new();
    }

    let mut intervals: Vec<Interval> = Vec::new();
    for win in crossings.windows(2) {
        let (t0, t1) = (win[0], win[1]);
        let mid = line.point_at((t0 + t1) * 0.5);
        if boolean::contains_point(polygon, &mid) {
            if let Some(last) = intervals.last_mut() {
                if (last.1 - t0).abs() < tol.0 {
                    last.1 = t1;
                    continue;
                }
            }
            intervals.push((t0, t1));
        }
    }

    // Crossings not covered by any kept interval are tangent touches of the
    // boundary.
    for &t in &crossings {
        let covered = intervals
            .iter()
            .any(|&(t0, t1)| t >= t0 - tol.0 && t <= t1 + tol.0);
        if !covered {
            intervals.push((t, t));
        }
    }
    intervals.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    intervals
}

/// Intersects two sorted interval sets along the same line.
#[must_use]
pub fn intersect_intervals(a: &[Interval], b: &[Interval], tol: Tolerance) -> Vec<Interval> {
    let mut out = Vec::new();
    for &(a0, a1) in a {
        for &(b0, b1) in b {
            let lo = a0.max(b0);
            let hi = a1.min(b1);
            if hi >= lo - tol.0 {
                out.push((lo, hi.max(lo)));
            }
        }
    }
    out.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));
    out.dedup_by(|x, y| (x.0 - y.0).abs() < tol.0 && (x.1 - y.1).abs() < tol.0);
    out
}
