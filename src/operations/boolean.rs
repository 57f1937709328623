//! Adapter for the external planar geometry engine (the `geo` crate).
//!
//! Converts the kernel's ring representation to and from the engine's
//! coordinate-sequence format: rings are closed on the way out (the engine
//! requires the first point repeated) and the duplicated closing point is
//! dropped on the way back in.

use geo::{BooleanOps, Centroid, Intersects, LineString, MultiLineString};

use crate::error::Result;
use crate::geometry::polygon::Polygon2;
use crate::geometry::polyline::Polyline2;
use crate::math::{Point2, Tolerance};

fn ring_to_engine(points: &[Point2]) -> LineString<f64> {
    // geo closes rings itself inside Polygon::new.
    LineString::from(points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>())
}

pub(crate) fn to_engine(polygon: &Polygon2) -> geo::Polygon<f64> {
    let exterior = ring_to_engine(polygon.exterior());
    let holes = polygon
        .holes()
        .iter()
        .map(|h| ring_to_engine(h.exterior()))
        .collect();
    geo::Polygon::new(exterior, holes)
}

fn ring_from_engine(ring: &LineString<f64>, tol: Tolerance) -> Vec<Point2> {
    let mut points: Vec<Point2> = ring.coords().map(|c| Point2::new(c.x, c.y)).collect();
    // Drop the duplicated closing point and any other consecutive repeats
    // the engine may emit.
    if points.len() > 1 {
        let first = points[0];
        if let Some(last) = points.last() {
            if tol.eq_point2(&first, last) {
                points.pop();
            }
        }
    }
    points.dedup_by(|a, b| tol.eq_point2(a, b));
    points
}

pub(crate) fn from_engine(polygon: &geo::Polygon<f64>, tol: Tolerance) -> Option<Polygon2> {
    let exterior = ring_from_engine(polygon.exterior(), tol);
    if exterior.len() < 3 {
        return None;
    }
    let holes = polygon
        .interiors()
        .iter()
        .filter_map(|ring| {
            let points = ring_from_engine(ring, tol);
            Polygon2::new(points, Vec::new()).ok()
        })
        .collect();
    Polygon2::new(exterior, holes).ok()
}

fn from_engine_multi(multi: &geo::MultiPolygon<f64>, tol: Tolerance) -> Vec<Polygon2> {
    multi.0.iter().filter_map(|p| from_engine(p, tol)).collect()
}

/// Boolean intersection of two 2D polygons (holes included).
#[must_use]
pub fn intersection(a: &Polygon2, b: &Polygon2, tol: Tolerance) -> Vec<Polygon2> {
    from_engine_multi(&to_engine(a).intersection(&to_engine(b)), tol)
}

/// Boolean difference `a - b` of two 2D polygons.
#[must_use]
pub fn difference(a: &Polygon2, b: &Polygon2, tol: Tolerance) -> Vec<Polygon2> {
    from_engine_multi(&to_engine(a).difference(&to_engine(b)), tol)
}

/// Boolean union of two 2D polygons.
#[must_use]
pub fn union(a: &Polygon2, b: &Polygon2, tol: Tolerance) -> Vec<Polygon2> {
    from_engine_multi(&to_engine(a).union(&to_engine(b)), tol)
}

/// Clips an open polyline to the interior of a polygon.
///
/// # Errors
///
/// Propagates construction errors for degenerate clipped pieces (pieces with
/// fewer than two distinct points are dropped, not errored).
pub fn clip_polyline(polygon: &Polygon2, polyline: &Polyline2, tol: Tolerance) -> Result<Vec<Polyline2>> {
    let ls = LineString::from(
        polyline
            .points()
            .iter()
            .map(|p| (p.x, p.y))
            .collect::<Vec<_>>(),
    );
    let clipped = to_engine(polygon).clip(&MultiLineString::new(vec![ls]), false);
    let mut pieces = Vec::new();
    for piece in &clipped.0 {
        let mut points: Vec<Point2> = piece.coords().map(|c| Point2::new(c.x, c.y)).collect();
        points.dedup_by(|a, b| tol.eq_point2(a, b));
        if points.len() >= 2 {
            pieces.push(Polyline2::new(points)?);
        }
    }
    Ok(pieces)
}

/// Centroid of a polygon (holes accounted for), if the polygon has area.
#[must_use]
pub fn centroid(polygon: &Polygon2) -> Option<Point2> {
    to_engine(polygon)
        .centroid()
        .map(|c| Point2::new(c.x(), c.y()))
}

/// Inclusive point-in-polygon test (boundary counts as inside).
#[must_use]
pub fn contains_point(polygon: &Polygon2, point: &Point2) -> bool {
    to_engine(polygon).intersects(&geo::Point::new(point.x, point.y))
}
