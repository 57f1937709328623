use crate::error::{GeometryError, Result};
use crate::math::vector::dominant_axis;
use crate::math::{projection, Axis, Point2, Point3, Tolerance};
use crate::operations::{boolean, clip, triangulate};

use super::line::{Line2, Line3};
use super::plane::{LinePlaneRelation, Plane, PlanePairRelation};
use super::polyline::{LineHit2, LineHit3, Polyline2, Polyline3};

/// A planar shape in 2D: an exterior ring (at least three points, first
/// point not repeated) plus zero or more hole polygons.
///
/// Holes are plain rings; they may not carry holes of their own.
#[derive(Debug, Clone)]
pub struct Polygon2 {
    exterior: Vec<Point2>,
    holes: Vec<Polygon2>,
}

/// A planar shape embedded in 3D. All exterior points are assumed coplanar;
/// the defining plane is derived from the first three points, so point
/// ordering determines face orientation.
#[derive(Debug, Clone)]
pub struct Polygon3 {
    exterior: Vec<Point3>,
    holes: Vec<Polygon3>,
}

/// A piece of the intersection of two 3D polygons.
#[derive(Debug, Clone)]
pub enum PolygonHit3 {
    Point(Point3),
    Segment(Polyline3),
    Polygon(Polygon3),
}

/// Shoelace signed area of a bare ring.
pub(crate) fn ring_signed_area(ring: &[Point2]) -> f64 {
    let n = ring.len();
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += ring[i].x * ring[j].y - ring[j].x * ring[i].y;
    }
    sum * 0.5
}

/// Ring equality independent of starting vertex and direction.
fn rings_coincide<P: Copy>(a: &[P], b: &[P], eq: impl Fn(&P, &P) -> bool) -> bool {
    let n = a.len();
    if n != b.len() {
        return false;
    }
    let matches_with_shift = |seq: &[P]| {
        (0..n).any(|shift| (0..n).all(|i| eq(&seq[(shift + i) % n], &b[i])))
    };
    if matches_with_shift(a) {
        return true;
    }
    let reversed: Vec<P> = a.iter().rev().copied().collect();
    matches_with_shift(&reversed)
}

fn intervals_to_hits_2(line: &Line2, intervals: &[clip::Interval], tol: Tolerance) -> Vec<LineHit2> {
    intervals
        .iter()
        .filter_map(|&(t0, t1)| {
            if tol.eq(t0, t1) {
                Some(LineHit2::Point(line.point_at(t0)))
            } else {
                Polyline2::new(vec![line.point_at(t0), line.point_at(t1)])
                    .ok()
                    .map(LineHit2::Segment)
            }
        })
        .collect()
}

fn intervals_to_hits_3(line: &Line3, intervals: &[clip::Interval], tol: Tolerance) -> Vec<LineHit3> {
    intervals
        .iter()
        .filter_map(|&(t0, t1)| {
            if tol.eq(t0, t1) {
                Some(LineHit3::Point(line.point_at(t0)))
            } else {
                Polyline3::new(vec![line.point_at(t0), line.point_at(t1)])
                    .ok()
                    .map(LineHit3::Segment)
            }
        })
        .collect()
}

impl Polygon2 {
    /// Creates a polygon from an exterior ring and hole polygons.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the exterior has fewer
    /// than three points or a hole carries holes of its own.
    pub fn new(exterior: Vec<Point2>, holes: Vec<Polygon2>) -> Result<Self> {
        if exterior.len() < 3 {
            return Err(GeometryError::DegenerateInput(
                "a polygon needs at least 3 exterior points".into(),
            )
            .into());
        }
        if holes.iter().any(|h| !h.holes.is_empty()) {
            return Err(GeometryError::DegenerateInput(
                "hole polygons must not have holes themselves".into(),
            )
            .into());
        }
        Ok(Self { exterior, holes })
    }

    /// Creates a hole-free polygon from an exterior ring.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for fewer than three
    /// points.
    pub fn from_exterior(exterior: Vec<Point2>) -> Result<Self> {
        Self::new(exterior, Vec::new())
    }

    /// Returns the exterior ring (first point not repeated).
    #[must_use]
    pub fn exterior(&self) -> &[Point2] {
        &self.exterior
    }

    /// Returns the hole polygons.
    #[must_use]
    pub fn holes(&self) -> &[Polygon2] {
        &self.holes
    }

    /// Signed area: positive for a counter-clockwise exterior, negative for
    /// clockwise; hole areas are subtracted from the magnitude.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let ext = ring_signed_area(&self.exterior);
        let holes: f64 = self.holes.iter().map(|h| ring_signed_area(&h.exterior).abs()).sum();
        let magnitude = (ext.abs() - holes).max(0.0);
        if ext >= 0.0 {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Absolute enclosed area, holes excluded.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Centroid of the covered region (holes accounted for), if the polygon
    /// has area.
    #[must_use]
    pub fn centroid(&self) -> Option<Point2> {
        boolean::centroid(self)
    }

    /// Inclusive containment: boundary points count as inside, hole
    /// interiors as outside.
    #[must_use]
    pub fn contains_point(&self, point: &Point2) -> bool {
        boolean::contains_point(self, point)
    }

    /// Returns the polygon with exterior and hole rings reversed, flipping
    /// CW ↔ CCW.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            exterior: self.exterior.iter().rev().copied().collect(),
            holes: self.holes.iter().map(Polygon2::reverse).collect(),
        }
    }

    /// Returns the closed boundary rings (exterior first, then holes) as
    /// polylines with the first point repeated at the end.
    #[must_use]
    pub fn polylines(&self) -> Vec<Polyline2> {
        let close = |ring: &[Point2]| {
            let mut points = ring.to_vec();
            points.push(ring[0]);
            Polyline2::new(points).ok()
        };
        std::iter::once(close(&self.exterior))
            .chain(self.holes.iter().map(|h| close(&h.exterior)))
            .flatten()
            .collect()
    }

    /// Shape equality: same exterior ring and same holes (in any order),
    /// independent of starting vertex and direction.
    #[must_use]
    pub fn coincides_with(&self, other: &Self, tol: Tolerance) -> bool {
        let eq = |a: &Point2, b: &Point2| tol.eq_point2(a, b);
        if !rings_coincide(&self.exterior, &other.exterior, eq) {
            return false;
        }
        if self.holes.len() != other.holes.len() {
            return false;
        }
        let mut used = vec![false; other.holes.len()];
        for hole in &self.holes {
            let found = other.holes.iter().enumerate().find(|(i, candidate)| {
                !used[*i] && rings_coincide(&hole.exterior, &candidate.exterior, eq)
            });
            match found {
                Some((i, _)) => used[i] = true,
                None => return false,
            }
        }
        true
    }

    /// Boolean intersection with another polygon, via the planar engine.
    #[must_use]
    pub fn intersect(&self, other: &Self, tol: Tolerance) -> Vec<Polygon2> {
        boolean::intersection(self, other, tol)
    }

    /// Boolean difference `self - other`, via the planar engine.
    #[must_use]
    pub fn difference(&self, other: &Self, tol: Tolerance) -> Vec<Polygon2> {
        boolean::difference(self, other, tol)
    }

    /// Boolean union with another polygon, via the planar engine.
    #[must_use]
    pub fn union(&self, other: &Self, tol: Tolerance) -> Vec<Polygon2> {
        boolean::union(self, other, tol)
    }

    /// Clips an open polyline to the polygon's interior.
    ///
    /// # Errors
    ///
    /// Propagates engine conversion failures.
    pub fn intersect_polyline(&self, polyline: &Polyline2, tol: Tolerance) -> Result<Vec<Polyline2>> {
        boolean::clip_polyline(self, polyline, tol)
    }

    /// Intersects the polygon with an infinite line, returning the covered
    /// stretches and tangent touch points.
    #[must_use]
    pub fn intersect_line(&self, line: &Line2, tol: Tolerance) -> Vec<LineHit2> {
        let intervals = clip::line_polygon_intervals(line, self, tol);
        intervals_to_hits_2(line, &intervals, tol)
    }

    /// Decomposes the polygon into hole-free triangles.
    ///
    /// # Errors
    ///
    /// Returns a triangulation error if the constraint rings are rejected.
    pub fn triangulate(&self, tol: Tolerance) -> Result<Vec<Polygon2>> {
        triangulate::triangulate(self, tol)
    }
}

impl Polygon3 {
    /// Creates a polygon from an exterior ring and hole polygons.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the exterior has fewer
    /// than three points or a hole carries holes of its own.
    pub fn new(exterior: Vec<Point3>, holes: Vec<Polygon3>) -> Result<Self> {
        if exterior.len() < 3 {
            return Err(GeometryError::DegenerateInput(
                "a polygon needs at least 3 exterior points".into(),
            )
            .into());
        }
        if holes.iter().any(|h| !h.holes.is_empty()) {
            return Err(GeometryError::DegenerateInput(
                "hole polygons must not have holes themselves".into(),
            )
            .into());
        }
        Ok(Self { exterior, holes })
    }

    /// Creates a hole-free polygon from an exterior ring.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for fewer than three
    /// points.
    pub fn from_exterior(exterior: Vec<Point3>) -> Result<Self> {
        Self::new(exterior, Vec::new())
    }

    /// Returns the exterior ring (first point not repeated).
    #[must_use]
    pub fn exterior(&self) -> &[Point3] {
        &self.exterior
    }

    /// Returns the hole polygons.
    #[must_use]
    pub fn holes(&self) -> &[Polygon3] {
        &self.holes
    }

    /// The defining plane, derived from the first three exterior points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if those points are
    /// collinear.
    pub fn plane(&self, tol: Tolerance) -> Result<Plane> {
        Plane::from_points(self.exterior[0], self.exterior[1], self.exterior[2], tol)
    }

    /// Projects the polygon onto the coordinate plane dropping the dominant
    /// axis of its normal.
    fn project(&self, tol: Tolerance) -> Result<(Polygon2, Axis, Plane)> {
        let plane = self.plane(tol)?;
        let axis = dominant_axis(plane.normal());
        let exterior = projection::project_points(&self.exterior, axis);
        let holes = self
            .holes
            .iter()
            .map(|h| Polygon2::from_exterior(projection::project_points(&h.exterior, axis)))
            .collect::<Result<Vec<_>>>()?;
        Ok((Polygon2::new(exterior, holes)?, axis, plane))
    }

    fn unproject(polygon: &Polygon2, axis: Axis, plane: &Plane, tol: Tolerance) -> Result<Self> {
        let exterior = polygon
            .exterior()
            .iter()
            .map(|p| projection::unproject_point(p, axis, plane, tol))
            .collect::<Result<Vec<_>>>()?;
        let holes = polygon
            .holes()
            .iter()
            .map(|h| {
                let ring = h
                    .exterior()
                    .iter()
                    .map(|p| projection::unproject_point(p, axis, plane, tol))
                    .collect::<Result<Vec<_>>>()?;
                Self::from_exterior(ring)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(exterior, holes)
    }

    /// Signed area via the dominant-axis projection, scaled by
    /// `|N| / N[axis]`.
    ///
    /// With the normal derived from the vertex winding the result is
    /// non-negative; orientation lives in the normal itself.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if no plane is
    /// defined.
    pub fn signed_area(&self, tol: Tolerance) -> Result<f64> {
        let (projected, axis, plane) = self.project(tol)?;
        let n = plane.normal();
        Ok(projected.signed_area() * n.norm() / n[axis.index()])
    }

    /// Absolute enclosed area, holes excluded.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if no plane is
    /// defined.
    pub fn area(&self, tol: Tolerance) -> Result<f64> {
        Ok(self.signed_area(tol)?.abs())
    }

    /// Centroid of the covered region, computed in the projection and
    /// re-embedded through the plane.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for a zero-area polygon,
    /// or a projection error if no plane is defined.
    pub fn centroid(&self, tol: Tolerance) -> Result<Point3> {
        let (projected, axis, plane) = self.project(tol)?;
        let c = projected.centroid().ok_or_else(|| {
            GeometryError::DegenerateInput("centroid of a zero-area polygon".into())
        })?;
        projection::unproject_point(&c, axis, &plane, tol)
    }

    /// Inclusive containment: the point must lie on the polygon's plane and
    /// inside the projected shape.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if no plane is
    /// defined.
    pub fn contains_point(&self, point: &Point3, tol: Tolerance) -> Result<bool> {
        let (projected, axis, plane) = self.project(tol)?;
        if !plane.contains_point(point, tol) {
            return Ok(false);
        }
        Ok(projected.contains_point(&projection::project_point(point, axis)))
    }

    /// Returns the polygon with exterior and hole rings reversed, flipping
    /// the derived plane normal.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            exterior: self.exterior.iter().rev().copied().collect(),
            holes: self.holes.iter().map(Polygon3::reverse).collect(),
        }
    }

    /// Returns the polygon translated by a vector.
    #[must_use]
    pub fn translate(&self, offset: &crate::math::Vector3) -> Self {
        Self {
            exterior: self.exterior.iter().map(|p| p + offset).collect(),
            holes: self.holes.iter().map(|h| h.translate(offset)).collect(),
        }
    }

    /// Returns the closed boundary rings (exterior first, then holes) as
    /// polylines with the first point repeated at the end.
    #[must_use]
    pub fn polylines(&self) -> Vec<Polyline3> {
        let close = |ring: &[Point3]| {
            let mut points = ring.to_vec();
            points.push(ring[0]);
            Polyline3::new(points).ok()
        };
        std::iter::once(close(&self.exterior))
            .chain(self.holes.iter().map(|h| close(&h.exterior)))
            .flatten()
            .collect()
    }

    /// Shape equality: same exterior ring and same holes (in any order),
    /// independent of starting vertex and direction.
    #[must_use]
    pub fn coincides_with(&self, other: &Self, tol: Tolerance) -> bool {
        let eq = |a: &Point3, b: &Point3| tol.eq_point3(a, b);
        if !rings_coincide(&self.exterior, &other.exterior, eq) {
            return false;
        }
        if self.holes.len() != other.holes.len() {
            return false;
        }
        let mut used = vec![false; other.holes.len()];
        for hole in &self.holes {
            let found = other.holes.iter().enumerate().find(|(i, candidate)| {
                !used[*i] && rings_coincide(&hole.exterior, &candidate.exterior, eq)
            });
            match found {
                Some((i, _)) => used[i] = true,
                None => return false,
            }
        }
        true
    }

    /// Parameter intervals of an in-plane line covered by the polygon.
    ///
    /// The projection is linear, so parameters found in 2D transfer 1:1 to
    /// the 3D line.
    fn in_plane_line_intervals(&self, line: &Line3, tol: Tolerance) -> Result<Vec<clip::Interval>> {
        let (projected, axis, _) = self.project(tol)?;
        let origin = projection::project_point(line.origin(), axis);
        let direction = projection::project_vector(line.direction(), axis);
        let line2 = Line2::new(origin, direction, tol).map_err(|_| {
            GeometryError::DegenerateProjection(
                "line direction vanishes in the polygon's projection".into(),
            )
        })?;
        Ok(clip::line_polygon_intervals(&line2, &projected, tol))
    }

    /// Intersects the polygon with an infinite 3D line.
    ///
    /// A line piercing the plane yields at most one point; an in-plane line
    /// is clipped in the dominant-axis projection and re-embedded.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if no plane is
    /// defined.
    pub fn intersect_line(&self, line: &Line3, tol: Tolerance) -> Result<Vec<LineHit3>> {
        let plane = self.plane(tol)?;
        match plane.intersect_line(line, tol) {
            LinePlaneRelation::Parallel => Ok(Vec::new()),
            LinePlaneRelation::Point { point, .. } => {
                if self.contains_point(&point, tol)? {
                    Ok(vec![LineHit3::Point(point)])
                } else {
                    Ok(Vec::new())
                }
            }
            LinePlaneRelation::OnPlane => {
                let intervals = self.in_plane_line_intervals(line, tol)?;
                Ok(intervals_to_hits_3(line, &intervals, tol))
            }
        }
    }

    /// Intersects two 3D polygons.
    ///
    /// Coplanar polygons delegate to the planar engine in the projection;
    /// polygons whose planes cross along a line are both clipped to that
    /// line and the resulting interval sets intersected.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if either polygon has
    /// no defined plane.
    pub fn intersect(&self, other: &Self, tol: Tolerance) -> Result<Vec<PolygonHit3>> {
        let plane_a = self.plane(tol)?;
        let plane_b = other.plane(tol)?;
        match plane_a.intersect_plane(&plane_b, tol) {
            PlanePairRelation::Parallel => Ok(Vec::new()),
            PlanePairRelation::Coincident => {
                let (poly_a, axis, plane) = self.project(tol)?;
                let (poly_b, _, _) = other.project_onto(axis, tol)?;
                poly_a
                    .intersect(&poly_b, tol)
                    .iter()
                    .map(|piece| Self::unproject(piece, axis, &plane, tol).map(PolygonHit3::Polygon))
                    .collect()
            }
            PlanePairRelation::Line(line) => {
                let ints_a = self.in_plane_line_intervals(&line, tol)?;
                let ints_b = other.in_plane_line_intervals(&line, tol)?;
                let common = clip::intersect_intervals(&ints_a, &ints_b, tol);
                Ok(intervals_to_hits_3(&line, &common, tol)
                    .into_iter()
                    .map(|hit| match hit {
                        LineHit3::Point(p) => PolygonHit3::Point(p),
                        LineHit3::Segment(s) => PolygonHit3::Segment(s),
                    })
                    .collect())
            }
        }
    }

    /// Projects onto a caller-chosen axis (used when two coplanar polygons
    /// must share one projection).
    fn project_onto(&self, axis: Axis, tol: Tolerance) -> Result<(Polygon2, Axis, Plane)> {
        let plane = self.plane(tol)?;
        let exterior = projection::project_points(&self.exterior, axis);
        let holes = self
            .holes
            .iter()
            .map(|h| Polygon2::from_exterior(projection::project_points(&h.exterior, axis)))
            .collect::<Result<Vec<_>>>()?;
        Ok((Polygon2::new(exterior, holes)?, axis, plane))
    }

    /// Boolean difference `self - other`.
    ///
    /// Only a coplanar polygon removes area; any other overlap has measure
    /// zero, so the receiver is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if either polygon has
    /// no defined plane.
    pub fn difference(&self, other: &Self, tol: Tolerance) -> Result<Vec<Polygon3>> {
        let plane_a = self.plane(tol)?;
        let plane_b = other.plane(tol)?;
        match plane_a.intersect_plane(&plane_b, tol) {
            PlanePairRelation::Coincident => {
                let (poly_a, axis, plane) = self.project(tol)?;
                let (poly_b, _, _) = other.project_onto(axis, tol)?;
                poly_a
                    .difference(&poly_b, tol)
                    .iter()
                    .map(|piece| Self::unproject(piece, axis, &plane, tol))
                    .collect()
            }
            _ => Ok(vec![self.clone()]),
        }
    }

    /// Boolean union with a coplanar polygon; disjoint-plane operands are
    /// returned side by side.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if either polygon has
    /// no defined plane.
    pub fn union(&self, other: &Self, tol: Tolerance) -> Result<Vec<Polygon3>> {
        let plane_a = self.plane(tol)?;
        let plane_b = other.plane(tol)?;
        match plane_a.intersect_plane(&plane_b, tol) {
            PlanePairRelation::Coincident => {
                let (poly_a, axis, plane) = self.project(tol)?;
                let (poly_b, _, _) = other.project_onto(axis, tol)?;
                poly_a
                    .union(&poly_b, tol)
                    .iter()
                    .map(|piece| Self::unproject(piece, axis, &plane, tol))
                    .collect()
            }
            _ => Ok(vec![self.clone(), other.clone()]),
        }
    }

    /// Decomposes the polygon into hole-free triangles in the projection and
    /// re-embeds them.
    ///
    /// # Errors
    ///
    /// Returns a projection error if no plane is defined, or a triangulation
    /// error from the CDT.
    pub fn triangulate(&self, tol: Tolerance) -> Result<Vec<Polygon3>> {
        let (projected, axis, plane) = self.project(tol)?;
        projected
            .triangulate(tol)?
            .iter()
            .map(|t| Self::unproject(t, axis, &plane, tol))
            .collect()
    }
}
