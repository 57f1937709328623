use crate::error::{GeometryError, Result};
use crate::math::vector::is_collinear_3;
use crate::math::{Point3, Tolerance, Vector3};

use super::line::Line3;

/// An infinite plane in 3D space, defined by an origin point and a normal
/// vector.
///
/// The normal need not be unit length. A point `Q` lies on the plane iff
/// `N · (Q - origin) = 0`.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    normal: Vector3,
}

/// Relationship of a line with a plane.
#[derive(Debug, Clone)]
pub enum LinePlaneRelation {
    /// Line lies entirely on the plane.
    OnPlane,
    /// Line is parallel to the plane and off it — no intersection.
    Parallel,
    /// Line pierces the plane at a single point.
    Point { point: Point3, t: f64 },
}

/// Relationship between two planes.
#[derive(Debug, Clone)]
pub enum PlanePairRelation {
    /// The planes describe the same infinite plane.
    Coincident,
    /// Parallel, non-coincident — no intersection.
    Parallel,
    /// The planes cross along a line.
    Line(Line3),
}

impl Plane {
    /// Creates a new plane from an origin and normal.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the normal is
    /// zero-length.
    pub fn new(origin: Point3, normal: Vector3, tol: Tolerance) -> Result<Self> {
        if tol.is_zero(normal.norm()) {
            return Err(GeometryError::DegenerateInput(
                "plane normal must be non-zero".into(),
            )
            .into());
        }
        Ok(Self { origin, normal })
    }

    /// Creates the plane through three points, with normal
    /// `(p1 - p0) × (p2 - p1)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if the points are
    /// collinear (no plane is defined).
    pub fn from_points(p0: Point3, p1: Point3, p2: Point3, tol: Tolerance) -> Result<Self> {
        let normal = (p1 - p0).cross(&(p2 - p1));
        if tol.is_zero(normal.norm()) {
            return Err(GeometryError::DegenerateProjection(
                "three collinear points do not define a plane".into(),
            )
            .into());
        }
        Ok(Self { origin: p0, normal })
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the normal vector of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance from a point to the plane: `N · (Q - origin) / |N|`.
    ///
    /// Positive on the normal side, negative on the opposite side.
    #[must_use]
    pub fn signed_distance_to_point(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin)) / self.normal.norm()
    }

    /// Returns true if the point lies on the plane within tolerance.
    #[must_use]
    pub fn contains_point(&self, point: &Point3, tol: Tolerance) -> bool {
        tol.is_zero(self.signed_distance_to_point(point))
    }

    /// Returns true if the line lies entirely on the plane.
    #[must_use]
    pub fn contains_line(&self, line: &Line3, tol: Tolerance) -> bool {
        self.contains_point(line.origin(), tol)
            && tol.is_zero(self.normal.dot(line.direction()))
    }

    /// Returns true if both planes describe the same infinite plane.
    #[must_use]
    pub fn coincides_with(&self, other: &Self, tol: Tolerance) -> bool {
        is_collinear_3(&self.normal, &other.normal, tol)
            && self.contains_point(&other.origin, tol)
    }

    /// Solves the plane equation for `x`, given `y` and `z`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if the normal's x
    /// component is ≈ 0 (no solution exists).
    pub fn solve_x(&self, y: f64, z: f64, tol: Tolerance) -> Result<f64> {
        if tol.is_zero(self.normal.x) {
            return Err(GeometryError::DegenerateProjection(
                "plane normal has no x component".into(),
            )
            .into());
        }
        let n = &self.normal;
        let o = &self.origin;
        Ok(o.x - (n.y * (y - o.y) + n.z * (z - o.z)) / n.x)
    }

    /// Solves the plane equation for `y`, given `z` and `x`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if the normal's y
    /// component is ≈ 0.
    pub fn solve_y(&self, z: f64, x: f64, tol: Tolerance) -> Result<f64> {
        if tol.is_zero(self.normal.y) {
            return Err(GeometryError::DegenerateProjection(
                "plane normal has no y component".into(),
            )
            .into());
        }
        let n = &self.normal;
        let o = &self.origin;
        Ok(o.y - (n.z * (z - o.z) + n.x * (x - o.x)) / n.y)
    }

    /// Solves the plane equation for `z`, given `x` and `y`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateProjection`] if the normal's z
    /// component is ≈ 0.
    pub fn solve_z(&self, x: f64, y: f64, tol: Tolerance) -> Result<f64> {
        if tol.is_zero(self.normal.z) {
            return Err(GeometryError::DegenerateProjection(
                "plane normal has no z component".into(),
            )
            .into());
        }
        let n = &self.normal;
        let o = &self.origin;
        Ok(o.z - (n.x * (x - o.x) + n.y * (y - o.y)) / n.z)
    }

    /// Intersects the plane with a line.
    #[must_use]
    pub fn intersect_line(&self, line: &Line3, tol: Tolerance) -> LinePlaneRelation {
        let denom = self.normal.dot(line.direction());
        let numer = self.normal.dot(&(self.origin - line.origin()));

        if tol.is_zero(denom) {
            if tol.is_zero(numer) {
                LinePlaneRelation::OnPlane
            } else {
                LinePlaneRelation::Parallel
            }
        } else {
            let t = numer / denom;
            LinePlaneRelation::Point {
                point: line.point_at(t),
                t,
            }
        }
    }

    /// Intersects the plane with another plane.
    ///
    /// The crossing line has direction `N1 × N2`; its origin is solved from
    /// the two plane equations as `origin + s * N1 + t * N2`.
    #[must_use]
    pub fn intersect_plane(&self, other: &Self, tol: Tolerance) -> PlanePairRelation {
        let na = &self.normal;
        let nb = &other.normal;
        let dir = na.cross(nb);

        if tol.is_zero(dir.norm()) {
            return if self.contains_point(&other.origin, tol) {
                PlanePairRelation::Coincident
            } else {
                PlanePairRelation::Parallel
            };
        }

        // na·(p - oa) = 0 and nb·(p - ob) = 0 with p = oa + s*na + t*nb:
        //   s(na·na) + t(na·nb) = 0
        //   s(na·nb) + t(nb·nb) = nb·(ob - oa)
        let aa = na.dot(na);
        let ab = na.dot(nb);
        let bb = nb.dot(nb);
        let rhs = nb.dot(&(other.origin - self.origin));
        let denom = aa * bb - ab * ab;

        let origin = if tol.is_zero(denom) {
            self.origin
        } else {
            let s = -ab * rhs / denom;
            let t = aa * rhs / denom;
            self.origin + na * s + nb * t
        };

        match Line3::new(origin, dir, tol) {
            Ok(line) => PlanePairRelation::Line(line),
            // Unreachable: dir was checked non-zero above.
            Err(_) => PlanePairRelation::Parallel,
        }
    }
}
