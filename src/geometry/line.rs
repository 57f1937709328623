use crate::error::{GeometryError, Result};
use crate::math::vector::{dominant_axis, is_collinear_2, is_collinear_3};
use crate::math::{projection, Point2, Point3, Tolerance, Vector2, Vector3};

/// An infinite 2D line defined by an origin point and a direction vector.
///
/// The parametric form is: `P(t) = origin + t * direction`. The direction is
/// stored as given (not normalised) so parameter values keep caller scale.
#[derive(Debug, Clone)]
pub struct Line2 {
    origin: Point2,
    direction: Vector2,
}

/// An infinite 3D line defined by an origin point and a direction vector.
///
/// The parametric form is: `P(t) = origin + t * direction`.
#[derive(Debug, Clone)]
pub struct Line3 {
    origin: Point3,
    direction: Vector3,
}

/// Relationship between two 2D lines.
#[derive(Debug, Clone)]
pub enum LineLineRelation2 {
    /// The lines describe the same infinite line.
    Collinear,
    /// Parallel, non-collinear — no intersection.
    Parallel,
    /// The lines cross at a single point.
    Point(Point2),
}

/// Relationship between two 3D lines.
#[derive(Debug, Clone)]
pub enum LineLineRelation3 {
    /// The lines describe the same infinite line.
    Collinear,
    /// Parallel, non-collinear — no intersection.
    Parallel,
    /// The lines meet at a single point.
    Point(Point3),
    /// Non-parallel lines that do not meet.
    Skew,
}

/// Parametric 2D line-line solve.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not
/// parallel.
#[must_use]
pub(crate) fn solve_line_line_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
    tol: Tolerance,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    if tol.is_zero(cross) {
        return None;
    }
    let d = p2 - p1;
    let t = d.perp(d2) / cross;
    let u = d.perp(d1) / cross;
    Some((t, u))
}

impl Line2 {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the direction vector is
    /// zero-length.
    pub fn new(origin: Point2, direction: Vector2, tol: Tolerance) -> Result<Self> {
        if tol.is_zero(direction.norm()) {
            return Err(GeometryError::DegenerateInput(
                "line direction must be non-zero".into(),
            )
            .into());
        }
        Ok(Self { origin, direction })
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Evaluates the parametric form at `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.direction * t
    }

    /// Solves for the parameter of a point assumed to lie on the line.
    ///
    /// Tries each axis in turn and uses the first one where the direction
    /// component is non-negligible.
    #[must_use]
    pub fn param_at(&self, point: &Point2, tol: Tolerance) -> f64 {
        if !tol.is_zero(self.direction.x) {
            (point.x - self.origin.x) / self.direction.x
        } else {
            (point.y - self.origin.y) / self.direction.y
        }
    }

    /// Returns true if the point lies on the line within tolerance.
    #[must_use]
    pub fn contains(&self, point: &Point2, tol: Tolerance) -> bool {
        let t = self.param_at(point, tol);
        tol.eq_point2(&self.point_at(t), point)
    }

    /// Returns true if both lines describe the same infinite line.
    #[must_use]
    pub fn coincides_with(&self, other: &Self, tol: Tolerance) -> bool {
        self.contains(&other.origin, tol)
            && is_collinear_2(&self.direction, &other.direction, tol)
    }

    /// Intersects two infinite 2D lines.
    #[must_use]
    pub fn intersect(&self, other: &Self, tol: Tolerance) -> LineLineRelation2 {
        if is_collinear_2(&self.direction, &other.direction, tol) {
            if self.contains(&other.origin, tol) {
                LineLineRelation2::Collinear
            } else {
                LineLineRelation2::Parallel
            }
        } else {
            match solve_line_line_2d(&self.origin, &self.direction, &other.origin, &other.direction, tol)
            {
                Some((t, _)) => LineLineRelation2::Point(self.point_at(t)),
                // Unreachable given the collinearity check, but kept total.
                None => LineLineRelation2::Parallel,
            }
        }
    }
}

impl Line3 {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the direction vector is
    /// zero-length.
    pub fn new(origin: Point3, direction: Vector3, tol: Tolerance) -> Result<Self> {
        if tol.is_zero(direction.norm()) {
            return Err(GeometryError::DegenerateInput(
                "line direction must be non-zero".into(),
            )
            .into());
        }
        Ok(Self { origin, direction })
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Evaluates the parametric form at `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Solves for the parameter of a point assumed to lie on the line.
    #[must_use]
    pub fn param_at(&self, point: &Point3, tol: Tolerance) -> f64 {
        if !tol.is_zero(self.direction.x) {
            (point.x - self.origin.x) / self.direction.x
        } else if !tol.is_zero(self.direction.y) {
            (point.y - self.origin.y) / self.direction.y
        } else {
            (point.z - self.origin.z) / self.direction.z
        }
    }

    /// Returns true if the point lies on the line within tolerance.
    #[must_use]
    pub fn contains(&self, point: &Point3, tol: Tolerance) -> bool {
        let t = self.param_at(point, tol);
        tol.eq_point3(&self.point_at(t), point)
    }

    /// Returns true if both lines describe the same infinite line.
    #[must_use]
    pub fn coincides_with(&self, other: &Self, tol: Tolerance) -> bool {
        self.contains(&other.origin, tol)
            && is_collinear_3(&self.direction, &other.direction, tol)
    }

    /// Intersects two infinite 3D lines.
    ///
    /// Non-parallel lines are solved in the 2D projection that drops the
    /// dominant axis of `d1 × d2`; the candidate point is then verified
    /// against both lines, since 3D skew lines generally miss.
    #[must_use]
    pub fn intersect(&self, other: &Self, tol: Tolerance) -> LineLineRelation3 {
        let cross = self.direction.cross(&other.direction);
        if tol.is_zero(cross.norm()) {
            return if self.contains(&other.origin, tol) {
                LineLineRelation3::Collinear
            } else {
                LineLineRelation3::Parallel
            };
        }

        // The dropped axis carries the largest cross component, so the
        // projected directions cannot become collinear.
        let axis = dominant_axis(&cross);
        let p1 = projection::project_point(&self.origin, axis);
        let d1 = projection::project_vector(&self.direction, axis);
        let p2 = projection::project_point(&other.origin, axis);
        let d2 = projection::project_vector(&other.direction, axis);

        match solve_line_line_2d(&p1, &d1, &p2, &d2, tol) {
            Some((t, u)) => {
                let a = self.point_at(t);
                let b = other.point_at(u);
                if tol.eq_point3(&a, &b) {
                    LineLineRelation3::Point(a)
                } else {
                    LineLineRelation3::Skew
                }
            }
            None => LineLineRelation3::Skew,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    fn p2(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn p3(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Line2::new(p2(0.0, 0.0), Vector2::zeros(), tol()).is_err());
        assert!(Line3::new(p3(0.0, 0.0, 0.0), Vector3::zeros(), tol()).is_err());
    }

    #[test]
    fn point_param_round_trip_2d() {
        let line = Line2::new(p2(1.0, 2.0), Vector2::new(3.0, -1.0), tol()).unwrap();
        for t in [-2.5, 0.0, 0.25, 7.0] {
            let pt = line.point_at(t);
            assert!(line.contains(&pt, tol()));
            assert!(tol().eq(line.param_at(&pt, tol()), t));
        }
    }

    #[test]
    fn point_param_round_trip_3d() {
        let line = Line3::new(p3(0.0, 1.0, -1.0), Vector3::new(0.0, 0.0, 2.0), tol()).unwrap();
        for t in [-1.0, 0.5, 3.0] {
            let pt = line.point_at(t);
            assert!(line.contains(&pt, tol()));
            assert!(tol().eq(line.param_at(&pt, tol()), t));
        }
        assert!(!line.contains(&p3(1.0, 1.0, 0.0), tol()));
    }

    #[test]
    fn crossing_diagonals_meet_at_origin() {
        let a = Line2::new(p2(0.0, 0.0), Vector2::new(1.0, 1.0), tol()).unwrap();
        let b = Line2::new(p2(0.0, 0.0), Vector2::new(1.0, -1.0), tol()).unwrap();
        match a.intersect(&b, tol()) {
            LineLineRelation2::Point(pt) => {
                assert!(tol().eq_point2(&pt, &p2(0.0, 0.0)));
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn parallel_and_collinear_lines_2d() {
        let a = Line2::new(p2(0.0, 0.0), Vector2::new(1.0, 0.0), tol()).unwrap();
        let b = Line2::new(p2(0.0, 1.0), Vector2::new(2.0, 0.0), tol()).unwrap();
        assert!(matches!(a.intersect(&b, tol()), LineLineRelation2::Parallel));

        let c = Line2::new(p2(5.0, 0.0), Vector2::new(-1.0, 0.0), tol()).unwrap();
        assert!(matches!(a.intersect(&c, tol()), LineLineRelation2::Collinear));
        assert!(a.coincides_with(&c, tol()));
    }

    #[test]
    fn lines_meeting_in_space() {
        let a = Line3::new(p3(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 0.0), tol()).unwrap();
        let b = Line3::new(p3(2.0, 0.0, 0.0), Vector3::new(-1.0, 1.0, 0.0), tol()).unwrap();
        match a.intersect(&b, tol()) {
            LineLineRelation3::Point(pt) => {
                assert!(tol().eq_point3(&pt, &p3(1.0, 1.0, 0.0)));
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn skew_lines_miss() {
        let a = Line3::new(p3(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), tol()).unwrap();
        let b = Line3::new(p3(0.0, 1.0, 1.0), Vector3::new(0.0, 1.0, 0.0), tol()).unwrap();
        assert!(matches!(a.intersect(&b, tol()), LineLineRelation3::Skew));
    }

    #[test]
    fn parallel_lines_3d() {
        let a = Line3::new(p3(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0), tol()).unwrap();
        let b = Line3::new(p3(0.0, 0.0, 1.0), Vector3::new(-2.0, -2.0, -2.0), tol()).unwrap();
        assert!(matches!(a.intersect(&b, tol()), LineLineRelation3::Parallel));

        let c = Line3::new(p3(1.0, 1.0, 1.0), Vector3::new(3.0, 3.0, 3.0), tol()).unwrap();
        assert!(matches!(a.intersect(&c, tol()), LineLineRelation3::Collinear));
    }
}
