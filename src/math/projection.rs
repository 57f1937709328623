//! Dimension reduction: project 3D entities onto the coordinate plane that
//! drops a chosen axis, and re-embed 2D results through a plane.
//!
//! The retained coordinates follow a fixed cyclic order so orientation is
//! preserved: drop X → `(y, z)`, drop Y → `(z, x)`, drop Z → `(x, y)`.

use crate::error::Result;
use crate::geometry::plane::Plane;

use super::{Axis, Point2, Point3, Tolerance, Vector2, Vector3};

/// Projects a 3D point by dropping the given axis.
#[must_use]
pub fn project_point(p: &Point3, axis: Axis) -> Point2 {
    match axis {
        Axis::X => Point2::new(p.y, p.z),
        Axis::Y => Point2::new(p.z, p.x),
        Axis::Z => Point2::new(p.x, p.y),
    }
}

/// Projects a 3D vector by dropping the given axis.
#[must_use]
pub fn project_vector(v: &Vector3, axis: Axis) -> Vector2 {
    match axis {
        Axis::X => Vector2::new(v.y, v.z),
        Axis::Y => Vector2::new(v.z, v.x),
        Axis::Z => Vector2::new(v.x, v.y),
    }
}

/// Re-embeds a projected 2D point into 3D, solving the plane equation for
/// the dropped coordinate.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateProjection`](crate::error::GeometryError::DegenerateProjection)
/// if the plane normal has no component along the dropped axis. Choosing the
/// dominant axis of the plane normal guarantees this cannot happen.
pub fn unproject_point(p: &Point2, axis: Axis, plane: &Plane, tol: Tolerance) -> Result<Point3> {
    match axis {
        Axis::X => {
            let x = plane.solve_x(p.x, p.y, tol)?;
            Ok(Point3::new(x, p.x, p.y))
        }
        Axis::Y => {
            let y = plane.solve_y(p.x, p.y, tol)?;
            Ok(Point3::new(p.y, y, p.x))
        }
        Axis::Z => {
            let z = plane.solve_z(p.x, p.y, tol)?;
            Ok(Point3::new(p.x, p.y, z))
        }
    }
}

/// Projects a slice of 3D points by dropping the given axis.
#[must_use]
pub fn project_points(points: &[Point3], axis: Axis) -> Vec<Point2> {
    points.iter().map(|p| project_point(p, axis)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::vector::dominant_axis;

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    #[test]
    fn cyclic_projection_order() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(project_point(&p, Axis::X), Point2::new(2.0, 3.0));
        assert_eq!(project_point(&p, Axis::Y), Point2::new(3.0, 1.0));
        assert_eq!(project_point(&p, Axis::Z), Point2::new(1.0, 2.0));
    }

    #[test]
    fn round_trip_on_tilted_plane() {
        let plane = Plane::new(
            Point3::new(1.0, 1.0, 1.0),
            Vector3::new(1.0, 2.0, 3.0),
            tol(),
        )
        .unwrap();
        let axis = dominant_axis(plane.normal());
        assert_eq!(axis, Axis::Z);

        // A point on the plane: pick (x, y), solve z.
        let z = plane.solve_z(2.0, -1.0, tol()).unwrap();
        let on_plane = Point3::new(2.0, -1.0, z);

        let projected = project_point(&on_plane, axis);
        let back = unproject_point(&projected, axis, &plane, tol()).unwrap();
        assert!(tol().eq_point3(&back, &on_plane));
    }

    #[test]
    fn round_trip_for_each_axis() {
        for (normal, probe) in [
            (Vector3::new(5.0, 0.5, 0.5), Point2::new(0.25, 0.75)),
            (Vector3::new(0.5, 5.0, 0.5), Point2::new(-1.0, 2.0)),
            (Vector3::new(0.5, 0.5, 5.0), Point2::new(3.0, 0.0)),
        ] {
            let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), normal, tol()).unwrap();
            let axis = dominant_axis(plane.normal());
            let embedded = unproject_point(&probe, axis, &plane, tol()).unwrap();
            assert!(plane.contains_point(&embedded, tol()));
            assert!(tol().eq_point2(&project_point(&embedded, axis), &probe));
        }
    }

    #[test]
    fn unproject_off_dominant_axis_fails() {
        let plane = Plane::new(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            tol(),
        )
        .unwrap();
        // Dropping X would need a normal x component.
        assert!(unproject_point(&Point2::new(0.0, 0.0), Axis::X, &plane, tol()).is_err());
    }
}
