use crate::error::{GeometryError, Result};

use super::{Axis, Tolerance, Vector2, Vector3};

/// Rotates a 2D vector 90° counter-clockwise.
#[must_use]
pub fn perp_vector(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// 2D perp product: `perp_vector(u) · v`.
///
/// Positive when `v` is counter-clockwise from `u`, zero when collinear.
#[must_use]
pub fn perp_product(u: &Vector2, v: &Vector2) -> f64 {
    u.perp(v)
}

/// Normalises a 2D vector.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateInput`] if the vector has zero length.
pub fn normalize_checked_2(v: &Vector2, tol: Tolerance) -> Result<Vector2> {
    let len = v.norm();
    if tol.is_zero(len) {
        return Err(GeometryError::DegenerateInput(
            "cannot normalise a zero-length 2D vector".into(),
        )
        .into());
    }
    Ok(v / len)
}

/// Normalises a 3D vector.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateInput`] if the vector has zero length.
pub fn normalize_checked_3(v: &Vector3, tol: Tolerance) -> Result<Vector3> {
    let len = v.norm();
    if tol.is_zero(len) {
        return Err(GeometryError::DegenerateInput(
            "cannot normalise a zero-length 3D vector".into(),
        )
        .into());
    }
    Ok(v / len)
}

/// Angle between two 2D vectors in radians, in `[0, π]`.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateInput`] if either vector has zero length.
pub fn angle_between_2(u: &Vector2, v: &Vector2, tol: Tolerance) -> Result<f64> {
    let lu = u.norm();
    let lv = v.norm();
    if tol.is_zero(lu) || tol.is_zero(lv) {
        return Err(GeometryError::DegenerateInput(
            "angle is undefined for a zero-length vector".into(),
        )
        .into());
    }
    Ok((u.dot(v) / (lu * lv)).clamp(-1.0, 1.0).acos())
}

/// Angle between two 3D vectors in radians, in `[0, π]`.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateInput`] if either vector has zero length.
pub fn angle_between_3(u: &Vector3, v: &Vector3, tol: Tolerance) -> Result<f64> {
    let lu = u.norm();
    let lv = v.norm();
    if tol.is_zero(lu) || tol.is_zero(lv) {
        return Err(GeometryError::DegenerateInput(
            "angle is undefined for a zero-length vector".into(),
        )
        .into());
    }
    Ok((u.dot(v) / (lu * lv)).clamp(-1.0, 1.0).acos())
}

/// Returns true if two 2D vectors are collinear (perp product ≈ 0).
#[must_use]
pub fn is_collinear_2(u: &Vector2, v: &Vector2, tol: Tolerance) -> bool {
    tol.is_zero(perp_product(u, v))
}

/// Returns true if two 3D vectors are collinear (cross product length ≈ 0).
#[must_use]
pub fn is_collinear_3(u: &Vector3, v: &Vector3, tol: Tolerance) -> bool {
    tol.is_zero(u.cross(v).norm())
}

/// Returns true if two 2D vectors are collinear and point the same way.
#[must_use]
pub fn is_codirectional_2(u: &Vector2, v: &Vector2, tol: Tolerance) -> bool {
    is_collinear_2(u, v, tol) && u.dot(v) > 0.0
}

/// Returns true if two 3D vectors are collinear and point the same way.
#[must_use]
pub fn is_codirectional_3(u: &Vector3, v: &Vector3, tol: Tolerance) -> bool {
    is_collinear_3(u, v, tol) && u.dot(v) > 0.0
}

/// Returns true if two 2D vectors are collinear and point opposite ways.
#[must_use]
pub fn is_opposite_2(u: &Vector2, v: &Vector2, tol: Tolerance) -> bool {
    is_collinear_2(u, v, tol) && u.dot(v) < 0.0
}

/// Returns true if two 3D vectors are collinear and point opposite ways.
#[must_use]
pub fn is_opposite_3(u: &Vector3, v: &Vector3, tol: Tolerance) -> bool {
    is_collinear_3(u, v, tol) && u.dot(v) < 0.0
}

/// Returns true if two 2D vectors are perpendicular (dot product ≈ 0).
#[must_use]
pub fn is_perpendicular_2(u: &Vector2, v: &Vector2, tol: Tolerance) -> bool {
    tol.is_zero(u.dot(v))
}

/// Returns true if two 3D vectors are perpendicular (dot product ≈ 0).
#[must_use]
pub fn is_perpendicular_3(u: &Vector3, v: &Vector3, tol: Tolerance) -> bool {
    tol.is_zero(u.dot(v))
}

/// The axis aligned with the largest-magnitude component of `v`.
///
/// This is the axis a projection should drop: the plane with normal `v` is
/// "most perpendicular" to it, so the remaining two coordinates have the
/// least degenerate spread.
#[must_use]
pub fn dominant_axis(v: &Vector3) -> Axis {
    match v.iamax() {
        0 => Axis::X,
        1 => Axis::Y,
        _ => Axis::Z,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use approx::assert_relative_eq;

    use super::*;

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    #[test]
    fn perp_vector_rotates_ccw() {
        let n = perp_vector(&Vector2::new(1.0, 0.0));
        assert!(tol().eq(n.x, 0.0));
        assert!(tol().eq(n.y, 1.0));
    }

    #[test]
    fn perp_product_sign_tracks_orientation() {
        let u = Vector2::new(1.0, 0.0);
        assert!(perp_product(&u, &Vector2::new(0.0, 1.0)) > 0.0);
        assert!(perp_product(&u, &Vector2::new(0.0, -1.0)) < 0.0);
        assert!(tol().is_zero(perp_product(&u, &Vector2::new(3.0, 0.0))));
    }

    #[test]
    fn angle_between_perpendicular_vectors() {
        let a = angle_between_2(&Vector2::new(1.0, 0.0), &Vector2::new(0.0, 2.0), tol()).unwrap();
        assert_relative_eq!(a, FRAC_PI_2, epsilon = 1e-12);
        let a = angle_between_3(
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(1.0, 1.0, 0.0),
            tol(),
        )
        .unwrap();
        assert_relative_eq!(a, FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn angle_of_zero_vector_fails() {
        assert!(angle_between_2(&Vector2::zeros(), &Vector2::new(1.0, 0.0), tol()).is_err());
    }

    #[test]
    fn normalize_zero_vector_fails() {
        assert!(normalize_checked_3(&Vector3::zeros(), tol()).is_err());
        let n = normalize_checked_3(&Vector3::new(3.0, 0.0, 4.0), tol()).unwrap();
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn classification_2d() {
        let u = Vector2::new(1.0, 1.0);
        assert!(is_collinear_2(&u, &Vector2::new(-2.0, -2.0), tol()));
        assert!(is_codirectional_2(&u, &Vector2::new(0.5, 0.5), tol()));
        assert!(is_opposite_2(&u, &Vector2::new(-1.0, -1.0), tol()));
        assert!(is_perpendicular_2(&u, &Vector2::new(1.0, -1.0), tol()));
        assert!(!is_codirectional_2(&u, &Vector2::new(-1.0, -1.0), tol()));
    }

    #[test]
    fn classification_3d() {
        let u = Vector3::new(0.0, 0.0, 2.0);
        assert!(is_collinear_3(&u, &Vector3::new(0.0, 0.0, -7.0), tol()));
        assert!(is_codirectional_3(&u, &Vector3::new(0.0, 0.0, 0.1), tol()));
        assert!(is_opposite_3(&u, &Vector3::new(0.0, 0.0, -1.0), tol()));
        assert!(is_perpendicular_3(&u, &Vector3::new(1.0, 5.0, 0.0), tol()));
    }

    #[test]
    fn dominant_axis_picks_largest_component() {
        assert_eq!(dominant_axis(&Vector3::new(0.1, -5.0, 2.0)), Axis::Y);
        assert_eq!(dominant_axis(&Vector3::new(3.0, 1.0, -2.0)), Axis::X);
        assert_eq!(dominant_axis(&Vector3::new(0.0, 0.0, 1.0)), Axis::Z);
    }
}
