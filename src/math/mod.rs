pub mod projection;
pub mod vector;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Default absolute tolerance for floating-point comparisons.
pub const ABS_TOL: f64 = 1e-7;

/// Absolute-tolerance comparison context.
///
/// Every "equal enough" decision in the kernel routes through one of these
/// predicates. The tolerance is threaded as an explicit value rather than a
/// process-wide constant so call sites with different coordinate scales can
/// coexist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance(pub f64);

impl Default for Tolerance {
    fn default() -> Self {
        Self(ABS_TOL)
    }
}

impl Tolerance {
    /// Creates a tolerance with the given absolute epsilon.
    #[must_use]
    pub fn new(eps: f64) -> Self {
        Self(eps)
    }

    /// Returns true if `a` and `b` differ by at most the tolerance.
    #[must_use]
    pub fn eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.0
    }

    /// Returns true if `x` is within the tolerance of zero.
    #[must_use]
    pub fn is_zero(self, x: f64) -> bool {
        x.abs() <= self.0
    }

    /// Coordinate-wise equality of two 2D points.
    #[must_use]
    pub fn eq_point2(self, a: &Point2, b: &Point2) -> bool {
        self.eq(a.x, b.x) && self.eq(a.y, b.y)
    }

    /// Coordinate-wise equality of two 3D points.
    #[must_use]
    pub fn eq_point3(self, a: &Point3, b: &Point3) -> bool {
        self.eq(a.x, b.x) && self.eq(a.y, b.y) && self.eq(a.z, b.z)
    }

    /// Coordinate-wise equality of two 2D vectors.
    #[must_use]
    pub fn eq_vector2(self, a: &Vector2, b: &Vector2) -> bool {
        self.eq(a.x, b.x) && self.eq(a.y, b.y)
    }

    /// Coordinate-wise equality of two 3D vectors.
    #[must_use]
    pub fn eq_vector3(self, a: &Vector3, b: &Vector3) -> bool {
        self.eq(a.x, b.x) && self.eq(a.y, b.y) && self.eq(a.z, b.z)
    }
}

/// A coordinate axis in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// The axis index (`X = 0`, `Y = 1`, `Z = 2`).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}
