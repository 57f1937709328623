//! Closed solids assembled from planar polygon faces.
//!
//! Every solid maintains the outward-normal invariant: each face's plane
//! normal (derived from its vertex winding) points away from the solid's
//! interior.

use crate::error::{GeometryError, Result};
use crate::math::vector::dominant_axis;
use crate::math::{projection, Point3, Tolerance, Vector3};

use super::plane::Plane;
use super::polygon::{ring_signed_area, Polygon3};

/// The four-vertex solid, the smallest closed polyhedron.
#[derive(Debug, Clone)]
pub struct Tetrahedron {
    vertices: [Point3; 4],
    faces: [Polygon3; 4],
}

/// A closed solid bounded by planar polygon faces with outward normals.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    faces: Vec<Polygon3>,
}

/// A prism-like solid built by sweeping a base polygon along an extrusion
/// vector.
#[derive(Debug, Clone)]
pub struct ExtrudedPolyhedron {
    base: Polygon3,
    extrusion: Vector3,
    faces: Vec<Polygon3>,
}

/// Average of a vertex set, used as an interior witness for orientation
/// checks on convex cells.
fn vertex_average(points: &[Point3]) -> Point3 {
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / n)
}

/// Rewinds hole rings to run opposite the exterior ring.
///
/// The side-quad formula turns ring direction into wall orientation, so
/// inner walls only face the cavity when holes are wound against the
/// exterior; callers may pass either winding.
fn normalize_hole_windings(base: Polygon3, tol: Tolerance) -> Result<Polygon3> {
    if base.holes().is_empty() {
        return Ok(base);
    }
    let axis = dominant_axis(base.plane(tol)?.normal());
    let exterior_sign = ring_signed_area(&projection::project_points(base.exterior(), axis));
    let holes = base
        .holes()
        .iter()
        .map(|hole| {
            let sign = ring_signed_area(&projection::project_points(hole.exterior(), axis));
            if sign * exterior_sign > 0.0 {
                hole.reverse()
            } else {
                hole.clone()
            }
        })
        .collect();
    Polygon3::new(base.exterior().to_vec(), holes)
}

/// Flips the face if its plane normal points toward the witness point.
fn orient_outward(face: Polygon3, witness: &Point3, tol: Tolerance) -> Result<Polygon3> {
    let plane = face.plane(tol)?;
    if plane.signed_distance_to_point(witness) > 0.0 {
        Ok(face.reverse())
    } else {
        Ok(face)
    }
}

impl Tetrahedron {
    /// Builds a tetrahedron from four points in any order.
    ///
    /// Each of the four triangular faces is wound so that its normal points
    /// away from the opposite vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the points are coplanar
    /// (zero volume).
    pub fn from_points(points: [Point3; 4], tol: Tolerance) -> Result<Self> {
        let base = Plane::from_points(points[0], points[1], points[2], tol).map_err(|_| {
            GeometryError::DegenerateInput("tetrahedron base points are collinear".into())
        })?;
        if base.contains_point(&points[3], tol) {
            return Err(GeometryError::DegenerateInput(
                "four coplanar points do not form a tetrahedron".into(),
            )
            .into());
        }

        let witness = vertex_average(&points);
        let combos = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
        let mut faces = Vec::with_capacity(4);
        for combo in combos {
            let face = Polygon3::from_exterior(combo.iter().map(|&i| points[i]).collect())?;
            faces.push(orient_outward(face, &witness, tol)?);
        }
        // Exactly 4 faces were pushed above.
        let faces: [Polygon3; 4] = faces
            .try_into()
            .map_err(|_| GeometryError::DegenerateInput("tetrahedron face count".into()))?;

        Ok(Self {
            vertices: points,
            faces,
        })
    }

    /// Returns the four vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point3; 4] {
        &self.vertices
    }

    /// Returns the four outward-wound triangular faces.
    #[must_use]
    pub fn faces(&self) -> &[Polygon3; 4] {
        &self.faces
    }

    /// Centroid: the average of the four vertices.
    #[must_use]
    pub fn centroid(&self) -> Point3 {
        vertex_average(&self.vertices)
    }

    /// Volume via the scalar triple product.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let [a, b, c, d] = &self.vertices;
        let u = b - a;
        let v = c - a;
        let w = d - a;
        u.dot(&v.cross(&w)).abs() / 6.0
    }

    /// Returns the tetrahedron as a generic face-bounded solid.
    #[must_use]
    pub fn to_polyhedron(&self) -> Polyhedron {
        Polyhedron {
            faces: self.faces.to_vec(),
        }
    }
}

impl Polyhedron {
    /// Builds a solid from its boundary faces.
    ///
    /// The faces are taken as given; callers are responsible for closedness
    /// and outward winding.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for fewer than four faces
    /// (no closed solid exists).
    pub fn new(faces: Vec<Polygon3>) -> Result<Self> {
        if faces.len() < 4 {
            return Err(GeometryError::DegenerateInput(
                "a closed solid needs at least 4 faces".into(),
            )
            .into());
        }
        Ok(Self { faces })
    }

    /// Returns the boundary faces.
    #[must_use]
    pub fn faces(&self) -> &[Polygon3] {
        &self.faces
    }

    /// Centroid approximated as the average of all face vertices.
    #[must_use]
    pub fn centroid(&self) -> Point3 {
        let points: Vec<Point3> = self
            .faces
            .iter()
            .flat_map(|f| f.exterior().iter().copied())
            .collect();
        vertex_average(&points)
    }
}

impl ExtrudedPolyhedron {
    /// Sweeps a base polygon along an extrusion vector into a closed solid.
    ///
    /// The stored base is oriented so its normal opposes the extrusion (it
    /// becomes the bottom cap); the top cap is the reversed base translated
    /// by the extrusion, and each boundary edge grows a side quad.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the extrusion vector is
    /// zero or lies in the base plane, or a projection error if the base has
    /// no defined plane.
    pub fn new(base: Polygon3, extrusion: Vector3, tol: Tolerance) -> Result<Self> {
        if tol.is_zero(extrusion.norm()) {
            return Err(GeometryError::DegenerateInput(
                "extrusion vector must be non-zero".into(),
            )
            .into());
        }
        let plane = base.plane(tol)?;
        let alignment = plane.normal().dot(&extrusion);
        if tol.is_zero(alignment) {
            return Err(GeometryError::DegenerateInput(
                "extrusion vector lies in the base plane".into(),
            )
            .into());
        }
        // Bottom cap must face away from the sweep.
        let base = if alignment > 0.0 { base.reverse() } else { base };
        let base = normalize_hole_windings(base, tol)?;

        let top = base.reverse().translate(&extrusion);

        let mut faces = vec![base.clone(), top];
        let mut side_quads = |ring: &[Point3]| -> Result<()> {
            let n = ring.len();
            for i in 0..n {
                let a = ring[i];
                let b = ring[(i + 1) % n];
                faces.push(Polygon3::from_exterior(vec![
                    a + extrusion,
                    b + extrusion,
                    b,
                    a,
                ])?);
            }
            Ok(())
        };
        side_quads(base.exterior())?;
        for hole in base.holes() {
            side_quads(hole.exterior())?;
        }

        Ok(Self {
            base,
            extrusion,
            faces,
        })
    }

    /// Returns the bottom cap (normal opposing the extrusion).
    #[must_use]
    pub fn base(&self) -> &Polygon3 {
        &self.base
    }

    /// Returns the extrusion vector.
    #[must_use]
    pub fn extrusion(&self) -> &Vector3 {
        &self.extrusion
    }

    /// Returns all boundary faces: bottom cap, top cap, then side quads.
    #[must_use]
    pub fn faces(&self) -> &[Polygon3] {
        &self.faces
    }

    /// Returns the solid as a generic face-bounded polyhedron.
    ///
    /// # Errors
    ///
    /// Propagates the face-count check (an extrusion always has ≥ 5 faces,
    /// so this cannot fail in practice).
    pub fn to_polyhedron(&self) -> Result<Polyhedron> {
        Polyhedron::new(self.faces.clone())
    }

    /// Decomposes the solid into tetrahedra: the base is triangulated and
    /// each triangular prism is split into three tetrahedra.
    ///
    /// # Errors
    ///
    /// Propagates triangulation errors from the base polygon.
    pub fn tetrahedra(&self, tol: Tolerance) -> Result<Vec<Tetrahedron>> {
        let triangles = self.base.triangulate(tol)?;
        let v = self.extrusion;
        let mut cells = Vec::with_capacity(triangles.len() * 3);
        for tri in &triangles {
            let ring = tri.exterior();
            let (a, b, c) = (ring[0], ring[1], ring[2]);
            let (at, bt, ct) = (a + v, b + v, c + v);
            cells.push(Tetrahedron::from_points([a, b, c, at], tol)?);
            cells.push(Tetrahedron::from_points([b, c, at, bt], tol)?);
            cells.push(Tetrahedron::from_points([c, at, bt, ct], tol)?);
        }
        Ok(cells)
    }

    /// Volume as the sum of the tetrahedral decomposition.
    ///
    /// # Errors
    ///
    /// Propagates triangulation errors from the base polygon.
    pub fn volume(&self, tol: Tolerance) -> Result<f64> {
        Ok(self.tetrahedra(tol)?.iter().map(Tetrahedron::volume).sum())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_square_base() -> Polygon3 {
        Polygon3::from_exterior(vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ])
        .unwrap()
    }

    fn assert_faces_outward(faces: &[Polygon3], interior: &Point3) {
        for face in faces {
            let plane = face.plane(tol()).unwrap();
            let d = plane.signed_distance_to_point(interior);
            assert!(d < 0.0, "face normal points inward (distance {d})");
        }
    }

    #[test]
    fn coplanar_points_are_rejected() {
        let err = Tetrahedron::from_points(
            [
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(0.0, 1.0, 0.0),
                p(1.0, 1.0, 0.0),
            ],
            tol(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn tetrahedron_faces_point_outward() {
        let tet = Tetrahedron::from_points(
            [
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(0.0, 1.0, 0.0),
                p(0.0, 0.0, 1.0),
            ],
            tol(),
        )
        .unwrap();
        assert_faces_outward(tet.faces(), &tet.centroid());
    }

    #[test]
    fn vertex_order_does_not_affect_orientation() {
        let points = [
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(0.0, 2.0, 0.0),
            p(0.0, 0.0, 2.0),
        ];
        let shuffled = [points[3], points[1], points[0], points[2]];
        let a = Tetrahedron::from_points(points, tol()).unwrap();
        let b = Tetrahedron::from_points(shuffled, tol()).unwrap();
        assert_faces_outward(a.faces(), &a.centroid());
        assert_faces_outward(b.faces(), &b.centroid());
        assert!(tol().eq(a.volume(), b.volume()));
    }

    #[test]
    fn unit_tetrahedron_volume() {
        let tet = Tetrahedron::from_points(
            [
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(0.0, 1.0, 0.0),
                p(0.0, 0.0, 1.0),
            ],
            tol(),
        )
        .unwrap();
        assert_relative_eq!(tet.volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn polyhedron_needs_four_faces() {
        let f = unit_square_base();
        assert!(Polyhedron::new(vec![f.clone(), f.clone(), f]).is_err());
    }

    #[test]
    fn extrusion_of_unit_square_is_a_cube() {
        let solid =
            ExtrudedPolyhedron::new(unit_square_base(), Vector3::new(0.0, 0.0, 1.0), tol())
                .unwrap();
        assert_eq!(solid.faces().len(), 6);
        let interior = p(0.5, 0.5, 0.5);
        assert_faces_outward(solid.faces(), &interior);

        // Bottom cap faces down, top cap faces up.
        let bottom = solid.base().plane(tol()).unwrap();
        assert!(bottom.normal().z < 0.0);
        let top = solid.faces()[1].plane(tol()).unwrap();
        assert!(top.normal().z > 0.0);
    }

    #[test]
    fn downward_extrusion_is_normalised() {
        let solid =
            ExtrudedPolyhedron::new(unit_square_base(), Vector3::new(0.0, 0.0, -1.0), tol())
                .unwrap();
        let interior = p(0.5, 0.5, -0.5);
        assert_faces_outward(solid.faces(), &interior);
    }

    #[test]
    fn in_plane_extrusion_is_rejected() {
        let err =
            ExtrudedPolyhedron::new(unit_square_base(), Vector3::new(1.0, 0.0, 0.0), tol());
        assert!(err.is_err());
        let zero = ExtrudedPolyhedron::new(unit_square_base(), Vector3::zeros(), tol());
        assert!(zero.is_err());
    }

    #[test]
    fn cube_decomposes_into_tetrahedra_of_full_volume() {
        let solid =
            ExtrudedPolyhedron::new(unit_square_base(), Vector3::new(0.0, 0.0, 1.0), tol())
                .unwrap();
        let cells = solid.tetrahedra(tol()).unwrap();
        assert_eq!(cells.len(), 6);
        let total: f64 = cells.iter().map(Tetrahedron::volume).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        assert_relative_eq!(solid.volume(tol()).unwrap(), 1.0, epsilon = 1e-12);
        for cell in &cells {
            assert_faces_outward(cell.faces(), &cell.centroid());
        }
    }

    #[test]
    fn holed_base_grows_inner_walls() {
        let hole = Polygon3::from_exterior(vec![
            p(1.0, 1.0, 0.0),
            p(3.0, 1.0, 0.0),
            p(3.0, 3.0, 0.0),
            p(1.0, 3.0, 0.0),
        ])
        .unwrap();
        let base = Polygon3::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(4.0, 0.0, 0.0),
                p(4.0, 4.0, 0.0),
                p(0.0, 4.0, 0.0),
            ],
            vec![hole],
        )
        .unwrap();
        let solid = ExtrudedPolyhedron::new(base, Vector3::new(0.0, 0.0, 1.0), tol()).unwrap();
        // 2 caps + 4 outer walls + 4 inner walls.
        assert_eq!(solid.faces().len(), 10);
        assert!(tol().eq(solid.volume(tol()).unwrap(), 12.0));
    }

    #[test]
    fn inner_walls_face_the_cavity_for_either_hole_winding() {
        let cavity = p(2.0, 2.0, 0.5);
        let ccw_hole = vec![
            p(1.0, 1.0, 0.0),
            p(3.0, 1.0, 0.0),
            p(3.0, 3.0, 0.0),
            p(1.0, 3.0, 0.0),
        ];
        let cw_hole: Vec<Point3> = ccw_hole.iter().rev().copied().collect();
        for ring in [ccw_hole, cw_hole] {
            let hole = Polygon3::from_exterior(ring).unwrap();
            let base = Polygon3::new(
                vec![
                    p(0.0, 0.0, 0.0),
                    p(4.0, 0.0, 0.0),
                    p(4.0, 4.0, 0.0),
                    p(0.0, 4.0, 0.0),
                ],
                vec![hole],
            )
            .unwrap();
            let solid =
                ExtrudedPolyhedron::new(base, Vector3::new(0.0, 0.0, 1.0), tol()).unwrap();
            // Faces: bottom cap, top cap, 4 outer walls, then the hole walls.
            assert_eq!(solid.faces().len(), 10);
            for wall in &solid.faces()[6..] {
                let d = wall
                    .plane(tol())
                    .unwrap()
                    .signed_distance_to_point(&cavity);
                assert!(d > 0.0, "inner wall faces the material (distance {d})");
            }
        }
    }

    #[test]
    fn polyhedron_centroid_of_cube() {
        let solid =
            ExtrudedPolyhedron::new(unit_square_base(), Vector3::new(0.0, 0.0, 1.0), tol())
                .unwrap();
        let poly = solid.to_polyhedron().unwrap();
        let c = poly.centroid();
        assert!(tol().eq_point3(&c, &p(0.5, 0.5, 0.5)));
    }
}
