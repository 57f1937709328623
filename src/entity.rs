//! Runtime dispatch over the kernel's geometric kinds.
//!
//! `GeometryEntity` is a closed tagged union; `intersect`, `difference`
//! and `union` route each operand pair to the typed operation. Disjoint
//! operands yield an empty result vector, never an error; pairs the
//! kernel cannot combine fail with `UnsupportedOperands`, and mixing 2D
//! with 3D fails with `DimensionMismatch`.

use crate::error::{GeometryError, Result};
use crate::geometry::line::{LineLineRelation2, LineLineRelation3};
use crate::geometry::plane::{LinePlaneRelation, PlanePairRelation};
use crate::geometry::polygon::PolygonHit3;
use crate::geometry::polyline::{LineHit2, LineHit3};
use crate::geometry::{Line2, Line3, Plane, Polygon2, Polygon3, Polyline2, Polyline3};
use crate::math::{Point2, Point3, Tolerance};

/// Any geometric value the kernel can dispatch on.
#[derive(Debug, Clone)]
pub enum GeometryEntity {
    Point2(Point2),
    Line2(Line2),
    Polyline2(Polyline2),
    Polygon2(Polygon2),
    Polygons2(Vec<Polygon2>),
    Point3(Point3),
    Line3(Line3),
    Plane(Plane),
    Polyline3(Polyline3),
    Polygon3(Polygon3),
    Polygons3(Vec<Polygon3>),
}

impl GeometryEntity {
    /// Human-readable kind tag, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Point2(_) => "Point2",
            Self::Line2(_) => "Line2",
            Self::Polyline2(_) => "Polyline2",
            Self::Polygon2(_) => "Polygon2",
            Self::Polygons2(_) => "Polygons2",
            Self::Point3(_) => "Point3",
            Self::Line3(_) => "Line3",
            Self::Plane(_) => "Plane",
            Self::Polyline3(_) => "Polyline3",
            Self::Polygon3(_) => "Polygon3",
            Self::Polygons3(_) => "Polygons3",
        }
    }

    /// Returns true for the planar (2D) kinds.
    #[must_use]
    pub fn is_2d(&self) -> bool {
        matches!(
            self,
            Self::Point2(_)
                | Self::Line2(_)
                | Self::Polyline2(_)
                | Self::Polygon2(_)
                | Self::Polygons2(_)
        )
    }

    fn check_dimensions(&self, other: &Self) -> Result<()> {
        if self.is_2d() == other.is_2d() {
            Ok(())
        } else {
            Err(GeometryError::DimensionMismatch {
                lhs: self.kind_name(),
                rhs: other.kind_name(),
            }
            .into())
        }
    }

    fn unsupported(&self, op: &'static str, other: &Self) -> crate::error::KernelError {
        GeometryError::UnsupportedOperands {
            op,
            lhs: self.kind_name(),
            rhs: other.kind_name(),
        }
        .into()
    }

    /// Intersects two entities.
    ///
    /// An empty vector means the operands are disjoint.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` for mixed 2D/3D operands, `UnsupportedOperands`
    /// for pairs outside the dispatch table; geometric errors propagate from
    /// the typed operations.
    pub fn intersect(&self, other: &Self, tol: Tolerance) -> Result<Vec<GeometryEntity>> {
        self.check_dimensions(other)?;
        match (self, other) {
            // Point against everything containing it.
            (Self::Point2(a), Self::Point2(b)) => {
                Ok(if tol.eq_point2(a, b) {
                    vec![Self::Point2(*a)]
                } else {
                    Vec::new()
                })
            }
            (Self::Point2(p), Self::Line2(l)) | (Self::Line2(l), Self::Point2(p)) => {
                Ok(if l.contains(p, tol) {
                    vec![Self::Point2(*p)]
                } else {
                    Vec::new()
                })
            }
            (Self::Point2(p), Self::Polyline2(c)) | (Self::Polyline2(c), Self::Point2(p)) => {
                Ok(if c.contains(p, tol) {
                    vec![Self::Point2(*p)]
                } else {
                    Vec::new()
                })
            }
            (Self::Point2(p), Self::Polygon2(poly)) | (Self::Polygon2(poly), Self::Point2(p)) => {
                Ok(if poly.contains_point(p) {
                    vec![Self::Point2(*p)]
                } else {
                    Vec::new()
                })
            }
            (Self::Point3(a), Self::Point3(b)) => {
                Ok(if tol.eq_point3(a, b) {
                    vec![Self::Point3(*a)]
                } else {
                    Vec::new()
                })
            }
            (Self::Point3(p), Self::Line3(l)) | (Self::Line3(l), Self::Point3(p)) => {
                Ok(if l.contains(p, tol) {
                    vec![Self::Point3(*p)]
                } else {
                    Vec::new()
                })
            }
            (Self::Point3(p), Self::Plane(pl)) | (Self::Plane(pl), Self::Point3(p)) => {
                Ok(if pl.contains_point(p, tol) {
                    vec![Self::Point3(*p)]
                } else {
                    Vec::new()
                })
            }
            (Self::Point3(p), Self::Polyline3(c)) | (Self::Polyline3(c), Self::Point3(p)) => {
                Ok(if c.contains(p, tol) {
                    vec![Self::Point3(*p)]
                } else {
                    Vec::new()
                })
            }
            (Self::Point3(p), Self::Polygon3(poly)) | (Self::Polygon3(poly), Self::Point3(p)) => {
                Ok(if poly.contains_point(p, tol)? {
                    vec![Self::Point3(*p)]
                } else {
                    Vec::new()
                })
            }

            // Line pairs.
            (Self::Line2(a), Self::Line2(b)) => Ok(match a.intersect(b, tol) {
                LineLineRelation2::Collinear => vec![Self::Line2(a.clone())],
                LineLineRelation2::Parallel => Vec::new(),
                LineLineRelation2::Point(pt) => vec![Self::Point2(pt)],
            }),
            (Self::Line3(a), Self::Line3(b)) => Ok(match a.intersect(b, tol) {
                LineLineRelation3::Collinear => vec![Self::Line3(a.clone())],
                LineLineRelation3::Parallel | LineLineRelation3::Skew => Vec::new(),
                LineLineRelation3::Point(pt) => vec![Self::Point3(pt)],
            }),

            // Line / plane and plane / plane.
            (Self::Line3(l), Self::Plane(pl)) | (Self::Plane(pl), Self::Line3(l)) => {
                Ok(match pl.intersect_line(l, tol) {
                    LinePlaneRelation::OnPlane => vec![Self::Line3(l.clone())],
                    LinePlaneRelation::Parallel => Vec::new(),
                    LinePlaneRelation::Point { point, .. } => vec![Self::Point3(point)],
                })
            }
            (Self::Plane(a), Self::Plane(b)) => Ok(match a.intersect_plane(b, tol) {
                PlanePairRelation::Coincident => vec![Self::Plane(a.clone())],
                PlanePairRelation::Parallel => Vec::new(),
                PlanePairRelation::Line(line) => vec![Self::Line3(line)],
            }),

            // Chains and polygons against lines.
            (Self::Polyline2(c), Self::Line2(l)) | (Self::Line2(l), Self::Polyline2(c)) => {
                Ok(c.intersect_line(l, tol).into_iter().map(Into::into).collect())
            }
            (Self::Polyline3(c), Self::Line3(l)) | (Self::Line3(l), Self::Polyline3(c)) => {
                Ok(c.intersect_line(l, tol).into_iter().map(Into::into).collect())
            }
            (Self::Polygon2(poly), Self::Line2(l)) | (Self::Line2(l), Self::Polygon2(poly)) => {
                Ok(poly.intersect_line(l, tol).into_iter().map(Into::into).collect())
            }
            (Self::Polygon3(poly), Self::Line3(l)) | (Self::Line3(l), Self::Polygon3(poly)) => {
                Ok(poly
                    .intersect_line(l, tol)?
                    .into_iter()
                    .map(Into::into)
                    .collect())
            }

            // Polygon against chain and polygon.
            (Self::Polygon2(poly), Self::Polyline2(c))
            | (Self::Polyline2(c), Self::Polygon2(poly)) => Ok(poly
                .intersect_polyline(c, tol)?
                .into_iter()
                .map(Self::Polyline2)
                .collect()),
            (Self::Polygon2(a), Self::Polygon2(b)) => {
                Ok(a.intersect(b, tol).into_iter().map(Self::Polygon2).collect())
            }
            (Self::Polygon3(a), Self::Polygon3(b)) => {
                Ok(a.intersect(b, tol)?.into_iter().map(Into::into).collect())
            }

            // Collections distribute over their members.
            (Self::Polygons2(list), _) => {
                let mut out = Vec::new();
                for poly in list {
                    out.extend(Self::Polygon2(poly.clone()).intersect(other, tol)?);
                }
                Ok(dedup_entities(out, tol))
            }
            (_, Self::Polygons2(list)) => {
                let mut out = Vec::new();
                for poly in list {
                    out.extend(self.intersect(&Self::Polygon2(poly.clone()), tol)?);
                }
                Ok(dedup_entities(out, tol))
            }
            (Self::Polygons3(list), _) => {
                let mut out = Vec::new();
                for poly in list {
                    out.extend(Self::Polygon3(poly.clone()).intersect(other, tol)?);
                }
                Ok(dedup_entities(out, tol))
            }
            (_, Self::Polygons3(list)) => {
                let mut out = Vec::new();
                for poly in list {
                    out.extend(self.intersect(&Self::Polygon3(poly.clone()), tol)?);
                }
                Ok(dedup_entities(out, tol))
            }

            _ => Err(self.unsupported("intersect", other)),
        }
    }

    /// Boolean difference `self - other`; defined for polygon operands.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` for mixed 2D/3D operands, `UnsupportedOperands`
    /// for non-polygon pairs.
    pub fn difference(&self, other: &Self, tol: Tolerance) -> Result<Vec<GeometryEntity>> {
        self.check_dimensions(other)?;
        match (self, other) {
            (Self::Polygon2(a), Self::Polygon2(b)) => {
                Ok(a.difference(b, tol).into_iter().map(Self::Polygon2).collect())
            }
            (Self::Polygon3(a), Self::Polygon3(b)) => {
                Ok(a.difference(b, tol)?.into_iter().map(Self::Polygon3).collect())
            }
            (Self::Polygons2(list), _) => {
                let mut out = Vec::new();
                for poly in list {
                    out.extend(Self::Polygon2(poly.clone()).difference(other, tol)?);
                }
                Ok(dedup_entities(out, tol))
            }
            (Self::Polygon2(_), Self::Polygons2(list)) => {
                // Subtracting a collection chains the subtractions.
                let mut current = vec![self.clone()];
                for poly in list {
                    let rhs = Self::Polygon2(poly.clone());
                    let mut next = Vec::new();
                    for piece in &current {
                        next.extend(piece.difference(&rhs, tol)?);
                    }
                    current = next;
                }
                Ok(current)
            }
            (Self::Polygons3(list), _) => {
                let mut out = Vec::new();
                for poly in list {
                    out.extend(Self::Polygon3(poly.clone()).difference(other, tol)?);
                }
                Ok(dedup_entities(out, tol))
            }
            (Self::Polygon3(_), Self::Polygons3(list)) => {
                let mut current = vec![self.clone()];
                for poly in list {
                    let rhs = Self::Polygon3(poly.clone());
                    let mut next = Vec::new();
                    for piece in &current {
                        next.extend(piece.difference(&rhs, tol)?);
                    }
                    current = next;
                }
                Ok(current)
            }
            _ => Err(self.unsupported("difference", other)),
        }
    }

    /// Boolean union; defined for polygon operands.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` for mixed 2D/3D operands, `UnsupportedOperands`
    /// for non-polygon pairs.
    pub fn union(&self, other: &Self, tol: Tolerance) -> Result<Vec<GeometryEntity>> {
        self.check_dimensions(other)?;
        match (self, other) {
            (Self::Polygon2(a), Self::Polygon2(b)) => {
                Ok(a.union(b, tol).into_iter().map(Self::Polygon2).collect())
            }
            (Self::Polygon3(a), Self::Polygon3(b)) => {
                Ok(a.union(b, tol)?.into_iter().map(Self::Polygon3).collect())
            }
            (Self::Polygons2(list), Self::Polygon2(b)) => {
                // Fold the collection member by member.
                let mut acc = vec![b.clone()];
                for poly in list {
                    acc = fold_union_2(&acc, poly, tol);
                }
                Ok(acc.into_iter().map(Self::Polygon2).collect())
            }
            (Self::Polygon2(a), Self::Polygons2(list)) => {
                let mut acc = vec![a.clone()];
                for poly in list {
                    acc = fold_union_2(&acc, poly, tol);
                }
                Ok(acc.into_iter().map(Self::Polygon2).collect())
            }
            _ => Err(self.unsupported("union", other)),
        }
    }
}

impl From<LineHit2> for GeometryEntity {
    fn from(hit: LineHit2) -> Self {
        match hit {
            LineHit2::Point(p) => Self::Point2(p),
            LineHit2::Segment(s) => Self::Polyline2(s),
        }
    }
}

impl From<LineHit3> for GeometryEntity {
    fn from(hit: LineHit3) -> Self {
        match hit {
            LineHit3::Point(p) => Self::Point3(p),
            LineHit3::Segment(s) => Self::Polyline3(s),
        }
    }
}

impl From<PolygonHit3> for GeometryEntity {
    fn from(hit: PolygonHit3) -> Self {
        match hit {
            PolygonHit3::Point(p) => Self::Point3(p),
            PolygonHit3::Segment(s) => Self::Polyline3(s),
            PolygonHit3::Polygon(p) => Self::Polygon3(p),
        }
    }
}

/// Unions every piece of `acc` with `next`, keeping disjoint results apart.
fn fold_union_2(acc: &[Polygon2], next: &Polygon2, tol: Tolerance) -> Vec<Polygon2> {
    let mut out = vec![next.clone()];
    for piece in acc {
        let mut merged = false;
        for i in 0..out.len() {
            let joined = out[i].union(piece, tol);
            if joined.len() == 1 {
                out[i] = joined.into_iter().next().unwrap_or_else(|| piece.clone());
                merged = true;
                break;
            }
        }
        if !merged {
            out.push(piece.clone());
        }
    }
    out
}

/// Drops duplicate points and coincident polygons produced by collection
/// dispatch.
fn dedup_entities(entities: Vec<GeometryEntity>, tol: Tolerance) -> Vec<GeometryEntity> {
    let mut out: Vec<GeometryEntity> = Vec::new();
    for e in entities {
        let duplicate = out.iter().any(|kept| match (kept, &e) {
            (GeometryEntity::Point2(a), GeometryEntity::Point2(b)) => tol.eq_point2(a, b),
            (GeometryEntity::Point3(a), GeometryEntity::Point3(b)) => tol.eq_point3(a, b),
            (GeometryEntity::Polygon2(a), GeometryEntity::Polygon2(b)) => a.coincides_with(b, tol),
            (GeometryEntity::Polygon3(a), GeometryEntity::Polygon3(b)) => a.coincides_with(b, tol),
            _ => false,
        });
        if !duplicate {
            out.push(e);
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::KernelError;
    use crate::math::{Vector2, Vector3};

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    fn p2(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn p3(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn square2(x0: f64, y0: f64, size: f64) -> Polygon2 {
        Polygon2::from_exterior(vec![
            p2(x0, y0),
            p2(x0 + size, y0),
            p2(x0 + size, y0 + size),
            p2(x0, y0 + size),
        ])
        .unwrap()
    }

    #[test]
    fn mixed_dimensions_are_rejected() {
        let a = GeometryEntity::Point2(p2(0.0, 0.0));
        let b = GeometryEntity::Point3(p3(0.0, 0.0, 0.0));
        let err = a.intersect(&b, tol()).unwrap_err();
        assert!(matches!(
            err,
            KernelError::Geometry(GeometryError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn point_point_equality() {
        let a = GeometryEntity::Point2(p2(1.0, 2.0));
        let b = GeometryEntity::Point2(p2(1.0, 2.0));
        let c = GeometryEntity::Point2(p2(3.0, 2.0));
        assert_eq!(a.intersect(&b, tol()).unwrap().len(), 1);
        assert!(a.intersect(&c, tol()).unwrap().is_empty());
    }

    #[test]
    fn point_on_line_both_orders() {
        let line = GeometryEntity::Line2(
            Line2::new(p2(0.0, 0.0), Vector2::new(1.0, 1.0), tol()).unwrap(),
        );
        let on = GeometryEntity::Point2(p2(2.0, 2.0));
        let off = GeometryEntity::Point2(p2(2.0, 1.0));
        assert_eq!(on.intersect(&line, tol()).unwrap().len(), 1);
        assert_eq!(line.intersect(&on, tol()).unwrap().len(), 1);
        assert!(line.intersect(&off, tol()).unwrap().is_empty());
    }

    #[test]
    fn crossing_lines_yield_a_point() {
        let a = GeometryEntity::Line2(
            Line2::new(p2(0.0, 0.0), Vector2::new(1.0, 1.0), tol()).unwrap(),
        );
        let b = GeometryEntity::Line2(
            Line2::new(p2(0.0, 2.0), Vector2::new(1.0, -1.0), tol()).unwrap(),
        );
        let out = a.intersect(&b, tol()).unwrap();
        assert_eq!(out.len(), 1);
        match &out[0] {
            GeometryEntity::Point2(pt) => assert!(tol().eq_point2(pt, &p2(1.0, 1.0))),
            other => panic!("expected Point2, got {other:?}"),
        }
    }

    #[test]
    fn line_through_plane() {
        let plane = GeometryEntity::Plane(
            Plane::new(p3(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0), tol()).unwrap(),
        );
        let line = GeometryEntity::Line3(
            Line3::new(p3(0.0, 0.0, -1.0), Vector3::new(0.0, 0.0, 1.0), tol()).unwrap(),
        );
        let out = plane.intersect(&line, tol()).unwrap();
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], GeometryEntity::Point3(_)));
    }

    #[test]
    fn crossing_planes_yield_a_line() {
        let a = GeometryEntity::Plane(
            Plane::new(p3(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0), tol()).unwrap(),
        );
        let b = GeometryEntity::Plane(
            Plane::new(p3(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), tol()).unwrap(),
        );
        let out = a.intersect(&b, tol()).unwrap();
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], GeometryEntity::Line3(_)));
    }

    #[test]
    fn polygon_polygon_intersection_wraps_pieces() {
        let a = GeometryEntity::Polygon2(square2(0.0, 0.0, 1.0));
        let b = GeometryEntity::Polygon2(square2(0.5, 0.0, 1.0));
        let out = a.intersect(&b, tol()).unwrap();
        assert_eq!(out.len(), 1);
        match &out[0] {
            GeometryEntity::Polygon2(poly) => assert!(tol().eq(poly.area(), 0.5)),
            other => panic!("expected Polygon2, got {other:?}"),
        }
    }

    #[test]
    fn collection_results_are_deduped() {
        let list = GeometryEntity::Polygons2(vec![square2(0.0, 0.0, 1.0), square2(0.0, 0.0, 1.0)]);
        let probe = GeometryEntity::Polygon2(square2(0.0, 0.0, 1.0));
        let out = list.intersect(&probe, tol()).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn difference_against_collection_chains() {
        let base = GeometryEntity::Polygon2(square2(0.0, 0.0, 4.0));
        let cutters = GeometryEntity::Polygons2(vec![
            square2(0.0, 0.0, 1.0),
            square2(3.0, 3.0, 1.0),
        ]);
        let out = base.difference(&cutters, tol()).unwrap();
        let total: f64 = out
            .iter()
            .map(|e| match e {
                GeometryEntity::Polygon2(p) => p.area(),
                _ => 0.0,
            })
            .sum();
        assert!(tol().eq(total, 14.0));
    }

    #[test]
    fn union_merges_overlapping_squares() {
        let a = GeometryEntity::Polygon2(square2(0.0, 0.0, 1.0));
        let b = GeometryEntity::Polygon2(square2(0.5, 0.0, 1.0));
        let out = a.union(&b, tol()).unwrap();
        assert_eq!(out.len(), 1);
        match &out[0] {
            GeometryEntity::Polygon2(poly) => assert!(tol().eq(poly.area(), 1.5)),
            other => panic!("expected Polygon2, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_pairs_are_reported() {
        let a = GeometryEntity::Polyline2(
            Polyline2::new(vec![p2(0.0, 0.0), p2(1.0, 0.0)]).unwrap(),
        );
        let b = GeometryEntity::Polyline2(
            Polyline2::new(vec![p2(0.0, 1.0), p2(1.0, 1.0)]).unwrap(),
        );
        let err = a.intersect(&b, tol()).unwrap_err();
        assert!(matches!(
            err,
            KernelError::Geometry(GeometryError::UnsupportedOperands { op: "intersect", .. })
        ));
    }

    #[test]
    fn point_in_3d_polygon() {
        let poly = GeometryEntity::Polygon3(
            Polygon3::from_exterior(vec![
                p3(0.0, 0.0, 0.0),
                p3(1.0, 0.0, 0.0),
                p3(1.0, 1.0, 0.0),
                p3(0.0, 1.0, 0.0),
            ])
            .unwrap(),
        );
        let inside = GeometryEntity::Point3(p3(0.5, 0.5, 0.0));
        let outside = GeometryEntity::Point3(p3(0.5, 0.5, 1.0));
        assert_eq!(poly.intersect(&inside, tol()).unwrap().len(), 1);
        assert!(poly.intersect(&outside, tol()).unwrap().is_empty());
    }
}
