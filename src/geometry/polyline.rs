use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Tolerance};

use super::line::{Line2, Line3, LineLineRelation2, LineLineRelation3};

/// An open chain of 2D points (at least two).
#[derive(Debug, Clone)]
pub struct Polyline2 {
    points: Vec<Point2>,
}

/// An open chain of 3D points (at least two).
#[derive(Debug, Clone)]
pub struct Polyline3 {
    points: Vec<Point3>,
}

/// A hit produced by intersecting a 2D polyline with an infinite line.
#[derive(Debug, Clone)]
pub enum LineHit2 {
    Point(Point2),
    Segment(Polyline2),
}

/// A hit produced by intersecting a 3D polyline with an infinite line.
#[derive(Debug, Clone)]
pub enum LineHit3 {
    Point(Point3),
    Segment(Polyline3),
}

impl Polyline2 {
    /// Creates a polyline from an ordered point sequence.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for fewer than two points.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::DegenerateInput(
                "a polyline needs at least 2 points".into(),
            )
            .into());
        }
        Ok(Self { points })
    }

    /// Returns the ordered points of the chain.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Returns the consecutive point pairs of the chain.
    #[must_use]
    pub fn segments(&self) -> Vec<(Point2, Point2)> {
        self.points.windows(2).map(|w| (w[0], w[1])).collect()
    }

    /// Returns the chain traversed in the opposite direction.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Returns true if both chains hold the same points, in either
    /// direction.
    #[must_use]
    pub fn coincides_with(&self, other: &Self, tol: Tolerance) -> bool {
        if self.points.len() != other.points.len() {
            return false;
        }
        let same = |a: &[Point2], b: &[Point2]| {
            a.iter().zip(b.iter()).all(|(x, y)| tol.eq_point2(x, y))
        };
        same(&self.points, &other.points) || same(&self.reverse().points, &other.points)
    }

    /// Returns true if the point lies on one of the chain's segments.
    #[must_use]
    pub fn contains(&self, point: &Point2, tol: Tolerance) -> bool {
        for (a, b) in self.segments() {
            if tol.eq_point2(&a, point) || tol.eq_point2(&b, point) {
                return true;
            }
            let Ok(line) = Line2::new(a, b - a, tol) else {
                continue;
            };
            if line.contains(point, tol) {
                let t = line.param_at(point, tol);
                if t >= -tol.0 && t <= 1.0 + tol.0 {
                    return true;
                }
            }
        }
        false
    }

    /// Intersects the chain with an infinite line, segment by segment.
    ///
    /// Collinear overlaps are returned as segment hits; duplicate vertex
    /// hits are merged.
    #[must_use]
    pub fn intersect_line(&self, line: &Line2, tol: Tolerance) -> Vec<LineHit2> {
        let mut hits: Vec<LineHit2> = Vec::new();
        for (a, b) in self.segments() {
            let Ok(seg) = Line2::new(a, b - a, tol) else {
                if line.contains(&a, tol) {
                    push_point_hit_2(&mut hits, a, tol);
                }
                continue;
            };
            match seg.intersect(line, tol) {
                LineLineRelation2::Collinear => {
                    if let Ok(piece) = Self::new(vec![a, b]) {
                        hits.push(LineHit2::Segment(piece));
                    }
                }
                LineLineRelation2::Point(pt) => {
                    let t = seg.param_at(&pt, tol);
                    if t >= -tol.0 && t <= 1.0 + tol.0 {
                        push_point_hit_2(&mut hits, pt, tol);
                    }
                }
                LineLineRelation2::Parallel => {}
            }
        }
        hits
    }
}

fn push_point_hit_2(hits: &mut Vec<LineHit2>, pt: Point2, tol: Tolerance) {
    let duplicate = hits.iter().any(|h| match h {
        LineHit2::Point(q) => tol.eq_point2(q, &pt),
        LineHit2::Segment(_) => false,
    });
    if !duplicate {
        hits.push(LineHit2::Point(pt));
    }
}

impl Polyline3 {
    /// Creates a polyline from an ordered point sequence.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for fewer than two points.
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::DegenerateInput(
                "a polyline needs at least 2 points".into(),
            )
            .into());
        }
        Ok(Self { points })
    }

    /// Returns the ordered points of the chain.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the consecutive point pairs of the chain.
    #[must_use]
    pub fn segments(&self) -> Vec<(Point3, Point3)> {
        self.points.windows(2).map(|w| (w[0], w[1])).collect()
    }

    /// Returns the chain traversed in the opposite direction.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Returns true if both chains hold the same points, in either
    /// direction.
    #[must_use]
    pub fn coincides_with(&self, other: &Self, tol: Tolerance) -> bool {
        if self.points.len() != other.points.len() {
            return false;
        }
        let same = |a: &[Point3], b: &[Point3]| {
            a.iter().zip(b.iter()).all(|(x, y)| tol.eq_point3(x, y))
        };
        same(&self.points, &other.points) || same(&self.reverse().points, &other.points)
    }

    /// Returns true if the point lies on one of the chain's segments.
    #[must_use]
    pub fn contains(&self, point: &Point3, tol: Tolerance) -> bool {
        for (a, b) in self.segments() {
            if tol.eq_point3(&a, point) || tol.eq_point3(&b, point) {
                return true;
            }
            let Ok(line) = Line3::new(a, b - a, tol) else {
                continue;
            };
            if line.contains(point, tol) {
                let t = line.param_at(point, tol);
                if t >= -tol.0 && t <= 1.0 + tol.0 {
                    return true;
                }
            }
        }
        false
    }

    /// Intersects the chain with an infinite line, segment by segment.
    #[must_use]
    pub fn intersect_line(&self, line: &Line3, tol: Tolerance) -> Vec<LineHit3> {
        let mut hits: Vec<LineHit3> = Vec::new();
        for (a, b) in self.segments() {
            let Ok(seg) = Line3::new(a, b - a, tol) else {
                if line.contains(&a, tol) {
                    push_point_hit_3(&mut hits, a, tol);
                }
                continue;
            };
            match seg.intersect(line, tol) {
                LineLineRelation3::Collinear => {
                    if let Ok(piece) = Self::new(vec![a, b]) {
                        hits.push(LineHit3::Segment(piece));
                    }
                }
                LineLineRelation3::Point(pt) => {
                    let t = seg.param_at(&pt, tol);
                    if t >= -tol.0 && t <= 1.0 + tol.0 {
                        push_point_hit_3(&mut hits, pt, tol);
                    }
                }
                LineLineRelation3::Parallel | LineLineRelation3::Skew => {}
            }
        }
        hits
    }
}

fn push_point_hit_3(hits: &mut Vec<LineHit3>, pt: Point3, tol: Tolerance) {
    let duplicate = hits.iter().any(|h| match h {
        LineHit3::Point(q) => tol.eq_point3(q, &pt),
        LineHit3::Segment(_) => false,
    });
    if !duplicate {
        hits.push(LineHit3::Point(pt));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
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

    #[test]
    fn too_few_points_is_rejected() {
        assert!(Polyline2::new(vec![p2(0.0, 0.0)]).is_err());
        assert!(Polyline3::new(Vec::new()).is_err());
    }

    #[test]
    fn segments_and_reverse() {
        let chain = Polyline2::new(vec![p2(0.0, 0.0), p2(1.0, 0.0), p2(1.0, 1.0)]).unwrap();
        assert_eq!(chain.segments().len(), 2);
        let back = chain.reverse();
        assert!(tol().eq_point2(&back.points()[0], &p2(1.0, 1.0)));
        assert!(chain.coincides_with(&back, tol()));
        assert!(chain.reverse().reverse().coincides_with(&chain, tol()));
    }

    #[test]
    fn containment_on_segment_interior_and_vertices() {
        let chain = Polyline3::new(vec![p3(0.0, 0.0, 0.0), p3(2.0, 0.0, 0.0)]).unwrap();
        assert!(chain.contains(&p3(1.0, 0.0, 0.0), tol()));
        assert!(chain.contains(&p3(0.0, 0.0, 0.0), tol()));
        assert!(!chain.contains(&p3(3.0, 0.0, 0.0), tol()));
        assert!(!chain.contains(&p3(1.0, 0.1, 0.0), tol()));
    }

    #[test]
    fn line_crosses_two_segments() {
        let chain = Polyline2::new(vec![p2(0.0, 0.0), p2(1.0, 1.0), p2(2.0, 0.0)]).unwrap();
        let line = Line2::new(p2(0.0, 0.5), Vector2::new(1.0, 0.0), tol()).unwrap();
        let hits = chain.intersect_line(&line, tol());
        assert_eq!(hits.len(), 2);
        for h in &hits {
            match h {
                LineHit2::Point(pt) => assert!(tol().eq(pt.y, 0.5)),
                LineHit2::Segment(_) => panic!("expected point hits"),
            }
        }
    }

    #[test]
    fn shared_vertex_reported_once() {
        let chain = Polyline2::new(vec![p2(0.0, 1.0), p2(1.0, 0.0), p2(2.0, 1.0)]).unwrap();
        let line = Line2::new(p2(0.0, 0.0), Vector2::new(1.0, 0.0), tol()).unwrap();
        let hits = chain.intersect_line(&line, tol());
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn collinear_segment_returned_whole() {
        let chain = Polyline3::new(vec![
            p3(0.0, 0.0, 0.0),
            p3(1.0, 0.0, 0.0),
            p3(1.0, 1.0, 0.0),
        ])
        .unwrap();
        let line = Line3::new(p3(-5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), tol()).unwrap();
        let hits = chain.intersect_line(&line, tol());
        assert!(hits.iter().any(|h| matches!(h, LineHit3::Segment(_))));
    }

    #[test]
    fn skew_line_misses_chain() {
        let chain = Polyline3::new(vec![p3(0.0, 0.0, 0.0), p3(1.0, 0.0, 0.0)]).unwrap();
        let line = Line3::new(p3(0.0, 5.0, 1.0), Vector3::new(0.0, 1.0, 0.0), tol()).unwrap();
        assert!(chain.intersect_line(&line, tol()).is_empty());
    }
}
