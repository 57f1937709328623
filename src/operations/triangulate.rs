//! Adapter for the external constrained-triangulation library (`spade`).
//!
//! Polygon rings (exterior and holes) are inserted as constraint loops into
//! a constrained Delaunay triangulation; interior triangles are then
//! selected by even/odd constraint-crossing depth, so holes need no interior
//! witness points.

use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TriangulationError};
use crate::geometry::polygon::Polygon2;
use crate::math::{Point2, Tolerance};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Decomposes a polygon (holes allowed) into hole-free triangles.
///
/// # Errors
///
/// Returns [`TriangulationError::Failed`] if the triangulation library
/// rejects the input (for example coincident constraint edges from a
/// self-intersecting ring).
pub fn triangulate(polygon: &Polygon2, tol: Tolerance) -> Result<Vec<Polygon2>> {
    let mut cdt = Cdt::new();
    insert_constraint_loop(&mut cdt, polygon.exterior())?;
    for hole in polygon.holes() {
        insert_constraint_loop(&mut cdt, hole.exterior())?;
    }

    let interior = classify_interior_faces(&cdt);

    let mut triangles = Vec::new();
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let ring: Vec<Point2> = face
            .vertices()
            .iter()
            .map(|v| {
                let pos = v.position();
                Point2::new(pos.x, pos.y)
            })
            .collect();
        // Merged vertices can collapse a sliver triangle; skip those.
        if tol.eq_point2(&ring[0], &ring[1])
            || tol.eq_point2(&ring[1], &ring[2])
            || tol.eq_point2(&ring[2], &ring[0])
        {
            continue;
        }
        triangles.push(Polygon2::new(ring, Vec::new())?);
    }
    Ok(triangles)
}

/// Inserts a closed ring as constraint edges into the CDT.
fn insert_constraint_loop(cdt: &mut Cdt, ring: &[Point2]) -> Result<()> {
    if ring.len() < 3 {
        return Err(
            TriangulationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(ring.len());
    for pt in ring {
        let h = cdt
            .insert(SpadePoint2::new(pt.x, pt.y))
            .map_err(|e: InsertionError| TriangulationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }

    Ok(())
}

/// Selects the CDT faces covered by the polygon.
///
/// All rings went in as constraint edges, so walking inward from unbounded
/// space toggles coverage at every constraint crossing: a face reached
/// through an odd number of crossings lies inside the exterior ring and
/// outside an even number of hole rings. A breadth-first walk labels each
/// face with its crossing parity; odd faces are kept.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let outer = cdt.outer_face().fix();
    let mut parity: HashMap<usize, u32> = HashMap::new();
    let mut frontier: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    // Seed with the faces bordering the hull; entering one through a
    // constrained hull edge already counts as a crossing.
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer {
            continue;
        }
        let Some(first) = edge.rev().face().as_inner() else {
            continue;
        };
        let idx = first.fix().index();
        if parity.contains_key(&idx) {
            continue;
        }
        let crossings = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
        parity.insert(idx, crossings);
        frontier.push_back((first.fix(), crossings));
    }

    while let Some((face, crossings)) = frontier.pop_front() {
        for edge in cdt.face(face).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if parity.contains_key(&idx) {
                continue;
            }
            let next = crossings + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            parity.insert(idx, next);
            frontier.push_back((neighbor.fix(), next));
        }
    }

    parity
        .into_iter()
        .filter_map(|(idx, crossings)| (crossings % 2 == 1).then_some(idx))
        .collect()
}
