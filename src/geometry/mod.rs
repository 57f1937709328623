//! Geometric primitives: lines, planes, polylines, polygons, and solids.

pub mod line;
pub mod plane;
pub mod polygon;
pub mod polyline;
pub mod solid;

pub use line::{Line2, Line3, LineLineRelation2, LineLineRelation3};
pub use plane::{LinePlaneRelation, Plane, PlanePairRelation};
pub use polygon::{Polygon2, Polygon3, PolygonHit3};
pub use polyline::{LineHit2, LineHit3, Polyline2, Polyline3};
pub use solid::{ExtrudedPolyhedron, Polyhedron, Tetrahedron};
