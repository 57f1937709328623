//! A 2D/3D geometric primitive and intersection kernel.
//!
//! Primitives (points, lines, planes, polylines, polygons, solids) carry
//! typed intersection operations; `entity::GeometryEntity` adds runtime
//! dispatch over all kinds. Planar Boolean work is delegated to the `geo`
//! engine and triangulation to a `spade` constrained Delaunay
//! triangulation. All equality is tolerance-based via `math::Tolerance`,
//! threaded explicitly through every operation.

pub mod entity;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{KernelError, Result};
