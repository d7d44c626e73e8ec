//! Symmetry-group dissection puzzles in the plane.
//!
//! A puzzle is a set of overlapping cutter polygons, each with a symmetry
//! group. The pieces are the non-overlapping regions the cutters induce; a
//! move cuts every piece against one cutter and carries the inside parts
//! along one of that cutter's symmetries.
//!
//! Layers (leaves first): `geom2` → `polygon` → `clip` → `puzzle`.
//! Rendering, UV mapping, and animation live outside this crate; they read
//! `Polygon::tesselate_if_needed` and `Shape::render_transform`.

pub mod api;
pub mod clip;
pub mod error;
pub mod geom2;
pub mod polygon;
pub mod puzzle;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::PuzzleError;
pub use geom2::{Affine2, GeomCfg, Point2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::clip::{cut_against, CutResult};
    pub use crate::error::{IndexKind, PuzzleError};
    pub use crate::geom2::{polar, Affine2, GeomCfg, Point2};
    pub use crate::polygon::{Contour, ContourKind, Polygon, Triangle};
    pub use crate::puzzle::{
        Cutter, IndexSource, Move, Puzzle, RandIndices, ScriptedIndices, Shape,
    };
    pub use nalgebra::vector;
}
