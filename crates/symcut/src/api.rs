//! Curated surface for the CLI and other callers.
//!
//! Re-exports only; breaking changes follow the modules they point at.

// Geometry
pub use crate::geom2::{polar, signed_area, Affine2, GeomCfg, Point2};
pub use crate::polygon::{Contour, ContourKind, Polygon, Triangle};
// Clip kernel
pub use crate::clip::{cut_against, CutResult};
// Puzzle state and moves
pub use crate::puzzle::def::{CutterDef, LinearDef, PuzzleDef, TransformDef, Vec2Def};
pub use crate::puzzle::{Cutter, IndexSource, Move, Puzzle, RandIndices, ScriptedIndices, Shape};
// Errors
pub use crate::error::{IndexKind, PuzzleError};
