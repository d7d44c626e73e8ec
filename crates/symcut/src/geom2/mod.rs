//! 2D geometric primitives: points, affine isometries, and tolerances.
//!
//! Purpose
//! - Provide the value types every other layer builds on (`Point2`, `Affine2`, `GeomCfg`).
//! - Keep predicates small and numerically explicit (eps passed in, never hidden).
//!
//! Conventions
//! - `a * b` and `a.compose(&b)` apply `b` first.
//! - Rotations are counter-clockwise for positive angles.
//!
//! Code cross-refs: `polygon::Polygon`, `clip::cut_against`

mod types;
mod util;

pub use types::{Affine2, GeomCfg, Point2};
pub use util::{
    cross, orient, point_in_loops, polar, project_on_segment, segment_crossing, signed_area,
};
