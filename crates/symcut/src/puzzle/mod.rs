//! Dissection puzzle state: cutters, pieces, and the moves that re-partition them.
//!
//! Purpose
//! - A `Puzzle` owns a fixed list of `Cutter`s and a mutable list of `Shape`s.
//!   The shapes always cover the union of the cutters exactly once: no gaps,
//!   no overlap.
//! - A move picks one cutter and one of its symmetries, splits every piece
//!   against the cutter, and moves the pieces inside by the symmetry.
//!
//! Conventions
//! - `Shape::polygon` is in home (solved) coordinates; `Shape::transform` maps
//!   home to world. The puzzle is solved iff every transform is the identity.
//! - The shape list is replaced wholesale on each move, never edited in place.
//!   The previous list is kept for `undo`.
//!
//! Code cross-refs: `clip::cut_against`, `build::build_shapes`, `apply`

mod apply;
mod build;
pub mod def;
mod rng;

pub use rng::{IndexSource, RandIndices, ScriptedIndices};

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

use crate::clip::cut_against;
use crate::error::PuzzleError;
use crate::geom2::{polar, Affine2, GeomCfg, Point2};
use crate::polygon::Polygon;

/// Fixed template: a world-space polygon and the isometries mapping it onto itself.
#[derive(Clone, Debug)]
pub struct Cutter {
    polygon: Polygon,
    symmetries: Vec<Affine2>,
}

impl Cutter {
    /// Unvalidated; `Puzzle::new` checks every cutter before building.
    pub fn new(polygon: Polygon, symmetries: Vec<Affine2>) -> Self {
        Self {
            polygon,
            symmetries,
        }
    }

    /// Regular `sides`-gon around `center` with its full dihedral group.
    ///
    /// Symmetries alternate rotation by `2πi/sides` and reflection across the
    /// axis through vertex `i`; index 0 is the identity.
    pub fn regular(sides: usize, center: Point2, radius: f64, tilt: f64) -> Self {
        let mut points = Vec::with_capacity(sides);
        let mut symmetries = Vec::with_capacity(2 * sides);
        for i in 0..sides {
            let angle = TAU * i as f64 / sides as f64;
            let spoke = polar(radius, angle + tilt);
            points.push(center + spoke);
            symmetries.push(Affine2::rotation(center, angle));
            symmetries.push(Affine2::reflection(center, spoke));
        }
        Self::new(Polygon::new(points), symmetries)
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[inline]
    pub fn symmetries(&self) -> &[Affine2] {
        &self.symmetries
    }

    /// Check the setup invariants; `index` only labels the error.
    pub fn validate(&self, index: usize, cfg: &GeomCfg) -> Result<(), PuzzleError> {
        if self.polygon.outers().all(|c| c.len() < 3) {
            return Err(PuzzleError::invalid_cutter(index, "polygon has no outer loop"));
        }
        let area = self.polygon.area();
        if !(area.is_finite() && area > cfg.eps_area) {
            return Err(PuzzleError::invalid_cutter(index, "polygon has no area"));
        }
        if !self
            .symmetries
            .iter()
            .any(|s| s.is_identity_eps(cfg.eps_transform))
        {
            return Err(PuzzleError::invalid_cutter(
                index,
                "symmetry list lacks the identity",
            ));
        }
        if let Some(k) = self
            .symmetries
            .iter()
            .position(|s| !s.is_orthogonal_eps(cfg.eps_transform))
        {
            return Err(PuzzleError::invalid_cutter(
                index,
                format!("symmetry {k} is not an isometry"),
            ));
        }
        for (k, s) in self.symmetries.iter().enumerate() {
            let image = self.polygon.transformed(s);
            let stray = cut_against(&image, &self.polygon, cfg).outside_area();
            if stray > 1e-6 * area {
                tracing::warn!(cutter = index, symmetry = k, stray, "symmetry does not map cutter onto itself");
            }
        }
        Ok(())
    }
}

/// One puzzle piece.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Region in home coordinates.
    pub polygon: Polygon,
    /// Home → world. Authoritative for all puzzle logic.
    pub transform: Affine2,
    /// Display-only copy of the transform; advanced by the renderer, never by the core.
    pub render_transform: Affine2,
}

impl Shape {
    pub fn new(polygon: Polygon) -> Self {
        Self::with_transform(polygon, Affine2::identity())
    }

    pub fn with_transform(polygon: Polygon, transform: Affine2) -> Self {
        Self {
            polygon,
            transform,
            render_transform: Affine2::identity(),
        }
    }

    /// The piece where it currently sits.
    pub fn world(&self) -> Polygon {
        self.polygon.transformed(&self.transform)
    }
}

/// A cut: cutter index and symmetry index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub cutter: usize,
    pub symmetry: usize,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.cutter, self.symmetry)
    }
}

/// Cutters plus the current piece partition and its move history.
#[derive(Clone, Debug)]
pub struct Puzzle {
    cutters: Vec<Cutter>,
    shapes: Vec<Shape>,
    history: Vec<(Move, Vec<Shape>)>,
    cfg: GeomCfg,
}

impl Puzzle {
    /// Validate the cutters and build the solved piece set.
    pub fn new(cutters: Vec<Cutter>) -> Result<Self, PuzzleError> {
        Self::with_cfg(cutters, GeomCfg::default())
    }

    pub fn with_cfg(cutters: Vec<Cutter>, cfg: GeomCfg) -> Result<Self, PuzzleError> {
        for (i, c) in cutters.iter().enumerate() {
            c.validate(i, &cfg)?;
        }
        let shapes = build::build_shapes(&cutters, &cfg);
        Ok(Self {
            cutters,
            shapes,
            history: Vec::new(),
            cfg,
        })
    }

    #[inline]
    pub fn cutters(&self) -> &[Cutter] {
        &self.cutters
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn cfg(&self) -> &GeomCfg {
        &self.cfg
    }

    /// Moves applied since construction or the last `reset`, oldest first.
    pub fn moves(&self) -> Vec<Move> {
        self.history.iter().map(|(m, _)| *m).collect()
    }

    /// Every piece is back at its home position.
    pub fn is_solved(&self) -> bool {
        self.shapes
            .iter()
            .all(|s| s.transform.is_identity_eps(self.cfg.eps_transform))
    }

    pub fn total_area(&self) -> f64 {
        self.shapes.iter().map(|s| s.polygon.area()).sum()
    }

    /// Smallest-area cutter containing `p`, for picking under a pointer.
    pub fn cutter_at(&self, p: Point2) -> Option<usize> {
        self.cutters
            .iter()
            .enumerate()
            .filter(|(_, c)| c.polygon.contains(p))
            .min_by(|(_, a), (_, b)| a.polygon.area().total_cmp(&b.polygon.area()))
            .map(|(i, _)| i)
    }

    /// Discard the history and rebuild the solved partition.
    pub fn reset(&mut self) {
        self.shapes = build::build_shapes(&self.cutters, &self.cfg);
        self.history.clear();
    }

    /// Triangulate every piece that lacks a cached triangulation; returns the triangle count.
    ///
    /// Stops at the first failure; pieces already triangulated keep their cache.
    pub fn tesselate_shapes(&mut self) -> Result<usize, PuzzleError> {
        let mut total = 0;
        for shape in self.shapes.iter_mut() {
            total += shape.polygon.tesselate_if_needed()?.len();
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests;
