//! Puzzle definition files (JSON via serde).
//!
//! A definition names the puzzle and lists its cutters. A cutter is either an
//! explicit polygon with its symmetry list, or a regular polygon whose
//! dihedral group is generated.
//!
//! ```json
//! {
//!   "name": "two squares",
//!   "cutters": [
//!     { "kind": "regular", "sides": 4, "center": { "x": -0.5, "y": 0 }, "radius": 1 },
//!     {
//!       "kind": "polygon",
//!       "points": [{ "x": 0, "y": -1 }, { "x": 1, "y": 0 }, { "x": 0, "y": 1 }],
//!       "symmetry_list": [
//!         { "linear_transform": { "x_axis": { "x": 1, "y": 0 }, "y_axis": { "x": 0, "y": 1 } },
//!           "translation": { "x": 0, "y": 0 } }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{Cutter, Puzzle};
use crate::error::PuzzleError;
use crate::geom2::{Affine2, GeomCfg, Point2};
use crate::polygon::{Contour, Polygon};

/// `{ "x": .., "y": .. }`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2Def {
    pub x: f64,
    pub y: f64,
}

impl From<Vec2Def> for Point2 {
    fn from(v: Vec2Def) -> Self {
        Point2::new(v.x, v.y)
    }
}

impl From<Point2> for Vec2Def {
    fn from(p: Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearDef {
    pub x_axis: Vec2Def,
    pub y_axis: Vec2Def,
}

/// Affine map as images of the unit axes plus a translation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformDef {
    pub linear_transform: LinearDef,
    pub translation: Vec2Def,
}

impl From<&TransformDef> for Affine2 {
    fn from(d: &TransformDef) -> Self {
        Affine2::from_axes(
            d.linear_transform.x_axis.into(),
            d.linear_transform.y_axis.into(),
            d.translation.into(),
        )
    }
}

impl From<&Affine2> for TransformDef {
    fn from(a: &Affine2) -> Self {
        Self {
            linear_transform: LinearDef {
                x_axis: Point2::new(a.m[(0, 0)], a.m[(1, 0)]).into(),
                y_axis: Point2::new(a.m[(0, 1)], a.m[(1, 1)]).into(),
            },
            translation: a.t.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CutterDef {
    Polygon {
        points: Vec<Vec2Def>,
        #[serde(default)]
        holes: Vec<Vec<Vec2Def>>,
        symmetry_list: Vec<TransformDef>,
    },
    Regular {
        sides: usize,
        center: Vec2Def,
        radius: f64,
        #[serde(default)]
        tilt: f64,
    },
}

impl CutterDef {
    pub fn to_cutter(&self) -> Cutter {
        match self {
            CutterDef::Polygon {
                points,
                holes,
                symmetry_list,
            } => {
                let mut contours = vec![Contour::outer(points.iter().map(|&p| p.into()).collect())];
                contours.extend(
                    holes
                        .iter()
                        .map(|h| Contour::hole(h.iter().map(|&p| p.into()).collect())),
                );
                Cutter::new(
                    Polygon::from_contours(contours),
                    symmetry_list.iter().map(Affine2::from).collect(),
                )
            }
            CutterDef::Regular {
                sides,
                center,
                radius,
                tilt,
            } => Cutter::regular(*sides, (*center).into(), *radius, *tilt),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleDef {
    #[serde(default)]
    pub name: String,
    pub cutters: Vec<CutterDef>,
}

impl PuzzleDef {
    /// Convert and validate every cutter.
    pub fn into_cutters(self, cfg: &GeomCfg) -> Result<Vec<Cutter>, PuzzleError> {
        let cutters: Vec<Cutter> = self.cutters.iter().map(CutterDef::to_cutter).collect();
        for (i, c) in cutters.iter().enumerate() {
            c.validate(i, cfg)?;
        }
        Ok(cutters)
    }

    /// Build the solved puzzle; `Puzzle::with_cfg` does the validation.
    pub fn build(&self, cfg: GeomCfg) -> Result<Puzzle, PuzzleError> {
        Puzzle::with_cfg(self.cutters.iter().map(CutterDef::to_cutter).collect(), cfg)
    }
}
