//! Basic 2D types and tolerances shared by the polygon, clip, and puzzle layers.
//!
//! - `GeomCfg`: centralizes epsilons for singularity, vertex snapping, area, and transform checks.
//! - `Affine2`: 2D affine map `x ↦ M x + t` with the isometry constructors puzzles need.
//!
//! Code cross-refs: `polygon::Polygon::transformed`, `clip::cut_against`, `puzzle::Puzzle::apply_cut`

use nalgebra::{Matrix2, Vector2, SVD};

use crate::error::PuzzleError;

/// A point or free vector in the plane.
pub type Point2 = Vector2<f64>;

/// Geometry configuration (tolerances).
///
/// Defaults assume puzzle coordinates of order 1.
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Below this `|det|` a linear part counts as singular.
    pub eps_det: f64,
    /// Vertices closer than this are merged; points this close to an edge lie on it.
    pub eps_snap: f64,
    /// Clip fragments with smaller absolute area are dropped.
    pub eps_area: f64,
    /// Max-abs entry tolerance for transform equality and identity checks.
    pub eps_transform: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_det: 1e-12,
            eps_snap: 1e-9,
            eps_area: 1e-10,
            eps_transform: 1e-7,
        }
    }
}

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    #[inline]
    pub fn translation(t: Vector2<f64>) -> Self {
        Self {
            m: Matrix2::identity(),
            t,
        }
    }

    /// Counter-clockwise rotation by `angle` radians about `center`.
    pub fn rotation(center: Point2, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let m = Matrix2::new(c, -s, s, c);
        Self {
            m,
            t: center - m * center,
        }
    }

    /// Reflection across the line through `center` with direction `axis`.
    ///
    /// A zero `axis` yields the point reflection through `center` (rotation by π),
    /// which is still an isometry.
    pub fn reflection(center: Point2, axis: Vector2<f64>) -> Self {
        let norm = axis.norm();
        if !(norm.is_finite()) || norm <= 0.0 {
            return Self::rotation(center, std::f64::consts::PI);
        }
        let a = axis / norm;
        // 2 a aᵀ − I
        let m = Matrix2::new(
            2.0 * a.x * a.x - 1.0,
            2.0 * a.x * a.y,
            2.0 * a.x * a.y,
            2.0 * a.y * a.y - 1.0,
        );
        Self {
            m,
            t: center - m * center,
        }
    }

    /// Build from the images of the unit axes plus a translation (puzzle file layout).
    #[inline]
    pub fn from_axes(x_axis: Vector2<f64>, y_axis: Vector2<f64>, t: Vector2<f64>) -> Self {
        Self {
            m: Matrix2::from_columns(&[x_axis, y_axis]),
            t,
        }
    }

    #[inline]
    pub fn apply(&self, p: Point2) -> Point2 {
        self.m * p + self.t
    }

    /// Composition `self ∘ other` (applies `other` first).
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }

    /// Inverse map if `m` is invertible.
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }

    /// Inverse with an explicit singularity threshold (`cfg.eps_det`).
    pub fn try_inverse(&self, cfg: &GeomCfg) -> Result<Self, PuzzleError> {
        let det = self.m.determinant();
        if !det.is_finite() || det.abs() <= cfg.eps_det {
            return Err(PuzzleError::DegenerateTransform { det });
        }
        self.inverse()
            .ok_or(PuzzleError::DegenerateTransform { det })
    }

    #[inline]
    pub fn is_orientation_preserving(&self) -> bool {
        self.m.determinant() > 0.0
    }

    /// `MᵀM ≈ I` in max-abs metric.
    pub fn is_orthogonal_eps(&self, eps: f64) -> bool {
        let g = self.m.transpose() * self.m - Matrix2::identity();
        g.amax() <= eps
    }

    /// Entry-wise equality of linear part and translation within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.m - other.m).amax() <= eps && (self.t - other.t).amax() <= eps
    }

    #[inline]
    pub fn is_identity_eps(&self, eps: f64) -> bool {
        self.approx_eq(&Self::identity(), eps)
    }

    /// Snap the linear part to the nearest orthogonal matrix (polar factor from SVD).
    ///
    /// Reflections stay reflections; the translation is kept as is.
    pub fn orthonormalized(&self) -> Self {
        let svd = SVD::new(self.m, true, true);
        match (svd.u, svd.v_t) {
            (Some(u), Some(vt)) => Self {
                m: u * vt,
                t: self.t,
            },
            _ => *self,
        }
    }
}

impl std::ops::Mul for Affine2 {
    type Output = Affine2;
    /// `a * b` applies `b` first, then `a`.
    #[inline]
    fn mul(self, rhs: Affine2) -> Self::Output {
        self.compose(&rhs)
    }
}

impl std::ops::Mul<Point2> for Affine2 {
    type Output = Point2;
    #[inline]
    fn mul(self, rhs: Point2) -> Self::Output {
        self.apply(rhs)
    }
}
