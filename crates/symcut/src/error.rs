//! Errors surfaced by the puzzle core.
//!
//! Clip-kernel degeneracies (tangent vertices, shared edges) never show up
//! here: the kernel resolves them with its fixed tie-break rule.

use std::fmt;

/// Which index of `apply_cut` was out of range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexKind {
    Cutter,
    Symmetry,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Cutter => write!(f, "cutter"),
            IndexKind::Symmetry => write!(f, "symmetry"),
        }
    }
}

/// Error type shared by geometry, tessellation, and puzzle operations.
#[derive(Clone, Debug, PartialEq)]
pub enum PuzzleError {
    /// Inversion of a transform whose linear part is (numerically) singular.
    DegenerateTransform { det: f64 },
    /// The polygon violates the simple-region invariant; geometry is left untouched.
    TriangulationFailure { reason: String },
    /// Cutter or symmetry index out of range; the shape list is not mutated.
    InvalidIndex {
        kind: IndexKind,
        index: usize,
        len: usize,
    },
    /// A cutter record failed validation during puzzle setup.
    InvalidCutter { index: usize, reason: String },
}

impl PuzzleError {
    pub(crate) fn triangulation(reason: impl Into<String>) -> Self {
        Self::TriangulationFailure {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_cutter(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidCutter {
            index,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::DegenerateTransform { det } => {
                write!(f, "transform is not invertible (det = {det:e})")
            }
            PuzzleError::TriangulationFailure { reason } => {
                write!(f, "triangulation failed: {reason}")
            }
            PuzzleError::InvalidIndex { kind, index, len } => {
                write!(f, "{kind} index {index} out of range (have {len})")
            }
            PuzzleError::InvalidCutter { index, reason } => {
                write!(f, "cutter {index} is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for PuzzleError {}
