//! Clip kernel: split a polygon into the parts inside and outside a cutter polygon.
//!
//! Purpose
//! - `cut_against(subject, cutter)` returns `inside` (subject ∩ cutter) and
//!   `outside` (subject \ cutter) as well-formed polygons whose union is the
//!   subject, with no overlap between any two fragments.
//!
//! Algorithm (Weiler–Atherton style, see `arrange` and `assemble`)
//! 1. Split both boundaries at every crossing and every vertex-on-edge contact;
//!    merge coincident vertices through a tolerance pool.
//! 2. Tag subject fragments inside / outside / shared-same / shared-opposite
//!    relative to the cutter, and cutter fragments inside / outside the subject.
//! 3. Inside boundary = subject inside + shared-same + cutter inside.
//!    Outside boundary = subject outside + shared-opposite + reversed cutter inside.
//!    Each shared edge lands on exactly one side, so complementary cutters
//!    partition the plane with neither gaps nor double counting.
//! 4. Link fragments into loops (sharpest left turn), classify loops by signed
//!    area into outers and holes, and attach holes to their smallest outer.
//!
//! When the boundaries never interact, the subject is returned unchanged in
//! exactly one list. An empty `inside` means "no cut needed", not failure.
//!
//! Code cross-refs: `polygon::Polygon`, `puzzle::build`, `puzzle::Puzzle::apply_cut`

mod arrange;
mod assemble;

use crate::geom2::{GeomCfg, Point2};
use crate::polygon::Polygon;

use arrange::{arrange, Side};
use assemble::assemble;

/// Fragments of a subject polygon relative to a cutter.
#[derive(Clone, Debug, Default)]
pub struct CutResult {
    pub inside: Vec<Polygon>,
    pub outside: Vec<Polygon>,
}

impl CutResult {
    /// True when some part of the subject lies inside the cutter.
    #[inline]
    pub fn hits(&self) -> bool {
        !self.inside.is_empty()
    }

    pub fn inside_area(&self) -> f64 {
        self.inside.iter().map(Polygon::area).sum()
    }

    pub fn outside_area(&self) -> f64 {
        self.outside.iter().map(Polygon::area).sum()
    }
}

/// Partition `subject` into the parts inside and outside `cutter`.
///
/// Neither input is mutated. Cost is O(n·m) in the vertex counts.
pub fn cut_against(subject: &Polygon, cutter: &Polygon, cfg: &GeomCfg) -> CutResult {
    if subject.is_empty() {
        return CutResult::default();
    }
    let whole_outside = || CutResult {
        inside: Vec::new(),
        outside: vec![subject.clone()],
    };
    if cutter.is_empty() || !bounds_overlap(subject, cutter, cfg.eps_snap) {
        return whole_outside();
    }

    let arr = arrange(subject, cutter, cfg);
    if !arr.boundaries_interact() {
        match arr.uniform_subject_side() {
            Some(Side::Inside) => {
                return CutResult {
                    inside: vec![subject.clone()],
                    outside: Vec::new(),
                }
            }
            Some(Side::Outside) => return whole_outside(),
            _ => {}
        }
    }

    let inside = assemble(&arr.pool, arr.inside_edges(), cfg);
    let outside = assemble(&arr.pool, arr.outside_edges(), cfg);
    tracing::trace!(
        inside = inside.len(),
        outside = outside.len(),
        "cut_against split subject"
    );
    CutResult { inside, outside }
}

impl Polygon {
    /// `cut_against` with default tolerances.
    pub fn cut_against(&self, other: &Polygon) -> CutResult {
        cut_against(self, other, &GeomCfg::default())
    }
}

fn bounds(poly: &Polygon) -> Option<(Point2, Point2)> {
    let mut it = poly.points();
    let first = *it.next()?;
    Some(it.fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p))))
}

fn bounds_overlap(a: &Polygon, b: &Polygon, eps: f64) -> bool {
    match (bounds(a), bounds(b)) {
        (Some((alo, ahi)), Some((blo, bhi))) => {
            alo.x <= bhi.x + eps && blo.x <= ahi.x + eps && alo.y <= bhi.y + eps && blo.y <= ahi.y + eps
        }
        _ => false,
    }
}
