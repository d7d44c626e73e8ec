//! Initial partition: turn overlapping cutters into non-overlapping pieces.
//!
//! Work queue of candidate polygons, seeded with every cutter polygon. A
//! candidate that overlaps an accepted piece is discarded and only its part
//! outside that piece goes back on the queue; a candidate that overlaps
//! nothing becomes a new piece. Accepted pieces never overlap.

use super::{Cutter, Shape};
use crate::clip::cut_against;
use crate::geom2::GeomCfg;
use crate::polygon::Polygon;

#[tracing::instrument(skip_all, fields(cutters = cutters.len()))]
pub(super) fn build_shapes(cutters: &[Cutter], cfg: &GeomCfg) -> Vec<Shape> {
    let mut queue: Vec<Polygon> = cutters.iter().map(|c| c.polygon().clone()).collect();
    let mut accepted: Vec<Shape> = Vec::new();
    let mut splits = 0usize;

    'queue: while let Some(candidate) = queue.pop() {
        for shape in &accepted {
            let res = cut_against(&candidate, &shape.polygon, cfg);
            if res.hits() {
                splits += 1;
                queue.extend(res.outside);
                continue 'queue;
            }
        }
        accepted.push(Shape::new(candidate));
    }

    tracing::debug!(shapes = accepted.len(), splits, "built initial partition");
    accepted
}
