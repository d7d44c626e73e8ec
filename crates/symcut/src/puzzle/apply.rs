//! Moves: apply a cutter with one of its symmetries to the piece set.

use super::{IndexSource, Move, Puzzle, Shape};
use crate::clip::cut_against;
use crate::error::{IndexKind, PuzzleError};

impl Puzzle {
    /// Cut every piece against cutter `cutter` and move the inside parts by
    /// symmetry `symmetry`.
    ///
    /// Pieces the cutter misses are carried over unchanged. A hit piece is
    /// replaced by its fragments, pulled back to home coordinates: outside
    /// fragments keep the piece's transform, inside fragments get
    /// `symmetry * transform`. On error the shape list is untouched.
    #[tracing::instrument(skip(self))]
    pub fn apply_cut(&mut self, cutter: usize, symmetry: usize) -> Result<Move, PuzzleError> {
        let c = self.cutters.get(cutter).ok_or(PuzzleError::InvalidIndex {
            kind: IndexKind::Cutter,
            index: cutter,
            len: self.cutters.len(),
        })?;
        let sym = *c
            .symmetries()
            .get(symmetry)
            .ok_or(PuzzleError::InvalidIndex {
                kind: IndexKind::Symmetry,
                index: symmetry,
                len: c.symmetries().len(),
            })?;

        let mut next = Vec::with_capacity(self.shapes.len() + 4);
        let mut hit = 0usize;
        for shape in &self.shapes {
            let res = cut_against(&shape.world(), c.polygon(), &self.cfg);
            if !res.hits() {
                next.push(shape.clone());
                continue;
            }
            hit += 1;
            let home = shape.transform.try_inverse(&self.cfg)?;
            let moved = (sym * shape.transform).orthonormalized();
            for frag in res.outside {
                next.push(Shape {
                    polygon: frag.transformed(&home),
                    transform: shape.transform,
                    render_transform: shape.render_transform,
                });
            }
            for frag in res.inside {
                next.push(Shape {
                    polygon: frag.transformed(&home),
                    transform: moved,
                    render_transform: shape.render_transform,
                });
            }
        }

        tracing::debug!(hit, before = self.shapes.len(), after = next.len(), "applied cut");
        let mv = Move { cutter, symmetry };
        let previous = std::mem::replace(&mut self.shapes, next);
        self.history.push((mv, previous));
        Ok(mv)
    }

    /// `apply_cut` with both indices drawn from `source`.
    pub fn apply_random_cut<S: IndexSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Move, PuzzleError> {
        if self.cutters.is_empty() {
            return Err(PuzzleError::InvalidIndex {
                kind: IndexKind::Cutter,
                index: 0,
                len: 0,
            });
        }
        let cutter = source.next_index(self.cutters.len());
        let symmetry = match self.cutters.get(cutter) {
            Some(c) => source.next_index(c.symmetries().len()),
            None => 0,
        };
        self.apply_cut(cutter, symmetry)
    }

    /// `count` random moves; returns them in order.
    pub fn scramble<S: IndexSource + ?Sized>(
        &mut self,
        count: usize,
        source: &mut S,
    ) -> Result<Vec<Move>, PuzzleError> {
        let mut moves = Vec::with_capacity(count);
        for _ in 0..count {
            moves.push(self.apply_random_cut(source)?);
        }
        tracing::info!(count, shapes = self.shapes.len(), "scrambled");
        Ok(moves)
    }

    /// Restore the shape list from before the most recent move.
    pub fn undo(&mut self) -> Option<Move> {
        let (mv, previous) = self.history.pop()?;
        self.shapes = previous;
        Some(mv)
    }
}
