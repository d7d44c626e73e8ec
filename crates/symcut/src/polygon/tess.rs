//! Triangulation cache for `Polygon` (ear clipping with hole bridging).
//!
//! Each outer loop is triangulated together with the holes it owns; a hole
//! belongs to the smallest outer containing the midpoint of its first edge.
//! The result is checked against the region area so silent earcut failures on
//! invalid input surface as `TriangulationFailure`.

use earcutr::earcut;

use super::{Contour, Polygon};
use crate::error::PuzzleError;
use crate::geom2::{point_in_loops, Point2};

/// Three vertices, counter-clockwise.
pub type Triangle = [Point2; 3];

impl Polygon {
    /// Compute the triangulation unless it is cached, then return it.
    ///
    /// On failure the cache stays dirty and the geometry is untouched.
    pub fn tesselate_if_needed(&mut self) -> Result<&[Triangle], PuzzleError> {
        let triangles = match self.triangles.take() {
            Some(t) => t,
            None => tessellate(&self.contours)?,
        };
        Ok(self.triangles.insert(triangles).as_slice())
    }

    /// Cached triangles, if the cache is clean.
    #[inline]
    pub fn triangles(&self) -> Option<&[Triangle]> {
        self.triangles.as_deref()
    }
}

fn tessellate(contours: &[Contour]) -> Result<Vec<Triangle>, PuzzleError> {
    if contours.is_empty() {
        return Err(PuzzleError::triangulation("polygon has no contours"));
    }
    for (i, c) in contours.iter().enumerate() {
        if c.len() < 3 {
            return Err(PuzzleError::triangulation(format!(
                "contour {i} has {} points (need ≥3)",
                c.len()
            )));
        }
        if c.points().iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(PuzzleError::triangulation(format!(
                "contour {i} has non-finite coordinates"
            )));
        }
    }

    let outers: Vec<&Contour> = contours.iter().filter(|c| c.signed_area() > 0.0).collect();
    if outers.is_empty() {
        return Err(PuzzleError::triangulation("no outer contour with positive area"));
    }
    let mut groups: Vec<Vec<&Contour>> = outers.iter().map(|o| vec![*o]).collect();
    for hole in contours.iter().filter(|c| c.signed_area() < 0.0) {
        let pts = hole.points();
        let probe = (pts[0] + pts[1]) * 0.5;
        let owner = outers
            .iter()
            .enumerate()
            .filter(|(_, o)| point_in_loops(probe, [o.points()]))
            .min_by(|(_, a), (_, b)| a.signed_area().total_cmp(&b.signed_area()))
            .map(|(k, _)| k)
            .ok_or_else(|| PuzzleError::triangulation("hole lies outside every outer contour"))?;
        groups[owner].push(hole);
    }

    let mut out = Vec::new();
    for group in groups {
        let mut coords: Vec<f64> = Vec::new();
        let mut verts: Vec<Point2> = Vec::new();
        let mut hole_starts: Vec<usize> = Vec::new();
        for (k, c) in group.iter().enumerate() {
            if k > 0 {
                hole_starts.push(verts.len());
            }
            for p in c.points() {
                coords.push(p.x);
                coords.push(p.y);
                verts.push(*p);
            }
        }
        let idx = earcut(&coords, &hole_starts, 2)
            .map_err(|e| PuzzleError::triangulation(format!("earcut: {e:?}")))?;
        if idx.len() % 3 != 0 {
            return Err(PuzzleError::triangulation("earcut returned a partial triangle"));
        }
        for tri in idx.chunks_exact(3) {
            let (a, b, c) = (verts[tri[0]], verts[tri[1]], verts[tri[2]]);
            // earcut does not promise an orientation.
            if crate::geom2::orient(a, b, c) < 0.0 {
                out.push([a, c, b]);
            } else {
                out.push([a, b, c]);
            }
        }
    }

    let region: f64 = contours.iter().map(Contour::signed_area).sum();
    if region <= 0.0 {
        return Err(PuzzleError::triangulation("region has no positive area"));
    }
    let covered: f64 = out
        .iter()
        .map(|t| 0.5 * crate::geom2::orient(t[0], t[1], t[2]))
        .sum();
    if (covered - region).abs() > 1e-6 * region.max(1.0) {
        return Err(PuzzleError::triangulation(format!(
            "triangles cover {covered} but region area is {region} (self-crossing loops?)"
        )));
    }
    Ok(out)
}
