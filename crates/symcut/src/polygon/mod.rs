//! Polygonal regions with holes (tagged loop list) and a lazy triangulation cache.
//!
//! Conventions
//! - A region is a list of closed contours, each tagged `Outer` or `Hole`.
//! - Orientation is normalized on construction: outers CCW, holes CW. Signed
//!   contour areas therefore sum to the region area.
//! - Contours never repeat their first point at the end.
//! - Containment is even–odd over all contours, so a hole punched into an
//!   outer reads as "outside" without consulting the tags.
//!
//! Code cross-refs: `clip::cut_against` (consumes and produces `Polygon`),
//! `tess` (triangulation cache).

mod tess;

pub use tess::Triangle;

use crate::geom2::{point_in_loops, signed_area, Affine2, Point2};

/// Role of a loop in a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContourKind {
    Outer,
    Hole,
}

/// One closed boundary loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    kind: ContourKind,
    points: Vec<Point2>,
}

impl Contour {
    /// Tag `points` with `kind` and reorient them to the kind's convention.
    pub fn new(kind: ContourKind, mut points: Vec<Point2>) -> Self {
        let area = signed_area(&points);
        let flip = match kind {
            ContourKind::Outer => area < 0.0,
            ContourKind::Hole => area > 0.0,
        };
        if flip {
            points.reverse();
        }
        Self { kind, points }
    }

    #[inline]
    pub fn outer(points: Vec<Point2>) -> Self {
        Self::new(ContourKind::Outer, points)
    }

    #[inline]
    pub fn hole(points: Vec<Point2>) -> Self {
        Self::new(ContourKind::Hole, points)
    }

    #[inline]
    pub fn kind(&self) -> ContourKind {
        self.kind
    }

    #[inline]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Positive for outers, negative for holes.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Directed edges `(p_i, p_{i+1})`, wrapping around.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    fn transformed(&self, f: &Affine2) -> Self {
        Self::new(self.kind, self.points.iter().map(|p| f.apply(*p)).collect())
    }
}

/// A planar region: one or more outer loops plus holes.
///
/// Invariant: loops describe a simple region (touching at isolated vertices is
/// allowed, crossing is not). `triangles` is a cache; `None` means dirty.
#[derive(Clone, Debug, Default)]
pub struct Polygon {
    contours: Vec<Contour>,
    triangles: Option<Vec<Triangle>>,
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.contours == other.contours
    }
}

impl Polygon {
    /// Simple polygon from a single outer loop (any orientation).
    pub fn new(points: Vec<Point2>) -> Self {
        Self::from_contours(vec![Contour::outer(points)])
    }

    pub fn from_contours(contours: Vec<Contour>) -> Self {
        Self {
            contours,
            triangles: None,
        }
    }

    /// Outer loop plus holes, orientations fixed up as needed.
    pub fn with_holes(outer: Vec<Point2>, holes: Vec<Vec<Point2>>) -> Self {
        let mut contours = Vec::with_capacity(1 + holes.len());
        contours.push(Contour::outer(outer));
        contours.extend(holes.into_iter().map(Contour::hole));
        Self::from_contours(contours)
    }

    #[inline]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn outers(&self) -> impl Iterator<Item = &Contour> {
        self.contours
            .iter()
            .filter(|c| c.kind == ContourKind::Outer)
    }

    pub fn holes(&self) -> impl Iterator<Item = &Contour> {
        self.contours
            .iter()
            .filter(|c| c.kind == ContourKind::Hole)
    }

    /// Append a loop; drops the cached triangulation.
    pub fn push_contour(&mut self, contour: Contour) {
        self.contours.push(contour);
        self.triangles = None;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.iter().all(Contour::is_empty)
    }

    pub fn vertex_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// Image under `f`. Reflections are re-oriented so the conventions still hold.
    pub fn transformed(&self, f: &Affine2) -> Polygon {
        Polygon::from_contours(self.contours.iter().map(|c| c.transformed(f)).collect())
    }

    /// Region area: outer areas minus hole areas.
    pub fn area(&self) -> f64 {
        self.contours.iter().map(Contour::signed_area).sum()
    }

    /// Even–odd membership over all loops.
    pub fn contains(&self, p: Point2) -> bool {
        point_in_loops(p, self.contours.iter().map(|c| c.points()))
    }

    /// All vertices of all loops, in storage order.
    pub fn points(&self) -> impl Iterator<Item = &Point2> {
        self.contours.iter().flat_map(|c| c.points.iter())
    }
}

#[cfg(test)]
mod tests;
