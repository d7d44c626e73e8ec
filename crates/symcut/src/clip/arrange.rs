//! Boundary arrangement: split both operands at every contact and tag each fragment.
//!
//! All vertices (input and intersection) go through one `PointPool`, so two
//! fragments meet exactly when they share pool indices. Shared boundary pieces
//! are then detected by index pairs instead of floating-point comparisons.

use std::collections::HashSet;

use crate::geom2::{project_on_segment, segment_crossing, GeomCfg, Point2};
use crate::polygon::Polygon;

/// Vertex table with tolerance-based merging.
#[derive(Clone, Debug)]
pub(super) struct PointPool {
    pts: Vec<Point2>,
    eps: f64,
}

impl PointPool {
    pub(super) fn new(eps: f64) -> Self {
        Self {
            pts: Vec::new(),
            eps,
        }
    }

    /// Index of an existing point within `eps`, or of the newly stored `p`.
    pub(super) fn intern(&mut self, p: Point2) -> usize {
        if let Some(i) = self.pts.iter().position(|q| (q - p).norm() <= self.eps) {
            return i;
        }
        self.pts.push(p);
        self.pts.len() - 1
    }

    #[inline]
    pub(super) fn get(&self, i: usize) -> Point2 {
        self.pts[i]
    }
}

/// Position of a boundary fragment relative to the other operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Side {
    Inside,
    Outside,
    /// Coincides with a fragment of the other boundary running the same way.
    SharedSame,
    /// Coincides with a fragment of the other boundary running the opposite way.
    SharedOpposite,
}

/// Directed fragment `from → to` (pool indices) with its tag.
#[derive(Clone, Copy, Debug)]
pub(super) struct Fragment {
    pub from: usize,
    pub to: usize,
    pub side: Side,
}

/// One input edge in pool indices plus the contact points found on it.
struct Segment {
    a: usize,
    b: usize,
    cuts: Vec<(f64, usize)>,
}

impl Segment {
    fn pieces(&self) -> Vec<(usize, usize)> {
        let mut cuts = self.cuts.clone();
        cuts.sort_by(|x, y| x.0.total_cmp(&y.0));
        let mut chain = vec![self.a];
        for (_, k) in cuts {
            if chain.last() != Some(&k) {
                chain.push(k);
            }
        }
        if chain.last() != Some(&self.b) {
            chain.push(self.b);
        }
        chain
            .windows(2)
            .filter(|w| w[0] != w[1])
            .map(|w| (w[0], w[1]))
            .collect()
    }
}

/// Both boundaries after splitting, tagged against each other.
pub(super) struct Arrangement {
    pub pool: PointPool,
    pub subject: Vec<Fragment>,
    pub cutter: Vec<Fragment>,
}

impl Arrangement {
    /// Whether the cutter boundary enters the subject or shares an edge with it.
    pub(super) fn boundaries_interact(&self) -> bool {
        self.cutter.iter().any(|f| f.side != Side::Outside)
            || self
                .subject
                .iter()
                .any(|f| matches!(f.side, Side::SharedSame | Side::SharedOpposite))
    }

    /// The common side of every subject fragment, if there is one.
    pub(super) fn uniform_subject_side(&self) -> Option<Side> {
        let first = self.subject.first()?.side;
        self.subject
            .iter()
            .all(|f| f.side == first)
            .then_some(first)
    }

    /// Boundary of `subject ∩ cutter`.
    pub(super) fn inside_edges(&self) -> Vec<(usize, usize)> {
        let own = self
            .subject
            .iter()
            .filter(|f| matches!(f.side, Side::Inside | Side::SharedSame))
            .map(|f| (f.from, f.to));
        let theirs = self
            .cutter
            .iter()
            .filter(|f| f.side == Side::Inside)
            .map(|f| (f.from, f.to));
        own.chain(theirs).collect()
    }

    /// Boundary of `subject \ cutter`; cutter pieces run reversed.
    pub(super) fn outside_edges(&self) -> Vec<(usize, usize)> {
        let own = self
            .subject
            .iter()
            .filter(|f| matches!(f.side, Side::Outside | Side::SharedOpposite))
            .map(|f| (f.from, f.to));
        let theirs = self
            .cutter
            .iter()
            .filter(|f| f.side == Side::Inside)
            .map(|f| (f.to, f.from));
        own.chain(theirs).collect()
    }
}

pub(super) fn arrange(subject: &Polygon, cutter: &Polygon, cfg: &GeomCfg) -> Arrangement {
    let mut pool = PointPool::new(cfg.eps_snap);
    let mut s_segs = segments(subject, &mut pool);
    let mut c_segs = segments(cutter, &mut pool);
    for s in s_segs.iter_mut() {
        for c in c_segs.iter_mut() {
            split_pair(s, c, &mut pool, cfg);
        }
    }
    let s_pieces: Vec<(usize, usize)> = s_segs.iter().flat_map(Segment::pieces).collect();
    let c_pieces: Vec<(usize, usize)> = c_segs.iter().flat_map(Segment::pieces).collect();
    let s_set: HashSet<(usize, usize)> = s_pieces.iter().copied().collect();
    let c_set: HashSet<(usize, usize)> = c_pieces.iter().copied().collect();

    let mid = |pool: &PointPool, a: usize, b: usize| (pool.get(a) + pool.get(b)) * 0.5;
    let subject_frags: Vec<Fragment> = s_pieces
        .iter()
        .map(|&(from, to)| {
            let side = if c_set.contains(&(from, to)) {
                Side::SharedSame
            } else if c_set.contains(&(to, from)) {
                Side::SharedOpposite
            } else if cutter.contains(mid(&pool, from, to)) {
                Side::Inside
            } else {
                Side::Outside
            };
            Fragment { from, to, side }
        })
        .collect();
    let cutter_frags: Vec<Fragment> = c_pieces
        .iter()
        .map(|&(from, to)| {
            let side = if s_set.contains(&(from, to)) {
                Side::SharedSame
            } else if s_set.contains(&(to, from)) {
                Side::SharedOpposite
            } else if subject.contains(mid(&pool, from, to)) {
                Side::Inside
            } else {
                Side::Outside
            };
            Fragment { from, to, side }
        })
        .collect();
    Arrangement {
        pool,
        subject: subject_frags,
        cutter: cutter_frags,
    }
}

fn segments(poly: &Polygon, pool: &mut PointPool) -> Vec<Segment> {
    let mut out = Vec::with_capacity(poly.vertex_count());
    for contour in poly.contours() {
        let n = contour.len();
        if n < 3 {
            continue;
        }
        let ids: Vec<usize> = contour.points().iter().map(|p| pool.intern(*p)).collect();
        for i in 0..n {
            let (a, b) = (ids[i], ids[(i + 1) % n]);
            if a != b {
                out.push(Segment {
                    a,
                    b,
                    cuts: Vec::new(),
                });
            }
        }
    }
    out
}

/// Record every contact between `s` and `c`: vertices of one lying on the
/// other's interior, and proper crossings.
fn split_pair(s: &mut Segment, c: &mut Segment, pool: &mut PointPool, cfg: &GeomCfg) {
    let eps = cfg.eps_snap;
    let (p0, p1) = (pool.get(s.a), pool.get(s.b));
    let (q0, q1) = (pool.get(c.a), pool.get(c.b));

    for q in [c.a, c.b] {
        if q == s.a || q == s.b {
            continue;
        }
        let (t, d) = project_on_segment(pool.get(q), p0, p1);
        if d <= eps && t > 0.0 && t < 1.0 {
            s.cuts.push((t, q));
        }
    }
    for p in [s.a, s.b] {
        if p == c.a || p == c.b {
            continue;
        }
        let (u, d) = project_on_segment(pool.get(p), q0, q1);
        if d <= eps && u > 0.0 && u < 1.0 {
            c.cuts.push((u, p));
        }
    }

    let Some((t, u)) = segment_crossing(p0, p1, q0, q1, cfg.eps_det) else {
        return;
    };
    let t_eps = eps / (p1 - p0).norm();
    let u_eps = eps / (q1 - q0).norm();
    if t > t_eps && t < 1.0 - t_eps && u > u_eps && u < 1.0 - u_eps {
        let k = pool.intern(p0 + (p1 - p0) * t);
        if k != s.a && k != s.b {
            s.cuts.push((t, k));
        }
        if k != c.a && k != c.b {
            c.cuts.push((u, k));
        }
    }
}
