//! Loop assembly: link result fragments into closed loops and group them into polygons.
//!
//! Walking rule: at every vertex take the unused outgoing fragment with the
//! sharpest left turn. With the region kept on the left this traces the
//! smallest face, so pieces that only touch at a vertex come out as separate
//! loops. Loops are additionally split at any repeated vertex, which keeps
//! every emitted loop simple.

use std::collections::HashMap;

use super::arrange::PointPool;
use crate::geom2::{cross, point_in_loops, signed_area, GeomCfg, Point2};
use crate::polygon::{Contour, Polygon};

pub(super) fn assemble(pool: &PointPool, edges: Vec<(usize, usize)>, cfg: &GeomCfg) -> Vec<Polygon> {
    let edges = cancel_opposites(edges);
    let loops = trace_loops(pool, &edges);
    group_loops(pool, loops, cfg)
}

/// Drop `a→b` / `b→a` pairs; they bound a zero-width sliver.
fn cancel_opposites(edges: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    let mut kept: Vec<Option<(usize, usize)>> = Vec::with_capacity(edges.len());
    let mut open: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (a, b) in edges {
        if let Some(k) = open.get_mut(&(b, a)).and_then(Vec::pop) {
            kept[k] = None;
            continue;
        }
        open.entry((a, b)).or_default().push(kept.len());
        kept.push(Some((a, b)));
    }
    kept.into_iter().flatten().collect()
}

fn trace_loops(pool: &PointPool, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut outgoing: HashMap<usize, Vec<usize>> = HashMap::new();
    for (k, &(a, _)) in edges.iter().enumerate() {
        outgoing.entry(a).or_default().push(k);
    }
    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();

    for start in 0..edges.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let mut path = vec![edges[start].0];
        let mut cur = start;
        loop {
            let (from, to) = edges[cur];
            if let Some(pos) = path.iter().position(|&v| v == to) {
                loops.push(path[pos..].to_vec());
                path.truncate(pos + 1);
            } else {
                path.push(to);
            }
            let incoming = pool.get(to) - pool.get(from);
            let next = outgoing.get(&to).and_then(|cands| {
                cands
                    .iter()
                    .copied()
                    .filter(|&k| !used[k])
                    .max_by(|&x, &y| {
                        let tx = turn(incoming, pool.get(edges[x].1) - pool.get(to));
                        let ty = turn(incoming, pool.get(edges[y].1) - pool.get(to));
                        tx.total_cmp(&ty)
                    })
            });
            match next {
                Some(k) => {
                    used[k] = true;
                    cur = k;
                }
                None => {
                    if path.len() > 1 {
                        tracing::warn!(vertices = path.len(), "dropping open boundary chain");
                    }
                    break;
                }
            }
        }
    }
    loops
}

/// Signed turn angle from `d_in` to `d_out` in (-π, π]; left turns are positive.
#[inline]
fn turn(d_in: Point2, d_out: Point2) -> f64 {
    cross(d_in, d_out).atan2(d_in.dot(&d_out))
}

/// Remove vertices lying on the straight line between their neighbours.
fn drop_collinear(mut pts: Vec<Point2>, eps: f64) -> Vec<Point2> {
    'scan: while pts.len() >= 3 {
        let n = pts.len();
        for i in 0..n {
            let prev = pts[(i + n - 1) % n];
            let cur = pts[i];
            let next = pts[(i + 1) % n];
            let base = next - prev;
            let len = base.norm();
            if len > 0.0
                && cross(base, cur - prev).abs() <= eps * len
                && (cur - prev).dot(&(next - cur)) > 0.0
            {
                pts.remove(i);
                continue 'scan;
            }
        }
        break;
    }
    pts
}

fn group_loops(pool: &PointPool, loops: Vec<Vec<usize>>, cfg: &GeomCfg) -> Vec<Polygon> {
    let mut outers: Vec<(Vec<Point2>, f64)> = Vec::new();
    let mut holes: Vec<Vec<Point2>> = Vec::new();
    for ids in loops {
        let pts = drop_collinear(ids.iter().map(|&i| pool.get(i)).collect(), cfg.eps_snap);
        if pts.len() < 3 {
            continue;
        }
        let area = signed_area(&pts);
        if area > cfg.eps_area {
            outers.push((pts, area));
        } else if area < -cfg.eps_area {
            holes.push(pts);
        }
    }

    let mut owned: Vec<Vec<Vec<Point2>>> = vec![Vec::new(); outers.len()];
    for hole in holes {
        // Hole edges never lie on an outer boundary, so the midpoint is a strict probe.
        let probe = (hole[0] + hole[1]) * 0.5;
        let owner = outers
            .iter()
            .enumerate()
            .filter(|(_, (pts, _))| point_in_loops(probe, [pts.as_slice()]))
            .min_by(|(_, (_, a)), (_, (_, b))| a.total_cmp(b))
            .map(|(k, _)| k);
        match owner {
            Some(k) => owned[k].push(hole),
            None => tracing::warn!(points = hole.len(), "dropping hole without enclosing loop"),
        }
    }

    outers
        .into_iter()
        .zip(owned)
        .map(|((outer, _), holes)| {
            let mut contours = Vec::with_capacity(1 + holes.len());
            contours.push(Contour::outer(outer));
            contours.extend(holes.into_iter().map(Contour::hole));
            Polygon::from_contours(contours)
        })
        .collect()
}
