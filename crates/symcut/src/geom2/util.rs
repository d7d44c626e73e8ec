use nalgebra::Vector2;

use super::types::Point2;

/// Vector from polar coordinates.
#[inline]
pub fn polar(radius: f64, angle: f64) -> Vector2<f64> {
    let (s, c) = angle.sin_cos();
    Vector2::new(radius * c, radius * s)
}

/// z-component of `a × b` (signed parallelogram area).
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Positive if `a → b → c` turns left.
#[inline]
pub fn orient(a: Point2, b: Point2, c: Point2) -> f64 {
    cross(b - a, c - a)
}

/// Shoelace signed area of a closed loop (CCW positive).
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        acc += cross(points[i], points[(i + 1) % n]);
    }
    0.5 * acc
}

/// Parameter of the orthogonal projection of `p` on segment `a→b`, plus the distance.
///
/// The parameter is clamped to [0, 1]; degenerate segments project onto `a`.
pub fn project_on_segment(p: Point2, a: Point2, b: Point2) -> (f64, f64) {
    let d = b - a;
    let len2 = d.norm_squared();
    if len2 <= 0.0 {
        return (0.0, (p - a).norm());
    }
    let t = ((p - a).dot(&d) / len2).clamp(0.0, 1.0);
    let q = a + d * t;
    (t, (p - q).norm())
}

/// Proper crossing of `p0→p1` and `q0→q1`: parameters `(t, u)` along each.
///
/// Returns `None` for (near-)parallel segments; collinear overlap is handled by
/// the callers through endpoint-on-segment tests.
pub fn segment_crossing(
    p0: Point2,
    p1: Point2,
    q0: Point2,
    q1: Point2,
    eps_det: f64,
) -> Option<(f64, f64)> {
    let r = p1 - p0;
    let s = q1 - q0;
    let denom = cross(r, s);
    if denom.abs() <= eps_det * r.norm() * s.norm() {
        return None;
    }
    let w = q0 - p0;
    let t = cross(w, s) / denom;
    let u = cross(w, r) / denom;
    Some((t, u))
}

/// Even–odd crossing test of `p` against a set of closed loops.
///
/// Points exactly on a boundary get an arbitrary but deterministic answer.
pub fn point_in_loops<'a, I>(p: Point2, loops: I) -> bool
where
    I: IntoIterator<Item = &'a [Point2]>,
{
    let mut inside = false;
    for pts in loops {
        let n = pts.len();
        if n < 3 {
            continue;
        }
        let mut j = n - 1;
        for i in 0..n {
            let a = pts[j];
            let b = pts[i];
            if (b.y > p.y) != (a.y > p.y) {
                let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x {
                    inside = !inside;
                }
            }
            j = i;
        }
    }
    inside
}
