//! Sweep order and vertex classification.

use std::cmp::Ordering;

use nalgebra::Point2;

/// Role of a polygon vertex with respect to the upward sweep.
///
/// "Below" and "above" refer to [`sweep_cmp`]. The polygon is assumed to
/// be wound counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// Both neighbours above, convex corner: a new monotone piece begins.
    Start,
    /// Both neighbours below, convex corner: a piece ends.
    End,
    /// Both neighbours above, reflex corner: the interior below is split.
    Split,
    /// Both neighbours below, reflex corner: two pieces merge.
    Merge,
    /// On the left boundary (the boundary runs downward through it).
    Left,
    /// On the right boundary (the boundary runs upward through it).
    Right,
}

/// Compare two polygon vertices in sweep order.
///
/// Y ascending, then X ascending. Coincident points are ordered by index,
/// which keeps the order total for bridged holes.
#[inline]
pub fn sweep_cmp(points: &[Point2<f64>], a: usize, b: usize) -> Ordering {
    let (p, q) = (&points[a], &points[b]);
    p.y.total_cmp(&q.y)
        .then_with(|| p.x.total_cmp(&q.x))
        .then_with(|| a.cmp(&b))
}

/// Check if vertex `a` comes before vertex `b` in sweep order.
#[inline]
pub fn sweep_less(points: &[Point2<f64>], a: usize, b: usize) -> bool {
    sweep_cmp(points, a, b) == Ordering::Less
}

/// Vertex indices sorted into sweep order.
pub fn sweep_order(points: &[Point2<f64>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_unstable_by(|&a, &b| sweep_cmp(points, a, b));
    order
}

/// Twice the signed area of triangle `(a, b, c)`; positive when counter-clockwise.
#[inline]
pub fn orient(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Signed area of a polygon (shoelace formula); positive when counter-clockwise.
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let p = &points[i];
            let q = &points[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    0.5 * twice
}

/// Classify vertex `i` of a counter-clockwise polygon.
///
/// A corner is convex when the boundary turns left or runs straight
/// through it, so collinear triplets take the convex branch.
pub fn classify_vertex(points: &[Point2<f64>], i: usize) -> VertexKind {
    let n = points.len();
    let prev = (i + n - 1) % n;
    let next = (i + 1) % n;

    let convex = orient(&points[prev], &points[i], &points[next]) >= 0.0;
    let below_prev = sweep_less(points, i, prev);
    let below_next = sweep_less(points, i, next);

    match (below_prev, below_next) {
        (true, true) if convex => VertexKind::Start,
        (true, true) => VertexKind::Split,
        (false, false) if convex => VertexKind::End,
        (false, false) => VertexKind::Merge,
        _ if sweep_less(points, prev, next) => VertexKind::Right,
        _ => VertexKind::Left,
    }
}

/// Classify every vertex of a counter-clockwise polygon.
pub fn classify_polygon(points: &[Point2<f64>]) -> Vec<VertexKind> {
    (0..points.len())
        .map(|i| classify_vertex(points, i))
        .collect()
}
