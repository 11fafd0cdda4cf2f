//! Decomposition of a simple polygon into Y-monotone pieces.
//!
//! An upward sweep visits the vertices in [`sweep_cmp`](super::classify::sweep_cmp)
//! order while keeping the polygon edges that currently bound the interior
//! from the right. Each such edge carries a *helper*: the most recent
//! vertex that sees the edge horizontally from its left. Split vertices
//! connect to the helper of the edge to their right; merge vertices become
//! helpers and are connected to whichever vertex next replaces them. The
//! resulting bridging diagonals cut the polygon into monotone pieces.
//!
//! The active edges live in a [`BTreeMap`] ordered left to right along the
//! sweep line, so every status update is logarithmic. Pieces are then cut
//! out in a single walk over the ring edges and both directions of every
//! diagonal.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Bound;

use nalgebra::Point2;
use tracing::trace;

use super::classify::{classify_polygon, orient, sweep_order, VertexKind};

/// Sort key of an active edge `edge -> edge + 1`, which bounds the interior
/// on its left.
///
/// Two active edges never cross, so their left-to-right order stays fixed
/// while both are in the status. Keys are compared at the lower endpoint of
/// whichever edge entered the sweep last.
#[derive(Debug, Clone, Copy)]
struct StatusKey {
    lo: Point2<f64>,
    hi: Point2<f64>,
    /// Sweep rank of `lo`.
    rank: usize,
    edge: usize,
}

impl StatusKey {
    /// Key of a lone vertex. It sorts after every edge passing through it.
    fn at_vertex(p: Point2<f64>, rank: usize) -> Self {
        Self {
            lo: p,
            hi: p,
            rank,
            edge: usize::MAX,
        }
    }

    /// Order against `other`, which entered the sweep no later than `self`.
    fn cmp_newer(&self, other: &Self) -> Ordering {
        let mut side = orient(&other.lo, &other.hi, &self.lo);
        if side == 0.0 {
            side = orient(&other.lo, &other.hi, &self.hi);
        }

        if side > 0.0 {
            Ordering::Less
        } else if side < 0.0 {
            Ordering::Greater
        } else {
            self.edge.cmp(&other.edge)
        }
    }
}

impl Ord for StatusKey {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.edge == other.edge {
            Ordering::Equal
        } else if self.rank >= other.rank {
            self.cmp_newer(other)
        } else {
            other.cmp_newer(self).reverse()
        }
    }
}

impl PartialOrd for StatusKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for StatusKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for StatusKey {}

/// Sweep status: edges crossed by the sweep line that have the interior
/// to their left, each mapped to its helper.
struct SweepStatus<'a> {
    points: &'a [Point2<f64>],
    rank: Vec<usize>,
    active: BTreeMap<StatusKey, usize>,
    keys: Vec<Option<StatusKey>>,
}

impl<'a> SweepStatus<'a> {
    fn new(points: &'a [Point2<f64>], order: &[usize]) -> Self {
        let mut rank = vec![0; points.len()];
        for (r, &v) in order.iter().enumerate() {
            rank[v] = r;
        }

        Self {
            points,
            rank,
            active: BTreeMap::new(),
            keys: vec![None; points.len()],
        }
    }

    fn insert(&mut self, edge: usize, helper: usize) {
        let (a, b) = (edge, (edge + 1) % self.points.len());
        let (lo, hi) = if self.rank[a] < self.rank[b] { (a, b) } else { (b, a) };

        let key = StatusKey {
            lo: self.points[lo],
            hi: self.points[hi],
            rank: self.rank[lo],
            edge,
        };
        self.keys[edge] = Some(key);
        self.active.insert(key, helper);
    }

    /// Remove `edge` from the status and return its helper.
    fn remove(&mut self, edge: usize) -> usize {
        let helper = self.keys[edge]
            .take()
            .and_then(|key| self.active.remove(&key));
        match helper {
            Some(helper) => helper,
            None => panic!("sweep reached the top of edge {edge} before its bottom"),
        }
    }

    /// Helper of the active edge directly to the right of vertex `v`.
    fn helper_right_of(&mut self, v: usize) -> &mut usize {
        let at = StatusKey::at_vertex(self.points[v], self.rank[v]);
        match self
            .active
            .range_mut((Bound::Excluded(at), Bound::Unbounded))
            .next()
        {
            Some((_, helper)) => helper,
            None => panic!("no boundary edge to the right of vertex {v}"),
        }
    }
}

/// Compute the bridging diagonals that remove every split and merge vertex.
///
/// Returned pairs are normalized to `(min, max)`, sorted and deduplicated.
pub fn bridging_diagonals(points: &[Point2<f64>]) -> Vec<(usize, usize)> {
    let n = points.len();
    let kinds = classify_polygon(points);
    let order = sweep_order(points);
    let mut status = SweepStatus::new(points, &order);
    let mut diagonals = Vec::new();

    let connect_if_merge = |diagonals: &mut Vec<(usize, usize)>, v: usize, helper: usize| {
        if kinds[helper] == VertexKind::Merge {
            trace!(from = v, to = helper, "Bridging merge vertex");
            diagonals.push((v, helper));
        }
    };

    for v in order {
        let edge_below = (v + n - 1) % n;
        match kinds[v] {
            VertexKind::Start => status.insert(v, v),
            VertexKind::End => {
                let helper = status.remove(edge_below);
                connect_if_merge(&mut diagonals, v, helper);
            }
            VertexKind::Split => {
                let helper = std::mem::replace(status.helper_right_of(v), v);
                trace!(from = v, to = helper, "Bridging split vertex");
                diagonals.push((v, helper));
                status.insert(v, v);
            }
            VertexKind::Merge => {
                let helper = status.remove(edge_below);
                connect_if_merge(&mut diagonals, v, helper);
                let helper = std::mem::replace(status.helper_right_of(v), v);
                connect_if_merge(&mut diagonals, v, helper);
            }
            VertexKind::Right => {
                let helper = status.remove(edge_below);
                connect_if_merge(&mut diagonals, v, helper);
                status.insert(v, v);
            }
            VertexKind::Left => {
                let helper = std::mem::replace(status.helper_right_of(v), v);
                connect_if_merge(&mut diagonals, v, helper);
            }
        }
    }

    for d in &mut diagonals {
        *d = (d.0.min(d.1), d.0.max(d.1));
    }
    diagonals.sort_unstable();
    diagonals.dedup();
    diagonals
}

/// Split a simple counter-clockwise polygon into Y-monotone pieces.
///
/// Each piece is a counter-clockwise ring of original vertex indices.
/// Every polygon vertex appears in at least one piece; vertices on a
/// bridging diagonal appear in both pieces it separates.
///
/// # Panics
///
/// Panics if two bridging diagonals cross, which only happens when the
/// polygon is not simple.
pub fn monotone_pieces(points: &[Point2<f64>]) -> Vec<Vec<usize>> {
    let n = points.len();
    if n < 3 {
        return vec![(0..n).collect()];
    }
    let diagonals = bridging_diagonals(points);

    // Neighbours of each vertex as ascending forward offsets along the ring.
    // Offset 1 leaves along the polygon edge, offset `n - 1` arrives by it.
    let mut offsets = vec![vec![1, n - 1]; n];
    for &(a, b) in &diagonals {
        let forward = (b + n - a) % n;
        if forward == 1 || forward == n - 1 {
            continue;
        }
        offsets[a].push(forward);
        offsets[b].push(n - forward);
    }
    for list in &mut offsets {
        list.sort_unstable();
    }

    let mut used: Vec<Vec<bool>> = offsets.iter().map(|list| vec![false; list.len()]).collect();
    let mut pieces = Vec::with_capacity(diagonals.len() + 1);

    for start in 0..n {
        for first in 0..offsets[start].len() {
            // The reversed polygon edge runs along the exterior
            if used[start][first] || offsets[start][first] == n - 1 {
                continue;
            }

            let mut ring = Vec::new();
            let (mut v, mut slot) = (start, first);
            while !used[v][slot] {
                used[v][slot] = true;
                ring.push(v);

                // Keep the interior on the left: leave by the neighbour just
                // before the one we arrived from.
                let next = (v + offsets[v][slot]) % n;
                let back = (v + n - next) % n;
                slot = match offsets[next].binary_search(&back) {
                    Ok(pos) if pos > 0 => pos - 1,
                    _ => panic!("bridging diagonals cross at vertex {next}"),
                };
                v = next;
            }
            pieces.push(ring);
        }
    }

    pieces
}
