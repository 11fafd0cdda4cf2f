//! Triangulation of a single Y-monotone ring.
//!
//! The two boundary chains are merged into sweep order and the vertices
//! are visited bottom to top while a stack holds the part of the polygon
//! below the sweep line that is not yet triangulated. The stack is always
//! a reflex chain along one boundary. A vertex on the opposite chain sees
//! every stacked vertex and closes a fan; a vertex on the same chain cuts
//! off convex corners from the top of the stack for as long as it can.

use nalgebra::Point2;

use super::classify::{orient, sweep_cmp, sweep_less};

/// Boundary chain a vertex of a monotone ring lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chain {
    /// The lowest vertex, shared by both chains.
    Bottom,
    /// Rising side, visited in ring order.
    Right,
    /// Falling side, visited against ring order.
    Left,
    /// The highest vertex, shared by both chains.
    Top,
}

/// Merge the two chains of a counter-clockwise monotone ring into sweep order.
fn merge_chains(points: &[Point2<f64>], ring: &[usize]) -> Vec<(usize, Chain)> {
    let m = ring.len();
    let start = (0..m)
        .min_by(|&a, &b| sweep_cmp(points, ring[a], ring[b]))
        .unwrap_or(0);

    let mut merged = Vec::with_capacity(m);
    merged.push((ring[start], Chain::Bottom));

    let (mut r, mut l) = ((start + 1) % m, (start + m - 1) % m);
    loop {
        if r == l {
            merged.push((ring[r], Chain::Top));
            break;
        }
        if sweep_less(points, ring[r], ring[l]) {
            merged.push((ring[r], Chain::Right));
            r = (r + 1) % m;
        } else {
            merged.push((ring[l], Chain::Left));
            l = (l + m - 1) % m;
        }
    }
    merged
}

/// Triangulate a counter-clockwise Y-monotone ring of polygon indices.
///
/// Emits exactly `ring.len() - 2` counter-clockwise triangles and returns
/// that count. Rings with fewer than three vertices emit nothing.
///
/// # Panics
/// Panics if the sweep does not finish with exactly two stacked vertices,
/// which means the ring was not monotone.
pub fn triangulate_monotone<F>(points: &[Point2<f64>], ring: &[usize], emit: &mut F) -> usize
where
    F: FnMut([usize; 3]),
{
    let m = ring.len();
    if m < 3 {
        return 0;
    }

    let merged = merge_chains(points, ring);
    let mut stack: Vec<(usize, Chain)> = Vec::with_capacity(m);
    stack.extend_from_slice(&merged[..2]);
    let mut emitted = 0;

    for &(v, chain) in &merged[2..] {
        let top_chain = stack[stack.len() - 1].1;

        if chain == Chain::Top || chain != top_chain {
            // Opposite chain: fan over the whole stack
            for pair in stack.windows(2) {
                let (a, b) = (pair[0].0, pair[1].0);
                if top_chain == Chain::Right {
                    emit([a, b, v]);
                } else {
                    emit([a, v, b]);
                }
                emitted += 1;
            }
            let last = stack[stack.len() - 1];
            stack.clear();
            stack.push(last);
        } else {
            // Same chain: cut off convex corners
            while stack.len() >= 2 {
                let a = stack[stack.len() - 2].0;
                let b = stack[stack.len() - 1].0;
                let turn = orient(&points[a], &points[b], &points[v]);
                let convex = match chain {
                    Chain::Right => turn > 0.0,
                    _ => turn < 0.0,
                };
                if !convex {
                    break;
                }
                if chain == Chain::Right {
                    emit([a, b, v]);
                } else {
                    emit([a, v, b]);
                }
                emitted += 1;
                stack.pop();
            }
        }
        stack.push((v, chain));
    }

    assert_eq!(
        stack.len(),
        2,
        "monotone sweep ended with {} stacked vertices",
        stack.len()
    );
    debug_assert_eq!(emitted, m - 2);
    emitted
}
