//! Smoothing group assignment.
//!
//! Two faces sharing a manifold edge belong to the same smoothing group
//! when the angle between their normals is below the smoothing angle.
//! Groups are the connected components of that relation, each named by
//! the smallest face index it contains.

use std::collections::HashSet;

use tracing::trace;

use super::face::FaceRecord;
use crate::mesh::AdjacencyGraph;

/// Check if the edge between two faces renders smooth.
#[inline]
fn is_smooth(a: &FaceRecord, b: &FaceRecord, cos_threshold: f64) -> bool {
    a.normal.dot(&b.normal).clamp(-1.0, 1.0) > cos_threshold
}

/// Merge the smoothing groups of `faces` across smooth edges of `graph`.
///
/// Repeats full passes over the edges until a pass changes nothing, and
/// returns the number of passes (including that last one). The result
/// does not depend on edge order.
///
/// Nonplanar and boundary edges never join groups. A smoothing angle of
/// zero keeps every face in its own group; an angle of `π` joins every
/// pair of adjacent faces whose normals are not exactly opposite.
///
/// # Panics
/// Panics if an edge of `graph` has no left face or refers to a face
/// outside `faces`.
pub fn assign_smoothing_groups(
    faces: &mut [FaceRecord],
    graph: &AdjacencyGraph,
    smoothing_angle: f64,
) -> usize {
    let cos_threshold = smoothing_angle.cos();
    let mut passes = 0;

    loop {
        passes += 1;
        let mut changed = 0usize;

        for (id, edge) in graph.edges() {
            assert!(edge.left.is_valid(), "edge {id:?} has no owning face");
            if !edge.is_manifold() {
                continue;
            }

            let (l, r) = (edge.left.index(), edge.right.index());
            let (gl, gr) = (faces[l].group, faces[r].group);
            if gl == gr || !is_smooth(&faces[l], &faces[r], cos_threshold) {
                continue;
            }

            let group = gl.min(gr);
            faces[l].group = group;
            faces[r].group = group;
            changed += 1;
        }

        trace!(pass = passes, changed, "Smoothing group pass");
        if changed == 0 {
            return passes;
        }
    }
}

/// Count the distinct smoothing groups among `faces`.
pub fn count_groups(faces: &[FaceRecord]) -> usize {
    faces.iter().map(|f| f.group).collect::<HashSet<_>>().len()
}
