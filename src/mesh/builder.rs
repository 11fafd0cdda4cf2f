//! Adjacency construction from triangle index buffers.

use tracing::debug;

use super::adjacency::AdjacencyGraph;
use super::index::{FaceId, MeshIndex};
use crate::error::{MeshError, Result};

/// Check that an index buffer describes whole triangles.
pub fn check_triangle_indices<I: MeshIndex>(indices: &[I]) -> Result<()> {
    if indices.len() % 3 != 0 {
        return Err(MeshError::IndexCountNotMultipleOfThree { len: indices.len() });
    }
    Ok(())
}

/// Number of vertices referenced by an index buffer (largest index + 1).
pub fn referenced_vertex_count<I: MeshIndex>(indices: &[I]) -> usize {
    indices.iter().map(|i| i.to_usize() + 1).max().unwrap_or(0)
}

/// Build the edge adjacency graph of a triangle index buffer.
///
/// # Arguments
/// * `indices` - Flat triangle list, three indices per face
/// * `num_vertices` - Size of the vertex range; must exceed every index
///
/// # Returns
/// The adjacency graph, or an error if the buffer length is not a
/// multiple of three.
///
/// Edges between a vertex and itself (from degenerate faces) are not
/// recorded.
///
/// # Example
/// ```
/// use triform::mesh::build_adjacency;
///
/// let indices: Vec<u32> = vec![0, 1, 2, 0, 2, 3];
/// let graph = build_adjacency(&indices, 4).unwrap();
///
/// assert_eq!(graph.num_edges(), 5);
/// assert_eq!(graph.boundary_edge_count(), 4);
/// ```
pub fn build_adjacency<I: MeshIndex>(indices: &[I], num_vertices: usize) -> Result<AdjacencyGraph> {
    check_triangle_indices(indices)?;

    let num_faces = indices.len() / 3;
    let mut graph = AdjacencyGraph::with_capacity(num_vertices, num_faces);

    for (fi, tri) in indices.chunks_exact(3).enumerate() {
        let face = FaceId::new(fi);
        for k in 0..3 {
            let a = tri[k].to_usize();
            let b = tri[(k + 1) % 3].to_usize();
            if a != b {
                graph.attach(a, b, face);
            }
        }
    }

    debug!(
        faces = num_faces,
        edges = graph.num_edges(),
        nonplanar = graph.nonplanar_edge_count(),
        "Built edge adjacency"
    );

    Ok(graph)
}
