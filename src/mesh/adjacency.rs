//! Edge adjacency graph for triangle index buffers.
//!
//! Each undirected edge is stored once, in an arena of [`Edge`] records.
//! Every vertex owns a singly linked list of the edges touching it; an edge
//! sits in the lists of both its endpoints, so it carries one `next` link
//! per endpoint.
//!
//! # Sides
//!
//! The face that created an edge is recorded as its **left** face, and the
//! next face to touch it fills the **right** side, whichever direction
//! either of them traverses it. A third face flags the edge **nonplanar**:
//! it has more than two incident faces and never counts as a smooth edge.

use super::index::{EdgeId, FaceId};

/// An undirected edge with its incident faces.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// Vertex the creating face leaves from.
    pub start: usize,

    /// Vertex the creating face arrives at.
    pub end: usize,

    /// Face that created the edge.
    pub left: FaceId,

    /// Second face to touch the edge. Invalid on boundary edges.
    pub right: FaceId,

    /// Set once a third face touched the edge.
    pub nonplanar: bool,

    /// Next edge in the lists of `start` (slot 0) and `end` (slot 1).
    pub(crate) next: [EdgeId; 2],
}

impl Edge {
    /// Create an edge owned on its left by `face`.
    pub fn new(start: usize, end: usize, face: FaceId) -> Self {
        Self {
            start,
            end,
            left: face,
            right: FaceId::invalid(),
            nonplanar: false,
            next: [EdgeId::invalid(); 2],
        }
    }

    /// Check whether the edge connects `a` and `b` (in either direction).
    #[inline]
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    /// The endpoint opposite to `v`.
    #[inline]
    pub fn other(&self, v: usize) -> usize {
        if self.start == v {
            self.end
        } else {
            self.start
        }
    }

    /// Check if the edge has exactly one face on each side.
    #[inline]
    pub fn is_manifold(&self) -> bool {
        self.left.is_valid() && self.right.is_valid() && !self.nonplanar
    }

    /// Check if the edge has a single incident face.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.right.is_valid() && !self.nonplanar
    }

    #[inline]
    fn next_for(&self, v: usize) -> EdgeId {
        if self.start == v {
            self.next[0]
        } else {
            self.next[1]
        }
    }
}

/// Per-vertex edge lists over an arena of edge records.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    pub(crate) edges: Vec<Edge>,

    /// Head of each vertex's edge list.
    pub(crate) heads: Vec<EdgeId>,
}

impl AdjacencyGraph {
    /// Create an empty graph over `num_vertices` vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self::with_capacity(num_vertices, 0)
    }

    /// Create a graph with room for the edges of `num_faces` triangles.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        // Closed manifold meshes have E = 3F/2; open ones a little more.
        Self {
            edges: Vec::with_capacity(num_faces * 3 / 2 + num_faces / 4),
            heads: vec![EdgeId::invalid(); num_vertices],
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices the graph was built over.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.heads.len()
    }

    /// Get the number of distinct edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Get a mutable edge by ID.
    #[inline]
    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    /// Iterate over all edges with their IDs.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId::new(i), e))
    }

    /// Iterate over the edges touching vertex `v`.
    pub fn edges_of(&self, v: usize) -> VertexEdgeIter<'_> {
        VertexEdgeIter {
            graph: self,
            vertex: v,
            current: self.heads[v],
        }
    }

    /// Find the edge between `a` and `b`, walking the list of `a`.
    pub fn find_edge(&self, a: usize, b: usize) -> Option<EdgeId> {
        self.edges_of(a).find(|&id| self.edge(id).connects(a, b))
    }

    /// Count edges flagged nonplanar.
    pub fn nonplanar_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.nonplanar).count()
    }

    /// Count edges with a single incident face.
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_boundary()).count()
    }

    // ==================== Construction ====================

    /// Append a new edge `a -> b` owned by `face` and link it into the
    /// lists of both endpoints.
    pub(crate) fn insert_edge(&mut self, a: usize, b: usize, face: FaceId) -> EdgeId {
        debug_assert_ne!(a, b, "self-loop edges are not recorded");
        let id = EdgeId::new(self.edges.len());
        let mut edge = Edge::new(a, b, face);
        edge.next = [self.heads[a], self.heads[b]];
        self.edges.push(edge);
        self.heads[a] = id;
        self.heads[b] = id;
        id
    }

    /// Record that `face` uses the edge between `a` and `b`.
    ///
    /// Creates the edge on first sight; afterwards fills the free right
    /// side, or flags the edge nonplanar when both sides are owned.
    pub(crate) fn attach(&mut self, a: usize, b: usize, face: FaceId) -> EdgeId {
        let Some(id) = self.find_edge(a, b) else {
            return self.insert_edge(a, b, face);
        };

        let edge = self.edge_mut(id);
        if edge.right.is_valid() {
            edge.nonplanar = true;
        } else {
            edge.right = face;
        }
        id
    }
}

/// Iterator over the edges in one vertex's list.
pub struct VertexEdgeIter<'a> {
    graph: &'a AdjacencyGraph,
    vertex: usize,
    current: EdgeId,
}

impl<'a> Iterator for VertexEdgeIter<'a> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.current.is_valid() {
            return None;
        }
        let result = self.current;
        self.current = self.graph.edge(result).next_for(self.vertex);
        Some(result)
    }
}
