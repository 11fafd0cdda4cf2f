//! Core mesh data structures.
//!
//! This module provides the edge adjacency graph used by normal generation
//! and the index types shared by every arena in the crate.
//!
//! # Overview
//!
//! [`AdjacencyGraph`] stores each undirected edge of a triangle list once,
//! together with the face on each side. Edges are chained into per-vertex
//! lists through integer links, so finding the edge between two vertices
//! costs one walk over a vertex's list.
//!
//! # Index Types
//!
//! Records are identified by type-safe index wrappers:
//! - [`EdgeId`] - Identifies an edge record
//! - [`FaceId`] - Identifies a triangle of the input buffer
//! - [`SlotId`] - Identifies a vertex normal slot
//! - [`GroupId`] - Identifies a smoothing group
//!
//! Caller index buffers may use any [`MeshIndex`] type (`u16`, `u32`,
//! `u64` or `usize`).
//!
//! # Construction
//!
//! ```
//! use triform::mesh::build_adjacency;
//!
//! let indices: Vec<u32> = vec![0, 1, 2, 2, 1, 3];
//! let graph = build_adjacency(&indices, 4).unwrap();
//!
//! let shared = graph.find_edge(1, 2).unwrap();
//! assert!(graph.edge(shared).is_manifold());
//! ```

mod adjacency;
mod builder;
mod index;

pub use adjacency::{AdjacencyGraph, Edge, VertexEdgeIter};
pub use builder::{build_adjacency, check_triangle_indices, referenced_vertex_count};
pub use index::{EdgeId, FaceId, GroupId, MeshIndex, SlotId};
