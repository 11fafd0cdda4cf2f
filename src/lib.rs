//! # Triform
//!
//! Polygon triangulation and smoothing-group vertex normals for triangle meshes.
//!
//! Triform covers two steps that sit between raw geometry and a renderable
//! triangle mesh:
//!
//! - **Triangulation**: simple polygons (including bridged holes) are split
//!   into Y-monotone pieces, each triangulated in linear time
//! - **Normal generation**: faces are grouped by a smoothing angle and every
//!   vertex gets one angle-weighted normal per group, duplicating vertices
//!   along creases
//!
//! All results are delivered through callbacks, so the caller keeps full
//! control of its vertex and index buffer layout.
//!
//! ## Features
//!
//! - **Flexible indexing**: Index buffers of `u16`, `u32`, `u64` or `usize`
//! - **Type-safe arenas**: Adjacency and normal records refer to each other by typed indices
//! - **Parallel batches**: Independent polygons triangulate on the rayon pool
//!
//! ## Triangulating a Polygon
//!
//! ```
//! use triform::prelude::*;
//! use nalgebra::Point2;
//!
//! // An L-shaped hexagon, counter-clockwise
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 1.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(1.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ];
//!
//! let mut triangles = Vec::new();
//! triangulate(&points, |tri| triangles.push(tri));
//! assert_eq!(triangles.len(), 4);
//! ```
//!
//! ## Generating Normals
//!
//! ```
//! use triform::prelude::*;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(1.0, 0.0, -1.0),
//! ];
//! // Two triangles meeting at a right angle along the 1-2 edge
//! let indices: Vec<u32> = vec![0, 1, 2, 2, 1, 3];
//!
//! let mut vertices = Vec::new();
//! let mut faces = Vec::new();
//! let report = generate_normals(
//!     &indices,
//!     |i| positions[i],
//!     &NormalOptions::default(),
//!     |v| vertices.push(v),
//!     |f| faces.push(f),
//! )
//! .unwrap();
//!
//! // The crease keeps both sides sharp: vertices 1 and 2 are duplicated
//! assert_eq!(report.vertices_created, 2);
//! assert_eq!(faces[1], [4, 5, 3]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod algo;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use triform::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::normals::{
        generate_normal_mesh, generate_normals, NormalMesh, NormalOptions, NormalReport,
        NormalVertex,
    };
    pub use crate::algo::triangulate::{
        triangulate, triangulate_batch, triangulate_planar, triangulate_to_vec,
        triangulate_with_options, TriangulateOptions,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{build_adjacency, AdjacencyGraph, MeshIndex};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
