//! Geometry processing algorithms.
//!
//! - **Triangulation**: Monotone decomposition of simple polygons
//! - **Normals**: Smoothing groups and angle-weighted vertex normals

pub mod normals;
pub mod triangulate;
