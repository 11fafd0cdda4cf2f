//! Vertex normal generation with smoothing groups.
//!
//! Faces whose normals differ by less than a smoothing angle across a
//! shared edge are gathered into smoothing groups. Each vertex then gets
//! one normal per group touching it: the angle-weighted average of that
//! group's face normals. Vertices on a crease are duplicated so that each
//! side of the crease keeps its own normal.
//!
//! # Pipeline
//!
//! 1. [`FaceRecord::from_positions`] computes unit face normals and corner angles
//! 2. [`build_adjacency`](crate::mesh::build_adjacency) links faces across edges
//! 3. [`assign_smoothing_groups`] merges groups across smooth edges
//! 4. Per-vertex slots accumulate normals and number duplicate vertices
//!
//! Results are delivered through callbacks, so any vertex or index buffer
//! layout can be filled. [`generate_normal_mesh`] collects them instead.
//!
//! # Example
//!
//! ```
//! use triform::algo::normals::{generate_normal_mesh, NormalOptions};
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let indices: Vec<u32> = vec![0, 1, 2, 0, 2, 3];
//!
//! let mesh = generate_normal_mesh(&indices, |i| positions[i], &NormalOptions::default()).unwrap();
//! assert_eq!(mesh.vertices.len(), 4);
//! assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
//! ```

mod face;
mod groups;
mod synthesize;

use std::f64::consts::PI;
use std::fmt;

use nalgebra::Point3;
use tracing::{debug, warn};

use crate::error::{MeshError, Result};
use crate::mesh::{build_adjacency, check_triangle_indices, referenced_vertex_count, MeshIndex};

pub use face::FaceRecord;
pub use groups::{assign_smoothing_groups, count_groups};
pub use synthesize::NormalVertex;

use synthesize::SlotArena;

/// Options for normal generation.
#[derive(Debug, Clone)]
pub struct NormalOptions {
    /// Largest angle between adjacent face normals, in radians, for the
    /// shared edge to render smooth (default: 30°).
    pub smoothing_angle: f64,

    /// Index given to the first duplicated vertex (default: one past the
    /// largest index in the buffer).
    pub first_new_index: Option<usize>,
}

impl Default for NormalOptions {
    fn default() -> Self {
        Self {
            smoothing_angle: 30f64.to_radians(),
            first_new_index: None,
        }
    }
}

impl NormalOptions {
    /// Options for flat shading: every face keeps its own normals.
    #[must_use]
    pub fn flat() -> Self {
        Self::default().with_smoothing_angle(0.0)
    }

    /// Options for smooth shading: adjacent faces always share normals.
    #[must_use]
    pub fn smooth() -> Self {
        Self::default().with_smoothing_angle(PI)
    }

    /// Set the smoothing angle in radians.
    #[must_use]
    pub fn with_smoothing_angle(mut self, radians: f64) -> Self {
        self.smoothing_angle = radians;
        self
    }

    /// Set the smoothing angle in degrees.
    #[must_use]
    pub fn with_smoothing_angle_degrees(self, degrees: f64) -> Self {
        self.with_smoothing_angle(degrees.to_radians())
    }

    /// Set the index given to the first duplicated vertex.
    #[must_use]
    pub fn with_first_new_index(mut self, index: usize) -> Self {
        self.first_new_index = Some(index);
        self
    }

    /// Check that the options can be used.
    pub fn validate(&self) -> Result<()> {
        if !self.smoothing_angle.is_finite() {
            return Err(MeshError::invalid_param(
                "smoothing_angle",
                self.smoothing_angle,
                "must be finite",
            ));
        }
        if self.smoothing_angle < 0.0 {
            return Err(MeshError::invalid_param(
                "smoothing_angle",
                self.smoothing_angle,
                "must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Summary of a normal generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalReport {
    /// Number of faces processed.
    pub faces: usize,

    /// Number of vertices handed to the vertex callback.
    pub vertices_emitted: usize,

    /// Number of duplicated vertices among them.
    pub vertices_created: usize,

    /// Number of distinct smoothing groups.
    pub groups: usize,

    /// Number of edges shared by more than two faces.
    pub nonplanar_edges: usize,

    /// Passes taken by smoothing group assignment.
    pub passes: usize,
}

impl fmt::Display for NormalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Normals: {} faces, {} vertices ({} created), {} groups, {} nonplanar edges, {} passes",
            self.faces,
            self.vertices_emitted,
            self.vertices_created,
            self.groups,
            self.nonplanar_edges,
            self.passes
        )
    }
}

/// Generate smoothed vertex normals for a triangle list.
///
/// # Arguments
/// * `indices` - Flat triangle list, three indices per face
/// * `position` - Position of an input vertex by index
/// * `options` - Smoothing angle and numbering of new vertices
/// * `on_vertex` - Receives every used output vertex: primaries in input
///   order, then duplicates in creation order
/// * `on_face` - Receives each face with output vertex indices, in input order
///
/// A vertex keeps its own index for the first smoothing group that
/// touches it. Vertices referenced by no face are not reported.
///
/// # Errors
/// Returns an error if `indices.len()` is not a multiple of three or the
/// smoothing angle is negative or not finite.
pub fn generate_normals<I, P, V, F>(
    indices: &[I],
    position: P,
    options: &NormalOptions,
    mut on_vertex: V,
    mut on_face: F,
) -> Result<NormalReport>
where
    I: MeshIndex,
    P: Fn(usize) -> Point3<f64>,
    V: FnMut(NormalVertex),
    F: FnMut([usize; 3]),
{
    options.validate()?;
    check_triangle_indices(indices)?;

    let num_vertices = referenced_vertex_count(indices);
    let first_new_index = options.first_new_index.unwrap_or(num_vertices);
    if first_new_index < num_vertices {
        warn!(
            first_new_index,
            num_vertices, "Duplicated vertices may reuse input vertex indices"
        );
    }

    let mut faces: Vec<FaceRecord> = indices
        .chunks_exact(3)
        .enumerate()
        .map(|(i, tri)| {
            let vertices = [tri[0].to_usize(), tri[1].to_usize(), tri[2].to_usize()];
            FaceRecord::from_positions(i, vertices, vertices.map(&position))
        })
        .collect();

    let graph = build_adjacency(indices, num_vertices)?;
    let passes = assign_smoothing_groups(&mut faces, &graph, options.smoothing_angle);

    let mut arena = SlotArena::new(num_vertices, first_new_index);
    let mut remapped = Vec::with_capacity(faces.len());
    for face in &faces {
        let mut out = [0; 3];
        for (k, &v) in face.vertices.iter().enumerate() {
            let slot = arena.resolve(v, face.group);
            arena.accumulate(slot, face.contribution(k));
            out[k] = arena.output(slot);
        }
        remapped.push(out);
    }

    let mut report = NormalReport {
        faces: faces.len(),
        vertices_created: arena.num_created(),
        groups: count_groups(&faces),
        nonplanar_edges: graph.nonplanar_edge_count(),
        passes,
        ..Default::default()
    };

    for vertex in arena.finish() {
        on_vertex(vertex);
        report.vertices_emitted += 1;
    }
    for tri in remapped {
        on_face(tri);
    }

    debug!(
        faces = report.faces,
        vertices = report.vertices_emitted,
        created = report.vertices_created,
        groups = report.groups,
        nonplanar = report.nonplanar_edges,
        passes = report.passes,
        "Generated vertex normals"
    );

    Ok(report)
}

/// Vertices and faces produced by [`generate_normal_mesh`].
#[derive(Debug, Clone, Default)]
pub struct NormalMesh {
    /// Output vertices, sorted by output index.
    pub vertices: Vec<NormalVertex>,

    /// Faces in input order, indexing output vertices.
    pub faces: Vec<[usize; 3]>,

    /// Statistics of the run.
    pub report: NormalReport,
}

/// Generate smoothed vertex normals and collect the result.
///
/// See [`generate_normals`] for the numbering rules.
pub fn generate_normal_mesh<I, P>(
    indices: &[I],
    position: P,
    options: &NormalOptions,
) -> Result<NormalMesh>
where
    I: MeshIndex,
    P: Fn(usize) -> Point3<f64>,
{
    let mut vertices = Vec::new();
    let mut faces = Vec::with_capacity(indices.len() / 3);
    let report = generate_normals(
        indices,
        position,
        options,
        |v| vertices.push(v),
        |f| faces.push(f),
    )?;
    vertices.sort_by_key(|v| v.index);

    Ok(NormalMesh {
        vertices,
        faces,
        report,
    })
}
