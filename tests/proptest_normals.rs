//! Property-based tests for normal generation.
//!
//! Run with: cargo test --test proptest_normals

use nalgebra::{Point3, Vector3};
use proptest::prelude::*;
use triform::algo::normals::{
    assign_smoothing_groups, generate_normal_mesh, FaceRecord, NormalMesh, NormalOptions,
};
use triform::mesh::build_adjacency;

// =============================================================================
// Strategies
// =============================================================================

/// A heightfield mesh over a regular grid.
#[derive(Debug, Clone)]
struct Heightfield {
    positions: Vec<Point3<f64>>,
    indices: Vec<u32>,
}

/// Random heightfield with `cells x cells` quads and gentle slopes.
fn arb_heightfield(max_cells: usize) -> impl Strategy<Value = Heightfield> {
    (1..=max_cells).prop_flat_map(|cells| {
        let side = cells + 1;
        prop::collection::vec(0.0..0.4f64, side * side).prop_map(move |heights| {
            let positions = (0..side * side)
                .map(|k| Point3::new((k % side) as f64, (k / side) as f64, heights[k]))
                .collect();

            let mut indices = Vec::with_capacity(cells * cells * 6);
            for j in 0..cells {
                for i in 0..cells {
                    let v00 = (j * side + i) as u32;
                    let v10 = v00 + 1;
                    let v01 = v00 + side as u32;
                    let v11 = v01 + 1;
                    indices.extend([v00, v10, v11, v00, v11, v01]);
                }
            }
            Heightfield { positions, indices }
        })
    })
}

fn generate(field: &Heightfield, options: &NormalOptions) -> NormalMesh {
    generate_normal_mesh(&field.indices, |i| field.positions[i], options).unwrap()
}

fn face_records(field: &Heightfield) -> Vec<FaceRecord> {
    field
        .indices
        .chunks_exact(3)
        .enumerate()
        .map(|(i, t)| {
            let v = [t[0] as usize, t[1] as usize, t[2] as usize];
            FaceRecord::from_positions(i, v, v.map(|k| field.positions[k]))
        })
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_no_inverted_normals(field in arb_heightfield(6), degrees in 0.0..180.0f64) {
        let options = NormalOptions::default().with_smoothing_angle_degrees(degrees);
        let mesh = generate(&field, &options);

        let mut normals = vec![Vector3::zeros(); mesh.vertices.len()];
        for v in &mesh.vertices {
            normals[v.index] = v.normal;
        }

        for (tri, record) in mesh.faces.iter().zip(face_records(&field)) {
            for &out in tri {
                prop_assert!(normals[out].dot(&record.normal) >= 0.0);
            }
        }
    }

    #[test]
    fn proptest_grouping_is_fixed_point(field in arb_heightfield(6), degrees in 0.0..90.0f64) {
        let graph = build_adjacency(&field.indices, field.positions.len()).unwrap();
        let mut faces = face_records(&field);
        let angle = degrees.to_radians();

        assign_smoothing_groups(&mut faces, &graph, angle);
        let first: Vec<_> = faces.iter().map(|f| f.group).collect();

        let passes = assign_smoothing_groups(&mut faces, &graph, angle);
        let second: Vec<_> = faces.iter().map(|f| f.group).collect();

        prop_assert_eq!(passes, 1);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn proptest_flat_shading_splits_every_corner(field in arb_heightfield(6)) {
        let mesh = generate(&field, &NormalOptions::flat());
        prop_assert_eq!(mesh.vertices.len(), 3 * mesh.faces.len());
        prop_assert_eq!(mesh.report.groups, mesh.faces.len());
    }

    #[test]
    fn proptest_smooth_shading_keeps_vertices(field in arb_heightfield(6)) {
        let mesh = generate(&field, &NormalOptions::smooth());

        prop_assert_eq!(mesh.vertices.len(), field.positions.len());
        prop_assert_eq!(mesh.report.vertices_created, 0);
        prop_assert_eq!(mesh.report.groups, 1);
        for v in &mesh.vertices {
            prop_assert!((v.normal.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn proptest_output_indices_are_dense(field in arb_heightfield(6), degrees in 0.0..180.0f64) {
        let options = NormalOptions::default().with_smoothing_angle_degrees(degrees);
        let mesh = generate(&field, &options);

        // Every grid vertex is used, so output indices run without gaps
        for (i, v) in mesh.vertices.iter().enumerate() {
            prop_assert_eq!(v.index, i);
        }
        for tri in &mesh.faces {
            for &i in tri {
                prop_assert!(i < mesh.vertices.len());
            }
        }
    }
}
