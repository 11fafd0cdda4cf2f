//! Per-face geometry used by smoothing and normal accumulation.

use nalgebra::{Point3, Vector3};

use crate::mesh::GroupId;

/// A triangle of the input buffer with its derived geometry.
#[derive(Debug, Clone)]
pub struct FaceRecord {
    /// Original vertex indices.
    pub vertices: [usize; 3],

    /// Unit normal, or zero for a degenerate triangle.
    pub normal: Vector3<f64>,

    /// Interior angle at each corner, in radians.
    pub angles: [f64; 3],

    /// Smoothing group; starts as the face's own index.
    pub group: GroupId,
}

impl FaceRecord {
    /// Build the record of face `index` from its corner positions.
    pub fn from_positions(index: usize, vertices: [usize; 3], positions: [Point3<f64>; 3]) -> Self {
        let [p0, p1, p2] = positions;
        let normal = (p1 - p0)
            .cross(&(p2 - p0))
            .try_normalize(0.0)
            .unwrap_or_else(Vector3::zeros);

        Self {
            vertices,
            normal,
            angles: [
                corner_angle(&p0, &p1, &p2),
                corner_angle(&p1, &p2, &p0),
                corner_angle(&p2, &p0, &p1),
            ],
            group: GroupId::new(index),
        }
    }

    /// Weighted contribution of this face to the normal at corner `k`.
    #[inline]
    pub fn contribution(&self, k: usize) -> Vector3<f64> {
        self.normal * self.angles[k]
    }
}

/// Angle at `a` in triangle `(a, b, c)`; zero when an adjacent edge has no length.
fn corner_angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    (b - a).angle(&(c - a))
}
