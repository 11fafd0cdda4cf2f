//! Triangulation of simple polygons.
//!
//! A simple polygon is triangulated in two stages:
//!
//! 1. Every vertex is classified against an upward sweep ([`VertexKind`]).
//!    Split and merge vertices are removed by bridging diagonals, cutting
//!    the polygon into Y-monotone pieces.
//! 2. Each monotone piece is triangulated in linear time by walking its two
//!    boundary chains bottom to top.
//!
//! A polygon of `N` vertices always yields `N - 2` triangles. Triangle
//! indices refer to the input points; diagonals never introduce new ones.
//!
//! # Input Requirements
//!
//! - The polygon is simple (no self-intersections)
//! - It is wound counter-clockwise, unless [`TriangulateOptions::fix_winding`]
//!   is set
//! - Holes are supported when bridged into the outer ring, with the
//!   bridge vertices repeated
//!
//! # Example
//!
//! ```
//! use triform::algo::triangulate::triangulate_to_vec;
//! use nalgebra::Point2;
//!
//! let square = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//!
//! let triangles = triangulate_to_vec(&square);
//! assert_eq!(triangles.len(), 2);
//! ```

mod classify;
mod decompose;
mod monotone;

use nalgebra::{Point2, Point3, Vector3};
use rayon::prelude::*;
use tracing::{debug, warn};

pub use classify::{classify_polygon, classify_vertex, signed_area, sweep_order, VertexKind};
pub use decompose::{bridging_diagonals, monotone_pieces};
pub use monotone::triangulate_monotone;

/// Options for polygon triangulation.
#[derive(Debug, Clone)]
pub struct TriangulateOptions {
    /// Whether batch triangulation runs on the rayon thread pool (default: true).
    pub parallel: bool,

    /// Accept clockwise input by triangulating its reversal (default: false).
    ///
    /// Triangles are reported in the winding of the input.
    pub fix_winding: bool,
}

impl Default for TriangulateOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            fix_winding: false,
        }
    }
}

impl TriangulateOptions {
    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set whether clockwise input is accepted.
    pub fn with_fix_winding(mut self, fix_winding: bool) -> Self {
        self.fix_winding = fix_winding;
        self
    }
}

/// Triangulate a simple counter-clockwise polygon.
///
/// Calls `emit` once per triangle with three indices into `points`, in
/// counter-clockwise order, and returns the number of triangles emitted.
///
/// Polygons with fewer than three points are logged and produce no
/// triangles. Non-simple input is not detected; it may panic or yield
/// overlapping triangles.
///
/// # Example
///
/// ```
/// use triform::algo::triangulate::triangulate;
/// use nalgebra::Point2;
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 2.0),
/// ];
///
/// let mut triangles = Vec::new();
/// let count = triangulate(&points, |tri| triangles.push(tri));
/// assert_eq!(count, 3);
/// ```
pub fn triangulate<F>(points: &[Point2<f64>], mut emit: F) -> usize
where
    F: FnMut([usize; 3]),
{
    let n = points.len();
    if n < 3 {
        warn!(points = n, "Polygon has fewer than 3 points, nothing to triangulate");
        return 0;
    }
    if n == 3 {
        emit([0, 1, 2]);
        return 1;
    }

    let pieces = monotone_pieces(points);
    let triangles: usize = pieces
        .iter()
        .map(|ring| triangulate_monotone(points, ring, &mut emit))
        .sum();

    debug!(
        points = n,
        pieces = pieces.len(),
        triangles,
        "Triangulated polygon"
    );
    triangles
}

/// Triangulate a simple counter-clockwise polygon into a vector of triangles.
pub fn triangulate_to_vec(points: &[Point2<f64>]) -> Vec<[usize; 3]> {
    let mut triangles = Vec::with_capacity(points.len().saturating_sub(2));
    triangulate(points, |tri| triangles.push(tri));
    triangles
}

/// Triangulate a simple polygon with options.
///
/// With [`TriangulateOptions::fix_winding`] set, a clockwise polygon is
/// triangulated on its reversal and every triangle is reported clockwise
/// with indices into the original `points`.
pub fn triangulate_with_options<F>(
    points: &[Point2<f64>],
    options: &TriangulateOptions,
    mut emit: F,
) -> usize
where
    F: FnMut([usize; 3]),
{
    if !options.fix_winding || signed_area(points) >= 0.0 {
        return triangulate(points, emit);
    }

    let n = points.len();
    let reversed: Vec<Point2<f64>> = points.iter().rev().copied().collect();
    triangulate(&reversed, |[a, b, c]| {
        emit([n - 1 - a, n - 1 - c, n - 1 - b]);
    })
}

/// Newell normal of a closed 3D polygon, unnormalized.
///
/// Robust for non-convex and slightly non-planar polygons; its length is
/// twice the polygon area.
pub fn newell_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        normal.x += (p.y - q.y) * (p.z + q.z);
        normal.y += (p.z - q.z) * (p.x + q.x);
        normal.z += (p.x - q.x) * (p.y + q.y);
    }
    normal
}

/// Project a planar 3D polygon onto the coordinate plane most
/// perpendicular to its normal.
///
/// The projection keeps orientation: a polygon wound counter-clockwise
/// about its Newell normal projects counter-clockwise.
pub fn project_to_plane(points: &[Point3<f64>]) -> Vec<Point2<f64>> {
    let normal = newell_normal(points);
    let axis = normal.iamax();

    // Cyclic axis pairs keep (u, v, axis) right-handed
    let (u, v) = match axis {
        0 => (1, 2),
        1 => (2, 0),
        _ => (0, 1),
    };
    let (u, v) = if normal[axis] < 0.0 { (v, u) } else { (u, v) };

    points.iter().map(|p| Point2::new(p[u], p[v])).collect()
}

/// Triangulate a planar polygon embedded in 3D.
///
/// Triangles are reported in the winding of the input about its Newell
/// normal, so a polygon seen counter-clockwise from the side its normal
/// points to yields counter-clockwise triangles from that side too.
pub fn triangulate_planar<F>(points: &[Point3<f64>], emit: F) -> usize
where
    F: FnMut([usize; 3]),
{
    let projected = project_to_plane(points);
    let options = TriangulateOptions::default().with_fix_winding(true);
    triangulate_with_options(&projected, &options, emit)
}

/// Triangulate many independent polygons.
///
/// Runs on the rayon thread pool when `options.parallel` is set. The
/// output keeps the order of `polygons`.
pub fn triangulate_batch<P>(polygons: &[P], options: &TriangulateOptions) -> Vec<Vec<[usize; 3]>>
where
    P: AsRef<[Point2<f64>]> + Sync,
{
    let run = |polygon: &P| {
        let points = polygon.as_ref();
        let mut triangles = Vec::with_capacity(points.len().saturating_sub(2));
        triangulate_with_options(points, options, |tri| triangles.push(tri));
        triangles
    };

    let results: Vec<Vec<[usize; 3]>> = if options.parallel {
        polygons.par_iter().map(run).collect()
    } else {
        polygons.iter().map(run).collect()
    };

    debug!(
        polygons = polygons.len(),
        triangles = results.iter().map(Vec::len).sum::<usize>(),
        "Triangulated batch"
    );
    results
}
