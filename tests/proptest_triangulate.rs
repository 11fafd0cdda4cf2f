//! Property-based tests for polygon triangulation.
//!
//! Run with: cargo test --test proptest_triangulate

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use nalgebra::Point2;
use proptest::prelude::*;
use triform::algo::triangulate::{
    signed_area, triangulate_batch, triangulate_to_vec, triangulate_with_options, TriangulateOptions,
};

// =============================================================================
// Strategies
// =============================================================================

/// Star-shaped counter-clockwise polygon around the origin.
///
/// Each vertex sits in its own angular sector, so the polygon is simple.
/// With at least four sectors every edge spans less than half a turn and
/// the origin stays inside.
fn arb_star_polygon(max_vertices: usize) -> impl Strategy<Value = Vec<Point2<f64>>> {
    (4..=max_vertices).prop_flat_map(|n| {
        prop::collection::vec((0.0..0.9f64, 0.2..1.0f64), n).prop_map(move |params| {
            let sector = TAU / params.len() as f64;
            params
                .iter()
                .enumerate()
                .map(|(i, &(jitter, radius))| {
                    let angle = (i as f64 + jitter) * sector;
                    Point2::new(10.0 * radius * angle.cos(), 10.0 * radius * angle.sin())
                })
                .collect()
        })
    })
}

/// Convex polygon: points on a circle at increasing angles.
fn arb_convex_polygon(max_vertices: usize) -> impl Strategy<Value = Vec<Point2<f64>>> {
    (3..=max_vertices).prop_flat_map(|n| {
        prop::collection::vec(0.05..0.95f64, n).prop_map(|jitter| {
            let sector = TAU / jitter.len() as f64;
            jitter
                .iter()
                .enumerate()
                .map(|(i, &j)| {
                    let angle = (i as f64 + j) * sector;
                    Point2::new(angle.cos(), angle.sin())
                })
                .collect()
        })
    })
}

/// Simple polygon on a 13 x 13 integer grid, full of equal-y vertices and
/// collinear runs.
///
/// Distinct grid points are untangled by reversing the ring between every
/// pair of crossing edges, then wound counter-clockwise. Rings that still
/// touch themselves are skipped by the properties.
fn arb_grid_polygon(max_vertices: usize) -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0..=12i64, 0..=12i64), 4..=max_vertices).prop_map(|raw| {
        let mut seen = BTreeSet::new();
        let mut ring: Vec<_> = raw.into_iter().filter(|&p| seen.insert(p)).collect();
        untangle(&mut ring);
        if twice_grid_area(&ring) < 0 {
            ring.reverse();
        }
        ring
    })
}

// =============================================================================
// Grid geometry
// =============================================================================

type GridPoint = (i64, i64);

fn grid_orient(a: GridPoint, b: GridPoint, c: GridPoint) -> i64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

fn twice_grid_area(ring: &[GridPoint]) -> i64 {
    (0..ring.len())
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % ring.len()]);
            a.0 * b.1 - b.0 * a.1
        })
        .sum()
}

/// Segments `ab` and `cd` cross at a point interior to both.
fn crosses(a: GridPoint, b: GridPoint, c: GridPoint, d: GridPoint) -> bool {
    grid_orient(c, d, a).signum() * grid_orient(c, d, b).signum() < 0
        && grid_orient(a, b, c).signum() * grid_orient(a, b, d).signum() < 0
}

fn on_segment(p: GridPoint, a: GridPoint, b: GridPoint) -> bool {
    grid_orient(a, b, p) == 0
        && a.0.min(b.0) <= p.0
        && p.0 <= a.0.max(b.0)
        && a.1.min(b.1) <= p.1
        && p.1 <= a.1.max(b.1)
}

/// Segments `ab` and `cd` share at least one point.
fn touches(a: GridPoint, b: GridPoint, c: GridPoint, d: GridPoint) -> bool {
    crosses(a, b, c, d)
        || on_segment(a, c, d)
        || on_segment(b, c, d)
        || on_segment(c, a, b)
        || on_segment(d, a, b)
}

/// Reverse ring sections until no two edges cross.
fn untangle(ring: &mut [GridPoint]) {
    let n = ring.len();
    // Each reversal shortens the ring
    for _ in 0..2000 {
        let mut changed = false;
        for i in 0..n {
            for j in i + 2..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                if crosses(ring[i], ring[i + 1], ring[j], ring[(j + 1) % n]) {
                    ring[i + 1..=j].reverse();
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// No two edges meet except neighbours at their shared corner, and
/// neighbours never fold back over each other.
fn is_simple(ring: &[GridPoint]) -> bool {
    let n = ring.len();
    // Neighbouring edges `ab` and `bc` overlap when `c` runs back along `ab`
    let folds = |a: GridPoint, b: GridPoint, c: GridPoint| {
        grid_orient(a, b, c) == 0 && (c.0 - b.0) * (a.0 - b.0) + (c.1 - b.1) * (a.1 - b.1) > 0
    };

    for i in 0..n {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        for j in i + 1..n {
            let (c, d) = (ring[j], ring[(j + 1) % n]);
            if j == i + 1 {
                if folds(a, b, d) {
                    return false;
                }
            } else if i == 0 && j == n - 1 {
                if folds(c, a, b) {
                    return false;
                }
            } else if touches(a, b, c, d) {
                return false;
            }
        }
    }
    true
}

fn to_points(ring: &[GridPoint]) -> Vec<Point2<f64>> {
    ring.iter().map(|&(x, y)| Point2::new(x as f64, y as f64)).collect()
}

// =============================================================================
// Triangle helpers
// =============================================================================

fn triangle_area(points: &[Point2<f64>], [a, b, c]: [usize; 3]) -> f64 {
    let (p, q, r) = (&points[a], &points[b], &points[c]);
    0.5 * ((q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x))
}

fn total_area(points: &[Point2<f64>], triangles: &[[usize; 3]]) -> f64 {
    triangles.iter().map(|&t| triangle_area(points, t)).sum()
}

/// Fan from vertex 0: the reference triangulation of a convex polygon.
fn fan(n: usize) -> Vec<[usize; 3]> {
    (1..n - 1).map(|i| [0, i, i + 1]).collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_triangle_count(points in arb_star_polygon(40)) {
        let triangles = triangulate_to_vec(&points);
        prop_assert_eq!(triangles.len(), points.len() - 2);
    }

    #[test]
    fn proptest_area_preserved(points in arb_star_polygon(40)) {
        let triangles = triangulate_to_vec(&points);
        let expected = signed_area(&points);
        let actual = total_area(&points, &triangles);
        prop_assert!((actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "area {} != {}", actual, expected);
    }

    #[test]
    fn proptest_grid_polygon(ring in arb_grid_polygon(24)) {
        prop_assume!(ring.len() >= 3 && twice_grid_area(&ring) > 0 && is_simple(&ring));
        let points = to_points(&ring);
        let triangles = triangulate_to_vec(&points);

        prop_assert_eq!(triangles.len(), points.len() - 2);
        let expected = 0.5 * twice_grid_area(&ring) as f64;
        prop_assert!((total_area(&points, &triangles) - expected).abs() < 1e-9,
            "area {} != {}", total_area(&points, &triangles), expected);
        for tri in triangles {
            prop_assert!(triangle_area(&points, tri) >= 0.0);
        }
    }

    #[test]
    fn proptest_indices_in_range_and_all_used(points in arb_star_polygon(40)) {
        let n = points.len();
        let triangles = triangulate_to_vec(&points);

        let mut used = vec![false; n];
        for tri in &triangles {
            for &i in tri {
                prop_assert!(i < n);
                used[i] = true;
            }
            prop_assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
        }
        prop_assert!(used.iter().all(|&u| u));
    }

    #[test]
    fn proptest_output_is_ccw(points in arb_star_polygon(40)) {
        for tri in triangulate_to_vec(&points) {
            prop_assert!(triangle_area(&points, tri) > -1e-12);
        }
    }

    #[test]
    fn proptest_convex_matches_fan(points in arb_convex_polygon(30)) {
        let triangles = triangulate_to_vec(&points);
        let oracle = fan(points.len());

        prop_assert_eq!(triangles.len(), oracle.len());
        let (ours, reference) = (total_area(&points, &triangles), total_area(&points, &oracle));
        prop_assert!((ours - reference).abs() < 1e-9);
    }

    #[test]
    fn proptest_clockwise_input_with_fix_winding(points in arb_star_polygon(30)) {
        let reversed: Vec<_> = points.iter().rev().copied().collect();
        let options = TriangulateOptions::default().with_fix_winding(true);

        let mut triangles = Vec::new();
        let count = triangulate_with_options(&reversed, &options, |t| triangles.push(t));

        prop_assert_eq!(count, points.len() - 2);
        let expected = signed_area(&reversed);
        prop_assert!((total_area(&reversed, &triangles) - expected).abs() <= 1e-9 * expected.abs().max(1.0));
    }

    #[test]
    fn proptest_batch_matches_sequential(polygons in prop::collection::vec(arb_star_polygon(20), 1..8)) {
        let parallel = triangulate_batch(&polygons, &TriangulateOptions::default());
        let single: Vec<_> = polygons.iter().map(|p| triangulate_to_vec(p)).collect();
        prop_assert_eq!(parallel, single);
    }
}

#[test]
fn test_many_vertices_on_one_line() {
    // Long bottom edge split into many collinear vertices
    let mut points: Vec<Point2<f64>> = (0..=20).map(|i| Point2::new(i as f64, 0.0)).collect();
    points.push(Point2::new(10.0, 5.0));

    let triangles = triangulate_to_vec(&points);
    assert_eq!(triangles.len(), points.len() - 2);
    assert!((total_area(&points, &triangles) - 50.0).abs() < 1e-9);
}
