//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use bspcsg::{
    float_types::Real,
    geometry::{Geometry, polygon::Polygon, vertex::Vertex},
};
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// Faces of an axis aligned cube as indices into its corners, each wound
/// counter-clockwise seen from outside, with the outward normal.
/// Corner `i` sits at `center + radius * (±1, ±1, ±1)` with the sign of each
/// axis taken from bits 0, 1 and 2 of `i`.
const CUBE_FACES: [([usize; 4], [Real; 3]); 6] = [
    ([0, 4, 6, 2], [-1.0, 0.0, 0.0]),
    ([1, 3, 7, 5], [1.0, 0.0, 0.0]),
    ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
    ([2, 6, 7, 3], [0.0, 1.0, 0.0]),
    ([0, 2, 3, 1], [0.0, 0.0, -1.0]),
    ([4, 5, 7, 6], [0.0, 0.0, 1.0]),
];

/// Axis aligned cube polygons with the given center and half extent.
pub fn cube_polygons<S: Clone>(
    center: [Real; 3],
    radius: Real,
    metadata: Option<S>,
) -> Vec<Polygon<S>> {
    CUBE_FACES
        .iter()
        .map(|(corners, normal)| {
            let vertices = corners
                .iter()
                .map(|&i| {
                    let sign = |bit: usize| if (i & bit) != 0 { 1.0 } else { -1.0 };
                    Vertex::new(
                        Point3::new(
                            center[0] + radius * sign(1),
                            center[1] + radius * sign(2),
                            center[2] + radius * sign(4),
                        ),
                        Vector3::new(normal[0], normal[1], normal[2]),
                    )
                })
                .collect();
            Polygon::new(vertices, metadata.clone())
        })
        .collect()
}

/// Axis aligned cube centered at the origin with half extent `radius`.
pub fn cube(name: &str, radius: Real) -> Geometry<()> {
    Geometry::from_polygons(name, &cube_polygons([0.0, 0.0, 0.0], radius, None))
}

/// Signed volume enclosed by a closed, outward wound polygon set
/// (divergence theorem over a fan triangulation).
pub fn volume<S: Clone>(polygons: &[Polygon<S>]) -> Real {
    polygons
        .iter()
        .map(|p| {
            let v0 = p.vertices[0].pos.coords;
            p.vertices[1..]
                .windows(2)
                .map(|w| v0.dot(&w[0].pos.coords.cross(&w[1].pos.coords)))
                .sum::<Real>()
        })
        .sum::<Real>()
        / 6.0
}

/// Total area of a polygon set.
pub fn area<S: Clone>(polygons: &[Polygon<S>]) -> Real {
    polygons.iter().map(|p| p.area()).sum()
}

/// Sum of the area-weighted normals of a polygon set; zero for a closed surface.
pub fn closure<S: Clone>(polygons: &[Polygon<S>]) -> Vector3<Real> {
    polygons
        .iter()
        .map(|p| p.plane.normal() * p.area())
        .fold(Vector3::zeros(), |acc, n| acc + n)
}

/// Total vertex count of a polygon set.
pub fn vertex_count<S: Clone>(polygons: &[Polygon<S>]) -> usize {
    polygons.iter().map(|p| p.vertices.len()).sum()
}

/// Returns the approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box<S: Clone>(polygons: &[Polygon<S>]) -> [Real; 6] {
    let mut min_x = Real::MAX;
    let mut min_y = Real::MAX;
    let mut min_z = Real::MAX;
    let mut max_x = Real::MIN;
    let mut max_y = Real::MIN;
    let mut max_z = Real::MIN;

    for poly in polygons {
        for v in &poly.vertices {
            let p = v.pos;
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            min_z = min_z.min(p.z);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
            max_z = max_z.max(p.z);
        }
    }

    [min_x, min_y, min_z, max_x, max_y, max_z]
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Compare two bounding boxes component-wise.
pub fn bbox_approx_eq(a: [Real; 6], b: [Real; 6], eps: Real) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y, eps))
}

/// True if every vertex of `polygon` has the given x coordinate.
pub fn lies_on_x<S: Clone + Debug>(polygon: &Polygon<S>, x: Real) -> bool {
    polygon.vertices.iter().all(|v| approx_eq(v.pos.x, x, 1e-9))
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon<()> {
    let points: Vec<Point3<Real>> = points.iter().map(|p| Point3::new(p[0], p[1], p[2])).collect();
    Polygon::from_points(&points, None).expect("valid test polygon")
}
