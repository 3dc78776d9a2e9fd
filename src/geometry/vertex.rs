//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use nalgebra::{Matrix4, Point3, Vector3};

/// A vertex of a polygon, holding position and normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – shading normal; it is **copied verbatim** and never
    ///   consulted by the BSP classification, which only looks at `pos`.
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex { pos, normal }
    }

    /// Flip vertex normal
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Return the linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// Normals are linearly interpolated as well.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        // p(t) = p0 + t * (p1 - p0)
        let new_pos = self.pos + (other.pos - self.pos) * t;
        let new_normal = self.normal + (other.normal - self.normal) * t;
        Vertex::new(new_pos, new_normal)
    }

    /// Apply an affine transform to the position and the matching normal matrix
    /// (inverse transpose of the linear part of `matrix`) to the normal.
    ///
    /// Only the upper-left 3x3 block of `normal_matrix` is used.
    pub fn transform(&self, matrix: &Matrix4<Real>, normal_matrix: &Matrix4<Real>) -> Vertex {
        let pos = matrix.transform_point(&self.pos);
        let normal = normal_matrix.fixed_view::<3, 3>(0, 0) * self.normal;
        let normal = normal.try_normalize(Real::EPSILON).unwrap_or(normal);
        Vertex::new(pos, normal)
    }

    /// True if every coordinate of the position is finite.
    pub fn is_finite(&self) -> bool {
        self.pos.coords.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_midpoint() {
        let a = Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::x());
        let b = Vertex::new(Point3::new(2.0, 4.0, -2.0), Vector3::y());
        let m = a.interpolate(&b, 0.5);
        assert_eq!(m.pos, Point3::new(1.0, 2.0, -1.0));
        assert_eq!(m.normal, Vector3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn flip_negates_normal_only() {
        let mut v = Vertex::new(Point3::new(1.0, 2.0, 3.0), Vector3::z());
        v.flip();
        assert_eq!(v.pos, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(v.normal, -Vector3::z());
    }

    #[test]
    fn transform_translates_position_not_normal() {
        let v = Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z());
        let m = Matrix4::new_translation(&Vector3::new(0.0, 5.0, 0.0));
        let n = Matrix4::identity();
        let t = v.transform(&m, &n);
        assert_eq!(t.pos, Point3::new(1.0, 5.0, 0.0));
        assert_eq!(t.normal, Vector3::z());
    }
}
