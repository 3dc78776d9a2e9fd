use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::Real;
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};

/// Boolean operations + transformations
pub trait CSGOps: Sized + Clone {
    fn new() -> Self;
    fn union(&self, other: &Self) -> Self;
    fn subtract(&self, other: &Self) -> Self;
    fn intersect(&self, other: &Self) -> Self;
    fn xor(&self, other: &Self) -> Self;
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;
    fn invalidate_bounding_box(&mut self);
    fn inverse(&self) -> Self;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Returns a new Self translated so that its bounding-box center is at the origin (0,0,0).
    fn center(&self) -> Self {
        let aabb = self.bounding_box();
        let center = (aabb.mins.coords + aabb.maxs.coords) * 0.5;
        self.translate_vector(-center)
    }

    /// Translates the object so that its bottommost point(s) sit exactly at z=0.
    fn float(&self) -> Self {
        let aabb = self.bounding_box();
        self.translate(0.0, 0.0, -aabb.mins.z)
    }

    /// Rotates by x_deg, y_deg, z_deg about the origin, applied in x, y, z order
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        self.transform(&rotation_matrix(&Vector3::new(x_deg, y_deg, z_deg)))
    }

    /// Scales by scale_x, scale_y, scale_z
    fn scale(&self, sx: Real, sy: Real, sz: Real) -> Self {
        let mat4 = Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
        self.transform(&mat4)
    }
}

/// Homogeneous rotation for Euler angles in degrees, composed `rz * ry * rx`.
pub fn rotation_matrix(degrees: &Vector3<Real>) -> Matrix4<Real> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), degrees.x.to_radians());
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), degrees.y.to_radians());
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), degrees.z.to_radians());
    (rz * ry * rx).to_homogeneous()
}
