//! `Geometry` struct and implementations of the `CSGOps` trait for `Geometry`

use crate::errors::ValidationError;
use crate::float_types::{
    Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use crate::traits::{CSGOps, rotation_matrix};
use nalgebra::{Matrix4, Point3, Translation3, Vector3};
use std::{fmt::Debug, sync::OnceLock};

pub mod bsp;
pub mod csg;
pub mod plane;
pub mod polygon;
pub mod triangulated;
pub mod vertex;

use bsp::Node;
use plane::Plane;
use polygon::Polygon;
use vertex::Vertex;

/// A named set of polygons bounding a closed solid, placed in the world by an
/// instance transform built from `position`, `rotation` (Euler angles in
/// degrees) and `scale`.
///
/// Polygons are stored in local space. Boolean operators read both operands
/// through [`Geometry::transformed_polygons`] and return a new geometry in
/// world space with an identity transform.
#[derive(Clone, Debug)]
pub struct Geometry<S: Clone + Send + Sync + Debug> {
    /// Name handed to the scene layer
    pub name: String,

    /// Local-space polygons
    pub polygons: Vec<Polygon<S>>,

    position: Vector3<Real>,
    scale: Vector3<Real>,
    rotation: Vector3<Real>,

    /// `translation * rotation * scale`
    instance: Matrix4<Real>,

    /// Inverse transpose of the linear part of `instance`
    normal_matrix: Matrix4<Real>,

    /// Lazily calculated world-space AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Geometry<S> {
    /// Build a Geometry with identity transform from an existing polygon list
    pub fn from_polygons(name: &str, polygons: &[Polygon<S>]) -> Self {
        let mut geometry = Self::new();
        geometry.name = name.to_string();
        geometry.polygons = polygons.to_vec();
        geometry
    }

    /// Build a Geometry from faces given as point loops, validating each face.
    pub fn from_faces(
        name: &str,
        faces: &[Vec<Point3<Real>>],
        metadata: Option<S>,
    ) -> Result<Self, ValidationError> {
        let polygons = faces
            .iter()
            .map(|face| Polygon::from_points(face, metadata.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_polygons(name, &polygons))
    }

    pub const fn position(&self) -> Vector3<Real> {
        self.position
    }

    pub const fn scale_factors(&self) -> Vector3<Real> {
        self.scale
    }

    /// Euler angles in degrees
    pub const fn rotation(&self) -> Vector3<Real> {
        self.rotation
    }

    pub const fn instance(&self) -> &Matrix4<Real> {
        &self.instance
    }

    pub const fn normal_matrix(&self) -> &Matrix4<Real> {
        &self.normal_matrix
    }

    pub fn set_position(&mut self, position: Vector3<Real>) {
        self.position = position;
        self.update_transforms();
    }

    pub fn set_scale(&mut self, scale: Vector3<Real>) {
        self.scale = scale;
        self.update_transforms();
    }

    /// Set the rotation as Euler angles in degrees, applied in x, y, z order
    pub fn set_rotation(&mut self, rotation: Vector3<Real>) {
        self.rotation = rotation;
        self.update_transforms();
    }

    fn update_transforms(&mut self) {
        let translation = Translation3::from(self.position).to_homogeneous();
        let rotation = rotation_matrix(&self.rotation);
        let scale = Matrix4::new_nonuniform_scaling(&self.scale);
        self.instance = translation * rotation * scale;
        self.normal_matrix = normal_matrix(&self.instance);
        self.invalidate_bounding_box();
    }

    /// World-space copy of the polygons: every vertex pre-multiplied by the
    /// instance transform, every normal by the normal matrix.
    pub fn transformed_polygons(&self) -> Vec<Polygon<S>> {
        if self.instance == Matrix4::identity() {
            return self.polygons.clone();
        }
        transform_polygons(&self.polygons, &self.instance, &self.normal_matrix)
    }

    /// World-space polygons partitioned into a fresh BSP tree
    pub fn to_bsp(&self) -> Node<S> {
        Node::from_polygons(&self.transformed_polygons())
    }

    /// Helper to collect all local-space vertices
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Fan-triangulate each polygon, returning a Geometry made of triangles
    /// with the same transform
    pub fn triangulate(&self) -> Geometry<S> {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate().into_iter().map(move |triangle| {
                    Polygon::from_parts(triangle.to_vec(), &poly.plane, poly.metadata.clone())
                })
            })
            .collect();

        let mut geometry = self.clone();
        geometry.polygons = triangles;
        geometry
    }

    /// Re-validate every polygon, reporting the first one that is malformed
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.polygons
            .iter()
            .try_for_each(|p| Polygon::<()>::try_new(p.vertices.clone(), None).map(|_| ()))
    }

    /// Slice the world-space surface with `plane`, see [`Node::slice`]
    pub fn slice(&self, plane: &Plane) -> (Vec<Polygon<S>>, Vec<[Vertex; 2]>) {
        self.to_bsp().slice(plane)
    }

    fn boolean(
        &self,
        other: &Geometry<S>,
        op: &str,
        f: fn(&[Polygon<S>], &[Polygon<S>]) -> Vec<Polygon<S>>,
    ) -> Geometry<S> {
        let polygons = f(&self.transformed_polygons(), &other.transformed_polygons());
        let name = format!("{op}({}, {})", self.name, other.name);
        let mut geometry = Geometry::from_polygons(&name, &[]);
        geometry.polygons = polygons;
        geometry.metadata = self.metadata.clone();
        geometry
    }
}

/// Inverse transpose of the linear part of `matrix`, embedded in a 4x4.
///
/// A singular matrix (a zero scale factor) has no normal matrix; identity is
/// used instead.
pub fn normal_matrix(matrix: &Matrix4<Real>) -> Matrix4<Real> {
    let linear = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    match linear.try_inverse() {
        Some(inverse) => inverse.transpose().to_homogeneous(),
        None => {
            log::warn!("singular instance transform, normals left untransformed");
            Matrix4::identity()
        },
    }
}

/// Transform polygon vertices by `matrix` and normals by `normal_matrix`.
///
/// A mirroring transform turns the loops inside out, so their order is
/// reversed to keep the front side facing outward.
fn transform_polygons<S: Clone>(
    polygons: &[Polygon<S>],
    matrix: &Matrix4<Real>,
    normal_matrix: &Matrix4<Real>,
) -> Vec<Polygon<S>> {
    let mirrored = matrix.fixed_view::<3, 3>(0, 0).determinant() < 0.0;
    polygons
        .iter()
        .map(|poly| {
            let mut vertices: Vec<Vertex> = poly
                .vertices
                .iter()
                .map(|v| v.transform(matrix, normal_matrix))
                .collect();
            if mirrored {
                vertices.reverse();
            }
            let normal = normal_matrix.fixed_view::<3, 3>(0, 0) * poly.plane.normal;
            let fallback = Plane::from_normal(normal, -normal.dot(&vertices[0].pos.coords));
            Polygon::from_parts(vertices, &fallback, poly.metadata.clone())
        })
        .collect()
}

impl<S: Clone + Send + Sync + Debug> CSGOps for Geometry<S> {
    /// Returns a new empty Geometry with identity transform
    fn new() -> Self {
        Geometry {
            name: String::new(),
            polygons: Vec::new(),
            position: Vector3::zeros(),
            scale: Vector3::repeat(1.0),
            rotation: Vector3::zeros(),
            instance: Matrix4::identity(),
            normal_matrix: Matrix4::identity(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Return a new Geometry representing the union of the two solids.
    fn union(&self, other: &Geometry<S>) -> Geometry<S> {
        self.boolean(other, "union", csg::union)
    }

    /// Return a new Geometry representing this solid with `other` removed.
    fn subtract(&self, other: &Geometry<S>) -> Geometry<S> {
        self.boolean(other, "subtract", csg::subtract)
    }

    /// Return a new Geometry representing the intersection of the two solids.
    fn intersect(&self, other: &Geometry<S>) -> Geometry<S> {
        self.boolean(other, "intersect", csg::intersect)
    }

    /// Return a new Geometry representing the space in exactly one of the two solids.
    fn xor(&self, other: &Geometry<S>) -> Geometry<S> {
        self.boolean(other, "xor", csg::xor)
    }

    /// Bake an arbitrary 3D transform (as a 4x4 matrix) into the local polygons.
    /// The instance transform is kept as is.
    fn transform(&self, mat: &Matrix4<Real>) -> Geometry<S> {
        let mut geometry = self.clone();
        geometry.polygons = transform_polygons(&self.polygons, mat, &normal_matrix(mat));
        geometry.invalidate_bounding_box();
        geometry
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the world-space
    /// bounds of all `polygons`.
    ///
    /// [`parry3d::bounding_volume::Aabb`]: crate::float_types::parry3d::bounding_volume::Aabb
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let polygons = self.transformed_polygons();
            let mut boxes = polygons.iter().map(|p| p.bounding_box());
            match boxes.next() {
                Some(first) => boxes.fold(first, |acc, bb| acc.merged(&bb)),
                None => Aabb::new(Point3::origin(), Point3::origin()),
            }
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Invert this Geometry (flip inside vs. outside)
    fn inverse(&self) -> Geometry<S> {
        let mut geometry = self.clone();
        geometry.polygons.iter_mut().for_each(|p| p.flip());
        geometry
    }
}
