//! Struct and functions for working with planar, convex `Polygon`s

use crate::errors::ValidationError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb, tolerance};
use crate::geometry::plane::Plane;
use crate::geometry::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

/// A convex, planar polygon defined by a list of vertices.
///
/// - `plane` is always the plane of the first three vertices; the winding
///   order decides which side is the front.
/// - `metadata` is an opaque payload (a colour, a tag, ...) carried unchanged
///   through every split, flip and clone.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    /// Vertices defining the polygon's shape
    pub vertices: Vec<Vertex>,

    /// The plane on which this Polygon lies, used for splitting
    pub plane: Plane,

    /// Lazily-computed axis-aligned bounding box of the Polygon
    pub bounding_box: OnceLock<Aabb>,

    /// Generic metadata associated with the Polygon
    pub metadata: Option<S>,
}

impl<S: Clone + PartialEq> PartialEq for Polygon<S> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.plane == other.plane
            && self.metadata == other.metadata
    }
}

impl<S: Clone> Polygon<S> {
    /// Create a polygon from vertices, failing fast on malformed input.
    ///
    /// # Panics
    /// If the vertices do not form a convex planar loop, see [`Polygon::try_new`].
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        match Self::try_new(vertices, metadata) {
            Ok(polygon) => polygon,
            Err(err) => panic!("invalid polygon: {err}"),
        }
    }

    /// Create a polygon from vertices, validating that there are at least three
    /// finite vertices, that the first three span a plane and that the whole
    /// loop is coplanar and convex (within the crate tolerance).
    pub fn try_new(vertices: Vec<Vertex>, metadata: Option<S>) -> Result<Self, ValidationError> {
        if vertices.len() < 3 {
            return Err(ValidationError::TooFewPoints(vertices.len()));
        }
        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(ValidationError::InvalidCoordinate(bad.pos));
        }
        let plane = Plane::from_vertices(&vertices)
            .ok_or(ValidationError::DegeneratePlane(vertices[0].pos))?;

        let eps = tolerance();
        for v in &vertices {
            let distance = plane.signed_distance(&v.pos);
            if distance.abs() > eps {
                return Err(ValidationError::NonPlanar { point: v.pos, distance });
            }
        }

        let n = vertices.len();
        for i in 0..n {
            let a = &vertices[i].pos;
            let b = &vertices[(i + 1) % n].pos;
            let c = &vertices[(i + 2) % n].pos;
            let (e1, e2) = (b - a, c - b);
            if e1.cross(&e2).dot(&plane.normal) < -eps * e1.norm() * e2.norm() {
                return Err(ValidationError::NonConvex(*b));
            }
        }

        Ok(Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        })
    }

    /// Create a polygon from bare points; every vertex normal is set to the
    /// polygon's plane normal.
    pub fn from_points(
        points: &[Point3<Real>],
        metadata: Option<S>,
    ) -> Result<Self, ValidationError> {
        let vertices = points
            .iter()
            .map(|p| Vertex::new(*p, Vector3::zeros()))
            .collect();
        let mut polygon = Self::try_new(vertices, metadata)?;
        polygon.set_new_normal();
        Ok(polygon)
    }

    /// Build a polygon from vertices already known to lie on `parent`'s plane
    /// (a bisection fragment or a transformed copy). The plane is re-derived
    /// from the first three vertices; if they are numerically collinear
    /// `fallback` is used instead.
    pub(crate) fn from_parts(vertices: Vec<Vertex>, fallback: &Plane, metadata: Option<S>) -> Self {
        let plane = Plane::from_vertices(&vertices).unwrap_or_else(|| fallback.clone());
        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// A piece of `parent` produced by bisection.
    pub(crate) fn fragment(vertices: Vec<Vertex>, parent: &Polygon<S>) -> Self {
        Self::from_parts(vertices, &parent.plane, parent.metadata.clone())
    }

    /// Axis aligned bounding box of this Polygon (cached after first call)
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in &self.vertices {
                mins.x = mins.x.min(v.pos.x);
                mins.y = mins.y.min(v.pos.y);
                mins.z = mins.z.min(v.pos.z);
                maxs.x = maxs.x.max(v.pos.x);
                maxs.y = maxs.y.max(v.pos.y);
                maxs.z = maxs.z.max(v.pos.z);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Reverses winding order, flips vertex normals, and flips the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.vertices.iter_mut().for_each(|v| v.flip());
        self.plane.flip();
    }

    /// Return a flipped copy of this polygon
    pub fn flipped(&self) -> Self {
        let mut polygon = self.clone();
        polygon.flip();
        polygon
    }

    /// Triangulate this convex polygon as a fan around its first vertex.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let v0 = &self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(|w| [v0.clone(), w[0].clone(), w[1].clone()])
            .collect()
    }

    /// Area of the polygon, measured in its own plane
    pub fn area(&self) -> Real {
        let v0 = self.vertices[0].pos;
        let twice_area: Real = self.vertices[1..]
            .windows(2)
            .map(|w| (w[0].pos - v0).cross(&(w[1].pos - v0)).dot(&self.plane.normal))
            .sum();
        twice_area * 0.5
    }

    /// Set every vertex normal to the plane normal
    pub fn set_new_normal(&mut self) {
        let normal = self.plane.normal();
        for v in &mut self.vertices {
            v.normal = normal;
        }
    }

    /// Returns a reference to the metadata, if any.
    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }

    /// Sets the metadata to the given value.
    pub fn set_metadata(&mut self, data: S) {
        self.metadata = Some(data);
    }
}
