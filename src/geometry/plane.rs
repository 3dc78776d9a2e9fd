//! Struct and functions for working with planes in Hessian normal form,
//! including the polygon bisection every BSP operation is built from.

use crate::float_types::{Real, tolerance};
use crate::geometry::polygon::Polygon;
use crate::geometry::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::ops::{BitOr, BitOrAssign};

/// Where a point (or a whole polygon) sits relative to a [`Plane`].
///
/// The discriminants form a bitmask: or-ing the orientation of every vertex
/// of a polygon gives the orientation of the polygon, and `Front | Back`
/// is `Spanning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Orientation {
    Coplanar = 0,
    Front = 1,
    Back = 2,
    Spanning = 3,
}

impl Orientation {
    const fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => Orientation::Coplanar,
            1 => Orientation::Front,
            2 => Orientation::Back,
            _ => Orientation::Spanning,
        }
    }
}

impl BitOr for Orientation {
    type Output = Orientation;

    fn bitor(self, rhs: Self) -> Self::Output {
        Orientation::from_bits(self as u8 | rhs as u8)
    }
}

impl BitOrAssign for Orientation {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// A plane in 3D space in Hessian normal form: every point `v` on the plane
/// satisfies `normal · v + distance = 0`, with `normal` of unit length.
///
/// The side `normal` points into is the *front*.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Signed distance term (plane equation: n·v + distance = 0)
    pub distance: Real,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and distance term.
    ///
    /// Both are divided by the length of `normal`, so the plane described by
    /// `normal · v + distance = 0` is unchanged.
    pub fn from_normal(normal: Vector3<Real>, distance: Real) -> Self {
        let len = normal.norm();
        Plane {
            normal: normal / len,
            distance: distance / len,
        }
    }

    /// Create the plane through three points.
    ///
    /// The normal direction follows the right-hand rule: `(b - a) × (c - a)`.
    /// Returns `None` if the points are collinear.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        let normal = normal.try_normalize(Real::EPSILON)?;
        Some(Plane {
            normal,
            distance: -normal.dot(&a.coords),
        })
    }

    /// The plane of the first three vertices of a loop, if they span one.
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        match vertices {
            [a, b, c, ..] => Self::from_points(&a.pos, &b.pos, &c.pos),
            _ => None,
        }
    }

    /// Get the plane normal
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Get the distance term of the plane equation
    pub const fn distance(&self) -> Real {
        self.distance
    }

    /// Flip the plane in place (reverse normal and distance)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.distance = -self.distance;
    }

    /// Return a flipped copy of this plane
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            distance: -self.distance,
        }
    }

    /// Signed distance from `point` to the plane. Positive is in front.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) + self.distance
    }

    /// Classify a point as `Front`, `Back` or `Coplanar` using the crate tolerance.
    pub fn orient_point(&self, point: &Point3<Real>) -> Orientation {
        Self::orient_distance(self.signed_distance(point), tolerance())
    }

    #[inline]
    fn orient_distance(d: Real, eps: Real) -> Orientation {
        if d > eps {
            Orientation::Front
        } else if d < -eps {
            Orientation::Back
        } else {
            Orientation::Coplanar
        }
    }

    /// Classify a polygon with respect to the plane by or-ing the
    /// orientation of each of its vertices.
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> Orientation {
        let eps = tolerance();
        polygon
            .vertices
            .iter()
            .fold(Orientation::Coplanar, |acc, v| {
                acc | Self::orient_distance(self.signed_distance(&v.pos), eps)
            })
    }

    /// Bisect `polygon` by this plane, appending the results to the four
    /// output vectors. The outputs are never cleared.
    ///
    /// * a polygon lying in the plane goes unsplit to `same_plane` when its
    ///   normal agrees with this plane's normal, to `reverse_plane` otherwise;
    /// * otherwise the vertex loop is cut into a front loop and a back loop.
    ///   Vertices on the plane are shared by both loops and a new vertex is
    ///   interpolated wherever an edge runs from front to back. Each loop is
    ///   emitted only if it kept at least three vertices, so a polygon lying
    ///   in front with three or more vertices on the plane also leaves a
    ///   sliver loop behind (and the other way round).
    ///
    /// Metadata is cloned onto every emitted polygon.
    pub fn bisect<S: Clone>(
        &self,
        polygon: &Polygon<S>,
        front: &mut Vec<Polygon<S>>,
        same_plane: &mut Vec<Polygon<S>>,
        back: &mut Vec<Polygon<S>>,
        reverse_plane: &mut Vec<Polygon<S>>,
    ) {
        let eps = tolerance();
        let distances: Vec<Real> = polygon
            .vertices
            .iter()
            .map(|v| self.signed_distance(&v.pos))
            .collect();
        let types: Vec<Orientation> = distances
            .iter()
            .map(|&d| Self::orient_distance(d, eps))
            .collect();
        let polygon_type = types
            .iter()
            .fold(Orientation::Coplanar, |acc, &t| acc | t);

        match polygon_type {
            Orientation::Coplanar => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    same_plane.push(polygon.clone());
                } else {
                    reverse_plane.push(polygon.clone());
                }
            },
            _ => {
                let vcount = polygon.vertices.len();
                let mut f: Vec<Vertex> = Vec::with_capacity(vcount + 2);
                let mut b: Vec<Vertex> = Vec::with_capacity(vcount + 2);

                for i in 0..vcount {
                    let j = (i + 1) % vcount;
                    let (ti, tj) = (types[i], types[j]);
                    let (vi, vj) = (&polygon.vertices[i], &polygon.vertices[j]);

                    match ti {
                        Orientation::Front => f.push(vi.clone()),
                        Orientation::Back => b.push(vi.clone()),
                        _ => {
                            f.push(vi.clone());
                            b.push(vi.clone());
                        },
                    }

                    if (ti | tj) == Orientation::Spanning {
                        // ti and tj are Front/Back in some order, so the
                        // denominator is bounded away from zero by 2 * eps.
                        let denom = self.normal.dot(&(vj.pos - vi.pos));
                        let t = -distances[i] / denom;
                        let v = vi.interpolate(vj, t);
                        f.push(v.clone());
                        b.push(v);
                    }
                }

                // A one-sided polygon keeps all of its vertices on that side.
                // The other side still gets a loop when at least three
                // vertices lie on the plane.
                if f.len() >= 3 {
                    front.push(match polygon_type {
                        Orientation::Front => polygon.clone(),
                        _ => Polygon::fragment(f, polygon),
                    });
                }
                if b.len() >= 3 {
                    back.push(match polygon_type {
                        Orientation::Back => polygon.clone(),
                        _ => Polygon::fragment(b, polygon),
                    });
                }
            },
        }
    }

    /// Splits a polygon by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`, where `coplanar_front`
    /// holds same-oriented coplanar polygons and `coplanar_back`
    /// reverse-oriented ones.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon<S: Clone>(
        &self,
        polygon: &Polygon<S>,
    ) -> (Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();
        self.bisect(
            polygon,
            &mut front,
            &mut coplanar_front,
            &mut back,
            &mut coplanar_back,
        );
        (coplanar_front, coplanar_back, front, back)
    }
}
