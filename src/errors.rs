//! Validation errors

use crate::float_types::Real;
use nalgebra::Point3;

/// All the possible validation issues we might encounter when constructing polygons
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A polygon has fewer than the minimal three vertices
    #[error("(TooFewPoints) A polygon needs at least 3 vertices, got {0}")]
    TooFewPoints(usize),
    /// The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) The coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),
    /// The first three vertices do not span a plane
    #[error("(DegeneratePlane) The first three vertices are collinear at: {0}")]
    DegeneratePlane(Point3<Real>),
    /// A vertex lies off the plane of the first three vertices
    #[error("(NonPlanar) Vertex lies {distance} away from the polygon plane at: {point}")]
    NonPlanar { point: Point3<Real>, distance: Real },
    /// The vertex loop turns the wrong way at a corner
    #[error("(NonConvex) The polygon is not convex at: {0}")]
    NonConvex(Point3<Real>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_variant() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let cases = [
            (ValidationError::TooFewPoints(2), "(TooFewPoints)"),
            (ValidationError::InvalidCoordinate(p), "(InvalidCoordinate)"),
            (ValidationError::DegeneratePlane(p), "(DegeneratePlane)"),
            (ValidationError::NonPlanar { point: p, distance: 0.5 }, "(NonPlanar)"),
            (ValidationError::NonConvex(p), "(NonConvex)"),
        ];
        for (err, prefix) in cases {
            assert!(err.to_string().starts_with(prefix), "{err}");
        }
    }
}
