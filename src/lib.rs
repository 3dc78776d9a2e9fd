//! **Constructive Solid Geometry (CSG)** on closed solids bounded by convex,
//! planar polygons, built around Boolean operations (*union*, *subtract*,
//! *intersect*, *xor*) on polygon sets stored in [BSP](geometry::bsp) trees.
//!
//! ```rust
//! use bspcsg::{Geometry, traits::CSGOps};
//! use nalgebra::Point3;
//!
//! // a tetrahedron, faces wound counter-clockwise seen from outside
//! let o = Point3::new(0.0, 0.0, 0.0);
//! let x = Point3::new(1.0, 0.0, 0.0);
//! let y = Point3::new(0.0, 1.0, 0.0);
//! let z = Point3::new(0.0, 0.0, 1.0);
//! let faces = vec![vec![o, y, x], vec![o, x, z], vec![o, z, y], vec![x, y, z]];
//! let a = Geometry::<()>::from_faces("a", &faces, None).unwrap();
//! let b = a.translate(0.25, 0.0, 0.0);
//!
//! let both = a.union(&b);
//! assert!(!both.polygons.is_empty());
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **stl-io**: `.stl` import/export
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//!
//! # Configuration
//! Point/plane classification uses [`float_types::tolerance`], `1e-5` unless
//! overridden with the `BSPCSG_TOLERANCE` build-time variable or
//! [`float_types::set_tolerance`].
//!
//! # Logging
//! Boolean operators report through the [`log`] facade; install any logger to
//! see them.

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod geometry;
pub mod io;
pub mod traits;
pub mod triangulated;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use geometry::Geometry;
pub use geometry::bsp::Node;
pub use geometry::plane::{Orientation, Plane};
pub use geometry::polygon::Polygon;
pub use geometry::vertex::Vertex;
