//! [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) tree implementation
//!
//! The algorithms live behind [`BspOps`] so the plane selection policy can be
//! swapped without touching the tree code; [`Node`] exposes them directly.

pub mod node;
pub mod serial;
pub mod traits;

pub use node::Node;
pub use serial::SerialBspOps;
pub use traits::{BalancedSplittingStrategy, BspOps, FirstPolygonStrategy, SplittingPlaneStrategy};

use crate::geometry::Geometry;
use crate::geometry::plane::Plane;
use crate::geometry::polygon::Polygon;
use crate::geometry::vertex::Vertex;
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Node<S> {
    /// Creates a new BSP tree from polygons, splitting on the first polygon's plane
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        let mut node = Self::new();
        node.partition(polygons);
        node
    }

    /// Creates a new BSP tree from polygons using `strategy` to choose splitting planes
    pub fn from_polygons_with<SP: SplittingPlaneStrategy<S>>(
        polygons: &[Polygon<S>],
        strategy: SP,
    ) -> Self {
        let mut node = Self::new();
        node.partition_with(polygons, strategy);
        node
    }

    /// Partition `polygons` into this tree.
    ///
    /// An empty tree adopts the plane of the first polygon; a populated tree
    /// pushes the new polygons down from its root plane, growing nodes where
    /// needed. Empty input is a no-op.
    pub fn partition(&mut self, polygons: &[Polygon<S>]) {
        self.partition_with(polygons, FirstPolygonStrategy);
    }

    /// [`Node::partition`] with an explicit splitting plane strategy for new nodes
    pub fn partition_with<SP: SplittingPlaneStrategy<S>>(
        &mut self,
        polygons: &[Polygon<S>],
        strategy: SP,
    ) {
        if polygons.is_empty() {
            return;
        }
        log::trace!("partitioning {} polygons", polygons.len());
        SerialBspOps::with_strategy(strategy).build(self, polygons);
    }

    /// Return the parts of `polygons` outside the solid bounded by this tree.
    ///
    /// Polygons on the tree's surface survive when they face the same way as
    /// the surface and are removed when they face the opposite way.
    pub fn trim(&self, polygons: &[Polygon<S>]) -> Vec<Polygon<S>> {
        SerialBspOps::new().trim_polygons(self, polygons)
    }

    /// Remove all polygons in this tree that are inside the solid bounded by `bsp`
    pub fn trim_to(&mut self, bsp: &Node<S>) {
        SerialBspOps::new().trim_to(self, bsp);
    }

    /// Invert this tree in place: flip every plane and polygon and swap the
    /// front and back subtrees at every level
    pub fn invert(&mut self) {
        SerialBspOps::new().invert(self);
    }

    /// Return an inverted deep copy of this tree, leaving `self` untouched
    pub fn flip(&self) -> Node<S> {
        let mut flipped = self.clone();
        flipped.invert();
        flipped
    }

    /// Return all polygons in this tree (node, then front subtree, then back subtree)
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        SerialBspOps::new().all_polygons(self)
    }

    /// Flatten this tree into a fresh [`Geometry`] with identity transform
    pub fn to_geometry(&self, name: &str) -> Geometry<S> {
        Geometry::from_polygons(name, &self.all_polygons())
    }

    /// Slices this tree with `slicing_plane`, returning the polygons coplanar
    /// with it and the segments where other polygons cross it
    pub fn slice(&self, slicing_plane: &Plane) -> (Vec<Polygon<S>>, Vec<[Vertex; 2]>) {
        SerialBspOps::new().slice(self, slicing_plane)
    }
}
