//! Traits defining BSP tree operations and splitting plane selection

use crate::float_types::Real;
use crate::geometry::bsp::node::Node;
use crate::geometry::plane::{Orientation, Plane};
use crate::geometry::polygon::Polygon;
use crate::geometry::vertex::Vertex;

/// Core BSP operations trait - implements algorithms on BSP nodes
pub trait BspOps<S: Clone + Send + Sync> {
    /// Flip every plane and polygon in the tree and swap front/back subtrees
    fn invert(&self, node: &mut Node<S>);

    /// Return the parts of `polygons` that lie outside the solid this tree bounds
    fn trim_polygons(&self, node: &Node<S>, polygons: &[Polygon<S>]) -> Vec<Polygon<S>>;

    /// Remove all polygons in this BSP tree that are inside the other BSP tree
    fn trim_to(&self, node: &mut Node<S>, other: &Node<S>);

    /// Partition `polygons` into the tree rooted at `node`, creating nodes as needed
    fn build(&self, node: &mut Node<S>, polygons: &[Polygon<S>]);

    /// Return all polygons in this BSP tree
    fn all_polygons(&self, node: &Node<S>) -> Vec<Polygon<S>>;

    /// Slices this BSP node with the given plane
    fn slice(
        &self,
        node: &Node<S>,
        slicing_plane: &Plane,
    ) -> (Vec<Polygon<S>>, Vec<[Vertex; 2]>);
}

/// Picks the plane a fresh node splits on
pub trait SplittingPlaneStrategy<S: Clone> {
    /// Pick a splitting plane from a non-empty set of polygons
    fn pick_splitting_plane(&self, polygons: &[Polygon<S>]) -> Plane;
}

/// Split on the plane of the first polygon.
///
/// Tree shape depends on input order; the geometry coming out of the boolean
/// operators does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPolygonStrategy;

impl<S: Clone> SplittingPlaneStrategy<S> for FirstPolygonStrategy {
    fn pick_splitting_plane(&self, polygons: &[Polygon<S>]) -> Plane {
        polygons[0].plane.clone()
    }
}

/// Score a sample of candidate planes by how many polygons they would cut and
/// how evenly they divide the rest, and keep the cheapest.
#[derive(Debug, Clone, Copy)]
pub struct BalancedSplittingStrategy {
    pub span_weight: Real,
    pub balance_weight: Real,
    /// Number of leading polygons whose planes are tried
    pub sample_size: usize,
}

impl Default for BalancedSplittingStrategy {
    fn default() -> Self {
        Self {
            span_weight: 8.0,
            balance_weight: 1.0,
            sample_size: 20,
        }
    }
}

impl<S: Clone> SplittingPlaneStrategy<S> for BalancedSplittingStrategy {
    fn pick_splitting_plane(&self, polygons: &[Polygon<S>]) -> Plane {
        let mut best_plane = polygons[0].plane.clone();
        let mut best_score = Real::MAX;

        polygons.iter().take(self.sample_size.max(1)).for_each(|p| {
            let plane = &p.plane;
            let (num_front, num_back, num_spanning) = polygons
                .iter()
                .map(|poly| match plane.classify_polygon(poly) {
                    Orientation::Coplanar => (0, 0, 0),
                    Orientation::Front => (1, 0, 0),
                    Orientation::Back => (0, 1, 0),
                    Orientation::Spanning => (0, 0, 1),
                })
                .fold((0i64, 0i64, 0i64), |acc, x| (acc.0 + x.0, acc.1 + x.1, acc.2 + x.2));

            let score = self.span_weight * num_spanning as Real
                + self.balance_weight * ((num_front - num_back) as Real).abs();

            if score < best_score {
                best_score = score;
                best_plane = plane.clone();
            }
        });

        best_plane
    }
}
