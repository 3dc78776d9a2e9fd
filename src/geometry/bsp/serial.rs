//! Serial implementation of BSP operations
//!
//! Every traversal runs off an explicit work-list rather than the call stack,
//! so tree depth is bounded by memory, not by thread stack size.

use crate::geometry::bsp::node::Node;
use crate::geometry::bsp::traits::{BspOps, FirstPolygonStrategy, SplittingPlaneStrategy};
use crate::geometry::plane::{Orientation, Plane};
use crate::geometry::polygon::Polygon;
use crate::geometry::vertex::Vertex;
use std::fmt::Debug;

/// Serial implementation of BSP operations
pub struct SerialBspOps<SP: SplittingPlaneStrategy<S> = FirstPolygonStrategy, S: Clone = ()> {
    splitting_strategy: SP,
    _phantom: std::marker::PhantomData<S>,
}

impl<S: Clone> SerialBspOps<FirstPolygonStrategy, S> {
    pub const fn new() -> Self {
        Self {
            splitting_strategy: FirstPolygonStrategy,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S: Clone> Default for SerialBspOps<FirstPolygonStrategy, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<SP: SplittingPlaneStrategy<S>, S: Clone> SerialBspOps<SP, S> {
    pub const fn with_strategy(strategy: SP) -> Self {
        Self {
            splitting_strategy: strategy,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<SP: SplittingPlaneStrategy<S>, S: Clone + Send + Sync + Debug> BspOps<S>
    for SerialBspOps<SP, S>
{
    fn invert(&self, node: &mut Node<S>) {
        let mut stack = vec![node];

        while let Some(current) = stack.pop() {
            current.polygons.iter_mut().for_each(|p| p.flip());
            if let Some(ref mut plane) = current.plane {
                plane.flip();
            }

            std::mem::swap(&mut current.front, &mut current.back);

            if let Some(ref mut front) = current.front {
                stack.push(front.as_mut());
            }
            if let Some(ref mut back) = current.back {
                stack.push(back.as_mut());
            }
        }
    }

    fn trim_polygons(&self, node: &Node<S>, polygons: &[Polygon<S>]) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![(node, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            // an empty tree bounds no solid
            let Some(plane) = node.plane.as_ref() else {
                result.extend(polys);
                continue;
            };

            let mut outside = Vec::with_capacity(polys.len());
            let mut inside = Vec::with_capacity(polys.len());
            let mut same = Vec::new();
            let mut reverse = Vec::new();

            for polygon in &polys {
                plane.bisect(polygon, &mut outside, &mut same, &mut inside, &mut reverse);
                // a face on this node's surface facing the same way is on the
                // boundary, one facing the other way is inside
                outside.append(&mut same);
                inside.append(&mut reverse);
            }

            match node.front.as_deref() {
                Some(front) if !outside.is_empty() => stack.push((front, outside)),
                Some(_) => {},
                None => result.extend(outside),
            }

            // with no back subtree the inside bucket is fully inside the solid
            if let Some(back) = node.back.as_deref() {
                if !inside.is_empty() {
                    stack.push((back, inside));
                }
            }
        }
        result
    }

    fn trim_to(&self, node: &mut Node<S>, bsp: &Node<S>) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            current.polygons = self.trim_polygons(bsp, &current.polygons);
            if let Some(front) = current.front.as_mut() {
                stack.push(front);
            }
            if let Some(back) = current.back.as_mut() {
                stack.push(back);
            }
        }
    }

    fn all_polygons(&self, node: &Node<S>) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![node];

        // pre-order: node, front subtree, back subtree
        while let Some(current) = stack.pop() {
            result.extend_from_slice(&current.polygons);
            stack.extend(current.back.as_deref());
            stack.extend(current.front.as_deref());
        }
        result
    }

    fn build(&self, node: &mut Node<S>, polygons: &[Polygon<S>]) {
        if polygons.is_empty() {
            return;
        }

        let mut stack = vec![(node, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            let plane = node
                .plane
                .get_or_insert_with(|| self.splitting_strategy.pick_splitting_plane(&polys))
                .clone();

            let mut front = Vec::with_capacity(polys.len() / 2);
            let mut back = Vec::with_capacity(polys.len() / 2);
            let mut reverse = Vec::new();

            for polygon in &polys {
                plane.bisect(polygon, &mut front, &mut node.polygons, &mut back, &mut reverse);
                node.polygons.append(&mut reverse);
            }

            if !front.is_empty() {
                let front_node = node.front.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((front_node.as_mut(), front));
            }

            if !back.is_empty() {
                let back_node = node.back.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((back_node.as_mut(), back));
            }
        }
    }

    fn slice(&self, node: &Node<S>, slicing_plane: &Plane) -> (Vec<Polygon<S>>, Vec<[Vertex; 2]>) {
        let all_polys = self.all_polygons(node);

        let mut coplanar_polygons = Vec::new();
        let mut intersection_edges = Vec::new();

        for poly in &all_polys {
            let vcount = poly.vertices.len();

            let types: Vec<_> = poly
                .vertices
                .iter()
                .map(|vertex| slicing_plane.orient_point(&vertex.pos))
                .collect();

            let polygon_type = types
                .iter()
                .fold(Orientation::Coplanar, |acc, &vertex_type| acc | vertex_type);

            match polygon_type {
                Orientation::Coplanar => coplanar_polygons.push(poly.clone()),
                Orientation::Front | Orientation::Back => {},
                Orientation::Spanning => {
                    // Points where the slicing plane meets the polygon boundary:
                    // vertices lying on the plane and crossings of spanning edges.
                    let mut crossing_points: Vec<Vertex> = Vec::with_capacity(2);
                    for i in 0..vcount {
                        let j = (i + 1) % vcount;
                        let (ti, tj) = (types[i], types[j]);
                        let (vi, vj) = (&poly.vertices[i], &poly.vertices[j]);

                        if ti == Orientation::Coplanar {
                            crossing_points.push(vi.clone());
                        }
                        if (ti | tj) == Orientation::Spanning {
                            let denom = slicing_plane.normal().dot(&(vj.pos - vi.pos));
                            let t = -slicing_plane.signed_distance(&vi.pos) / denom;
                            crossing_points.push(vi.interpolate(vj, t));
                        }
                    }

                    // convex polygons meet a plane in at most one segment
                    if let [a, b] = crossing_points.as_slice() {
                        intersection_edges.push([a.clone(), b.clone()]);
                    }
                },
            }
        }

        (coplanar_polygons, intersection_edges)
    }
}
