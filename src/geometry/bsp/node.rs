//! BSP tree node data structure

use crate::geometry::plane::Plane;
use crate::geometry::polygon::Polygon;
use std::fmt::Debug;

/// A BSP tree node, containing polygons plus optional front/back subtrees.
///
/// Children are exclusively owned, so cloning a node deep-copies the whole
/// subtree below it.
#[derive(Debug, Clone)]
pub struct Node<S: Clone> {
    /// Splitting plane for this node *or* **None** for an empty tree.
    pub plane: Option<Plane>,

    /// Subtree holding polygons strictly in front of `plane`.
    pub front: Option<Box<Node<S>>>,

    /// Subtree holding polygons strictly behind `plane`.
    pub back: Option<Box<Node<S>>>,

    /// Polygons that lie on `plane`, in either orientation.
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone + Send + Sync + Debug> Default for Node<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Node<S> {
    /// Create a new empty BSP node
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// True if no polygon was ever partitioned into this tree.
    pub const fn is_empty(&self) -> bool {
        self.plane.is_none()
    }

    /// Number of nodes carrying a plane in this tree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.plane.is_some() {
                count += 1;
            }
            stack.extend(node.front.as_deref());
            stack.extend(node.back.as_deref());
        }
        count
    }

    /// Length of the longest root-to-node path.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            if node.plane.is_none() {
                continue;
            }
            max_depth = max_depth.max(depth);
            stack.extend(node.front.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.back.as_deref().map(|n| (n, depth + 1)));
        }
        max_depth
    }
}
