//! Boolean operators on closed polygon sets.
//!
//! All three are the same two primitives, [`Node::trim_to`] and
//! [`Node::invert`], in a different order. Each call builds fresh trees from
//! copies of its inputs; the caller's polygons are never touched. The step
//! order below is load-bearing: moving an invert changes the result.
//!
//! An empty tree cannot stand for the complement of nothing, so empty
//! operands are answered directly instead of going through the trees.

use crate::geometry::bsp::Node;
use crate::geometry::polygon::Polygon;
use std::fmt::Debug;

/// Return the surface of the union of the solids bounded by `a` and `b`.
///
/// ```text
///     +-------+            +-------+
///     |       |            |       |
///     |   a   |            |   c   |
///     |    +--+----+   =   |       +----+
///     +----+--+    |       +----+       |
///          |   b   |            |   c   |
///          |       |            |       |
///          +-------+            +-------+
/// ```
pub fn union<S: Clone + Send + Sync + Debug>(
    a: &[Polygon<S>],
    b: &[Polygon<S>],
) -> Vec<Polygon<S>> {
    log::debug!("union of {} and {} polygons", a.len(), b.len());
    if a.is_empty() || b.is_empty() {
        return [a, b].concat();
    }
    let mut a = Node::from_polygons(a);
    let mut b = Node::from_polygons(b);

    a.trim_to(&b);
    b.trim_to(&a);
    // drop b's copy of faces the two solids share
    b.invert();
    b.trim_to(&a);
    b.invert();
    a.partition(&b.all_polygons());

    let result = a.all_polygons();
    log::debug!("union produced {} polygons", result.len());
    result
}

/// Return the surface of the intersection of the solids bounded by `a` and `b`,
/// computed as `¬(¬a ∪ ¬b)`.
///
/// ```text
///     +-------+
///     |       |
///     |   a   |
///     |    +--+----+   =   +--+
///     +----+--+    |       +--+
///          |   b   |
///          |       |
///          +-------+
/// ```
pub fn intersect<S: Clone + Send + Sync + Debug>(
    a: &[Polygon<S>],
    b: &[Polygon<S>],
) -> Vec<Polygon<S>> {
    log::debug!("intersection of {} and {} polygons", a.len(), b.len());
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut a = Node::from_polygons(a);
    let mut b = Node::from_polygons(b);

    a.invert();
    b.trim_to(&a);
    b.invert();
    a.trim_to(&b);
    b.trim_to(&a);
    a.partition(&b.all_polygons());
    a.invert();

    let result = a.all_polygons();
    log::debug!("intersection produced {} polygons", result.len());
    result
}

/// Return the surface of the solid bounded by `a` with the solid bounded by
/// `b` removed, computed as `¬(¬a ∪ b)`.
///
/// ```text
///     +-------+            +-------+
///     |       |            |       |
///     |   a   |            |   c   |
///     |    +--+----+   =   |    +--+
///     +----+--+    |       +----+
///          |   b   |
///          |       |
///          +-------+
/// ```
pub fn subtract<S: Clone + Send + Sync + Debug>(
    a: &[Polygon<S>],
    b: &[Polygon<S>],
) -> Vec<Polygon<S>> {
    log::debug!("subtraction of {} polygons from {} polygons", b.len(), a.len());
    if a.is_empty() || b.is_empty() {
        return a.to_vec();
    }
    let mut a = Node::from_polygons(a);
    let mut b = Node::from_polygons(b);

    a.invert();
    a.trim_to(&b);
    b.trim_to(&a);
    b.invert();
    b.trim_to(&a);
    b.invert();
    a.partition(&b.all_polygons());
    a.invert();

    let result = a.all_polygons();
    log::debug!("subtraction produced {} polygons", result.len());
    result
}

/// Return the surface of the space in exactly one of the two solids,
/// `(a - b) ∪ (b - a)`.
pub fn xor<S: Clone + Send + Sync + Debug>(a: &[Polygon<S>], b: &[Polygon<S>]) -> Vec<Polygon<S>> {
    let a_sub_b = subtract(a, b);
    let b_sub_a = subtract(b, a);
    union(&a_sub_b, &b_sub_a)
}
