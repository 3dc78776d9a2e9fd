mod support;

use bspcsg::{
    float_types::{Real, tolerance},
    geometry::{
        bsp::{BalancedSplittingStrategy, Node},
        plane::Plane,
        polygon::Polygon,
    },
};
use nalgebra::Vector3;

use crate::support::{
    approx_eq, area, cube_polygons, lies_on_x, make_polygon_3d, vertex_count, volume,
};

fn unit_cube() -> Node<()> {
    Node::from_polygons(&cube_polygons([0.0, 0.0, 0.0], 1.0, None))
}

#[test]
fn new_and_build() {
    let p = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let node: Node<()> = Node::from_polygons(&[p.clone()]);
    assert_eq!(node.plane, Some(p.plane.clone()));
    assert_eq!(node.polygons, vec![p]);
    assert!(node.front.is_none());
    assert!(node.back.is_none());
}

#[test]
fn round_trip_keeps_cube() {
    let cube = cube_polygons::<()>([0.0, 0.0, 0.0], 1.0, None);
    let polygons = Node::from_polygons(&cube).all_polygons();
    // no cube face spans another face's plane, so nothing is split
    assert_eq!(polygons.len(), 6);
    assert_eq!(vertex_count(&polygons), 24);
    assert!(approx_eq(area(&polygons), 24.0, 1e-12));
    assert!(approx_eq(volume(&polygons), 8.0, 1e-12));
}

#[test]
fn all_polygons_is_pre_order() {
    // parallel planes stacked along +z form a chain of front children
    let layers: Vec<Polygon<()>> = (0..1000)
        .map(|i| {
            let z = i as Real;
            make_polygon_3d(&[[0.0, 0.0, z], [1.0, 0.0, z], [0.0, 1.0, z]])
        })
        .collect();
    let node = Node::from_polygons(&layers);
    assert_eq!(node.depth(), 1000);
    assert_eq!(node.node_count(), 1000);
    assert_eq!(node.all_polygons(), layers);
}

#[test]
fn invert_twice_is_identity() {
    let node = unit_cube();
    let mut twice = node.clone();
    twice.invert();
    assert!(approx_eq(volume(&twice.all_polygons()), -8.0, 1e-12));
    twice.invert();
    assert_eq!(twice.all_polygons(), node.all_polygons());
    assert_eq!(twice.plane, node.plane);
}

#[test]
fn flip_is_a_copy() {
    let node = unit_cube();
    let flipped = node.flip();
    assert_eq!(flipped.flip().all_polygons(), node.all_polygons());
    assert!(approx_eq(volume(&node.all_polygons()), 8.0, 1e-12));
    assert!(approx_eq(volume(&flipped.all_polygons()), -8.0, 1e-12));
}

#[test]
fn trim_removes_inside_and_keeps_outside() {
    let node = unit_cube();
    let outside = make_polygon_3d(&[[5.0, 0.0, 0.0], [6.0, 0.0, 0.0], [5.0, 1.0, 0.0]]);
    let inside = make_polygon_3d(&[[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [0.0, 0.5, 0.0]]);

    let kept = node.trim(&[outside.clone(), inside]);
    assert_eq!(kept, vec![outside]);
}

#[test]
fn trim_keeps_only_outside_part_of_crossing_polygon() {
    let node = unit_cube();
    let crossing = make_polygon_3d(&[
        [0.0, -0.5, 0.0],
        [2.0, -0.5, 0.0],
        [2.0, 0.5, 0.0],
        [0.0, 0.5, 0.0],
    ]);

    let kept = node.trim(&[crossing]);
    assert!(!kept.is_empty());
    assert!(approx_eq(area(&kept), 1.0, 1e-9));
    assert!(kept.iter().flat_map(|p| &p.vertices).all(|v| v.pos.x >= 1.0 - tolerance()));
}

#[test]
fn trim_routes_coplanar_by_orientation() {
    let node = unit_cube();
    // a patch of the +x face, facing out like the face itself
    let patch = make_polygon_3d(&[
        [1.0, -0.5, -0.5],
        [1.0, 0.5, -0.5],
        [1.0, 0.5, 0.5],
        [1.0, -0.5, 0.5],
    ]);
    assert!(patch.plane.normal().dot(&Vector3::x()) > 0.0);

    assert_eq!(node.trim(&[patch.clone()]), vec![patch.clone()]);
    assert!(node.trim(&[patch.flipped()]).is_empty());
}

#[test]
fn trim_with_empty_tree_keeps_everything() {
    let node: Node<()> = Node::new();
    let cube = cube_polygons::<()>([0.0, 0.0, 0.0], 1.0, None);
    assert_eq!(node.trim(&cube), cube);
}

#[test]
fn trim_to_drops_polygons_inside_other_solid() {
    let mut a = unit_cube();
    let b = Node::from_polygons(&cube_polygons([1.0, 0.0, 0.0], 1.0, None));
    a.trim_to(&b);

    let polygons = a.all_polygons();
    // the +x face is inside b, everything else survives (split at x = 0)
    assert!(!polygons.iter().any(|p| lies_on_x(p, 1.0)));
    assert!(polygons.iter().any(|p| lies_on_x(p, -1.0)));
    assert_eq!(polygons.len(), 9);
    assert!(approx_eq(area(&polygons), 20.0, 1e-9));
}

#[test]
fn partition_extends_existing_tree() {
    let mut node = unit_cube();
    let extra = make_polygon_3d(&[[5.0, 0.0, 0.0], [6.0, 0.0, 0.0], [5.0, 1.0, 0.0]]);
    node.partition(&[extra.clone()]);
    let polygons = node.all_polygons();
    assert_eq!(polygons.len(), 7);
    assert!(polygons.contains(&extra));

    node.partition(&[]);
    assert_eq!(node.all_polygons().len(), 7);
}

#[test]
fn partition_splits_spanning_polygons() {
    let mut node = unit_cube();
    let crossing = make_polygon_3d(&[
        [0.0, -0.5, 0.0],
        [2.0, -0.5, 0.0],
        [2.0, 0.5, 0.0],
        [0.0, 0.5, 0.0],
    ]);
    node.partition(&[crossing]);
    let polygons = node.all_polygons();
    assert_eq!(polygons.len(), 8);
    assert!(approx_eq(area(&polygons), 26.0, 1e-9));
}

#[test]
fn balanced_strategy_builds_same_surface() {
    let cube = cube_polygons::<()>([0.0, 0.0, 0.0], 1.0, None);
    let node = Node::from_polygons_with(&cube, BalancedSplittingStrategy::default());
    let polygons = node.all_polygons();
    assert_eq!(polygons.len(), 6);
    assert!(approx_eq(volume(&polygons), 8.0, 1e-12));
}

#[test]
fn slice_through_middle() {
    let node = unit_cube();
    let (coplanar, edges) = node.slice(&Plane::from_normal(Vector3::z(), 0.0));
    assert!(coplanar.is_empty());
    assert_eq!(edges.len(), 4);
    for [a, b] in &edges {
        assert!(a.pos.z.abs() < 1e-12 && b.pos.z.abs() < 1e-12);
        assert!(approx_eq((b.pos - a.pos).norm(), 2.0, 1e-12));
    }
}

#[test]
fn slice_on_face() {
    let node = unit_cube();
    let (coplanar, edges) = node.slice(&Plane::from_normal(Vector3::z(), -1.0));
    assert_eq!(coplanar.len(), 1);
    assert!(coplanar[0].vertices.iter().all(|v| v.pos.z == 1.0));
    assert!(edges.is_empty());
}
