use crate::geometry::Geometry;
use crate::geometry::vertex::Vertex;
use crate::triangulated::Triangulated3D;

/// Triangles are emitted in world space with the facet normal on every corner.
impl<S: Clone + Send + Sync + std::fmt::Debug> Triangulated3D for Geometry<S> {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for poly in &self.transformed_polygons() {
            let normal = poly.plane.normal();
            for tri in poly.triangulate() {
                f(tri.map(|v| Vertex::new(v.pos, normal)));
            }
        }
    }
}
