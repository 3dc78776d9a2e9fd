use crate::float_types::Real;
use crate::geometry::Geometry;
use crate::geometry::polygon::Polygon;
use crate::io::IoError;
use crate::triangulated::Triangulated3D;
use nalgebra::Point3;
use std::fmt::Debug;
use std::io::Cursor;

/// Export to ASCII STL
///
/// ```rust
/// # use bspcsg::{Geometry, traits::CSGOps};
/// let geometry = Geometry::<()>::new();
/// let text = geometry.to_stl_ascii("empty");
/// assert!(text.starts_with("solid empty"));
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for v in &tri {
            let p = v.pos;
            out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        #[allow(clippy::unnecessary_cast)]
        {
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|v| {
                    let p = v.pos;
                    Vertex::new([p.x as f32, p.y as f32, p.z as f32])
                }),
            });
        }
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl<S: Clone + Debug + Send + Sync> Geometry<S> {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }

    /// Read an ASCII or binary STL, one triangle polygon per facet.
    ///
    /// Facets that do not span a plane are rejected.
    pub fn from_stl(name: &str, data: &[u8], metadata: Option<S>) -> Result<Geometry<S>, IoError> {
        let mut cursor = Cursor::new(data);
        let mesh = stl_io::read_stl(&mut cursor)?;

        #[allow(clippy::unnecessary_cast)]
        let points: Vec<Point3<Real>> = mesh
            .vertices
            .iter()
            .map(|v| Point3::new(v[0] as Real, v[1] as Real, v[2] as Real))
            .collect();

        let mut polygons = Vec::with_capacity(mesh.faces.len());
        for face in &mesh.faces {
            let corners = face
                .vertices
                .iter()
                .map(|&i| {
                    points.get(i).copied().ok_or_else(|| {
                        IoError::MalformedInput(format!("vertex index {i} out of range"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            polygons.push(Polygon::from_points(&corners, metadata.clone())?);
        }

        let mut geometry = Geometry::from_polygons(name, &polygons);
        geometry.metadata = metadata;
        Ok(geometry)
    }
}
