//! Triangulated surfaces of the vector geometry.

use serde::{Deserialize, Serialize};

use crate::geometry::bounds::Aabb;
use crate::geometry::polyline::Polyline;
use crate::mesh_error::MeshGeoError;

/// A surface given as a list of triangles.
///
/// Triangles need not be planar with each other; each one is tested
/// individually during the node search. Deserialization runs the same checks
/// as [`Surface::try_new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SurfaceRepr")]
pub struct Surface {
    triangles: Vec<[[f64; 3]; 3]>,
}

#[derive(Deserialize)]
struct SurfaceRepr {
    triangles: Vec<[[f64; 3]; 3]>,
}

impl TryFrom<SurfaceRepr> for Surface {
    type Error = MeshGeoError;

    fn try_from(repr: SurfaceRepr) -> Result<Self, Self::Error> {
        Self::try_new(repr.triangles)
    }
}

impl Surface {
    pub fn try_new(triangles: Vec<[[f64; 3]; 3]>) -> Result<Self, MeshGeoError> {
        if triangles.is_empty() {
            return Err(MeshGeoError::EmptySurface);
        }
        if triangles
            .iter()
            .flatten()
            .flatten()
            .any(|c| !c.is_finite())
        {
            return Err(MeshGeoError::InvalidGeometry(
                "surface triangle has a non-finite coordinate".into(),
            ));
        }
        Ok(Self { triangles })
    }

    /// Fan-triangulate a closed polyline around its first vertex.
    ///
    /// Only correct for convex (or star-shaped w.r.t. the first vertex) polygons.
    pub fn from_polygon(polygon: &Polyline) -> Result<Self, MeshGeoError> {
        if !polygon.is_closed() {
            return Err(MeshGeoError::InvalidGeometry(
                "surface polygon must be a closed polyline".into(),
            ));
        }
        let pts = polygon.points();
        // drop the repeated closing vertex
        let ring = &pts[..pts.len() - 1];
        if ring.len() < 3 {
            return Err(MeshGeoError::InvalidGeometry(format!(
                "surface polygon needs at least 3 vertices, found {}",
                ring.len()
            )));
        }
        let apex = ring[0].coords;
        let triangles = ring[1..]
            .windows(2)
            .map(|w| [apex, w[0].coords, w[1].coords])
            .collect();
        Self::try_new(triangles)
    }

    #[inline]
    pub fn triangles(&self) -> &[[[f64; 3]; 3]] {
        &self.triangles
    }

    pub fn bounds(&self) -> Aabb {
        let mut out = Aabb::from_point(self.triangles[0][0]);
        for p in self.triangles.iter().flatten() {
            out.include(*p);
        }
        out
    }
}
