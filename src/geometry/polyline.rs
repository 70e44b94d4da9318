//! Polylines of the vector geometry.

use serde::{Deserialize, Serialize};

use crate::geometry::bounds::Aabb;
use crate::mesh_error::MeshGeoError;

/// A named geometric point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub id: usize,
    pub coords: [f64; 3],
}

impl GeoPoint {
    pub fn new(id: usize, coords: [f64; 3]) -> Self {
        Self { id, coords }
    }
}

/// Ordered, piecewise-linear curve.
///
/// Closed when the first and last point coincide (same id or same coordinates).
/// Deserialization runs the same checks as [`Polyline::try_new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolylineRepr")]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

#[derive(Deserialize)]
struct PolylineRepr {
    points: Vec<GeoPoint>,
}

impl TryFrom<PolylineRepr> for Polyline {
    type Error = MeshGeoError;

    fn try_from(repr: PolylineRepr) -> Result<Self, Self::Error> {
        Self::try_new(repr.points)
    }
}

impl Polyline {
    /// Build a polyline, rejecting inputs with fewer than two distinct points.
    pub fn try_new(points: Vec<GeoPoint>) -> Result<Self, MeshGeoError> {
        let distinct = count_distinct(&points);
        if points.len() < 2 || distinct < 2 {
            return Err(MeshGeoError::DegeneratePolyline {
                points: points.len(),
                distinct,
            });
        }
        if let Some(p) = points
            .iter()
            .find(|p| p.coords.iter().any(|c| !c.is_finite()))
        {
            return Err(MeshGeoError::InvalidGeometry(format!(
                "polyline point {} has a non-finite coordinate",
                p.id
            )));
        }
        Ok(Self { points })
    }

    /// Build a polyline from bare coordinates, numbering points from zero.
    pub fn from_coords<I>(coords: I) -> Result<Self, MeshGeoError>
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        Self::try_new(
            coords
                .into_iter()
                .enumerate()
                .map(|(id, c)| GeoPoint::new(id, c))
                .collect(),
        )
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.id == last.id || first.coords == last.coords,
            _ => false,
        }
    }

    /// Consecutive vertex pairs in traversal order.
    pub fn segments(&self) -> impl Iterator<Item = ([f64; 3], [f64; 3])> + '_ {
        self.points.windows(2).map(|w| (w[0].coords, w[1].coords))
    }

    pub fn bounds(&self) -> Aabb {
        // try_new guarantees at least two points
        let mut out = Aabb::from_point(self.points[0].coords);
        for p in &self.points[1..] {
            out.include(p.coords);
        }
        out
    }
}

fn count_distinct(points: &[GeoPoint]) -> usize {
    let mut seen: Vec<[f64; 3]> = Vec::new();
    for p in points {
        if !seen.contains(&p.coords) {
            seen.push(p.coords);
            if seen.len() >= 2 {
                break;
            }
        }
    }
    seen.len()
}
