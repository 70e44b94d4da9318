//! Vector geometry: points, polylines, surfaces, and point sets synthesized
//! from mesh nodes.

pub mod bounds;
pub mod metrics;
pub mod point_set;
pub mod polyline;
pub mod surface;

pub use bounds::Aabb;
pub use point_set::NamedPointSet;
pub use polyline::{GeoPoint, Polyline};
pub use surface::Surface;

/// A geometric primitive that can be resolved to mesh nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoPrimitive {
    Point(GeoPoint),
    Polyline(Polyline),
    Surface(Surface),
}

impl From<GeoPoint> for GeoPrimitive {
    fn from(p: GeoPoint) -> Self {
        GeoPrimitive::Point(p)
    }
}

impl From<Polyline> for GeoPrimitive {
    fn from(p: Polyline) -> Self {
        GeoPrimitive::Polyline(p)
    }
}

impl From<Surface> for GeoPrimitive {
    fn from(s: Surface) -> Self {
        GeoPrimitive::Surface(s)
    }
}
