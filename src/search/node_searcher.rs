//! Mesh node searcher: maps points, polylines and surfaces to mesh node ids.
//!
//! A searcher borrows one mesh, owns (or shares) a [`NodeIndex`] over its
//! nodes, and fixes the search length once at construction. Queries never
//! mutate the searcher, so one instance can serve any number of independent
//! queries in any order, from any number of threads.
//!
//! Polyline results are ordered by arc-length position along the polyline:
//! the position of a node is the cumulative length of the preceding segments
//! plus the clamped projection parameter times the length of the segment that
//! matched it first. The parameter is left unclamped before the first vertex
//! and past the last one, so nodes within the search length beyond either end
//! still sort by where they lie. Nodes matched by several segments keep their
//! first match, so shared vertices and the closing vertex of a closed polyline
//! appear once.

use std::sync::Arc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::geometry::GeoPrimitive;
use crate::geometry::bounds::Aabb;
use crate::geometry::metrics::{
    distance, distance_to_triangle, midpoint, planar_distance_to_triangle, project_onto_segment,
};
use crate::geometry::polyline::Polyline;
use crate::geometry::surface::Surface;
use crate::mesh_error::MeshGeoError;
use crate::search::node_index::NodeIndex;
use crate::search::search_length::{SearchLength, SearchLengthStrategy};
use crate::topology::mesh::Mesh;

/// Membership test used for surface queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceMembership {
    /// 3-D distance from the node to the closest point of a triangle.
    #[default]
    Distance,
    /// Point-in-triangle in the xy-plane with tolerance; node heights are
    /// ignored. Suited to 2.5-D terrain surfaces.
    VerticalProjection,
}

/// Searcher configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearcherOptions {
    pub search_length: SearchLength,
    pub surface_membership: SurfaceMembership,
}

/// Query surface combining a node index with a fixed search length.
#[derive(Clone)]
pub struct MeshNodeSearcher<'m> {
    mesh: &'m Mesh,
    index: Arc<NodeIndex>,
    search_length: f64,
    surface_membership: SurfaceMembership,
}

impl<'m> MeshNodeSearcher<'m> {
    /// Build the node index and resolve the search length for `mesh`.
    pub fn try_new(mesh: &'m Mesh, options: &SearcherOptions) -> Result<Self, MeshGeoError> {
        if mesh.node_count() == 0 {
            return Err(MeshGeoError::EmptyMesh(mesh.name().to_string()));
        }
        let index = Arc::new(NodeIndex::from_mesh(mesh));
        Self::with_shared_index(mesh, index, options)
    }

    /// Build a searcher from any strategy, with the default surface test.
    pub fn with_strategy<S>(mesh: &'m Mesh, strategy: &S) -> Result<Self, MeshGeoError>
    where
        S: SearchLengthStrategy + ?Sized,
    {
        if mesh.node_count() == 0 {
            return Err(MeshGeoError::EmptyMesh(mesh.name().to_string()));
        }
        let search_length = strategy.search_length(mesh)?;
        Ok(Self {
            mesh,
            index: Arc::new(NodeIndex::from_mesh(mesh)),
            search_length,
            surface_membership: SurfaceMembership::default(),
        })
    }

    /// Reuse an index built for the same mesh by another searcher.
    pub fn with_shared_index(
        mesh: &'m Mesh,
        index: Arc<NodeIndex>,
        options: &SearcherOptions,
    ) -> Result<Self, MeshGeoError> {
        if mesh.node_count() == 0 {
            return Err(MeshGeoError::EmptyMesh(mesh.name().to_string()));
        }
        if index.len() != mesh.node_count() {
            return Err(MeshGeoError::InvalidGeometry(format!(
                "node index holds {} nodes but mesh `{}` has {}",
                index.len(),
                mesh.name(),
                mesh.node_count()
            )));
        }
        let search_length = options.search_length.search_length(mesh)?;
        log::debug!(
            "searcher for mesh `{}`: {} nodes, search length {search_length}",
            mesh.name(),
            mesh.node_count()
        );
        Ok(Self {
            mesh,
            index,
            search_length,
            surface_membership: options.surface_membership,
        })
    }

    #[inline]
    pub fn mesh(&self) -> &'m Mesh {
        self.mesh
    }

    #[inline]
    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    /// Shared handle to the index, for building sibling searchers.
    #[inline]
    pub fn shared_index(&self) -> Arc<NodeIndex> {
        Arc::clone(&self.index)
    }

    #[inline]
    pub fn search_length(&self) -> f64 {
        self.search_length
    }

    #[inline]
    pub fn surface_membership(&self) -> SurfaceMembership {
        self.surface_membership
    }

    /// Nearest node to `point` if it lies within the search length; at most one id.
    pub fn nodes_for_point(&self, point: [f64; 3]) -> Vec<usize> {
        if point.iter().any(|c| !c.is_finite()) {
            return Vec::new();
        }
        match self.index.nearest(point) {
            Some(hit) if hit.distance <= self.search_length => vec![hit.id],
            _ => Vec::new(),
        }
    }

    /// Resolve each point independently; one result per input point.
    pub fn nodes_for_points(&self, points: &[[f64; 3]]) -> Vec<Vec<usize>> {
        points.iter().map(|&p| self.nodes_for_point(p)).collect()
    }

    /// Mesh nodes within the search length of the polyline, in traversal order.
    pub fn nodes_for_polyline(&self, polyline: &Polyline) -> Vec<usize> {
        let eps = self.search_length;
        if !self.overlaps(&polyline.bounds().inflated(eps)) {
            log::debug!("polyline lies outside mesh `{}`", self.mesh.name());
            return Vec::new();
        }

        let mut hits: Vec<(usize, f64)> = Vec::new();
        let mut offset = 0.0;
        let last = polyline.len() - 2;
        for (k, (a, b)) in polyline.segments().enumerate() {
            let len = distance(a, b);
            for candidate in self
                .index
                .within(midpoint(a, b), candidate_radius(a, b, len, eps))
            {
                let Some(p) = self.index.coords(candidate.id) else {
                    continue;
                };
                let proj = project_onto_segment(p, a, b);
                if proj.distance <= eps {
                    // nodes beyond either end of the polyline keep their distance from it
                    let t = if (k == 0 && proj.raw_t < 0.0) || (k == last && proj.raw_t > 1.0) {
                        proj.raw_t
                    } else {
                        proj.t
                    };
                    hits.push((candidate.id, offset + t * len));
                }
            }
            offset += len;
        }

        let mut ordered: Vec<(usize, f64)> = hits.into_iter().unique_by(|&(id, _)| id).collect();
        ordered.sort_by(|l, r| l.1.total_cmp(&r.1).then(l.0.cmp(&r.0)));
        log::debug!(
            "polyline with {} points matched {} nodes",
            polyline.len(),
            ordered.len()
        );
        ordered.into_iter().map(|(id, _)| id).collect()
    }

    /// Mesh nodes within the search length of the surface, ascending by id.
    pub fn nodes_for_surface(&self, surface: &Surface) -> Vec<usize> {
        let eps = self.search_length;
        let vertical = self.surface_membership == SurfaceMembership::VerticalProjection;
        let query_box = |bounds: Aabb| {
            let mut b = bounds.inflated(eps);
            if vertical {
                b.min[2] = f64::MIN;
                b.max[2] = f64::MAX;
            }
            b
        };
        if !self.overlaps(&query_box(surface.bounds())) {
            log::debug!("surface lies outside mesh `{}`", self.mesh.name());
            return Vec::new();
        }

        let mut ids = Vec::new();
        for &[a, b, c] in surface.triangles() {
            let Some(bounds) = Aabb::from_points([a, b, c]) else {
                continue;
            };
            let bounds = query_box(bounds);
            for id in self.index.in_envelope(bounds.min, bounds.max) {
                let Some(p) = self.index.coords(id) else {
                    continue;
                };
                let d = if vertical {
                    planar_distance_to_triangle(p, a, b, c)
                } else {
                    distance_to_triangle(p, a, b, c)
                };
                if d <= eps {
                    ids.push(id);
                }
            }
        }
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Dispatch on the primitive kind.
    pub fn nodes_for(&self, primitive: &GeoPrimitive) -> Vec<usize> {
        match primitive {
            GeoPrimitive::Point(p) => self.nodes_for_point(p.coords),
            GeoPrimitive::Polyline(ply) => self.nodes_for_polyline(ply),
            GeoPrimitive::Surface(sfc) => self.nodes_for_surface(sfc),
        }
    }

    fn overlaps(&self, query: &Aabb) -> bool {
        self.index
            .bounds()
            .is_some_and(|mesh_bounds| mesh_bounds.intersects(query))
    }
}

/// Radius around the segment midpoint that contains every node within `eps`
/// of the segment, padded for rounding in the midpoint itself.
fn candidate_radius(a: [f64; 3], b: [f64; 3], len: f64, eps: f64) -> f64 {
    let magnitude = a
        .iter()
        .chain(b.iter())
        .fold(1.0_f64, |m, c| m.max(c.abs()));
    0.5 * len + eps + 1e-9 * len + 8.0 * f64::EPSILON * magnitude
}

static_assertions::assert_impl_all!(MeshNodeSearcher<'static>: Send, Sync);
static_assertions::assert_impl_all!(NodeIndex: Send, Sync);
