//! Spatial index over the node coordinates of one mesh.
//!
//! Backed by an R*-tree (`rstar`) bulk-loaded from the node array, so the
//! build is `O(N log N)` and point queries are logarithmic. Range queries
//! first collect candidates from the radius' bounding box, then filter by
//! exact Euclidean distance; `nearest` and `within` therefore use the same
//! distance arithmetic and always agree.
//!
//! The index captures a copy of the coordinates. It describes the mesh it was
//! built from and must be rebuilt for any other node set.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::geometry::bounds::Aabb;
use crate::geometry::metrics::distance;
use crate::topology::mesh::Mesh;

/// Node id with its coordinates, as stored in the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
struct IndexedNode {
    id: usize,
    coords: [f64; 3],
}

impl RTreeObject for IndexedNode {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords)
    }
}

impl PointDistance for IndexedNode {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.coords[0] - point[0];
        let dy = self.coords[1] - point[1];
        let dz = self.coords[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// A node id together with its distance to a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeHit {
    pub id: usize,
    pub distance: f64,
}

/// R*-tree over mesh node coordinates.
pub struct NodeIndex {
    tree: RTree<IndexedNode>,
    coords: Vec<[f64; 3]>,
    bounds: Option<Aabb>,
}

impl NodeIndex {
    /// Bulk-load the index from a coordinate array; node `i` is `coords[i]`.
    pub fn build(coords: &[[f64; 3]]) -> Self {
        let nodes: Vec<IndexedNode> = coords
            .iter()
            .enumerate()
            .map(|(id, &coords)| IndexedNode { id, coords })
            .collect();
        log::debug!("building node index over {} nodes", nodes.len());
        Self {
            tree: RTree::bulk_load(nodes),
            coords: coords.to_vec(),
            bounds: Aabb::from_points(coords.iter().copied()),
        }
    }

    /// Index all nodes of `mesh`.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self::build(mesh.nodes())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Coordinates of node `id` as captured at build time.
    #[inline]
    pub fn coords(&self, id: usize) -> Option<[f64; 3]> {
        self.coords.get(id).copied()
    }

    /// Bounding box of all indexed nodes.
    #[inline]
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Closest node to `point`; ties go to the lowest node id.
    pub fn nearest(&self, point: [f64; 3]) -> Option<NodeHit> {
        let mut iter = self.tree.nearest_neighbor_iter(&point);
        let first = iter.next()?;
        let best_d2 = first.distance_2(&point);
        let mut best_id = first.id;
        // the iterator yields in ascending distance order; scan the tie run only
        for node in iter {
            if node.distance_2(&point) != best_d2 {
                break;
            }
            best_id = best_id.min(node.id);
        }
        Some(NodeHit {
            id: best_id,
            distance: distance(self.coords[best_id], point),
        })
    }

    /// All nodes with distance `<= radius` to `point`, by ascending distance,
    /// ties broken by lowest node id. A negative radius yields nothing.
    pub fn within(&self, point: [f64; 3], radius: f64) -> Vec<NodeHit> {
        if !(radius >= 0.0) || self.is_empty() {
            return Vec::new();
        }
        // widen the candidate box by a few ulps of the query position; the
        // distance filter below is exact
        let slack = 4.0 * f64::EPSILON * point.iter().fold(1.0_f64, |m, c| m.max(c.abs()));
        let envelope = Aabb::from_point(point).inflated(radius + slack);
        let mut hits: Vec<NodeHit> = self
            .envelope_candidates(&envelope)
            .map(|node| NodeHit {
                id: node.id,
                distance: distance(node.coords, point),
            })
            .filter(|hit| hit.distance <= radius)
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id)));
        hits
    }

    /// Ids of all nodes inside the closed box `[lower, upper]`, ascending.
    pub fn in_envelope(&self, lower: [f64; 3], upper: [f64; 3]) -> Vec<usize> {
        let envelope = Aabb {
            min: lower,
            max: upper,
        };
        let mut ids: Vec<usize> = self
            .envelope_candidates(&envelope)
            .filter(|node| envelope.contains(node.coords))
            .map(|node| node.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn envelope_candidates<'a>(
        &'a self,
        envelope: &Aabb,
    ) -> impl Iterator<Item = &'a IndexedNode> + 'a {
        let aabb = AABB::from_corners(envelope.min, envelope.max);
        self.tree.locate_in_envelope(&aabb)
    }
}
