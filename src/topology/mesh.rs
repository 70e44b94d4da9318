//! Read-only mesh snapshot: node coordinates plus element connectivity.
//!
//! Node ids are positions in the coordinate array, so they are dense in
//! `[0, N)` by construction. Elements carry their own ids, which must be unique
//! but need not be contiguous.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::geometry::bounds::Aabb;
use crate::mesh_error::MeshGeoError;
use crate::topology::cell_type::CellType;
/// A mesh element: ordered vertex ids plus topology and material tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: usize,
    pub nodes: Vec<usize>,
    pub cell_type: CellType,
    /// Material (region) id; `0` unless the producer assigned one.
    pub material: i32,
}

impl Element {
    pub fn new(id: usize, cell_type: CellType, nodes: Vec<usize>) -> Self {
        Self {
            id,
            nodes,
            cell_type,
            material: 0,
        }
    }

    pub fn with_material(mut self, material: i32) -> Self {
        self.material = material;
        self
    }
}

/// An immutable mesh.
///
/// Only `Serialize` is derived; meshes are built through [`Mesh::try_new`] so
/// the connectivity invariants hold for every value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mesh {
    name: String,
    nodes: Vec<[f64; 3]>,
    elements: Vec<Element>,
}

impl Mesh {
    /// Validate and assemble a mesh.
    pub fn try_new(
        name: impl Into<String>,
        nodes: Vec<[f64; 3]>,
        elements: Vec<Element>,
    ) -> Result<Self, MeshGeoError> {
        let mesh = Self {
            name: name.into(),
            nodes,
            elements,
        };
        mesh.validate_invariants()?;
        Ok(mesh)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn nodes(&self) -> &[[f64; 3]] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, id: usize) -> Option<[f64; 3]> {
        self.nodes.get(id).copied()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Highest element id, `None` for a mesh without elements.
    pub fn max_element_id(&self) -> Option<usize> {
        self.elements.iter().map(|e| e.id).max()
    }

    /// Highest material id, `None` for a mesh without elements.
    pub fn max_material_id(&self) -> Option<i32> {
        self.elements.iter().map(|e| e.material).max()
    }

    /// Bounding box of all nodes, `None` for a mesh without nodes.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.nodes.iter().copied())
    }

    /// Unique undirected element edges as `(min, max)` node id pairs,
    /// in first-seen order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for element in &self.elements {
            for [a, b] in element.cell_type.edges() {
                let (u, v) = (element.nodes[a], element.nodes[b]);
                let key = (u.min(v), u.max(v));
                if key.0 != key.1 && seen.insert(key) {
                    out.push(key);
                }
            }
        }
        out
    }

    /// Lengths of all unique element edges.
    pub fn edge_lengths(&self) -> Vec<f64> {
        self.edges()
            .into_iter()
            .map(|(u, v)| crate::geometry::metrics::distance(self.nodes[u], self.nodes[v]))
            .collect()
    }

    /// Derive a new mesh with the same nodes and `extra` elements appended.
    pub(crate) fn with_appended_elements(
        &self,
        name: impl Into<String>,
        extra: Vec<Element>,
    ) -> Result<Self, MeshGeoError> {
        let mut elements = Vec::with_capacity(self.elements.len() + extra.len());
        elements.extend(self.elements.iter().cloned());
        elements.extend(extra);
        Self::try_new(name, self.nodes.clone(), elements)
    }
}

impl DebugInvariants for Mesh {
    const KIND: &'static str = "Mesh";

    fn validate_invariants(&self) -> Result<(), MeshGeoError> {
        for (node, coords) in self.nodes.iter().enumerate() {
            if coords.iter().any(|c| !c.is_finite()) {
                return Err(MeshGeoError::NonFiniteCoordinate {
                    node,
                    coords: *coords,
                });
            }
        }
        let node_count = self.nodes.len();
        let mut ids = HashSet::with_capacity(self.elements.len());
        for element in &self.elements {
            if !ids.insert(element.id) {
                return Err(MeshGeoError::DuplicateElementId(element.id));
            }
            if let CellType::Polygon(n) = element.cell_type {
                if n < 3 {
                    return Err(MeshGeoError::InvalidGeometry(format!(
                        "element {}: polygon with {n} vertices",
                        element.id
                    )));
                }
            }
            let expected = element.cell_type.expected_vertex_count();
            if element.nodes.len() != expected {
                return Err(MeshGeoError::VertexCountMismatch {
                    element: element.id,
                    cell_type: element.cell_type,
                    expected,
                    found: element.nodes.len(),
                });
            }
            if let Some(&node) = element.nodes.iter().find(|&&n| n >= node_count) {
                return Err(MeshGeoError::DanglingNodeReference {
                    element: element.id,
                    node,
                    node_count,
                });
            }
        }
        Ok(())
    }
}

static_assertions::assert_impl_all!(Mesh: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> Mesh {
        Mesh::try_new(
            "square",
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            vec![
                Element::new(0, CellType::Triangle, vec![0, 1, 2]),
                Element::new(1, CellType::Triangle, vec![0, 2, 3]).with_material(4),
            ],
        )
        .unwrap()
    }

    #[test]
    fn shared_edges_are_counted_once() {
        let mesh = two_triangles();
        let edges = mesh.edges();
        assert_eq!(edges, vec![(0, 1), (1, 2), (0, 2), (2, 3), (0, 3)]);
        let lengths = mesh.edge_lengths();
        assert!((lengths[2] - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn element_id_and_material_maxima() {
        let mesh = two_triangles();
        assert_eq!(mesh.max_element_id(), Some(1));
        assert_eq!(mesh.max_material_id(), Some(4));
        let bare = Mesh::try_new("pts", vec![[0.0; 3]], Vec::new()).unwrap();
        assert_eq!(bare.max_element_id(), None);
        assert!(bare.edges().is_empty());
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let err = Mesh::try_new(
            "bad",
            vec![[0.0; 3], [1.0, 0.0, 0.0]],
            vec![Element::new(3, CellType::Segment, vec![0, 2])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshGeoError::DanglingNodeReference {
                element: 3,
                node: 2,
                node_count: 2
            }
        );
    }

    #[test]
    fn vertex_count_and_duplicate_ids_are_rejected() {
        let nodes = vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let err = Mesh::try_new(
            "bad",
            nodes.clone(),
            vec![Element::new(0, CellType::Triangle, vec![0, 1])],
        )
        .unwrap_err();
        assert!(matches!(err, MeshGeoError::VertexCountMismatch { expected: 3, found: 2, .. }));

        let err = Mesh::try_new(
            "bad",
            nodes,
            vec![
                Element::new(5, CellType::Segment, vec![0, 1]),
                Element::new(5, CellType::Segment, vec![1, 2]),
            ],
        )
        .unwrap_err();
        assert_eq!(err, MeshGeoError::DuplicateElementId(5));
    }

    #[test]
    fn non_finite_coordinate_is_rejected() {
        let err = Mesh::try_new("bad", vec![[0.0, f64::INFINITY, 0.0]], Vec::new()).unwrap_err();
        assert!(matches!(err, MeshGeoError::NonFiniteCoordinate { node: 0, .. }));
    }

    #[test]
    fn appending_keeps_original_intact() {
        let mesh = two_triangles();
        let derived = mesh
            .with_appended_elements(
                "square+line",
                vec![Element::new(2, CellType::Segment, vec![0, 1])],
            )
            .unwrap();
        assert_eq!(mesh.element_count(), 2);
        assert_eq!(derived.element_count(), 3);
        assert_eq!(derived.nodes(), mesh.nodes());
        assert_eq!(derived.name(), "square+line");
    }
}
