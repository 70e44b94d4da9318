//! MeshGeoError: Unified error type for mesh-geo-search public APIs
//!
//! Only structurally invalid input is an error. A query that finds no
//! matching mesh nodes returns an empty sequence instead.

use thiserror::Error;

use crate::topology::cell_type::CellType;

/// Unified error type for mesh/geometry correspondence operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshGeoError {
    /// A searcher was requested for a mesh without nodes.
    #[error("mesh `{0}` has no nodes")]
    EmptyMesh(String),
    /// A node coordinate is NaN or infinite.
    #[error("node {node} has a non-finite coordinate {coords:?}")]
    NonFiniteCoordinate { node: usize, coords: [f64; 3] },
    /// An element references a node id outside `[0, node_count)`.
    #[error("element {element} references node {node}, but the mesh has {node_count} nodes")]
    DanglingNodeReference {
        element: usize,
        node: usize,
        node_count: usize,
    },
    /// An element's vertex list does not fit its cell type.
    #[error("element {element} of type {cell_type:?}: expected {expected} vertices, found {found}")]
    VertexCountMismatch {
        element: usize,
        cell_type: CellType,
        expected: usize,
        found: usize,
    },
    /// Two elements share the same id.
    #[error("duplicate element id {0}")]
    DuplicateElementId(usize),
    /// A polyline has fewer than two distinct points.
    #[error("polyline needs at least two distinct points, found {distinct} distinct of {points}")]
    DegeneratePolyline { points: usize, distinct: usize },
    /// A surface has no triangles.
    #[error("surface has no triangles")]
    EmptySurface,
    /// A node id handed to the engine does not exist in the mesh.
    #[error("node id {node} out of range for mesh with {node_count} nodes")]
    NodeOutOfRange { node: usize, node_count: usize },
    /// Generic geometric validation failure.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Negative or non-finite search length.
    #[error("search length must be finite and non-negative, got {0}")]
    InvalidSearchLength(f64),
    /// An adaptive search length policy with unusable parameters.
    #[error("invalid search length policy: {0}")]
    InvalidSearchLengthPolicy(String),
}
