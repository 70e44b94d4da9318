//! Element topology tags.
//!
//! Local vertex ordering follows the usual finite-element conventions:
//! bottom face first, counter-clockwise, then the top face (hex/prism) or the
//! apex (pyramid).

use serde::{Deserialize, Serialize};

/// Topology tag of a mesh element.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 0D vertex.
    Vertex,
    /// 1D line element.
    Segment,
    /// 2D simplex (triangle).
    Triangle,
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D tensor-product cell (hex).
    Hexahedron,
    /// 3D wedge/prism.
    Prism,
    /// 3D pyramid.
    Pyramid,
    /// 2D polygon with `n` vertices.
    Polygon(u8),
}

impl Default for CellType {
    fn default() -> Self {
        CellType::Vertex
    }
}

impl CellType {
    /// Number of vertices an element of this type must reference.
    pub fn expected_vertex_count(self) -> usize {
        match self {
            CellType::Vertex => 1,
            CellType::Segment => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral | CellType::Tetrahedron => 4,
            CellType::Pyramid => 5,
            CellType::Prism => 6,
            CellType::Hexahedron => 8,
            CellType::Polygon(n) => usize::from(n),
        }
    }

    /// Local edge connectivity as pairs of local vertex indices.
    pub fn edges(self) -> Vec<[usize; 2]> {
        match self {
            CellType::Vertex => Vec::new(),
            CellType::Segment => SEGMENT_EDGES.to_vec(),
            CellType::Triangle => TRIANGLE_EDGES.to_vec(),
            CellType::Quadrilateral => QUAD_EDGES.to_vec(),
            CellType::Tetrahedron => TET_EDGES.to_vec(),
            CellType::Hexahedron => HEX_EDGES.to_vec(),
            CellType::Prism => PRISM_EDGES.to_vec(),
            CellType::Pyramid => PYRAMID_EDGES.to_vec(),
            CellType::Polygon(n) => {
                let n = usize::from(n);
                (0..n).map(|i| [i, (i + 1) % n]).collect()
            }
        }
    }
}

const SEGMENT_EDGES: [[usize; 2]; 1] = [[0, 1]];
const TRIANGLE_EDGES: [[usize; 2]; 3] = [[0, 1], [1, 2], [2, 0]];
const QUAD_EDGES: [[usize; 2]; 4] = [[0, 1], [1, 2], [2, 3], [3, 0]];
const TET_EDGES: [[usize; 2]; 6] = [[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];
const HEX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];
const PRISM_EDGES: [[usize; 2]; 9] = [
    [0, 1],
    [1, 2],
    [2, 0],
    [3, 4],
    [4, 5],
    [5, 3],
    [0, 3],
    [1, 4],
    [2, 5],
];
const PYRAMID_EDGES: [[usize; 2]; 8] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [0, 4],
    [1, 4],
    [2, 4],
    [3, 4],
];
