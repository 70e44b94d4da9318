#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-geo-search
//!
//! mesh-geo-search links a computational mesh (nodes and elements) with an
//! independently authored vector geometry (points, polylines, surfaces) of the
//! same domain. It finds, under a numerical tolerance, the mesh nodes that
//! represent each geometric primitive, and uses those correspondences to
//! synthesize new geometry and new mesh topology.
//!
//! ## Features
//! - R*-tree node index with nearest and range queries
//! - Fixed or adaptive (edge-length based) search length policies
//! - Point, polyline (arc-length ordered) and surface node queries
//! - Named point sets `"<name>-PNT-<k>"` synthesized from node sequences
//! - Line elements appended along polylines into a derived mesh
//! - Boundary-condition records with a run-wide offset
//!
//! ## Determinism
//!
//! Every query result is a pure function of (mesh, primitive, search length).
//! Ties are broken by the lowest node id, so repeated runs produce identical
//! output, including when polylines are resolved in parallel (`rayon` feature).
//!
//! ## Usage
//!
//! ```
//! use mesh_geo_search::prelude::*;
//!
//! let nodes = (0..5).map(|i| [i as f64, 0.0, 0.0]).collect();
//! let mesh = Mesh::try_new("row", nodes, Vec::new()).unwrap();
//! let options = SearcherOptions {
//!     search_length: SearchLength::fixed(0.01).unwrap(),
//!     ..SearcherOptions::default()
//! };
//! let searcher = MeshNodeSearcher::try_new(&mesh, &options).unwrap();
//! let ply = Polyline::from_coords([[4.0, 0.0, 0.0], [0.0, 0.0, 0.0]]).unwrap();
//! assert_eq!(searcher.nodes_for_polyline(&ply), vec![4, 3, 2, 1, 0]);
//! ```
//!
//! File formats are out of scope: meshes and geometry come from external
//! loaders, and results are plain values handed to external writers.

pub mod algs;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh_error;
pub mod search;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::append_lines::{
        AppendReport, append_line_elements, append_lines_along_polylines,
    };
    pub use crate::algs::batch::{BatchOutcome, BatchReport, boundary_conditions_along_polylines};
    pub use crate::algs::boundary::{BoundaryRecord, BoundaryRecordEmitter};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::{Aabb, GeoPoint, GeoPrimitive, NamedPointSet, Polyline, Surface};
    pub use crate::mesh_error::MeshGeoError;
    pub use crate::search::{
        AdaptiveSearchLength, EdgeStatistic, FixedSearchLength, MeshNodeSearcher, NodeIndex,
        SearchLength, SearchLengthStrategy, SearcherOptions, SurfaceMembership,
    };
    pub use crate::topology::{CellType, Element, Mesh};
}
