//! Algorithms built on the mesh node searcher.

pub mod append_lines;
pub mod batch;
pub mod boundary;

pub use append_lines::{AppendReport, append_line_elements, append_lines_along_polylines};
pub use batch::{BatchOutcome, BatchReport, boundary_conditions_along_polylines, resolve_polylines};
pub use boundary::{BoundaryRecord, BoundaryRecordEmitter};
