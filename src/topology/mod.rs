//! Mesh topology: element types and the read-only mesh snapshot.
//!
//! Node ids are dense positions into the coordinate array; elements reference
//! them by id and carry a [`CellType`] tag.

pub mod cell_type;
pub mod mesh;

pub use cell_type::CellType;
pub use mesh::{Element, Mesh};
