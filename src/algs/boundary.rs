//! Boundary-condition records for synthesized point sets.
//!
//! One record per point: a global offset plus the point name. Offsets are
//! handed out by a single emitter and increase by one per record across all
//! point sets of a run, in the order the sets are emitted.

use serde::{Deserialize, Serialize};

use crate::geometry::point_set::NamedPointSet;

/// One boundary-condition record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRecord {
    pub offset: usize,
    pub point_name: String,
    pub coords: [f64; 3],
}

/// Hands out consecutive global offsets.
#[derive(Clone, Debug, Default)]
pub struct BoundaryRecordEmitter {
    next_offset: usize,
}

impl BoundaryRecordEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering from `offset`.
    pub fn starting_at(offset: usize) -> Self {
        Self {
            next_offset: offset,
        }
    }

    /// Offset the next record will receive.
    #[inline]
    pub fn next_offset(&self) -> usize {
        self.next_offset
    }

    /// Records for every point of `set`, in sequence order.
    pub fn emit(&mut self, set: &NamedPointSet) -> Vec<BoundaryRecord> {
        set.iter()
            .map(|(point_name, point)| {
                let offset = self.next_offset;
                self.next_offset += 1;
                BoundaryRecord {
                    offset,
                    point_name,
                    coords: point.coords,
                }
            })
            .collect()
    }
}
