//! Batch drivers over many polylines against one mesh.
//!
//! Polylines are resolved independently; a polyline without matches is
//! counted and skipped, never an error for the batch.

use crate::algs::boundary::{BoundaryRecord, BoundaryRecordEmitter};
use crate::geometry::point_set::NamedPointSet;
use crate::geometry::polyline::Polyline;
use crate::mesh_error::MeshGeoError;
use crate::search::node_searcher::MeshNodeSearcher;

/// Base name given to the point set of polyline `k`: `Polyline-<k>`.
pub fn polyline_geo_name(k: usize) -> String {
    format!("Polyline-{k}")
}

/// Matched vs unmatched polyline counts for one batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Polylines with at least one matched node.
    pub matched: usize,
    /// Polylines without any matched node, by input index.
    pub unmatched: Vec<usize>,
    /// Total number of matched nodes over all polylines.
    pub nodes: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.matched + self.unmatched.len()
    }
}

/// Everything produced by [`boundary_conditions_along_polylines`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchOutcome {
    /// One point set per matched polyline, in input order.
    pub point_sets: Vec<NamedPointSet>,
    /// One record per matched node, with offsets continuing across polylines.
    pub records: Vec<BoundaryRecord>,
    pub report: BatchReport,
}

/// Resolve every polyline to its node sequence, in input order.
#[cfg(not(feature = "rayon"))]
pub fn resolve_polylines(
    searcher: &MeshNodeSearcher<'_>,
    polylines: &[Polyline],
) -> Vec<Vec<usize>> {
    polylines
        .iter()
        .map(|ply| searcher.nodes_for_polyline(ply))
        .collect()
}

/// Resolve every polyline to its node sequence, in input order.
///
/// Queries run on the rayon pool; the result equals the sequential one.
#[cfg(feature = "rayon")]
pub fn resolve_polylines(
    searcher: &MeshNodeSearcher<'_>,
    polylines: &[Polyline],
) -> Vec<Vec<usize>> {
    use rayon::prelude::*;
    polylines
        .par_iter()
        .map(|ply| searcher.nodes_for_polyline(ply))
        .collect()
}

/// Map each polyline to mesh nodes, synthesize `Polyline-<k>` point sets for
/// the non-empty results and emit boundary records with a shared offset.
pub fn boundary_conditions_along_polylines(
    searcher: &MeshNodeSearcher<'_>,
    polylines: &[Polyline],
) -> Result<BatchOutcome, MeshGeoError> {
    let mesh = searcher.mesh();
    let mut emitter = BoundaryRecordEmitter::new();
    let mut outcome = BatchOutcome::default();

    for (k, ids) in resolve_polylines(searcher, polylines).into_iter().enumerate() {
        if ids.is_empty() {
            log::debug!("polyline {k}: no mesh nodes within {}", searcher.search_length());
            outcome.report.unmatched.push(k);
            continue;
        }
        let set = NamedPointSet::from_mesh_nodes(mesh, &ids, polyline_geo_name(k))?;
        outcome.records.extend(emitter.emit(&set));
        outcome.report.matched += 1;
        outcome.report.nodes += ids.len();
        outcome.point_sets.push(set);
    }

    log::info!(
        "mesh `{}`: {} of {} polylines matched ({} nodes), {} unmatched",
        mesh.name(),
        outcome.report.matched,
        outcome.report.total(),
        outcome.report.nodes,
        outcome.report.unmatched.len()
    );
    Ok(outcome)
}
