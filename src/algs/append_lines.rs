//! Append line elements along polylines.
//!
//! For every polyline with at least two matched nodes, one
//! [`CellType::Segment`] element is added per consecutive pair of matched
//! nodes. The derived mesh reuses the original node array unchanged; only
//! elements are added.
//!
//! Element ids continue after the highest existing element id, in polyline
//! input order and then in traversal order along each polyline. Polyline `k`
//! (0-based) gets material id `max_material + 1 + k`, where an element-less
//! mesh counts as `max_material = -1`.

use crate::geometry::polyline::Polyline;
use crate::mesh_error::MeshGeoError;
use crate::search::node_searcher::MeshNodeSearcher;
use crate::topology::cell_type::CellType;
use crate::topology::mesh::{Element, Mesh};

/// Per-call summary of an append operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppendReport {
    /// Matched node count per polyline, in input order.
    pub matched: Vec<usize>,
    /// Indices of polylines that contributed no element.
    pub skipped: Vec<usize>,
    /// Number of line elements added.
    pub elements_added: usize,
}

/// Resolve each polyline with `searcher` and append line elements along the
/// matches to a copy of the searcher's mesh.
pub fn append_lines_along_polylines(
    searcher: &MeshNodeSearcher<'_>,
    polylines: &[Polyline],
    name: impl Into<String>,
) -> Result<(Mesh, AppendReport), MeshGeoError> {
    let sequences: Vec<Vec<usize>> = polylines
        .iter()
        .map(|ply| searcher.nodes_for_polyline(ply))
        .collect();
    append_line_elements(searcher.mesh(), &sequences, name)
}

/// Append line elements along already resolved node sequences.
///
/// Sequences with fewer than two nodes are skipped without failing the
/// batch. Ids outside the mesh are an error for the whole call.
pub fn append_line_elements(
    mesh: &Mesh,
    sequences: &[Vec<usize>],
    name: impl Into<String>,
) -> Result<(Mesh, AppendReport), MeshGeoError> {
    let node_count = mesh.node_count();
    if let Some(&node) = sequences.iter().flatten().find(|&&n| n >= node_count) {
        return Err(MeshGeoError::NodeOutOfRange { node, node_count });
    }

    let mut next_id = mesh.max_element_id().map_or(Some(0), |id| id.checked_add(1));
    let material_base = mesh.max_material_id().map_or(0, |max| i64::from(max) + 1);
    let mut report = AppendReport::default();
    let mut lines = Vec::new();

    for (k, ids) in sequences.iter().enumerate() {
        report.matched.push(ids.len());
        if ids.len() < 2 {
            log::warn!("polyline {k}: {} matched nodes, no line elements added", ids.len());
            report.skipped.push(k);
            continue;
        }
        let material = i64::try_from(k)
            .ok()
            .and_then(|k| i32::try_from(material_base + k).ok())
            .ok_or_else(|| {
                MeshGeoError::InvalidGeometry(format!(
                    "material id {material_base} + {k} for polyline {k} does not fit in i32"
                ))
            })?;
        for pair in ids.windows(2) {
            if pair[0] == pair[1] {
                continue;
            }
            let id = next_id.ok_or_else(|| {
                MeshGeoError::InvalidGeometry("element ids exhausted past usize::MAX".into())
            })?;
            lines.push(
                Element::new(id, CellType::Segment, vec![pair[0], pair[1]])
                    .with_material(material),
            );
            next_id = id.checked_add(1);
        }
    }

    report.elements_added = lines.len();
    let derived = mesh.with_appended_elements(name, lines)?;
    log::info!(
        "appended {} line elements from {} of {} polylines to mesh `{}`",
        report.elements_added,
        sequences.len() - report.skipped.len(),
        sequences.len(),
        mesh.name()
    );
    Ok((derived, report))
}
