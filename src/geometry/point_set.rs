//! Named point sets synthesized from mesh node sequences.
//!
//! The `k`-th point of a set with base name `G` is named `G-PNT-k`. Downstream
//! boundary-condition records refer to points by that name, so the format is
//! fixed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::geometry::polyline::GeoPoint;
use crate::mesh_error::MeshGeoError;
use crate::topology::mesh::Mesh;

/// Infix between base name and sequence index.
pub const POINT_NAME_INFIX: &str = "-PNT-";

/// Name of the `k`-th point of the set called `geo_name`.
pub fn point_name(geo_name: &str, k: usize) -> String {
    format!("{geo_name}{POINT_NAME_INFIX}{k}")
}

/// Points copied out of a mesh, in sequence order, addressable by name.
///
/// Deserialized sets must pass [`DebugInvariants::validate_invariants`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NamedPointSetRepr")]
pub struct NamedPointSet {
    name: String,
    points: Vec<GeoPoint>,
    names: BTreeMap<String, usize>,
}

#[derive(Deserialize)]
struct NamedPointSetRepr {
    name: String,
    points: Vec<GeoPoint>,
    names: BTreeMap<String, usize>,
}

impl TryFrom<NamedPointSetRepr> for NamedPointSet {
    type Error = MeshGeoError;

    fn try_from(repr: NamedPointSetRepr) -> Result<Self, Self::Error> {
        let set = Self {
            name: repr.name,
            points: repr.points,
            names: repr.names,
        };
        set.validate_invariants()?;
        Ok(set)
    }
}

impl NamedPointSet {
    /// Copy the coordinates of `node_ids` out of `mesh`.
    ///
    /// Point `k` gets id `k` and name `"<geo_name>-PNT-<k>"`. The set owns
    /// its coordinates and stays valid after the mesh is dropped.
    pub fn from_mesh_nodes(
        mesh: &Mesh,
        node_ids: &[usize],
        geo_name: impl Into<String>,
    ) -> Result<Self, MeshGeoError> {
        let name = geo_name.into();
        let mut points = Vec::with_capacity(node_ids.len());
        let mut names = BTreeMap::new();
        for (k, &node) in node_ids.iter().enumerate() {
            let coords = mesh.node(node).ok_or(MeshGeoError::NodeOutOfRange {
                node,
                node_count: mesh.node_count(),
            })?;
            points.push(GeoPoint::new(k, coords));
            names.insert(point_name(&name, k), k);
        }
        let set = Self {
            name,
            points,
            names,
        };
        set.debug_assert_invariants();
        Ok(set)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn point(&self, k: usize) -> Option<&GeoPoint> {
        self.points.get(k)
    }

    /// Name of point `k`, if it exists.
    pub fn point_name(&self, k: usize) -> Option<String> {
        (k < self.points.len()).then(|| point_name(&self.name, k))
    }

    /// Sequence index of the point called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// `(name, point)` pairs in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &GeoPoint)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(k, p)| (point_name(&self.name, k), p))
    }
}

impl DebugInvariants for NamedPointSet {
    const KIND: &'static str = "NamedPointSet";

    fn validate_invariants(&self) -> Result<(), MeshGeoError> {
        if self.names.len() != self.points.len() {
            return Err(MeshGeoError::InvalidGeometry(format!(
                "point set `{}`: {} names for {} points",
                self.name,
                self.names.len(),
                self.points.len()
            )));
        }
        for (k, p) in self.points.iter().enumerate() {
            let expected = point_name(&self.name, k);
            if p.id != k || self.names.get(&expected) != Some(&k) {
                return Err(MeshGeoError::InvalidGeometry(format!(
                    "point set `{}`: point {k} is not registered as `{expected}`",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh() -> Mesh {
        Mesh::try_new(
            "m",
            vec![[0.0, 0.0, 0.0], [1.5, 0.25, -2.0], [3.0, 1.0, 0.125]],
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn names_follow_sequence_not_node_ids() {
        let set = NamedPointSet::from_mesh_nodes(&mesh(), &[2, 0, 1], "Polyline-3").unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.index_of("Polyline-3-PNT-0"), Some(0));
        assert_eq!(set.point(0).unwrap().coords, [3.0, 1.0, 0.125]);
        assert_eq!(set.point_name(2).as_deref(), Some("Polyline-3-PNT-2"));
        assert_eq!(set.point_name(3), None);
        let names: Vec<_> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Polyline-3-PNT-0", "Polyline-3-PNT-1", "Polyline-3-PNT-2"]);
    }

    #[test]
    fn out_of_range_node_is_an_error() {
        let err = NamedPointSet::from_mesh_nodes(&mesh(), &[0, 9], "g").unwrap_err();
        assert_eq!(
            err,
            MeshGeoError::NodeOutOfRange {
                node: 9,
                node_count: 3
            }
        );
    }

    #[test]
    fn survives_mesh_drop() {
        let set = {
            let m = mesh();
            NamedPointSet::from_mesh_nodes(&m, &[1], "g").unwrap()
        };
        assert_eq!(set.points()[0].coords, [1.5, 0.25, -2.0]);
    }

    #[test]
    fn empty_sequence_gives_empty_set() {
        let set = NamedPointSet::from_mesh_nodes(&mesh(), &[], "g").unwrap();
        assert!(set.is_empty());
        assert!(set.validate_invariants().is_ok());
    }

    #[test]
    fn deserialization_checks_names_against_points() {
        let set = NamedPointSet::from_mesh_nodes(&mesh(), &[1, 2], "g").unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(serde_json::from_str::<NamedPointSet>(&json).unwrap(), set);

        let renamed = json.replace("g-PNT-1", "g-PNT-7");
        let err = serde_json::from_str::<NamedPointSet>(&renamed).unwrap_err();
        assert!(err.to_string().contains("not registered as `g-PNT-1`"));
    }
}
