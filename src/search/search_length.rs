//! Search length ("close enough") policies.
//!
//! A policy maps a mesh to one non-negative tolerance. The searcher asks for
//! it exactly once at construction and keeps the value for its lifetime.
//!
//! The adaptive default derives the tolerance from the distribution of element
//! edge lengths: with mean `mu` and sample standard deviation `s`,
//! `MeanMinusDeviation` evaluates `mu - c*s` where `c` starts at 2 and is
//! shrunk by 0.9 until the result is non-negative, then multiplies by `scale`
//! (default 0.5). On a uniform mesh this is half the edge length; on a
//! graded mesh it moves towards the short edges.

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshGeoError;
use crate::topology::mesh::Mesh;

/// Produces the tolerance used by a searcher for one mesh.
///
/// Implementations must be pure functions of the mesh.
pub trait SearchLengthStrategy {
    fn search_length(&self, mesh: &Mesh) -> Result<f64, MeshGeoError>;
}

fn check_length(value: f64) -> Result<f64, MeshGeoError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(MeshGeoError::InvalidSearchLength(value))
    }
}

/// A caller-supplied tolerance, independent of the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedSearchLength {
    value: f64,
}

impl FixedSearchLength {
    /// Rejects negative and non-finite values. `0.0` means exact matches only.
    pub fn try_new(value: f64) -> Result<Self, MeshGeoError> {
        Ok(Self {
            value: check_length(value)?,
        })
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Default for FixedSearchLength {
    fn default() -> Self {
        Self {
            value: f64::EPSILON,
        }
    }
}

impl SearchLengthStrategy for FixedSearchLength {
    fn search_length(&self, _mesh: &Mesh) -> Result<f64, MeshGeoError> {
        // values can bypass `try_new` through deserialization
        check_length(self.value)
    }
}

/// Edge-length statistic the adaptive policy starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStatistic {
    /// Shortest element edge.
    Minimum,
    /// Mean element edge length.
    Mean,
    /// Mean minus a shrinking multiple of the standard deviation.
    #[default]
    MeanMinusDeviation,
}

/// Tolerance derived from the element edge lengths of the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveSearchLength {
    pub statistic: EdgeStatistic,
    /// Factor applied to the statistic.
    pub scale: f64,
    /// Used when the mesh has no edge of positive length.
    pub fallback: f64,
}

impl Default for AdaptiveSearchLength {
    fn default() -> Self {
        Self {
            statistic: EdgeStatistic::MeanMinusDeviation,
            scale: 0.5,
            fallback: f64::EPSILON,
        }
    }
}

impl AdaptiveSearchLength {
    pub fn with_statistic(statistic: EdgeStatistic) -> Self {
        Self {
            statistic,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), MeshGeoError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(MeshGeoError::InvalidSearchLengthPolicy(format!(
                "scale must be finite and positive, got {}",
                self.scale
            )));
        }
        check_length(self.fallback).map(|_| ())
    }
}

impl SearchLengthStrategy for AdaptiveSearchLength {
    fn search_length(&self, mesh: &Mesh) -> Result<f64, MeshGeoError> {
        self.validate()?;
        let lengths: Vec<f64> = mesh
            .edge_lengths()
            .into_iter()
            .filter(|&l| l > 0.0)
            .collect();
        if lengths.is_empty() {
            log::warn!(
                "mesh `{}` has no edges of positive length; using fallback search length {}",
                mesh.name(),
                self.fallback
            );
            return Ok(self.fallback);
        }
        let base = match self.statistic {
            EdgeStatistic::Minimum => lengths.iter().copied().fold(f64::INFINITY, f64::min),
            EdgeStatistic::Mean => mean(&lengths),
            EdgeStatistic::MeanMinusDeviation => mean_minus_deviation(&lengths),
        };
        let value = check_length(base * self.scale)?;
        log::debug!(
            "adaptive search length for mesh `{}`: {value} ({:?} over {} edges)",
            mesh.name(),
            self.statistic,
            lengths.len()
        );
        Ok(value)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn mean_minus_deviation(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mu = mean(values);
    let s = if values.len() > 1 {
        let sum_sq: f64 = values.iter().map(|v| (v - mu) * (v - mu)).sum();
        (sum_sq / (n - 1.0)).sqrt()
    } else {
        0.0
    };
    let mut c = 2.0;
    while mu < c * s {
        c *= 0.9;
    }
    mu - c * s
}

/// Search length policy chosen when a searcher is built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchLength {
    Fixed(FixedSearchLength),
    Adaptive(AdaptiveSearchLength),
}

impl SearchLength {
    /// Fixed tolerance; fails on negative or non-finite input.
    pub fn fixed(value: f64) -> Result<Self, MeshGeoError> {
        FixedSearchLength::try_new(value).map(SearchLength::Fixed)
    }
}

impl Default for SearchLength {
    fn default() -> Self {
        SearchLength::Adaptive(AdaptiveSearchLength::default())
    }
}

impl SearchLengthStrategy for SearchLength {
    fn search_length(&self, mesh: &Mesh) -> Result<f64, MeshGeoError> {
        match self {
            SearchLength::Fixed(fixed) => fixed.search_length(mesh),
            SearchLength::Adaptive(adaptive) => adaptive.search_length(mesh),
        }
    }
}
