//! Mesh node search: spatial index, search length policies, and the searcher.

pub mod node_index;
pub mod node_searcher;
pub mod search_length;

pub use node_index::{NodeHit, NodeIndex};
pub use node_searcher::{MeshNodeSearcher, SearcherOptions, SurfaceMembership};
pub use search_length::{
    AdaptiveSearchLength, EdgeStatistic, FixedSearchLength, SearchLength, SearchLengthStrategy,
};
