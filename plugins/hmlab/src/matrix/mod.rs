//! Harris Matrix engine.
//!
//! Builds a stratigraphic DAG from locus relations, removes
//! contradictions and cycles, reduces transitive relations, and computes
//! drawing-order positions for matrix edges. Drawing itself happens in
//! the browser; this module only produces analysis and ordering data.

pub mod analysis;
pub mod graph;
pub mod layout;
pub mod loader;
pub mod node;
pub mod reduction;

pub use analysis::{
    AnalysisReport, ContemporaryScan, DroppedRelation, HmCycle, RelationError, analyze_relations,
    find_contemporary_cycles,
};
pub use graph::NodeGraph;
pub use node::HmNode;
pub use reduction::{remove_transitive_relations, top_nodes, transitive_reduction};

use thiserror::Error;

/// Errors the matrix pipeline can surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("the stratigraphic relations are cyclic; the Harris Matrix cannot be rendered")]
    Cyclic,
    #[error("locus {0} is referenced by a relation but has no node")]
    NodeNotFound(String),
    #[error(
        "analyzing stratigraphy for cycles caused by contemporary relations took longer than {0} seconds; breaking up"
    )]
    Deadline(u64),
}
