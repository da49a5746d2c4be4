//! DOM operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found in the arena
    #[error("node {0} not found")]
    NotFound(NodeId),
    /// Inserting a node into its own subtree
    #[error("hierarchy request error: {child} cannot be appended to {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    /// Operation not valid for this kind of node
    #[error("invalid node type for {0}")]
    InvalidNodeType(NodeId),
}
