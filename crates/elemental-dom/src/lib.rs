//! Elemental DOM - Host document
//!
//! Arena-backed document tree that the Elemental builder materializes into.
//! Provides element data, class lists, attributes, synthetic events, simple
//! selector lookup and a one-shot "content loaded" ready signal.

mod classlist;
mod document;
mod error;
mod events;
mod node;
mod query;
mod tree;

pub use classlist::DOMTokenList;
pub use document::{Document, ReadyState};
pub use error::{DomError, DomResult};
pub use events::{Event, Listener, ListenerStore, CONTENT_LOADED};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use query::{Combinator, CompoundSelector, SelectorChain};
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this ID refers to a node slot
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
