//! Host environment seam
//!
//! The builder only ever creates nodes, so a host needs the handful of
//! capabilities below. `elemental_dom::Document` is the in-tree host.

use std::fmt;

use elemental_dom::{Document, DomError, Listener, NodeId};

/// Capabilities the builder consumes from the host document
pub trait Host: Sized + 'static {
    /// Live node handle
    type Node: Copy + Eq + fmt::Debug;
    /// Event handler; the host binds its receiver to the node it is registered on
    type Listener: Clone;
    type Error: std::error::Error + 'static;

    /// Create a detached element with the given tag name
    fn create_element(&mut self, tag: &str) -> Self::Node;

    fn set_id(&mut self, node: Self::Node, id: &str) -> Result<(), Self::Error>;

    fn add_class(&mut self, node: Self::Node, class: &str) -> Result<(), Self::Error>;

    fn set_attribute(&mut self, node: Self::Node, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Append a text node as the last child of `parent`
    fn append_text(&mut self, parent: Self::Node, text: &str) -> Result<(), Self::Error>;

    /// Append `child` as the last child of `parent`; the child is live afterwards
    fn append_child(&mut self, parent: Self::Node, child: Self::Node) -> Result<(), Self::Error>;

    /// Current element children, in order
    fn element_children(&self, node: Self::Node) -> Vec<Self::Node>;

    fn add_event_listener(
        &mut self,
        node: Self::Node,
        event: &str,
        listener: Self::Listener,
    ) -> Result<(), Self::Error>;

    /// Dispatch a plain synthetic event named `event` on `node`
    fn dispatch_event(&mut self, node: Self::Node, event: &str) -> Result<(), Self::Error>;

    /// First node in the document matching `selector`
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// Container used when no location is given
    fn default_container(&self) -> Option<Self::Node>;

    /// Register a one-shot callback for the "content loaded" signal.
    /// Hosts that are already loaded run it immediately.
    fn on_content_loaded(&mut self, callback: Box<dyn FnOnce(&mut Self)>);
}

impl Host for Document {
    type Node = NodeId;
    type Listener = Listener;
    type Error = DomError;

    fn create_element(&mut self, tag: &str) -> NodeId {
        Document::create_element(self, tag)
    }

    fn set_id(&mut self, node: NodeId, id: &str) -> Result<(), DomError> {
        Document::set_id(self, node, id)
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        Document::add_class(self, node, class)
    }

    fn set_attribute(&mut self, node: NodeId, key: &str, value: &str) -> Result<(), DomError> {
        Document::set_attribute(self, node, key, value)
    }

    fn append_text(&mut self, parent: NodeId, text: &str) -> Result<(), DomError> {
        Document::append_text(self, parent, text).map(drop)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        Document::append_child(self, parent, child).map(drop)
    }

    fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        Document::element_children(self, node)
    }

    fn add_event_listener(&mut self, node: NodeId, event: &str, listener: Listener) -> Result<(), DomError> {
        Document::add_event_listener(self, node, event, listener)
    }

    fn dispatch_event(&mut self, node: NodeId, event: &str) -> Result<(), DomError> {
        Document::dispatch(self, node, event).map(drop)
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        Document::query_selector(self, selector)
    }

    fn default_container(&self) -> Option<NodeId> {
        self.body()
    }

    fn on_content_loaded(&mut self, callback: Box<dyn FnOnce(&mut Self)>) {
        Document::on_content_loaded(self, callback)
    }
}
