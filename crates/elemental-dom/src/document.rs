//! Document - High-level document API

use std::fmt;

use crate::query::SelectorChain;
use crate::{DomError, DomResult, DomTree, ElementData, Event, Listener, ListenerStore, NodeId, CONTENT_LOADED};

/// Callback run once the document finishes loading
type LoadedCallback = Box<dyn FnOnce(&mut Document)>;

/// Document loading state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Complete,
}

/// HTML Document
pub struct Document {
    tree: DomTree,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    listeners: ListenerStore,
    ready_state: ReadyState,
    on_loaded: Vec<LoadedCallback>,
}

impl Document {
    /// Create a loading document with an `<html><head/><body/></html>` skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh nodes under a fresh root cannot violate the hierarchy rules.
        let _ = tree.append_child(NodeId::ROOT, html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
            listeners: ListenerStore::new(),
            ready_state: ReadyState::Loading,
            on_loaded: Vec::new(),
        }
    }

    /// Create an empty loading document (document node only, no body)
    pub fn empty() -> Self {
        Self {
            tree: DomTree::new(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            listeners: ListenerStore::new(),
            ready_state: ReadyState::Loading,
            on_loaded: Vec::new(),
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// `<html>` element
    pub fn document_element(&self) -> Option<NodeId> {
        Some(self.html_element).filter(|id| id.is_valid())
    }

    /// `<head>` element
    pub fn head(&self) -> Option<NodeId> {
        Some(self.head_element).filter(|id| id.is_valid())
    }

    /// `<body>` element
    pub fn body(&self) -> Option<NodeId> {
        Some(self.body_element).filter(|id| id.is_valid())
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // ------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, child)
    }

    /// Create a text node and append it to `parent`
    pub fn append_text(&mut self, parent: NodeId, content: &str) -> DomResult<NodeId> {
        let text = self.tree.create_text(content);
        self.tree.append_child(parent, text)
    }

    // ------------------------------------------------------------------
    // Element data
    // ------------------------------------------------------------------

    pub fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.tree.node(id)?.as_element().ok_or(DomError::InvalidNodeType(id))
    }

    pub fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.tree
            .get_mut(id)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(id))
    }

    /// Tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(|el| el.tag.as_str())
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id).ok()?.get_attr(name)
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<bool> {
        Ok(self.element_mut(id)?.remove_attr(name))
    }

    /// `el.id = value`
    pub fn set_id(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        self.element_mut(id)?.id = value.to_string();
        Ok(())
    }

    /// `el.classList.add(class)`
    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        self.element_mut(id)?.classes.add(class);
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_ok_and(|el| el.classes.contains(class))
    }

    /// Concatenated descendant text
    pub fn text_content(&self, id: NodeId) -> String {
        self.tree.text_content(id)
    }

    /// Element children of a node
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree.element_children(id)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Get element by ID (document order, first wins)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.tree
            .descendants(self.root())
            .into_iter()
            .find(|&n| self.element(n).is_ok_and(|el| el.id == id))
    }

    /// First element matching `selector` in document order
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let groups = SelectorChain::parse_list(selector)?;
        self.tree
            .descendants(self.root())
            .into_iter()
            .find(|&n| groups.iter().any(|g| g.matches(&self.tree, n)))
    }

    /// All elements matching `selector` in document order
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(groups) = SelectorChain::parse_list(selector) else {
            tracing::debug!("Unsupported selector: {}", selector);
            return Vec::new();
        };
        self.tree
            .descendants(self.root())
            .into_iter()
            .filter(|&n| groups.iter().any(|g| g.matches(&self.tree, n)))
            .collect()
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register a listener; `event.this()` will be `node` when it runs
    pub fn add_event_listener(&mut self, node: NodeId, event: &str, listener: Listener) -> DomResult<()> {
        self.tree.node(node)?;
        self.listeners.add(node, event, listener);
        Ok(())
    }

    pub fn remove_event_listener(&mut self, node: NodeId, event: &str, listener: &Listener) -> bool {
        self.listeners.remove(node, event, listener)
    }

    pub fn listeners(&self) -> &ListenerStore {
        &self.listeners
    }

    /// Dispatch `event` on `target`: target listeners first, then ancestors
    /// if the event bubbles. Returns false if the default was prevented.
    pub fn dispatch_event(&mut self, target: NodeId, mut event: Event) -> DomResult<bool> {
        self.tree.node(target)?;
        event.target = target;

        let mut path = vec![target];
        if event.bubbles {
            path.extend(self.tree.ancestors(target));
        }

        for current in path {
            event.current_target = current;
            for listener in self.listeners.get(current, &event.event_type) {
                listener.call(self, &mut event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        Ok(!event.is_default_prevented())
    }

    /// Dispatch a plain non-bubbling event by name
    pub fn dispatch(&mut self, target: NodeId, event_type: &str) -> DomResult<bool> {
        self.dispatch_event(target, Event::new(event_type))
    }

    // ------------------------------------------------------------------
    // Ready state
    // ------------------------------------------------------------------

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Run `callback` when loading finishes, or right away if it already has
    pub fn on_content_loaded(&mut self, callback: impl FnOnce(&mut Document) + 'static) {
        match self.ready_state {
            ReadyState::Loading => self.on_loaded.push(Box::new(callback)),
            ReadyState::Complete => callback(self),
        }
    }

    /// Mark the document loaded: run pending callbacks in registration order,
    /// then fire `DOMContentLoaded` on the document node. Runs at most once.
    pub fn finish_loading(&mut self) {
        if self.ready_state == ReadyState::Complete {
            return;
        }
        self.ready_state = ReadyState::Complete;

        let callbacks = std::mem::take(&mut self.on_loaded);
        tracing::debug!("Document loaded, running {} callbacks", callbacks.len());
        for callback in callbacks {
            callback(self);
        }

        let root = self.root();
        let _ = self.dispatch_event(root, Event::new(CONTENT_LOADED));
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Serialize a node and its subtree as HTML
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.tree.get(id) else { return };
        match &node.data {
            crate::NodeData::Document => {
                for (child, _) in self.tree.children(id) {
                    self.write_html(child, out);
                }
            }
            crate::NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                if !el.id.is_empty() {
                    push_attr(out, "id", &el.id);
                }
                if !el.classes.is_empty() {
                    push_attr(out, "class", &el.classes.value());
                }
                for attr in &el.attrs {
                    push_attr(out, &attr.name, &attr.value);
                }
                out.push('>');
                for (child, _) in self.tree.children(id) {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
            crate::NodeData::Text(text) => out.push_str(&escape(text, false)),
            crate::NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value, true));
    out.push('"');
}

fn escape(s: &str, attr: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.tree.len())
            .field("ready_state", &self.ready_state)
            .field("pending_callbacks", &self.on_loaded.len())
            .finish()
    }
}
