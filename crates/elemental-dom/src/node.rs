//! DOM Node
//!
//! Nodes link to their relatives by `NodeId` instead of pointers, so the whole
//! tree lives in one arena and can be mutated through `&mut DomTree`.

use crate::{DOMTokenList, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(content.to_string()))
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Self::with_data(NodeData::Comment(content.to_string()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Whether this node may hold children
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self.data, NodeData::Element(_) | NodeData::Document)
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// `id` and `class` are kept out of `attrs` and reflected through
/// [`ElementData::set_attr`] / [`ElementData::get_attr`].
#[derive(Debug, Default)]
pub struct ElementData {
    /// Lower-case tag name
    pub tag: String,
    /// Element id (empty if unset)
    pub id: String,
    /// Class list
    pub classes: DOMTokenList,
    /// Other attributes in insertion order
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<String> {
        match name {
            "id" if !self.id.is_empty() => Some(self.id.clone()),
            "class" if !self.classes.is_empty() => Some(self.classes.value()),
            "id" | "class" => None,
            _ => self
                .attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.clone()),
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Set an attribute, overwriting any previous value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = value.to_string(),
            "class" => self.classes = DOMTokenList::parse(value),
            _ => {
                if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
                    attr.value = value.to_string();
                } else {
                    self.attrs.push(Attribute {
                        name: name.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }
    }

    /// Remove an attribute, returns true if it was present
    pub fn remove_attr(&mut self, name: &str) -> bool {
        match name {
            "id" => !std::mem::take(&mut self.id).is_empty(),
            "class" => !std::mem::take(&mut self.classes).is_empty(),
            _ => {
                let before = self.attrs.len();
                self.attrs.retain(|a| a.name != name);
                self.attrs.len() != before
            }
        }
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}
