//! Specification types
//!
//! A specification describes one node and its subtree. Bare selector strings
//! are leaves; structured specifications carry text, children and events.

use std::fmt;
use std::rc::Rc;

use elemental_dom::Document;

use crate::{Host, Location};

/// Reserved event name: lifecycle hook run once before listeners are bound
pub const CREATED: &str = "created";
/// Reserved event name: aggregate listeners for immediate children
pub const CHILDREN: &str = "children";
/// Notification dispatched once a node (or aggregated child) is materialized
pub const RENDERED: &str = "rendered";

/// `events.created` callback
pub type CreatedHook = Rc<dyn Fn()>;

/// One node description: a bare selector or a full specification
pub enum Spec<H: Host = Document> {
    /// Selector with optional trailing text; no children, no events
    Leaf(String),
    Node(Specification<H>),
}

impl<H: Host> Spec<H> {
    /// Selector portion
    pub fn selector(&self) -> &str {
        match self {
            Spec::Leaf(selector) => selector,
            Spec::Node(spec) => &spec.tag,
        }
    }
}

impl<H: Host> From<&str> for Spec<H> {
    fn from(selector: &str) -> Self {
        Spec::Leaf(selector.to_string())
    }
}

impl<H: Host> From<String> for Spec<H> {
    fn from(selector: String) -> Self {
        Spec::Leaf(selector)
    }
}

impl<H: Host> From<Specification<H>> for Spec<H> {
    fn from(spec: Specification<H>) -> Self {
        Spec::Node(spec)
    }
}

impl<H: Host> fmt::Debug for Spec<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spec::Leaf(selector) => f.debug_tuple("Leaf").field(selector).finish(),
            Spec::Node(spec) => f.debug_tuple("Node").field(spec).finish(),
        }
    }
}

/// Structured node description
///
/// ```rust,ignore
/// let list = Specification::new("ul.menu")
///     .child("li.item One")
///     .child(Specification::new("li.item").text("Two").on("click", on_two))
///     .on_children("mouseover", highlight);
/// ```
pub struct Specification<H: Host = Document> {
    /// Selector (`tag#id.class[attr=value]:prop trailing text`)
    pub tag: String,
    /// Used when the selector carries no trailing text
    pub text: Option<String>,
    pub children: Vec<Spec<H>>,
    /// `None` when no events were declared at all
    pub events: Option<EventMap<H>>,
    /// Fallback render location for a root specification
    pub parent: Option<Location<H>>,
}

impl<H: Host> Specification<H> {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            children: Vec::new(),
            events: None,
            parent: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append one child
    pub fn child(mut self, child: impl Into<Spec<H>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children, in order
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Spec<H>>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Replace the whole event map
    pub fn events(mut self, events: EventMap<H>) -> Self {
        self.events = Some(events);
        self
    }

    fn events_mut(&mut self) -> &mut EventMap<H> {
        self.events.get_or_insert_with(EventMap::new)
    }

    /// Lifecycle hook run once, before any listener is bound to this node
    pub fn created(mut self, hook: impl Fn() + 'static) -> Self {
        self.events_mut().set_created(hook);
        self
    }

    /// Listener on this node
    pub fn on(mut self, event: &str, listener: impl Into<H::Listener>) -> Self {
        self.events_mut().insert(event, listener.into());
        self
    }

    /// Listener on every immediate child materialized from `children`
    pub fn on_children(mut self, event: &str, listener: impl Into<H::Listener>) -> Self {
        self.events_mut().insert_child(event, listener.into());
        self
    }

    /// Location used by `render` when none is passed explicitly
    pub fn parent(mut self, location: impl Into<Location<H>>) -> Self {
        self.parent = Some(location.into());
        self
    }
}

impl<H: Host> fmt::Debug for Specification<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("tag", &self.tag)
            .field("text", &self.text)
            .field("children", &self.children)
            .field("events", &self.events)
            .field("parent", &self.parent)
            .finish()
    }
}

/// Event declarations for one specification.
///
/// The reserved names live in their own slots, so `created` is never bound
/// as a listener and `children` never reaches the node itself. Names keep
/// first-insertion order; inserting an existing name replaces its handler.
pub struct EventMap<H: Host = Document> {
    created: Option<CreatedHook>,
    own: Vec<(String, H::Listener)>,
    /// `None` when no aggregate block was declared
    children: Option<Vec<(String, H::Listener)>>,
}

impl<H: Host> EventMap<H> {
    pub fn new() -> Self {
        Self {
            created: None,
            own: Vec::new(),
            children: None,
        }
    }

    pub fn set_created(&mut self, hook: impl Fn() + 'static) {
        self.created = Some(Rc::new(hook));
    }

    /// Add a listener for this node. Reserved names are ignored.
    pub fn insert(&mut self, event: &str, listener: H::Listener) {
        if is_reserved(event) {
            tracing::warn!("Ignoring listener for reserved event name {:?}", event);
            return;
        }
        upsert(&mut self.own, event, listener);
    }

    /// Add an aggregate listener for immediate children
    pub fn insert_child(&mut self, event: &str, listener: H::Listener) {
        upsert(self.children.get_or_insert_with(Vec::new), event, listener);
    }

    /// Declare the aggregate block even with no listeners, so children still
    /// receive their `rendered` notification
    pub fn declare_children(&mut self) {
        self.children.get_or_insert_with(Vec::new);
    }

    /// Builder form of [`EventMap::set_created`]
    pub fn with_created(mut self, hook: impl Fn() + 'static) -> Self {
        self.set_created(hook);
        self
    }

    /// Builder form of [`EventMap::insert`]
    pub fn with(mut self, event: &str, listener: impl Into<H::Listener>) -> Self {
        self.insert(event, listener.into());
        self
    }

    /// Builder form of [`EventMap::insert_child`]
    pub fn with_child(mut self, event: &str, listener: impl Into<H::Listener>) -> Self {
        self.insert_child(event, listener.into());
        self
    }

    pub fn created(&self) -> Option<&CreatedHook> {
        self.created.as_ref()
    }

    pub fn own(&self) -> &[(String, H::Listener)] {
        &self.own
    }

    pub fn children(&self) -> Option<&[(String, H::Listener)]> {
        self.children.as_deref()
    }
}

impl<H: Host> Default for EventMap<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> fmt::Debug for EventMap<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |entries: &[(String, H::Listener)]| -> Vec<String> {
            entries.iter().map(|(name, _)| name.clone()).collect()
        };
        f.debug_struct("EventMap")
            .field("created", &self.created.is_some())
            .field("own", &names(self.own.as_slice()))
            .field("children", &self.children.as_deref().map(names))
            .finish()
    }
}

fn is_reserved(event: &str) -> bool {
    event == CREATED || event == CHILDREN
}

fn upsert<L>(entries: &mut Vec<(String, L)>, event: &str, listener: L) {
    match entries.iter_mut().find(|(name, _)| name == event) {
        Some(entry) => entry.1 = listener,
        None => entries.push((event.to_string(), listener)),
    }
}
