//! Root elements
//!
//! A [`RootElement`] owns one top-level specification, resolves where to
//! render it and remembers the node it produced.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use elemental_dom::Document;

use crate::factory::materialize;
use crate::{Config, Host, RenderError, Spec};

/// Where a root element is rendered
pub enum Location<H: Host = Document> {
    /// First document match wins
    Selector(String),
    /// Already-resolved container
    Node(H::Node),
    /// The materialized root node of another root element
    Root(RootElement<H>),
}

impl<H: Host> Location<H> {
    fn resolve(&self, host: &H) -> Result<H::Node, RenderError> {
        match self {
            Location::Selector(selector) => host
                .query_selector(selector)
                .ok_or_else(|| RenderError::UnresolvedSelector(selector.clone())),
            Location::Node(node) => Ok(*node),
            Location::Root(other) => other.root().ok_or(RenderError::UnrenderedRoot),
        }
    }
}

impl<H: Host> From<&str> for Location<H> {
    fn from(selector: &str) -> Self {
        Location::Selector(selector.to_string())
    }
}

impl<H: Host> From<String> for Location<H> {
    fn from(selector: String) -> Self {
        Location::Selector(selector)
    }
}

impl<H: Host> From<RootElement<H>> for Location<H> {
    fn from(root: RootElement<H>) -> Self {
        Location::Root(root)
    }
}

impl<H: Host> From<&RootElement<H>> for Location<H> {
    fn from(root: &RootElement<H>) -> Self {
        Location::Root(root.clone())
    }
}

impl<H: Host> Clone for Location<H> {
    fn clone(&self) -> Self {
        match self {
            Location::Selector(selector) => Location::Selector(selector.clone()),
            Location::Node(node) => Location::Node(*node),
            Location::Root(root) => Location::Root(root.clone()),
        }
    }
}

impl<H: Host> fmt::Debug for Location<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Location::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Location::Root(root) => f.debug_tuple("Root").field(&root.root()).finish(),
        }
    }
}

struct Inner<H: Host> {
    spec: Spec<H>,
    root: Cell<Option<H::Node>>,
}

/// Handle to one top-level specification.
///
/// Cloning is cheap and every clone sees the same rendered root.
pub struct RootElement<H: Host = Document> {
    inner: Rc<Inner<H>>,
}

impl<H: Host> RootElement<H> {
    pub fn new(spec: impl Into<Spec<H>>) -> Self {
        Self {
            inner: Rc::new(Inner {
                spec: spec.into(),
                root: Cell::new(None),
            }),
        }
    }

    pub fn spec(&self) -> &Spec<H> {
        &self.inner.spec
    }

    /// Materialized root node; `None` until a render succeeds
    pub fn root(&self) -> Option<H::Node> {
        self.inner.root.get()
    }

    pub fn is_rendered(&self) -> bool {
        self.root().is_some()
    }

    /// Whether two handles share the same root element
    pub fn ptr_eq(&self, other: &RootElement<H>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Render with the default [`Config`]
    pub fn render(&self, host: &mut H, location: Option<&Location<H>>) -> Result<H::Node, RenderError> {
        self.render_with(host, location, &Config::default())
    }

    /// Resolve the container and materialize the specification into it.
    ///
    /// The container comes from `location`, else the specification's own
    /// `parent`, else the host's default container. Nothing is created when
    /// the container cannot be resolved.
    pub fn render_with(
        &self,
        host: &mut H,
        location: Option<&Location<H>>,
        config: &Config,
    ) -> Result<H::Node, RenderError> {
        let location = location.or(match &self.inner.spec {
            Spec::Node(spec) => spec.parent.as_ref(),
            Spec::Leaf(_) => None,
        });

        let container = match location {
            Some(location) => location.resolve(host)?,
            None => host.default_container().ok_or(RenderError::NoDefaultContainer)?,
        };

        let node = materialize(host, &self.inner.spec, container, config)?;
        self.inner.root.set(Some(node));
        tracing::debug!("Rendered {:?} into {:?}", self.inner.spec.selector(), container);
        Ok(node)
    }
}

impl<H: Host> Clone for RootElement<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: Host> fmt::Debug for RootElement<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootElement")
            .field("selector", &self.inner.spec.selector())
            .field("root", &self.root())
            .finish()
    }
}
