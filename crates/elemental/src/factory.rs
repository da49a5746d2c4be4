//! Node factory
//!
//! Recursive materialization of a [`Spec`] into live host nodes.

use crate::events::{add_child_events, add_events};
use crate::selector::{self, ParsedSelector};
use crate::{BuildError, Config, Host, Spec};

/// Materialize `spec` (and its subtree) as the last child of `parent`.
pub fn materialize<H: Host>(
    host: &mut H,
    spec: &Spec<H>,
    parent: H::Node,
    config: &Config,
) -> Result<H::Node, BuildError> {
    NodeFactory { host, config }.build(spec, parent, 0)
}

struct NodeFactory<'a, H: Host> {
    host: &'a mut H,
    config: &'a Config,
}

impl<H: Host> NodeFactory<'_, H> {
    fn build(&mut self, spec: &Spec<H>, parent: H::Node, depth: usize) -> Result<H::Node, BuildError> {
        if depth > self.config.max_depth {
            return Err(BuildError::CyclicSpecification {
                limit: self.config.max_depth,
            });
        }

        let parsed = selector::parse(spec.selector());
        let node = self.create(&parsed)?;

        // Live before text, events or children are attached.
        self.host.append_child(parent, node).map_err(BuildError::host)?;
        tracing::trace!("Materialized <{}> {:?} under {:?}", parsed.tag, node, parent);

        let spec = match spec {
            Spec::Leaf(_) => {
                self.append_text(node, &parsed.text)?;
                return Ok(node);
            }
            Spec::Node(spec) => spec,
        };

        let text = if !parsed.text.is_empty() {
            parsed.text.as_str()
        } else {
            spec.text.as_deref().unwrap_or_default()
        };
        self.append_text(node, text)?;

        let events = spec.events.as_ref();
        add_events(self.host, events, node)?;

        for child in &spec.children {
            self.build(child, node, depth + 1)?;
        }

        add_child_events(self.host, events, node)?;
        Ok(node)
    }

    fn create(&mut self, parsed: &ParsedSelector) -> Result<H::Node, BuildError> {
        let host = &mut *self.host;
        let node = host.create_element(&parsed.tag);

        if !parsed.id.is_empty() {
            host.set_id(node, &parsed.id).map_err(BuildError::host)?;
        }
        for class in &parsed.classes {
            host.add_class(node, class).map_err(BuildError::host)?;
        }
        for attr in &parsed.attributes {
            host.set_attribute(node, &attr.key, &attr.value)
                .map_err(BuildError::host)?;
        }
        for property in &parsed.properties {
            host.set_attribute(node, property, property)
                .map_err(BuildError::host)?;
        }
        Ok(node)
    }

    fn append_text(&mut self, node: H::Node, text: &str) -> Result<(), BuildError> {
        if text.is_empty() {
            return Ok(());
        }
        self.host.append_text(node, text).map_err(BuildError::host)
    }
}
