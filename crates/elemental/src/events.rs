//! Event binding
//!
//! Applies a specification's [`EventMap`] to materialized nodes.

use crate::spec::RENDERED;
use crate::{BuildError, EventMap, Host};

/// Bind a node's own events.
///
/// Runs the `created` hook first, then registers every own listener in
/// declaration order, then dispatches `rendered` on the node.
pub fn add_events<H: Host>(host: &mut H, events: Option<&EventMap<H>>, node: H::Node) -> Result<(), BuildError> {
    let Some(events) = events else {
        return Ok(());
    };

    if let Some(created) = events.created() {
        created();
    }

    for (name, listener) in events.own() {
        host.add_event_listener(node, name, listener.clone())
            .map_err(BuildError::host)?;
    }

    host.dispatch_event(node, RENDERED).map_err(BuildError::host)
}

/// Bind aggregate `children` listeners to the node's current element
/// children, then dispatch `rendered` on each of them.
///
/// Children appended to `node` after this call are not covered.
pub fn add_child_events<H: Host>(
    host: &mut H,
    events: Option<&EventMap<H>>,
    node: H::Node,
) -> Result<(), BuildError> {
    let Some(aggregate) = events.and_then(EventMap::children) else {
        return Ok(());
    };

    let snapshot = host.element_children(node);
    tracing::trace!(
        "Binding {} aggregate listeners to {} children of {:?}",
        aggregate.len(),
        snapshot.len(),
        node
    );

    for (name, listener) in aggregate {
        for &child in &snapshot {
            host.add_event_listener(child, name, listener.clone())
                .map_err(BuildError::host)?;
        }
    }

    for &child in &snapshot {
        host.dispatch_event(child, RENDERED).map_err(BuildError::host)?;
    }
    Ok(())
}
