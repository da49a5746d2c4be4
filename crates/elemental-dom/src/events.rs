//! DOM Events
//!
//! Named synthetic events, shared listener callbacks and the per-node
//! listener store.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{Document, NodeId};

/// Name of the event fired on the document node once loading finishes
pub const CONTENT_LOADED: &str = "DOMContentLoaded";

/// Synthetic DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    /// Node the event was dispatched on
    pub target: NodeId,
    /// Node whose listener is currently running (the listener's receiver)
    pub current_target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Non-bubbling, non-cancelable event, like `new Event(name)`
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            target: NodeId::NONE,
            current_target: NodeId::NONE,
            bubbles: false,
            cancelable: false,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Bubbling, cancelable event (user-interaction style)
    pub fn bubbling(event_type: &str) -> Self {
        Self {
            bubbles: true,
            cancelable: true,
            ..Self::new(event_type)
        }
    }

    /// The receiver of the running listener
    #[inline]
    pub fn this(&self) -> NodeId {
        self.current_target
    }

    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Shared event callback.
///
/// Receives the document mutably so handlers can inspect or change the tree;
/// `event.this()` is the node the listener was registered on.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&mut Document, &mut Event)>);

impl Listener {
    pub fn new(f: impl Fn(&mut Document, &mut Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    #[inline]
    pub fn call(&self, doc: &mut Document, event: &mut Event) {
        (self.0)(doc, event)
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &Listener) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<F> From<F> for Listener
where
    F: Fn(&mut Document, &mut Event) + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Listener(..)")
    }
}

/// Listeners by node and event name, in registration order
#[derive(Debug, Default, Clone)]
pub struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: NodeId, event: &str, listener: Listener) {
        self.map
            .entry(node)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    /// Remove one registration of `listener`, returns true if found
    pub fn remove(&mut self, node: NodeId, event: &str, listener: &Listener) -> bool {
        let Some(events) = self.map.get_mut(&node) else {
            return false;
        };
        let Some(listeners) = events.get_mut(event) else {
            return false;
        };
        let Some(pos) = listeners.iter().position(|l| l.ptr_eq(listener)) else {
            return false;
        };
        listeners.remove(pos);
        if listeners.is_empty() {
            events.remove(event);
        }
        if events.is_empty() {
            self.map.remove(&node);
        }
        true
    }

    /// Snapshot of listeners for a node/event pair
    pub fn get(&self, node: NodeId, event: &str) -> Vec<Listener> {
        self.map
            .get(&node)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of listeners registered for a node/event pair
    pub fn count(&self, node: NodeId, event: &str) -> usize {
        self.map
            .get(&node)
            .and_then(|events| events.get(event))
            .map_or(0, Vec::len)
    }

    /// Total listeners registered on a node, across all event names
    pub fn count_all(&self, node: NodeId) -> usize {
        self.map
            .get(&node)
            .map_or(0, |events| events.values().map(Vec::len).sum())
    }

    /// Event names with at least one listener on the node, sorted
    pub fn event_names(&self, node: NodeId) -> Vec<String> {
        let mut names: Vec<String> = self
            .map
            .get(&node)
            .map(|events| events.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}
