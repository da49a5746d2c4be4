//! Readiness gate
//!
//! Pending top-level renders wait here until the host signals that its
//! content is loaded. The gate opens exactly once and never closes again.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

use elemental_dom::Document;

use crate::{Host, Location, RootElement};

/// A deferred `build` call
pub struct Pending<H: Host = Document> {
    pub element: RootElement<H>,
    pub location: Option<Location<H>>,
}

impl<H: Host> fmt::Debug for Pending<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("element", &self.element)
            .field("location", &self.location)
            .finish()
    }
}

/// FIFO queue of pending renders plus the one-shot ready flag
pub struct ReadinessContext<H: Host = Document> {
    queue: VecDeque<Pending<H>>,
    ready: bool,
}

impl<H: Host> ReadinessContext<H> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            ready: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Number of renders waiting for readiness
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn enqueue(&mut self, element: RootElement<H>, location: Option<Location<H>>) {
        self.queue.push_back(Pending { element, location });
    }

    /// Hand every pending entry to `render` in FIFO order, then mark the
    /// context ready. Returns the number drained; later calls do nothing.
    pub fn drain_once(&mut self, mut render: impl FnMut(Pending<H>)) -> usize {
        if self.ready {
            return 0;
        }
        let mut drained = 0;
        while let Some(entry) = self.queue.pop_front() {
            render(entry);
            drained += 1;
        }
        self.ready = true;
        drained
    }

    /// [`ReadinessContext::drain_once`] for a shared context.
    ///
    /// The borrow is released while `render` runs, so a render that builds
    /// again re-enters the queue and is drained in the same pass.
    pub(crate) fn drain_shared(cell: &RefCell<Self>, mut render: impl FnMut(Pending<H>)) -> usize {
        if cell.borrow().ready {
            return 0;
        }
        let mut drained = 0;
        loop {
            let next = cell.borrow_mut().queue.pop_front();
            let Some(entry) = next else { break };
            render(entry);
            drained += 1;
        }
        cell.borrow_mut().ready = true;
        drained
    }
}

impl<H: Host> Default for ReadinessContext<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> fmt::Debug for ReadinessContext<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessContext")
            .field("pending", &self.queue.len())
            .field("ready", &self.ready)
            .finish()
    }
}
