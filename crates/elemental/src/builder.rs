//! Top-level builder
//!
//! Wraps specifications in [`RootElement`]s and renders them as soon as the
//! host is ready, queueing them until then.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use elemental_dom::Document;

use crate::readiness::{Pending, ReadinessContext};
use crate::{Config, Host, Location, RootElement, Spec};

/// Coordinator owning the readiness gate.
///
/// Create one per host document, at startup. Construction registers the
/// single "content loaded" callback that drains the queue.
pub struct Builder<H: Host = Document> {
    readiness: Rc<RefCell<ReadinessContext<H>>>,
    config: Rc<Config>,
}

impl<H: Host> Builder<H> {
    pub fn new(host: &mut H) -> Self {
        Self::with_config(host, Config::default())
    }

    pub fn with_config(host: &mut H, config: Config) -> Self {
        let builder = Self {
            readiness: Rc::new(RefCell::new(ReadinessContext::new())),
            config: Rc::new(config),
        };

        let readiness = Rc::clone(&builder.readiness);
        let config = Rc::clone(&builder.config);
        host.on_content_loaded(Box::new(move |host: &mut H| {
            let drained = ReadinessContext::drain_shared(&readiness, |pending| {
                render_pending(host, pending, &config);
            });
            tracing::debug!("Host ready, rendered {} queued elements", drained);
        }));

        builder
    }

    /// Build into the default location
    pub fn build(&self, host: &mut H, spec: impl Into<Spec<H>>) -> RootElement<H> {
        self.schedule(host, RootElement::new(spec), None)
    }

    /// Build into `location`
    pub fn build_at(
        &self,
        host: &mut H,
        spec: impl Into<Spec<H>>,
        location: impl Into<Location<H>>,
    ) -> RootElement<H> {
        self.schedule(host, RootElement::new(spec), Some(location.into()))
    }

    fn schedule(&self, host: &mut H, element: RootElement<H>, location: Option<Location<H>>) -> RootElement<H> {
        let defer = self.config.defer_until_ready && !self.is_ready();
        if defer {
            tracing::trace!("Host not ready, queueing {:?}", element.spec().selector());
            self.readiness.borrow_mut().enqueue(element.clone(), location);
        } else {
            render_pending(
                host,
                Pending {
                    element: element.clone(),
                    location,
                },
                &self.config,
            );
        }
        element
    }

    /// Whether the host has signalled readiness
    pub fn is_ready(&self) -> bool {
        self.readiness.borrow().is_ready()
    }

    /// Number of builds waiting for readiness
    pub fn pending(&self) -> usize {
        self.readiness.borrow().len()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn render_pending<H: Host>(host: &mut H, pending: Pending<H>, config: &Config) {
    if let Err(e) = pending
        .element
        .render_with(host, pending.location.as_ref(), config)
    {
        tracing::warn!("Skipped rendering {:?}: {}", pending.element.spec().selector(), e);
    }
}

impl<H: Host> Clone for Builder<H> {
    fn clone(&self) -> Self {
        Self {
            readiness: Rc::clone(&self.readiness),
            config: Rc::clone(&self.config),
        }
    }
}

impl<H: Host> fmt::Debug for Builder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("readiness", &*self.readiness.borrow())
            .field("config", &self.config)
            .finish()
    }
}
