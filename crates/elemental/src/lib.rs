//! Elemental
//!
//! Declarative element builder. A compact selector such as
//! `li.item#first[data-id=7] First item`, optionally wrapped in a
//! [`Specification`] with text, children and events, becomes a live subtree
//! of host nodes.
//!
//! # Example
//! ```rust,ignore
//! use elemental::{Builder, Specification};
//! use elemental_dom::Document;
//!
//! let mut doc = Document::new();
//! let builder = Builder::new(&mut doc);
//!
//! let menu = builder.build(
//!     &mut doc,
//!     Specification::new("ul.menu")
//!         .children(["li.item One", "li.item Two"])
//!         .on_children("click", |doc: &mut Document, ev: &mut elemental_dom::Event| {
//!             let _ = doc.add_class(ev.this(), "picked");
//!         }),
//! );
//!
//! doc.finish_loading(); // queued builds render here, in call order
//! assert!(menu.root().is_some());
//! ```

mod builder;
mod config;
mod error;
pub mod events;
pub mod factory;
mod host;
pub mod readiness;
mod root;
pub mod selector;
mod spec;

pub use builder::Builder;
pub use config::Config;
pub use error::{BuildError, RenderError};
pub use host::Host;
pub use readiness::{Pending, ReadinessContext};
pub use root::{Location, RootElement};
pub use selector::{parse, ParsedSelector, SelectorAttribute};
pub use spec::{CreatedHook, EventMap, Spec, Specification, CHILDREN, CREATED, RENDERED};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
