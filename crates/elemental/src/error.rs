//! Builder errors

/// Failure while materializing a specification
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Nesting went past `Config::max_depth`, which in practice means a
    /// specification that refers back to itself
    #[error("specification nested deeper than {limit} levels (cyclic specification?)")]
    CyclicSpecification { limit: usize },
    #[error("host operation failed: {0}")]
    Host(#[source] Box<dyn std::error::Error>),
}

impl BuildError {
    pub(crate) fn host(err: impl std::error::Error + 'static) -> Self {
        Self::Host(Box::new(err))
    }
}

/// Failure while rendering a root element
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Selector location matched nothing in the document
    #[error("no element matches location selector {0:?}")]
    UnresolvedSelector(String),
    /// Location is another root element that has not been rendered yet
    #[error("location root element has not been rendered")]
    UnrenderedRoot,
    /// No location given and the host has no default container
    #[error("host has no default container")]
    NoDefaultContainer,
    #[error(transparent)]
    Build(#[from] BuildError),
}
