//! Builder configuration

/// Builder configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum specification nesting before materialization gives up with
    /// `BuildError::CyclicSpecification`
    pub max_depth: usize,

    /// Queue `build` calls until the host signals content loaded.
    /// Turn off for hosts that have no loading phase.
    pub defer_until_ready: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 512,
            defer_until_ready: true,
        }
    }
}
