use serde::{Deserialize, Serialize};

/// Guards applied while loading nested references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Fail with `CyclicReference` when a URL is reached again while it is
    /// still being loaded.
    pub detect_cycles: bool,
    /// Maximum number of loads in flight at once, the root included.
    /// `None` means no limit.
    pub max_depth: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            detect_cycles: true,
            max_depth: None,
        }
    }
}

impl LoaderConfig {
    /// No cycle detection and no depth limit.
    ///
    /// A reference cycle in the data recurses without bound. Only use this
    /// when the graph is known to be acyclic.
    pub fn unguarded() -> Self {
        Self {
            detect_cycles: false,
            max_depth: None,
        }
    }

    /// Default guards plus a depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..Default::default()
        }
    }
}
