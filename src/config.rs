//! Stamping configuration.

use std::{path::PathBuf, time::Duration};

/// Which tags `git describe` may use as the anchor of the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSelection {
    /// Any tag, including lightweight ones (`--tags`).
    AnyTag,
    /// Annotated tags only (plain `git describe`).
    AnnotatedOnly,
}

/// What to do when no version descriptor can be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Bake an empty-quoted macro into the build and carry on.
    Empty,
    /// Use the given placeholder (e.g. `"unknown"`) instead.
    Substitute(String),
    /// Abort the build with [`StampError::DescriptorUnavailable`](crate::StampError::DescriptorUnavailable).
    Abort,
}

/// Settings for one stamping run.
pub struct StampConfig {
    /// Macro name for the version define.
    pub version_macro: String,
    /// Macro name for the build-timestamp define.
    pub build_time_macro: String,
    /// Tags considered by `git describe`.
    pub tag_selection: TagSelection,
    /// Append `-dirty` to the descriptor when the working tree has
    /// uncommitted changes (`--dirty`).
    pub dirty_suffix: bool,
    /// Directory to run git in. `None` means the current working directory.
    pub work_dir: Option<PathBuf>,
    /// Upper bound on how long the describe subprocess may run.
    pub timeout: Duration,
    /// Behavior when the descriptor is unavailable.
    pub on_unavailable: FallbackPolicy,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            version_macro: "AUTO_VERSION".to_string(),
            build_time_macro: "AUTO_BUILD_TIME".to_string(),
            tag_selection: TagSelection::AnyTag,
            dirty_suffix: false,
            work_dir: None,
            timeout: Duration::from_secs(10),
            on_unavailable: FallbackPolicy::Empty,
        }
    }
}
