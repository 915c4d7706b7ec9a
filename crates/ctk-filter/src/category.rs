//! Output category. Selects extra filter patterns and the compaction strategy.

use std::fmt;

use regex::Regex;

use crate::{stage2_filter, stage4_compact};

/// Category of the tool that produced the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Git,
    Python,
    Docker,
    DockerCompose,
    NodeJs,
    Rust,
    /// Fallback for unspecified or unrecognized labels.
    #[default]
    Generic,
}

/// Category-specific rewrite applied after dedup.
pub type Compactor = fn(&str) -> String;

impl Category {
    pub const ALL: [Category; 7] = [
        Self::Git,
        Self::Python,
        Self::Docker,
        Self::DockerCompose,
        Self::NodeJs,
        Self::Rust,
        Self::Generic,
    ];

    /// Map a caller-supplied label to a category. Unknown labels fall back to `Generic`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "git" => Self::Git,
            "python" => Self::Python,
            "docker" => Self::Docker,
            "docker-compose" => Self::DockerCompose,
            "nodejs" => Self::NodeJs,
            "rust" => Self::Rust,
            _ => Self::Generic,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Python => "python",
            Self::Docker => "docker",
            Self::DockerCompose => "docker-compose",
            Self::NodeJs => "nodejs",
            Self::Rust => "rust",
            Self::Generic => "generic",
        }
    }

    /// Patterns dropped for this category on top of the universal set.
    pub fn extra_patterns(&self) -> &'static [Regex] {
        match self {
            Self::Git => stage2_filter::GIT_PATTERNS.as_slice(),
            Self::Python => stage2_filter::PYTHON_PATTERNS.as_slice(),
            Self::Docker => stage2_filter::DOCKER_PATTERNS.as_slice(),
            Self::DockerCompose => stage2_filter::DOCKER_COMPOSE_PATTERNS.as_slice(),
            Self::NodeJs => stage2_filter::NODEJS_PATTERNS.as_slice(),
            Self::Rust => stage2_filter::RUST_PATTERNS.as_slice(),
            Self::Generic => &[],
        }
    }

    /// Status-change lines (`modified: ...`) survive filtering only where
    /// the compactor turns them into short codes.
    pub fn keeps_status_changes(&self) -> bool {
        matches!(self, Self::Git)
    }

    pub fn compactor(&self) -> Option<Compactor> {
        match self {
            Self::Git => Some(stage4_compact::compact_git_status),
            Self::Python => Some(stage4_compact::compact_pytest_output),
            Self::Docker | Self::DockerCompose => Some(stage4_compact::compact_container_output),
            Self::NodeJs | Self::Rust | Self::Generic => None,
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
