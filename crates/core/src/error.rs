use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a host while managing graphics resources.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to create effect from {}: {reason}", path.display())]
    EffectCompile { path: PathBuf, reason: String },

    #[error("effect path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),
}
