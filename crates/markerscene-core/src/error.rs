use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while configuring, generating or exporting a scene.
///
/// Every variant is fatal for the run: generation is deterministic, so the
/// pipeline aborts instead of retrying.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("camera {camera}: look-at direction is degenerate (position coincides with target)")]
    DegenerateDirection { camera: String },
    #[error("invalid range `{name}`: min {min} > max {max}")]
    InvalidRange { name: String, min: f64, max: f64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("render failed for camera {camera}: {reason}")]
    Render { camera: String, reason: String },
    #[error("scene file line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl SceneError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}
