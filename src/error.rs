//! Error types for controller construction and tuning I/O

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported to the host when a controller cannot be set up
#[derive(Debug, Error)]
pub enum JumpError {
    #[error("invalid tuning: {field} = {value} ({reason})")]
    InvalidTuning {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
    #[error("no physics body bound to the jump controller")]
    MissingBody,
    #[error("failed to access tuning file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JumpError>;
