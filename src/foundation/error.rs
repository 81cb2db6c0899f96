use std::path::PathBuf;

/// Crate-wide result alias.
pub type ReelResult<T> = Result<T, ReelError>;

/// Errors produced while configuring, rendering, persisting or encoding a story.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid configuration or malformed input buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// A source image could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// A frame could not be mapped onto the segment table.
    #[error("timeline error at frame {frame} (progress {progress}): {reason}")]
    Timeline {
        /// Offending frame index.
        frame: u64,
        /// Progress computed for that frame.
        progress: f64,
        /// What went wrong.
        reason: String,
    },

    /// Rasterization or compositing failure.
    #[error("render error: {0}")]
    Render(String),

    /// A composed frame could not be persisted.
    #[error("frame sink error: {0}")]
    Sink(String),

    /// The external encoder is missing or exited unsuccessfully.
    #[error("encoder error: {reason} (frames kept in '{}')", frames_dir.display())]
    Encode {
        /// Encoder diagnostics (exit status and stderr, or spawn failure).
        reason: String,
        /// Directory holding the frame series handed to the encoder.
        frames_dir: PathBuf,
    },

    /// Configuration could not be parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn timeline(frame: u64, progress: f64, reason: impl Into<String>) -> Self {
        Self::Timeline {
            frame,
            progress,
            reason: reason.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    pub fn encode(reason: impl Into<String>, frames_dir: impl Into<PathBuf>) -> Self {
        Self::Encode {
            reason: reason.into(),
            frames_dir: frames_dir.into(),
        }
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for encoder failures, whose frame series is left on disk.
    pub fn is_encode(&self) -> bool {
        matches!(self, Self::Encode { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
