use std::path::{Path, PathBuf};

/// Convenience result type used across storyreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy for the composition pipeline.
///
/// Scene-load failures (`ResourceNotFound`, `MalformedSceneData`) are raised before any
/// rendering work starts. A junction that is too short for its transition is not an error; it
/// is planned as a straight cut instead.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// An input image or audio file is missing or unreadable.
    #[error("resource not found: '{}'", path.display())]
    ResourceNotFound {
        /// The offending path.
        path: PathBuf,
    },

    /// Scene list is empty or a descriptor is missing required fields.
    #[error("malformed scene data: {0}")]
    MalformedSceneData(String),

    /// The downstream encoder failed; the message carries the underlying cause.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid configuration or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Media probing/decoding failed (ffprobe/ffmpeg/image decode).
    #[error("media error: {0}")]
    Media(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::ResourceNotFound`] value.
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::ResourceNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Build a [`ReelError::MalformedSceneData`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedSceneData(msg.into())
    }

    /// Build a [`ReelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
