//! Error type for layout and generation.
use thiserror::Error;

/// Main error type for images2pptx operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The layout configuration is unusable (empty channel list, non-positive
    /// lengths, zero images per slide, ...).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A configuration file could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// A grid cell has no uploaded image.
    #[error("Missing image for group '{group}' channel '{channel}' (expected '{file_name}')")]
    MissingAsset {
        group: String,
        channel: String,
        file_name: String,
    },

    /// The file exists but is not an image we can place, including headers
    /// the decoder rejects.
    #[error("Invalid image '{file_name}': {reason}")]
    InvalidImage { file_name: String, reason: String },

    /// Presentation writer error
    #[error("OOXML error: {0}")]
    Ooxml(#[from] crate::ooxml::OoxmlError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] error.
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}

/// Result type for images2pptx operations.
pub type Result<T> = std::result::Result<T, Error>;
