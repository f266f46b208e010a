//! Error conversion implementations.
//!
//! Conversions for third-party errors that don't map onto a single variant
//! through `#[from]`.

use super::types::Error;

impl From<serde_saphyr::Error> for Error {
    fn from(err: serde_saphyr::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}
