//! Error types for marker-core

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a palette or loading configuration.
///
/// Interaction entry points on the controller never fail; they report
/// no-ops through [`crate::Transition::Ignored`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Palette must contain at least one color")]
    EmptyPalette,

    #[error("Palette color names must not be blank")]
    BlankColor,

    #[error("Duplicate palette color: {color}")]
    DuplicateColor { color: String },

    #[error("Default color {color:?} is not part of the palette")]
    UnknownDefaultColor { color: String },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
