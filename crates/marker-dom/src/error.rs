//! Error types for marker-dom

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed markup at byte {position}: {message}")]
    Parse { position: usize, message: String },
}

impl Error {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}
