use thiserror::Error;

/// Errors surfaced by the board to its host
#[derive(Debug, Error)]
pub enum BoardError {
    /// Mount was requested without a target that resolves to an element
    #[error("Please provide the mount point")]
    MissingMountPoint,
    /// The image encoder finished without producing any data
    #[error("image encoder produced no data")]
    EmptyEncoding,
    /// A board option is outside of its accepted range
    #[error("invalid board option: {0}")]
    InvalidOption(String),
    /// The line colour is not a CSS colour
    #[error("invalid line color {0:?}")]
    InvalidColor(String),
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to parse board options: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type BoardResult<T> = Result<T, BoardError>;
