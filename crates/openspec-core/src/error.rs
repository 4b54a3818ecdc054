use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenSpecError {
    #[error("No OpenSpec changes directory found. Run 'openspec init' first.")]
    NoChangesDirectory,

    #[error("invalid spec '{id}': {reason}")]
    InvalidSpec { id: String, reason: String },

    #[error("invalid list mode '{0}': expected changes, specs, or archive")]
    InvalidListMode(String),

    #[error("collation data unavailable: {0}")]
    Collation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OpenSpecError>;
