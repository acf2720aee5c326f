//! Error types for the Archenemy engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchenemyError {
    #[error("Deck not found: {0}")]
    DeckNotFound(u32),

    #[error("Not authorized to modify deck {0}")]
    Unauthorized(u32),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Unknown scheme card: {0}")]
    CardNotFound(String),

    #[error("Invalid session action: {0}")]
    InvalidAction(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Corrupt saved game: {0}")]
    CorruptSnapshot(String),

    #[error("Unsupported snapshot version {found} (supported: {supported})")]
    SnapshotVersion { found: u32, supported: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, ArchenemyError>;
