//! Error types for the match core

/// Error type for ledger and settings operations
#[derive(thiserror::Error, Debug)]
pub enum InvadersError {
    /// IO error from the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be parsed or written
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// Ledger has no backing files (in-memory only)
    #[error("Ledger is not backed by files")]
    Detached,
}

/// Result type for match core operations
pub type Result<T> = std::result::Result<T, InvadersError>;
