//! Error types for configuration loading and tick fault reporting

/// Errors surfaced by the simulation's outer layers
///
/// The per-tick simulation itself never returns errors; these cover loading
/// collaborator data and reporting a tick that had to be aborted.
#[derive(thiserror::Error, Debug)]
pub enum SkyhopError {
    /// World or settings values that cannot produce a playable session
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed JSON from a config/settings/progress source
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A tick panicked and was rolled back
    #[error("Simulation fault at tick {tick}: {message}")]
    TickPanicked { tick: u64, message: String },
}

/// Result type for fallible operations
pub type Result<T> = std::result::Result<T, SkyhopError>;
