use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the particle box simulation.
///
/// Contract violations (bad dimensions, `fps == 0`, `sections == 0`, ...) are
/// reported as `InvalidParam` instead of panicking, so callers decide how hard
/// to fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A particle does not fit inside the container it was offered to.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// A collision strategy was asked for a broad phase it does not provide.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// Propagated I/O errors from frame sinks.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Scene configuration or frame encoding failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
