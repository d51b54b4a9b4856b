use thiserror::Error;

/// Failure classes surfaced to callers. The first four are the domain
/// taxonomy and stay distinct so callers can match on them; the last two
/// carry transport failures through unchanged, since this crate does not
/// retry or recover on behalf of its gateways.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}
