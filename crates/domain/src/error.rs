//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`FarmwatchError`] via `#[from]` (or an explicit `From` impl for boxed
//! infrastructure errors).

/// Boxed infrastructure error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error shared by services and adapters.
#[derive(Debug, thiserror::Error)]
pub enum FarmwatchError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A persistence adapter failed.
    #[error("storage error")]
    Storage(#[source] BoxError),

    /// A command could not be handed to the message broker.
    #[error("publish error")]
    Publish(#[source] BoxError),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("device id must not be empty")]
    EmptyDeviceId,

    #[error("device id {0:?} may only contain letters, digits, '-' and '_'")]
    InvalidDeviceId(String),

    #[error("device topic must not be empty")]
    EmptyTopic,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("unknown device kind: {0}")]
    UnknownDeviceKind(String),

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{axis} {value} is out of range")]
    CoordinateOutOfRange { axis: &'static str, value: String },
}

/// A lookup that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
