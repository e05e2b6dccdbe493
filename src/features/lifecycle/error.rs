use thiserror::Error;

/// Rule violations raised by the lifecycle guards
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// Requested status is not reachable from the current one
    #[error("{0}")]
    InvalidTransition(String),

    /// Assignment target is missing or not a collector
    #[error("{0}")]
    InvalidCollector(String),

    /// Role, ownership or area mismatch
    #[error("{0}")]
    Forbidden(String),
}
