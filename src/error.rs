use thiserror::Error;

/// Rejection raised by store mutations before any state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task title is empty")]
    EmptyTitle,
}
