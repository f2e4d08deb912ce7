//! Engine error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookError {
    /// A delta or cursor event arrived before any snapshot. Silently
    /// ignoring it would leave the display inconsistent with the
    /// market, so the transition aborts instead.
    #[error("{event} event requires a snapshot, book state is {state}")]
    SnapshotRequired {
        event: &'static str,
        state: &'static str,
    },
}

pub type BookResult<T> = Result<T, BookError>;
