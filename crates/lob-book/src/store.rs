//! Sequential state store.
//!
//! Owns the current [`BookState`] and applies events one at a time,
//! replacing the state with the value [`transition`] returns. Intended
//! to be driven by a single dispatching caller; there is no internal
//! locking.

use crate::error::BookResult;
use crate::event::BookEvent;
use crate::state::{transition, BookState};

/// Holder for the current book state.
#[derive(Debug, Default)]
pub struct BookStore {
    state: BookState,
}

impl BookStore {
    /// Create a store in the initial `NeverLoaded` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &BookState {
        &self.state
    }

    /// Mark the book as subscribed but not yet loaded.
    ///
    /// Called by the subscribing collaborator after it sends the
    /// subscribe request; no feed event enters this state.
    pub fn begin_loading(&mut self) {
        self.state = BookState::WaitingForData;
    }

    /// Apply one event, replacing the current state on success.
    ///
    /// On error the current state is left untouched.
    pub fn apply(&mut self, event: BookEvent) -> BookResult<&BookState> {
        self.state = transition(&self.state, event)?;
        Ok(&self.state)
    }
}
