//! Incremental order book aggregation engine.
//!
//! Consumes snapshot and delta events for one market, maintains both
//! sides sorted in canonical order with cumulative size totals, and
//! derives the shared scale the renderer uses to normalize bar widths
//! over the visible window.
//!
//! The engine performs no I/O; the socket transport and the renderer
//! are external collaborators that feed [`BookEvent`]s in and read
//! [`BookState`] out.

pub mod aggregate;
pub mod error;
pub mod event;
pub mod state;
pub mod store;
pub mod window;

pub use aggregate::DepthSide;
pub use error::{BookError, BookResult};
pub use event::BookEvent;
pub use state::{transition, BookData, BookState};
pub use store::BookStore;
pub use window::depth_scale;
