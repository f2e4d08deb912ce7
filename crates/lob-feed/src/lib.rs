//! Depth feed message decoding.
//!
//! Bridges the raw JSON frames a depth-stream socket delivers and the
//! typed [`lob_book::BookEvent`]s the aggregation engine consumes. The
//! socket itself, along with retry and reconnect policy, lives in the
//! transport collaborator.

pub mod error;
pub mod parser;

pub use error::{FeedError, FeedResult};
pub use parser::MessageParser;
