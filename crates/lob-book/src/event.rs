//! Events consumed by the book state machine.
//!
//! Snapshot, delta and cursor events carry data the engine consumes;
//! connectivity and informational events carry none. The transport
//! collaborator produces connectivity events, the feed decoder the
//! rest.

use lob_core::{PriceLevel, ProductId};

/// A single input to the book state machine.
#[derive(Debug, Clone)]
pub enum BookEvent {
    /// The event stream (outer channel) opened.
    StreamOpened,
    /// The event stream closed.
    StreamClosed,
    /// The underlying socket (re)connected.
    SocketConnected,
    /// The underlying socket dropped.
    SocketDisconnected,
    /// Full book snapshot for a product.
    SnapshotReceived {
        product_id: ProductId,
        /// Display depth the venue sends per side.
        num_levels: usize,
        bids: Vec<PriceLevel>,
        asks: Vec<PriceLevel>,
    },
    /// Incremental update; zero-size entries are removals.
    DeltaReceived {
        bids: Vec<PriceLevel>,
        asks: Vec<PriceLevel>,
    },
    /// The renderer's last visible bid row moved.
    VisibleBidsIndexChanged { index: usize },
    /// The renderer's last visible ask row moved.
    VisibleAsksIndexChanged { index: usize },
    /// Venue info/version message.
    InfoReceived,
    /// Subscription acknowledged by the venue.
    SubscribeConfirmed,
    /// A message the decoder did not recognize.
    Unsupported,
}

impl BookEvent {
    /// Short event name for logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StreamOpened => "stream_opened",
            Self::StreamClosed => "stream_closed",
            Self::SocketConnected => "socket_connected",
            Self::SocketDisconnected => "socket_disconnected",
            Self::SnapshotReceived { .. } => "snapshot",
            Self::DeltaReceived { .. } => "delta",
            Self::VisibleBidsIndexChanged { .. } => "visible_bids_index",
            Self::VisibleAsksIndexChanged { .. } => "visible_asks_index",
            Self::InfoReceived => "info",
            Self::SubscribeConfirmed => "subscribe_confirmed",
            Self::Unsupported => "unsupported",
        }
    }
}
