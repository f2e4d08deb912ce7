//! Book lifecycle state machine.
//!
//! The four-variant lifecycle is a closed sum type and [`transition`]
//! matches it exhaustively, so every recognized event maps to exactly
//! one outcome and no fallback path exists. Transitions never mutate
//! the previous state; each one returns a fresh value.

use crate::aggregate::DepthSide;
use crate::error::{BookError, BookResult};
use crate::event::BookEvent;
use crate::window::depth_scale;
use lob_core::{PriceLevel, ProductId, Side, Size};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Aggregated book contents while a snapshot is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookData {
    pub product_id: ProductId,
    /// Display depth per side, as announced by the snapshot.
    pub num_levels: usize,
    pub asks: DepthSide,
    pub bids: DepthSide,
    /// Last visible ask row (canonical order, zero-based).
    pub last_visible_asks: usize,
    /// Last visible bid row (canonical order, zero-based).
    pub last_visible_bids: usize,
    /// Shared bar-width scale for the visible window.
    pub scale: Size,
}

impl BookData {
    fn rescaled(mut self) -> Self {
        self.scale = depth_scale(
            &self.asks,
            &self.bids,
            self.last_visible_asks,
            self.last_visible_bids,
        );
        self
    }
}

/// Book lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookState {
    /// Initial state, no market subscribed.
    #[default]
    NeverLoaded,
    /// Subscribed, first snapshot not yet received.
    WaitingForData,
    /// Live book.
    Active(BookData),
    /// Connection lost; data retained for display continuity.
    Suspended(BookData),
}

impl BookState {
    /// Short state name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NeverLoaded => "never_loaded",
            Self::WaitingForData => "waiting_for_data",
            Self::Active(_) => "active",
            Self::Suspended(_) => "suspended",
        }
    }

    /// Book contents, if a snapshot has been received.
    pub fn data(&self) -> Option<&BookData> {
        match self {
            Self::Active(data) | Self::Suspended(data) => Some(data),
            Self::NeverLoaded | Self::WaitingForData => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// Apply one event to the book, producing the next state.
///
/// Pure and deterministic; the only side effect is diagnostic logging.
/// Events that require a prior snapshot fail with
/// [`BookError::SnapshotRequired`] when none exists.
pub fn transition(state: &BookState, event: BookEvent) -> BookResult<BookState> {
    match event {
        BookEvent::StreamOpened | BookEvent::StreamClosed => {
            debug!(event = event.kind(), state = state.name(), "stream event");
            Ok(state.clone())
        }
        BookEvent::SocketConnected => Ok(resume(state)),
        BookEvent::SocketDisconnected => Ok(suspend(state)),
        BookEvent::SnapshotReceived {
            product_id,
            num_levels,
            bids,
            asks,
        } => Ok(load_snapshot(state, product_id, num_levels, bids, asks)),
        BookEvent::DeltaReceived { bids, asks } => apply_delta(state, bids, asks),
        BookEvent::VisibleBidsIndexChanged { index } => move_cursor(state, Side::Bid, index),
        BookEvent::VisibleAsksIndexChanged { index } => move_cursor(state, Side::Ask, index),
        BookEvent::InfoReceived | BookEvent::SubscribeConfirmed | BookEvent::Unsupported => {
            debug!(event = event.kind(), state = state.name(), "ignored event");
            Ok(state.clone())
        }
    }
}

/// Socket reconnected: a suspended book resumes, data untouched.
fn resume(state: &BookState) -> BookState {
    match state {
        BookState::Suspended(data) => {
            debug!(product = %data.product_id, "book resumed");
            BookState::Active(data.clone())
        }
        other => other.clone(),
    }
}

/// Socket dropped: an active book suspends, data untouched.
fn suspend(state: &BookState) -> BookState {
    match state {
        BookState::Active(data) => {
            debug!(product = %data.product_id, "book suspended");
            BookState::Suspended(data.clone())
        }
        other => other.clone(),
    }
}

fn load_snapshot(
    state: &BookState,
    product_id: ProductId,
    num_levels: usize,
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
) -> BookState {
    let asks = DepthSide::aggregate(Side::Ask, asks);
    let bids = DepthSide::aggregate(Side::Bid, bids);

    // Keep the renderer's cursors across re-snapshots; a first
    // snapshot starts with the full window visible (last row).
    let (last_visible_asks, last_visible_bids) = match state.data() {
        Some(prev) => (prev.last_visible_asks, prev.last_visible_bids),
        None => (asks.len().saturating_sub(1), bids.len().saturating_sub(1)),
    };

    debug!(
        product = %product_id,
        num_levels,
        asks = asks.len(),
        bids = bids.len(),
        "snapshot loaded"
    );

    BookState::Active(
        BookData {
            product_id,
            num_levels,
            asks,
            bids,
            last_visible_asks,
            last_visible_bids,
            scale: Size::ZERO,
        }
        .rescaled(),
    )
}

fn apply_delta(
    state: &BookState,
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
) -> BookResult<BookState> {
    let Some(data) = state.data() else {
        return Err(BookError::SnapshotRequired {
            event: "delta",
            state: state.name(),
        });
    };

    let next = BookData {
        asks: data.asks.apply_delta(&asks),
        bids: data.bids.apply_delta(&bids),
        ..data.clone()
    }
    .rescaled();

    Ok(BookState::Active(next))
}

fn move_cursor(state: &BookState, side: Side, index: usize) -> BookResult<BookState> {
    let Some(data) = state.data() else {
        return Err(BookError::SnapshotRequired {
            event: match side {
                Side::Bid => "visible_bids_index",
                Side::Ask => "visible_asks_index",
            },
            state: state.name(),
        });
    };

    let mut next = data.clone();
    match side {
        Side::Bid => next.last_visible_bids = index,
        Side::Ask => next.last_visible_asks = index,
    }
    Ok(BookState::Active(next.rescaled()))
}
