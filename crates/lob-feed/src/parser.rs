//! Feed message decoding.
//!
//! Turns raw JSON frames from the depth feed into typed [`BookEvent`]s.
//! Two envelope shapes exist: control messages carrying an `"event"`
//! field (info, subscription ack, alerts) and data messages carrying a
//! `"feed"` field (`<channel>_snapshot` and plain `<channel>` deltas).
//!
//! Unrecognized but well-formed messages map to `BookEvent::Unsupported`
//! so the dispatch loop keeps running; structurally broken frames are
//! errors.

use crate::error::{FeedError, FeedResult};
use lob_book::BookEvent;
use lob_core::{Price, PriceLevel, ProductId, Size};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

const DEFAULT_CHANNEL: &str = "book_ui_1";

/// Raw data-message envelope.
///
/// Levels stay as raw JSON here; the feed sends them as two-element
/// number arrays and they are converted without a float round-trip.
#[derive(Debug, Deserialize)]
struct RawBookUpdate {
    feed: String,
    #[serde(default)]
    product_id: Option<String>,
    #[serde(rename = "numLevels", default)]
    num_levels: Option<usize>,
    #[serde(default)]
    bids: Vec<Value>,
    #[serde(default)]
    asks: Vec<Value>,
}

/// Raw control-message envelope.
#[derive(Debug, Deserialize)]
struct RawControl {
    event: String,
}

/// Decoder for one depth channel.
pub struct MessageParser {
    /// Delta feed name; the snapshot feed is `<channel>_snapshot`.
    channel: String,
    snapshot_channel: String,
}

impl MessageParser {
    /// Create a parser for the default depth channel.
    pub fn new() -> Self {
        Self::for_channel(DEFAULT_CHANNEL)
    }

    /// Create a parser for a specific channel name.
    pub fn for_channel(channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
            snapshot_channel: format!("{channel}_snapshot"),
        }
    }

    /// Parse one feed frame into a book event.
    pub fn parse(&self, text: &str) -> FeedResult<BookEvent> {
        let value: Value = serde_json::from_str(text)?;
        self.parse_value(&value)
    }

    /// Parse an already-decoded JSON frame.
    pub fn parse_value(&self, value: &Value) -> FeedResult<BookEvent> {
        let obj = value
            .as_object()
            .ok_or_else(|| FeedError::ParseError("frame is not a JSON object".to_string()))?;

        if obj.contains_key("event") {
            return self.parse_control(value);
        }

        if obj.contains_key("feed") {
            return self.parse_update(value);
        }

        warn!("frame has neither event nor feed field, ignoring");
        Ok(BookEvent::Unsupported)
    }

    fn parse_control(&self, value: &Value) -> FeedResult<BookEvent> {
        let raw: RawControl = serde_json::from_value(value.clone())?;

        match raw.event.as_str() {
            "info" => {
                debug!("feed info message");
                Ok(BookEvent::InfoReceived)
            }
            "subscribed" => {
                debug!("subscription confirmed");
                Ok(BookEvent::SubscribeConfirmed)
            }
            other => {
                warn!(event = %other, "unsupported control message");
                Ok(BookEvent::Unsupported)
            }
        }
    }

    fn parse_update(&self, value: &Value) -> FeedResult<BookEvent> {
        let raw: RawBookUpdate = serde_json::from_value(value.clone())?;

        if raw.feed == self.snapshot_channel {
            let product_id = raw
                .product_id
                .ok_or_else(|| FeedError::ParseError("snapshot without product_id".to_string()))?;
            let num_levels = raw
                .num_levels
                .ok_or_else(|| FeedError::ParseError("snapshot without numLevels".to_string()))?;

            let bids = parse_levels(&raw.bids)?;
            let asks = parse_levels(&raw.asks)?;
            debug!(
                product = %product_id,
                num_levels,
                bids = bids.len(),
                asks = asks.len(),
                "snapshot frame"
            );

            return Ok(BookEvent::SnapshotReceived {
                product_id: ProductId::new(product_id),
                num_levels,
                bids,
                asks,
            });
        }

        if raw.feed == self.channel {
            let bids = parse_levels(&raw.bids)?;
            let asks = parse_levels(&raw.asks)?;
            return Ok(BookEvent::DeltaReceived { bids, asks });
        }

        warn!(feed = %raw.feed, "unsupported feed");
        Ok(BookEvent::Unsupported)
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_levels(raw: &[Value]) -> FeedResult<Vec<PriceLevel>> {
    raw.iter().map(parse_level).collect()
}

fn parse_level(level: &Value) -> FeedResult<PriceLevel> {
    let arr = level
        .as_array()
        .ok_or_else(|| FeedError::ParseError("level is not an array".to_string()))?;

    if arr.len() < 2 {
        return Err(FeedError::ParseError("level array too short".to_string()));
    }

    let price = Price::new(parse_decimal(&arr[0])?);
    let size = Size::new(parse_decimal(&arr[1])?);

    if !price.is_positive() {
        return Err(FeedError::ParseError(format!(
            "level price must be positive: {price}"
        )));
    }
    if !size.is_zero() && !size.is_positive() {
        return Err(FeedError::ParseError(format!(
            "level size must not be negative: {size}"
        )));
    }

    Ok(PriceLevel::new(price, size))
}

/// Convert a JSON number (or numeric string) to `Decimal` via its
/// literal text, so `2151.5` arrives exactly as written.
fn parse_decimal(value: &Value) -> FeedResult<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => {
            return Err(FeedError::ParseError(format!(
                "expected a number, got {other}"
            )))
        }
    };

    text.parse()
        .map_err(|_| FeedError::ParseError(format!("invalid decimal: {text}")))
}
