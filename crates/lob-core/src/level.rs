//! Price levels and per-side canonical ordering.
//!
//! A side of the book is traversed from the best price outward:
//! ascending for asks, descending for bids. That traversal order is
//! used both for display and for cumulative size totals.

use crate::{Price, Size};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Book side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy side; canonical order is descending price.
    Bid,
    /// Sell side; canonical order is ascending price.
    Ask,
}

impl Side {
    /// Compare two prices in this side's canonical order.
    ///
    /// `Less` means `a` comes before `b` when walking the side from
    /// the best price outward.
    #[inline]
    pub fn canonical_cmp(&self, a: Price, b: Price) -> Ordering {
        match self {
            Self::Ask => a.cmp(&b),
            Self::Bid => b.cmp(&a),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bid => write!(f, "bid"),
            Self::Ask => write!(f, "ask"),
        }
    }
}

/// Raw price level as delivered by the feed.
///
/// Identity is the price. A zero size marks removal in deltas and is
/// never stored in an aggregated side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Price,
    pub size: Size,
}

impl PriceLevel {
    pub fn new(price: Price, size: Size) -> Self {
        Self { price, size }
    }

    /// A zero-size delta entry removes the level at this price.
    #[inline]
    pub fn is_removal(&self) -> bool {
        self.size.is_zero()
    }
}

/// Price level annotated with the cumulative size total.
///
/// `total` is the sum of `size` over all levels at-or-before this one
/// in the side's canonical order, so it is non-decreasing along the
/// side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedLevel {
    pub price: Price,
    pub size: Size,
    pub total: Size,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ask_canonical_order_is_ascending() {
        let lo = Price::new(dec!(100));
        let hi = Price::new(dec!(101));
        assert_eq!(Side::Ask.canonical_cmp(lo, hi), Ordering::Less);
        assert_eq!(Side::Ask.canonical_cmp(hi, lo), Ordering::Greater);
    }

    #[test]
    fn test_bid_canonical_order_is_descending() {
        let lo = Price::new(dec!(100));
        let hi = Price::new(dec!(101));
        assert_eq!(Side::Bid.canonical_cmp(hi, lo), Ordering::Less);
        assert_eq!(Side::Bid.canonical_cmp(lo, hi), Ordering::Greater);
    }

    #[test]
    fn test_removal_flag() {
        let keep = PriceLevel::new(Price::new(dec!(100)), Size::new(dec!(1)));
        let drop = PriceLevel::new(Price::new(dec!(100)), Size::ZERO);
        assert!(!keep.is_removal());
        assert!(drop.is_removal());
    }
}
