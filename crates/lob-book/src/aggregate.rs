//! Per-side level aggregation.
//!
//! A [`DepthSide`] holds one side of the book as a vector sorted in the
//! side's canonical order, each level annotated with the running size
//! total. Sides are rebuilt in full on every update; the input is
//! bounded by the display depth the venue sends, so the O(n log n)
//! re-sort stays trivial.

use lob_core::{AggregatedLevel, Price, PriceLevel, Side, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One aggregated side of the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSide {
    side: Side,
    levels: Vec<AggregatedLevel>,
}

impl DepthSide {
    /// Create an empty side.
    pub fn empty(side: Side) -> Self {
        Self {
            side,
            levels: Vec::new(),
        }
    }

    /// Aggregate raw levels into a sorted, cumulatively-summed side.
    ///
    /// Levels are sorted in the side's canonical order (ascending price
    /// for asks, descending for bids) and traversed accumulating a
    /// running sum of sizes. Zero-size levels are dropped and do not
    /// advance the sum.
    pub fn aggregate(side: Side, mut raw: Vec<PriceLevel>) -> Self {
        raw.sort_by(|a, b| side.canonical_cmp(a.price, b.price));

        let mut levels = Vec::with_capacity(raw.len());
        let mut running = Size::ZERO;
        for level in raw {
            if level.size.is_zero() {
                continue;
            }
            running += level.size;
            levels.push(AggregatedLevel {
                price: level.price,
                size: level.size,
                total: running,
            });
        }

        Self { side, levels }
    }

    /// Merge delta entries into this side and re-aggregate.
    ///
    /// Map semantics keyed by price: a zero-size entry removes the
    /// level (on both sides), any other entry replaces the size at that
    /// price. Totals are always recomputed fresh, never carried over.
    /// Returns a new side; `self` is untouched.
    pub fn apply_delta(&self, deltas: &[PriceLevel]) -> Self {
        let mut merged: HashMap<Price, Size> = self
            .levels
            .iter()
            .map(|level| (level.price, level.size))
            .collect();

        for delta in deltas {
            if delta.is_removal() {
                merged.remove(&delta.price);
            } else {
                merged.insert(delta.price, delta.size);
            }
        }

        let raw = merged
            .into_iter()
            .map(|(price, size)| PriceLevel::new(price, size))
            .collect();
        Self::aggregate(self.side, raw)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Levels in canonical order, best price first.
    pub fn levels(&self) -> &[AggregatedLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Sum of all sizes on this side (zero when empty).
    pub fn grand_total(&self) -> Size {
        self.levels.last().map(|l| l.total).unwrap_or(Size::ZERO)
    }

    /// Cumulative total at `index`, clamped to the last level.
    ///
    /// The side may have shrunk since a cursor was set, so an index
    /// past the end reads the last level instead. An empty side yields
    /// zero rather than indexing.
    pub fn total_at_clamped(&self, index: usize) -> Size {
        if self.levels.is_empty() {
            return Size::ZERO;
        }
        let clamped = index.min(self.levels.len() - 1);
        self.levels[clamped].total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn level(price: rust_decimal::Decimal, size: rust_decimal::Decimal) -> PriceLevel {
        PriceLevel::new(Price::new(price), Size::new(size))
    }

    #[test]
    fn test_asks_sorted_ascending_with_prefix_sums() {
        let side = DepthSide::aggregate(
            Side::Ask,
            vec![level(dec!(101), dec!(2)), level(dec!(100), dec!(3))],
        );

        let levels = side.levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].price, Price::new(dec!(100)));
        assert_eq!(levels[0].total, Size::new(dec!(3)));
        assert_eq!(levels[1].price, Price::new(dec!(101)));
        assert_eq!(levels[1].total, Size::new(dec!(5)));
        assert_eq!(side.grand_total(), Size::new(dec!(5)));
    }

    #[test]
    fn test_bids_sorted_descending_with_prefix_sums() {
        let side = DepthSide::aggregate(
            Side::Bid,
            vec![level(dec!(98), dec!(4)), level(dec!(99), dec!(1))],
        );

        let levels = side.levels();
        assert_eq!(levels[0].price, Price::new(dec!(99)));
        assert_eq!(levels[0].total, Size::new(dec!(1)));
        assert_eq!(levels[1].price, Price::new(dec!(98)));
        assert_eq!(levels[1].total, Size::new(dec!(5)));
    }

    #[test]
    fn test_zero_size_levels_are_dropped() {
        let side = DepthSide::aggregate(
            Side::Ask,
            vec![
                level(dec!(100), dec!(1)),
                level(dec!(100.5), dec!(0)),
                level(dec!(101), dec!(2)),
            ],
        );

        assert_eq!(side.len(), 2);
        assert_eq!(side.levels()[1].total, Size::new(dec!(3)));
    }

    #[test]
    fn test_totals_non_decreasing() {
        let side = DepthSide::aggregate(
            Side::Bid,
            vec![
                level(dec!(97), dec!(2)),
                level(dec!(99), dec!(0.5)),
                level(dec!(98), dec!(1)),
            ],
        );

        let mut prev = Size::ZERO;
        for l in side.levels() {
            assert!(l.total >= prev);
            prev = l.total;
        }
    }

    #[test]
    fn test_delta_removes_on_zero_size() {
        let side = DepthSide::aggregate(
            Side::Ask,
            vec![level(dec!(100), dec!(3)), level(dec!(101), dec!(2))],
        );
        let next = side.apply_delta(&[level(dec!(100), dec!(0)), level(dec!(102), dec!(1))]);

        let levels = next.levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].price, Price::new(dec!(101)));
        assert_eq!(levels[0].total, Size::new(dec!(2)));
        assert_eq!(levels[1].price, Price::new(dec!(102)));
        assert_eq!(levels[1].total, Size::new(dec!(3)));
    }

    #[test]
    fn test_delta_removal_of_absent_price_is_noop() {
        let side = DepthSide::aggregate(Side::Bid, vec![level(dec!(99), dec!(1))]);
        let next = side.apply_delta(&[level(dec!(42), dec!(0))]);
        assert_eq!(next.levels(), side.levels());
    }

    #[test]
    fn test_delta_upsert_replaces_size() {
        let side = DepthSide::aggregate(
            Side::Ask,
            vec![level(dec!(100), dec!(3)), level(dec!(101), dec!(2))],
        );
        let next = side.apply_delta(&[level(dec!(100), dec!(1))]);

        let levels = next.levels();
        assert_eq!(levels[0].size, Size::new(dec!(1)));
        assert_eq!(levels[0].total, Size::new(dec!(1)));
        assert_eq!(levels[1].total, Size::new(dec!(3)));
    }

    #[test]
    fn test_no_op_delta_is_idempotent() {
        let side = DepthSide::aggregate(
            Side::Bid,
            vec![level(dec!(99), dec!(1)), level(dec!(98), dec!(4))],
        );
        let echo: Vec<PriceLevel> = side
            .levels()
            .iter()
            .map(|l| PriceLevel::new(l.price, l.size))
            .collect();
        let next = side.apply_delta(&echo);
        assert_eq!(next, side);
    }

    #[test]
    fn test_total_at_clamped() {
        let side = DepthSide::aggregate(
            Side::Ask,
            vec![level(dec!(100), dec!(3)), level(dec!(101), dec!(2))],
        );

        assert_eq!(side.total_at_clamped(0), Size::new(dec!(3)));
        assert_eq!(side.total_at_clamped(1), Size::new(dec!(5)));
        // Past the end reads the last level.
        assert_eq!(side.total_at_clamped(99), Size::new(dec!(5)));
    }

    #[test]
    fn test_empty_side_totals_are_zero() {
        let side = DepthSide::empty(Side::Bid);
        assert_eq!(side.grand_total(), Size::ZERO);
        assert_eq!(side.total_at_clamped(0), Size::ZERO);
        assert_eq!(side.total_at_clamped(7), Size::ZERO);
    }
}
