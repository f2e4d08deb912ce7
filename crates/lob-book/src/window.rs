//! Visible-window scale derivation.
//!
//! The renderer shows a bounded window of rows per side and normalizes
//! bar widths against a shared scale: the larger of the two cumulative
//! totals at each side's last visible row.

use crate::aggregate::DepthSide;
use lob_core::Size;

/// Derive the shared display scale for the visible window.
///
/// Each cursor is the zero-based index of the side's last visible row
/// in canonical order. Cursors are clamped to the side's current last
/// level (the side may have shrunk since the cursor was set); an empty
/// side contributes zero.
pub fn depth_scale(
    asks: &DepthSide,
    bids: &DepthSide,
    last_visible_asks: usize,
    last_visible_bids: usize,
) -> Size {
    asks.total_at_clamped(last_visible_asks)
        .max(bids.total_at_clamped(last_visible_bids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lob_core::{Price, PriceLevel, Side};
    use rust_decimal_macros::dec;

    fn level(price: rust_decimal::Decimal, size: rust_decimal::Decimal) -> PriceLevel {
        PriceLevel::new(Price::new(price), Size::new(size))
    }

    fn sides() -> (DepthSide, DepthSide) {
        let asks = DepthSide::aggregate(
            Side::Ask,
            vec![level(dec!(101), dec!(2)), level(dec!(100), dec!(3))],
        );
        let bids = DepthSide::aggregate(
            Side::Bid,
            vec![level(dec!(99), dec!(1)), level(dec!(98), dec!(4))],
        );
        (asks, bids)
    }

    #[test]
    fn test_scale_is_max_of_cursor_totals() {
        let (asks, bids) = sides();
        // asks: totals [3, 5]; bids: totals [1, 5]
        assert_eq!(depth_scale(&asks, &bids, 1, 1), Size::new(dec!(5)));
        assert_eq!(depth_scale(&asks, &bids, 0, 0), Size::new(dec!(3)));
        assert_eq!(depth_scale(&asks, &bids, 0, 1), Size::new(dec!(5)));
    }

    #[test]
    fn test_out_of_range_cursor_clamps() {
        let (asks, bids) = sides();
        assert_eq!(depth_scale(&asks, &bids, 50, 0), Size::new(dec!(5)));
    }

    #[test]
    fn test_empty_side_contributes_zero() {
        let (asks, _) = sides();
        let bids = DepthSide::empty(Side::Bid);
        assert_eq!(depth_scale(&asks, &bids, 1, 3), Size::new(dec!(5)));

        let empty_asks = DepthSide::empty(Side::Ask);
        assert_eq!(depth_scale(&empty_asks, &bids, 0, 0), Size::ZERO);
    }
}
