//! Core domain types for the order book depth viewer.
//!
//! This crate provides the fundamental types shared by the aggregation
//! engine and the feed decoder:
//! - `Price`, `Size`: precision-safe numeric types
//! - `ProductId`: market identifier
//! - `Side`, `PriceLevel`, `AggregatedLevel`: book building blocks

pub mod decimal;
pub mod error;
pub mod level;
pub mod product;

pub use decimal::{Price, Size};
pub use error::{CoreError, Result};
pub use level::{AggregatedLevel, PriceLevel, Side};
pub use product::ProductId;
