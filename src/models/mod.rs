//! Data models for price charting
//!
//! Input records as read from disk and the projected series handed to the renderer.

pub mod sample;
pub mod chart;

pub use sample::PriceSample;
pub use chart::{ChartSeries, SeriesSummary, XField};
