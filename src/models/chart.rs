//! Chart generation models

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::utils::ChartError;

/// Which record field supplies the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XField {
    BlockNumber,
    Timestamp,
}

impl XField {
    /// Field name as it appears in the input records
    pub fn record_key(&self) -> &'static str {
        match self {
            XField::BlockNumber => "blockNumber",
            XField::Timestamp => "timeStamp",
        }
    }
}

impl fmt::Display for XField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_key())
    }
}

impl FromStr for XField {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blocknumber" | "block" => Ok(XField::BlockNumber),
            "timestamp" | "time" => Ok(XField::Timestamp),
            _ => Err(ChartError::Config(format!(
                "unknown x field '{}'. Use: blockNumber, timeStamp",
                s
            ))),
        }
    }
}

/// Parallel x/y sequences ready for drawing, in input order
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSeries {
    Blocks { xs: Vec<u64>, ys: Vec<f64> },
    Times { xs: Vec<DateTime<Utc>>, ys: Vec<f64> },
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.prices().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn prices(&self) -> &[f64] {
        match self {
            ChartSeries::Blocks { ys, .. } | ChartSeries::Times { ys, .. } => ys,
        }
    }

    /// Lowest and highest price, `None` when empty
    pub fn price_range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let min = self.prices().iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.prices().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    /// True when x never decreases
    pub fn x_is_sorted(&self) -> bool {
        match self {
            ChartSeries::Blocks { xs, .. } => xs.windows(2).all(|w| w[0] <= w[1]),
            ChartSeries::Times { xs, .. } => xs.windows(2).all(|w| w[0] <= w[1]),
        }
    }
}

/// Headline numbers printed after a chart is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub samples: usize,
    pub first_x: String,
    pub last_x: String,
    pub min_price: f64,
    pub max_price: f64,
    pub last_price: f64,
}
