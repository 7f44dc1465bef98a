//! Next-game prediction
//!
//! Linear trend extrapolation over a head-to-head game sequence.

pub mod trend;

pub use trend::{predict_next, StatTrend, TrendLine, TrendOutcome, TrendPrediction};
