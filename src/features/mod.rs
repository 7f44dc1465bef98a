//! Per-game statistic series

pub mod series;

pub use series::{mean, StatSeries};
