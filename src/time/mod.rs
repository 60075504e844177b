//! Time periods and period-indexed series.

pub mod period;
pub mod series;

pub use period::{Month, Quarter, TimePeriod};
pub use series::{TimeSeries, TimeSeriesBuilder};
