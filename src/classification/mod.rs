pub mod abc;
pub mod monthly;
pub mod xyz;

pub use abc::{classify_abc, ValueRank};
pub use monthly::{series_stats, MonthlyDemand, SeriesStats, YearMonth};
pub use xyz::{classify_xyz, coefficient_of_variation};
