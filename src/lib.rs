pub mod catalog;
pub mod chart_spec;
pub mod metrics;
pub mod render;
pub mod samples;

pub use chart_spec::ChartSpec;
pub use samples::{BenchmarkTables, SampleSeries};
