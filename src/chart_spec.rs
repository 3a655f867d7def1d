use plotters::style::RGBColor;
use std::ops::Range;

/// Axis scale used by a chart's panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    LogLog,
    Linear,
}

/// Format an input size for axis ticks and bar labels ("8B", "24B", "1KB").
///
/// The size domain spans three orders of magnitude, so raw byte counts make
/// unreadable ticks.
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 && bytes % 1024 == 0 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{}B", bytes)
    }
}

/// A labeled text anchor in data-space coordinates.
#[derive(Debug, Clone)]
pub struct ZoneLabel {
    pub text: String,
    pub at: (f64, f64),
    pub color: RGBColor,
}

/// A shaded span of the x axis marking which implementation dominates there.
#[derive(Debug, Clone)]
pub struct ZoneSpan {
    pub from: f64,
    pub to: f64,
    pub color: RGBColor,
    pub alpha: f64,
    pub label: Option<ZoneLabel>,
}

/// One line series on the throughput chart: label, color, (size, GB/s) points.
#[derive(Debug, Clone)]
pub struct LineSpec {
    pub label: String,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

/// Log-log throughput-vs-size line chart with territory annotations.
#[derive(Debug, Clone)]
pub struct ThroughputChart {
    pub title: String,
    pub base_name: String,
    /// Fixed bounds with headroom past the data so zone labels never clip.
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    /// Explicit tick positions; everything else on the x axis is unlabeled.
    pub x_ticks: Vec<u64>,
    pub lines: Vec<LineSpec>,
    pub zones: Vec<ZoneSpan>,
}

/// Legend entry for one bar color.
#[derive(Debug, Clone)]
pub struct BarLegend {
    pub label: String,
    pub color: RGBColor,
}

/// One signed-speedup bar at a key input size.
#[derive(Debug, Clone)]
pub struct SpeedupBar {
    pub size_label: String,
    pub value: f64,
}

/// Bar chart of signed speedup percentages, colored by sign.
#[derive(Debug, Clone)]
pub struct SpeedupChart {
    pub title: String,
    pub base_name: String,
    pub bars: Vec<SpeedupBar>,
    pub y_range: Range<f64>,
    pub positive: BarLegend,
    pub negative: BarLegend,
}

/// One grouped-bar position on a latency panel: baseline vs candidate
/// latency at a size, with an optional speedup label over the candidate bar.
#[derive(Debug, Clone)]
pub struct LatencyGroup {
    pub size_label: String,
    pub baseline_ns: f64,
    pub candidate_ns: f64,
    pub speedup_label: Option<String>,
}

/// One panel of the latency comparison chart.
#[derive(Debug, Clone)]
pub struct LatencyPanel {
    pub title: String,
    pub groups: Vec<LatencyGroup>,
    pub y_max: f64,
    /// Zone span in group-index coordinates, if the panel has one.
    pub zone: Option<ZoneSpan>,
}

/// Two side-by-side grouped-bar panels comparing raw latency of two series.
#[derive(Debug, Clone)]
pub struct LatencyChart {
    pub base_name: String,
    pub panels: Vec<LatencyPanel>,
    pub baseline: BarLegend,
    pub candidate: BarLegend,
}

/// One of the three efficiency metrics, with a value per algorithm.
#[derive(Debug, Clone)]
pub struct MetricGroup {
    pub label: String,
    pub color: RGBColor,
    pub values: Vec<f64>,
}

/// Grouped bars of synthetic efficiency metrics for two algorithms.
#[derive(Debug, Clone)]
pub struct EfficiencyChart {
    pub title: String,
    pub base_name: String,
    pub categories: Vec<String>,
    pub metrics: Vec<MetricGroup>,
    pub y_max: f64,
    pub caption: String,
}

/// The closed set of charts this tool produces. Each variant carries its
/// resolved data; the renderer handles all of them through one contract.
#[derive(Debug, Clone)]
pub enum ChartSpec {
    Throughput(ThroughputChart),
    Speedup(SpeedupChart),
    Latency(LatencyChart),
    Efficiency(EfficiencyChart),
}

impl ChartSpec {
    /// Base output filename, shared by the .png and .svg artifacts.
    pub fn base_name(&self) -> &str {
        match self {
            ChartSpec::Throughput(c) => &c.base_name,
            ChartSpec::Speedup(c) => &c.base_name,
            ChartSpec::Latency(c) => &c.base_name,
            ChartSpec::Efficiency(c) => &c.base_name,
        }
    }

    /// Canvas size in pixels, identical for both output formats.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            ChartSpec::Throughput(_) => (1000, 600),
            ChartSpec::Speedup(_) => (1000, 500),
            ChartSpec::Latency(_) => (1400, 600),
            ChartSpec::Efficiency(_) => (900, 550),
        }
    }

    pub fn axis_scale(&self) -> AxisScale {
        match self {
            ChartSpec::Throughput(_) => AxisScale::LogLog,
            ChartSpec::Speedup(_) | ChartSpec::Latency(_) | ChartSpec::Efficiency(_) => {
                AxisScale::Linear
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(8), "8B");
        assert_eq!(format_size(24), "24B");
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(1024), "1KB");
        assert_eq!(format_size(4096), "4KB");
        assert_eq!(format_size(8192), "8KB");
    }

    #[test]
    fn test_format_size_non_power_of_two() {
        // 1.5KB-style sizes never appear in the tick sets, but the formatter
        // should still fall back to bytes rather than print a fraction.
        assert_eq!(format_size(1500), "1500B");
    }
}
