use crate::chart_spec::{
    format_size, BarLegend, ChartSpec, EfficiencyChart, LatencyChart, LatencyGroup, LatencyPanel,
    LineSpec, MetricGroup, SpeedupBar, SpeedupChart, ThroughputChart, ZoneLabel, ZoneSpan,
};
use crate::metrics;
use crate::samples::{BenchmarkTables, SampleSeries};
use anyhow::Result;
use plotters::style::RGBColor;

/// Color palette, matching the blog post's scheme.
const MIRROR_COLOR: RGBColor = RGBColor(46, 204, 113); // green
const RAPID_COLOR: RGBColor = RGBColor(52, 152, 219); // blue
const GX_COLOR: RGBColor = RGBColor(231, 76, 60); // red

const DARK_GREEN: RGBColor = RGBColor(0, 100, 0);
const DARK_RED: RGBColor = RGBColor(139, 0, 0);

/// Sizes picked for the speedup bar chart; every one of them is sampled by
/// both mirror_hash and rapidhash.
const KEY_SIZES: &[u64] = &[8, 32, 64, 128, 256, 512, 1024, 4096, 8192];

const SMALL_SIZES: &[u64] = &[8, 16, 24, 32, 48, 64];
const LARGE_SIZES: &[u64] = &[128, 256, 512, 1024, 2048, 4096, 8192];

/// Build the full chart catalog from a set of benchmark tables.
///
/// All metric derivation happens here, up front; a size referenced by a
/// chart but missing from a series aborts catalog construction.
pub fn chart_catalog(tables: &BenchmarkTables) -> Result<Vec<ChartSpec>> {
    Ok(vec![
        ChartSpec::Throughput(throughput_chart(tables)),
        ChartSpec::Speedup(speedup_chart(tables)?),
        ChartSpec::Latency(latency_chart(tables)?),
        ChartSpec::Efficiency(efficiency_chart()),
    ])
}

fn throughput_line(series: &SampleSeries, color: RGBColor) -> LineSpec {
    LineSpec {
        label: series.name().to_string(),
        color,
        points: metrics::throughput(series)
            .into_iter()
            .map(|(size, gbps)| (size as f64, gbps))
            .collect(),
    }
}

/// Chart 1: log-log throughput comparison with territory annotations.
fn throughput_chart(tables: &BenchmarkTables) -> ThroughputChart {
    ThroughputChart {
        title: "Hash Function Throughput: mirror_hash vs rapidhash vs GxHash".to_string(),
        base_name: "mirror-hash-throughput".to_string(),
        x_range: 6.0..10_000.0,
        y_range: 1.0..200.0,
        x_ticks: vec![8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192],
        lines: vec![
            throughput_line(&tables.mirror, MIRROR_COLOR),
            throughput_line(&tables.rapid, RAPID_COLOR),
            throughput_line(&tables.gx, GX_COLOR),
        ],
        zones: vec![
            ZoneSpan {
                from: 8.0,
                to: 16.0,
                color: RAPID_COLOR,
                alpha: 0.15,
                label: Some(ZoneLabel {
                    text: "Small (~even)".to_string(),
                    at: (11.0, 2.0),
                    color: RGBColor(80, 80, 80),
                }),
            },
            ZoneSpan {
                from: 17.0,
                to: 48.0,
                color: GX_COLOR,
                alpha: 0.15,
                label: Some(ZoneLabel {
                    text: "Transition (rapidhash wins)".to_string(),
                    at: (32.0, 3.0),
                    color: DARK_RED,
                }),
            },
            ZoneSpan {
                from: 64.0,
                to: 8192.0,
                color: MIRROR_COLOR,
                alpha: 0.08,
                label: Some(ZoneLabel {
                    text: "AES territory (mirror_hash wins)".to_string(),
                    at: (400.0, 15.0),
                    color: DARK_GREEN,
                }),
            },
        ],
    }
}

/// Chart 2: signed speedup of mirror_hash over rapidhash at key sizes.
fn speedup_chart(tables: &BenchmarkTables) -> Result<SpeedupChart> {
    let mut bars = Vec::with_capacity(KEY_SIZES.len());
    for &size in KEY_SIZES {
        bars.push(SpeedupBar {
            size_label: format_size(size),
            value: metrics::speedup_at(&tables.rapid, &tables.mirror, size)?,
        });
    }

    Ok(SpeedupChart {
        title: "mirror_hash Speedup vs rapidhash".to_string(),
        base_name: "mirror-hash-speedup".to_string(),
        bars,
        y_range: -80.0..200.0,
        positive: BarLegend {
            label: "mirror_hash wins".to_string(),
            color: MIRROR_COLOR,
        },
        negative: BarLegend {
            label: "rapidhash wins".to_string(),
            color: RAPID_COLOR,
        },
    })
}

fn latency_groups(
    tables: &BenchmarkTables,
    sizes: &[u64],
    with_speedup_labels: bool,
) -> Result<Vec<LatencyGroup>> {
    let mut groups = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let speedup_label = if with_speedup_labels {
            let speedup = metrics::speedup_at(&tables.rapid, &tables.mirror, size)?;
            Some(format!("+{:.0}%", speedup))
        } else {
            None
        };
        groups.push(LatencyGroup {
            size_label: format_size(size),
            baseline_ns: metrics::latency_at(&tables.rapid, size)?,
            candidate_ns: metrics::latency_at(&tables.mirror, size)?,
            speedup_label,
        });
    }
    Ok(groups)
}

/// Chart 3: small-input and large-input latency panels, side by side.
fn latency_chart(tables: &BenchmarkTables) -> Result<LatencyChart> {
    let small = LatencyPanel {
        title: "Small Inputs: The Transition Zone".to_string(),
        groups: latency_groups(tables, SMALL_SIZES, false)?,
        // Headroom above the ~2.5ns data so the zone label fits.
        y_max: 4.5,
        zone: Some(ZoneSpan {
            // Group-index coordinates: spans the 16B..48B bar groups.
            from: 1.5,
            to: 4.5,
            color: GX_COLOR,
            alpha: 0.2,
            label: Some(ZoneLabel {
                text: "Transition Zone (17-48B)".to_string(),
                at: (3.0, 3.8),
                color: DARK_RED,
            }),
        }),
    };

    let large = LatencyPanel {
        title: "Large Inputs: AES Acceleration Wins".to_string(),
        groups: latency_groups(tables, LARGE_SIZES, true)?,
        // rapidhash tops out at ~148ns at 8KB.
        y_max: 190.0,
        zone: None,
    };

    Ok(LatencyChart {
        base_name: "mirror-hash-latency".to_string(),
        panels: vec![small, large],
        baseline: BarLegend {
            label: "rapidhash".to_string(),
            color: RAPID_COLOR,
        },
        candidate: BarLegend {
            label: "mirror_hash".to_string(),
            color: MIRROR_COLOR,
        },
    })
}

/// Chart 4: instruction-level efficiency of the two mixing primitives.
///
/// The numbers are per 16 bytes of mixing: a 128-bit multiply mix takes
/// ~3 instructions and ~4.5 cycles, an AESE+AESMC pair fuses into ~2 cycles
/// on Apple Silicon.
fn efficiency_chart() -> EfficiencyChart {
    let instructions = vec![3.0, 2.0];
    let cycles = vec![4.5, 2.0];
    let bytes_per_round = 16.0;
    let cycles_per_byte: Vec<f64> = cycles.iter().map(|c| c / bytes_per_round).collect();

    EfficiencyChart {
        title: "Why AES is Faster: Instruction Efficiency (per 16 bytes of mixing)".to_string(),
        base_name: "mirror-hash-instructions".to_string(),
        categories: vec![
            "rapidhash (128-bit multiply)".to_string(),
            "mirror_hash (AES round)".to_string(),
        ],
        metrics: vec![
            MetricGroup {
                label: "Instructions".to_string(),
                color: RAPID_COLOR,
                values: instructions,
            },
            MetricGroup {
                label: "Cycles (approx)".to_string(),
                color: GX_COLOR,
                values: cycles,
            },
            MetricGroup {
                label: "Cycles/Byte".to_string(),
                color: MIRROR_COLOR,
                values: cycles_per_byte,
            },
        ],
        y_max: 5.5,
        caption: "AES uses dedicated silicon: AESE+AESMC fuse into ~2 cycles on Apple Silicon"
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_spec::AxisScale;
    use crate::samples::benchmark_tables;

    #[test]
    fn test_catalog_has_four_charts_with_unique_names() {
        let tables = benchmark_tables().unwrap();
        let charts = chart_catalog(&tables).unwrap();
        assert_eq!(charts.len(), 4);

        let mut names: Vec<&str> = charts.iter().map(|c| c.base_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_throughput_chart_is_log_log() {
        let tables = benchmark_tables().unwrap();
        let charts = chart_catalog(&tables).unwrap();
        assert_eq!(charts[0].axis_scale(), AxisScale::LogLog);
        assert_eq!(charts[1].axis_scale(), AxisScale::Linear);
    }

    #[test]
    fn test_speedup_bars_cover_key_sizes_with_expected_signs() {
        let tables = benchmark_tables().unwrap();
        let chart = speedup_chart(&tables).unwrap();
        assert_eq!(chart.bars.len(), 9);

        // rapidhash wins at 8B, mirror_hash wins from 64B up.
        assert!(chart.bars[0].value < 0.0);
        assert!(chart.bars[2].value > 0.0);
        assert!(chart.bars[8].value > 100.0);

        // Bars must stay inside the fixed axis bounds.
        for bar in &chart.bars {
            assert!(bar.value > chart.y_range.start && bar.value < chart.y_range.end);
        }
    }

    #[test]
    fn test_latency_panels_label_large_sizes_only() {
        let tables = benchmark_tables().unwrap();
        let chart = latency_chart(&tables).unwrap();
        assert_eq!(chart.panels.len(), 2);
        assert_eq!(chart.panels[0].groups.len(), 6);
        assert_eq!(chart.panels[1].groups.len(), 7);

        assert!(chart.panels[0].groups.iter().all(|g| g.speedup_label.is_none()));
        assert!(chart.panels[1].groups.iter().all(|g| g.speedup_label.is_some()));
        assert_eq!(
            chart.panels[1].groups[0].speedup_label.as_deref(),
            Some("+18%")
        );
    }

    #[test]
    fn test_catalog_fails_on_missing_size() {
        // A candidate series with a coarser grid than the key-size list must
        // abort catalog construction rather than chart a default.
        let tables = benchmark_tables().unwrap();
        let sparse = BenchmarkTables {
            mirror: tables.gx.clone(),
            rapid: tables.rapid.clone(),
            gx: tables.gx.clone(),
        };
        let err = chart_catalog(&sparse).unwrap_err();
        assert!(err.to_string().contains("no sample at"));
    }
}
