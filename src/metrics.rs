use crate::samples::SampleSeries;
use anyhow::{bail, Result};

/// Convert a latency series into throughput points.
///
/// Sizes are bytes and latencies nanoseconds, so the quotient is directly
/// GB/s with no conversion constant. Positive latency is guaranteed by
/// series construction.
pub fn throughput(series: &SampleSeries) -> Vec<(u64, f64)> {
    series
        .points()
        .iter()
        .map(|p| (p.size, p.size as f64 / p.latency_ns))
        .collect()
}

/// Measured latency at an exact input size.
///
/// Missing sizes are a data-consistency error, not a case for interpolation
/// or a default value.
pub fn latency_at(series: &SampleSeries, size: u64) -> Result<f64> {
    match series.latency_at(size) {
        Some(latency_ns) => Ok(latency_ns),
        None => bail!("{} has no sample at {} bytes", series.name(), size),
    }
}

/// Relative latency advantage of `candidate` over `baseline` at one input
/// size, as a percentage. Positive means the candidate is faster.
///
/// Both series must have a sample at exactly `size`; the lookup fails
/// otherwise so a mismatched grid can never corrupt a comparison chart.
pub fn speedup_at(baseline: &SampleSeries, candidate: &SampleSeries, size: u64) -> Result<f64> {
    let baseline_ns = latency_at(baseline, size)?;
    let candidate_ns = latency_at(candidate, size)?;
    Ok((baseline_ns / candidate_ns - 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::benchmark_tables;
    use proptest::prelude::*;

    fn series(name: &str, sizes: &[u64], ns: &[f64]) -> SampleSeries {
        SampleSeries::from_tables(name, sizes, ns).unwrap()
    }

    #[test]
    fn test_throughput_is_size_over_latency() {
        let s = series("s", &[8, 1024], &[2.0, 8.0]);
        let tp = throughput(&s);
        assert_eq!(tp, vec![(8, 4.0), (1024, 128.0)]);
    }

    #[test]
    fn test_mirror_throughput_is_monotone() {
        // Sanity bound on the embedded data: mirror_hash latency scales
        // sub-linearly, so its throughput never decreases with size.
        let tables = benchmark_tables().unwrap();
        let tp = throughput(&tables.mirror);
        for pair in tp.windows(2) {
            assert!(
                pair[1].1 >= pair[0].1,
                "throughput dropped between {}B and {}B",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn test_double_latency_is_exactly_100_percent() {
        let baseline = series("a", &[64], &[5.0]);
        let candidate = series("b", &[64], &[2.5]);
        assert_eq!(speedup_at(&baseline, &candidate, 64).unwrap(), 100.0);
    }

    #[test]
    fn test_speedup_at_64_bytes() {
        let baseline = series("a", &[64], &[2.50]);
        let candidate = series("b", &[64], &[2.41]);
        let s = speedup_at(&baseline, &candidate, 64).unwrap();
        assert!((s - 3.73).abs() < 0.01, "got {}", s);
    }

    #[test]
    fn test_missing_size_fails_lookup() {
        let tables = benchmark_tables().unwrap();

        // 16B exists in the baseline grid but not in GxHash's.
        let err = speedup_at(&tables.rapid, &tables.gx, 16).unwrap_err();
        assert!(err.to_string().contains("GxHash"));
        assert!(err.to_string().contains("16 bytes"));

        let err = speedup_at(&tables.gx, &tables.rapid, 16).unwrap_err();
        assert!(err.to_string().contains("GxHash"));
    }

    proptest! {
        #[test]
        fn prop_speedup_is_antisymmetric(a in 0.01f64..10_000.0, b in 0.01f64..10_000.0) {
            let s_a = series("a", &[64], &[a]);
            let s_b = series("b", &[64], &[b]);
            let ab = speedup_at(&s_a, &s_b, 64).unwrap();
            let ba = speedup_at(&s_b, &s_a, 64).unwrap();
            let product = (1.0 + ab / 100.0) * (1.0 + ba / 100.0);
            prop_assert!((product - 1.0).abs() < 1e-9);
        }
    }
}
