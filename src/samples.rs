use anyhow::{ensure, Result};

/// One benchmark measurement: input size in bytes, latency in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub size: u64,
    pub latency_ns: f64,
}

/// Latency measurements for one hash implementation, ordered by input size.
///
/// Different implementations may sample different size sets (GxHash has fewer
/// data points than the other two), so anything that compares two series must
/// look samples up by size value, never by position.
#[derive(Debug, Clone)]
pub struct SampleSeries {
    name: String,
    points: Vec<Sample>,
}

impl SampleSeries {
    /// Build a series from parallel size/latency tables.
    ///
    /// Validates the invariants valid benchmark data always satisfies:
    /// equal-length tables, strictly increasing sizes, strictly positive
    /// latencies. A violation fails the whole run.
    pub fn from_tables(name: &str, sizes: &[u64], latencies_ns: &[f64]) -> Result<Self> {
        ensure!(
            sizes.len() == latencies_ns.len(),
            "{}: {} sizes but {} latencies",
            name,
            sizes.len(),
            latencies_ns.len()
        );
        ensure!(!sizes.is_empty(), "{}: empty sample table", name);

        let mut points: Vec<Sample> = Vec::with_capacity(sizes.len());
        for (&size, &latency_ns) in sizes.iter().zip(latencies_ns) {
            ensure!(size > 0, "{}: input size must be positive", name);
            ensure!(
                latency_ns > 0.0,
                "{}: non-positive latency {} at {} bytes",
                name,
                latency_ns,
                size
            );
            if let Some(prev) = points.last() {
                ensure!(
                    size > prev.size,
                    "{}: sizes must be strictly increasing ({} after {})",
                    name,
                    size,
                    prev.size
                );
            }
            points.push(Sample { size, latency_ns });
        }

        Ok(Self {
            name: name.to_string(),
            points,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Sample] {
        &self.points
    }

    /// Measured latency at an exact input size, if that size was sampled.
    pub fn latency_at(&self, size: u64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.size == size)
            .map(|p| p.latency_ns)
    }
}

/// The embedded benchmark tables the chart catalog is built from.
#[derive(Debug, Clone)]
pub struct BenchmarkTables {
    pub mirror: SampleSeries,
    pub rapid: SampleSeries,
    pub gx: SampleSeries,
}

// Benchmark data from actual runs (M3 Max Pro MacBook, mirror_hash v2.1).
// Sizes in bytes, latencies in nanoseconds.
const SIZES: &[u64] = &[
    8, 16, 24, 32, 48, 64, 96, 128, 192, 256, 384, 512, 768, 1024, 2048, 4096, 8192,
];

// mirror_hash v2.1 (optimized single-state AES with overlapping read)
const MIRROR_NS: &[f64] = &[
    1.73, 1.72, 1.88, 1.88, 1.97, 2.41, 3.18, 3.50, 3.75, 4.01, 5.07, 5.88, 7.76, 9.62, 17.53,
    31.95, 61.26,
];

const RAPID_NS: &[f64] = &[
    1.34, 1.34, 1.88, 1.87, 2.15, 2.50, 3.57, 4.14, 6.27, 6.74, 9.23, 11.80, 18.73, 20.51, 40.44,
    78.22, 148.47,
];

// GxHash was benchmarked at a coarser grid of sizes.
const GX_SIZES: &[u64] = &[8, 64, 128, 256, 512, 1024, 4096, 8192];
const GX_NS: &[f64] = &[2.21, 4.02, 3.48, 4.29, 6.17, 9.91, 38.60, 79.42];

/// Build the embedded sample tables, validating them on the way in.
pub fn benchmark_tables() -> Result<BenchmarkTables> {
    Ok(BenchmarkTables {
        mirror: SampleSeries::from_tables("mirror_hash", SIZES, MIRROR_NS)?,
        rapid: SampleSeries::from_tables("rapidhash", SIZES, RAPID_NS)?,
        gx: SampleSeries::from_tables("GxHash", GX_SIZES, GX_NS)?,
    })
}
