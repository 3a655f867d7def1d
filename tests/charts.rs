use mirror_hash_charts::{catalog, render, samples};
use std::collections::BTreeSet;

#[test]
fn test_full_pipeline_writes_both_formats_per_chart() {
    let tables = samples::benchmark_tables().unwrap();
    let charts = catalog::chart_catalog(&tables).unwrap();
    assert_eq!(charts.len(), 4);

    let dir = tempfile::tempdir().unwrap();
    for chart in &charts {
        render::render_chart(chart, dir.path()).unwrap();
    }

    for chart in &charts {
        for ext in ["png", "svg"] {
            let path = dir.path().join(format!("{}.{}", chart.base_name(), ext));
            let metadata = std::fs::metadata(&path)
                .unwrap_or_else(|_| panic!("missing artifact {}", path.display()));
            assert!(metadata.len() > 0, "empty artifact {}", path.display());
        }
    }

    // Exactly eight files: four base names, two encodings each.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 8);
}

#[test]
fn test_rerun_regenerates_the_same_filenames() {
    let tables = samples::benchmark_tables().unwrap();
    let charts = catalog::chart_catalog(&tables).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let filenames = |path: &std::path::Path| -> BTreeSet<String> {
        std::fs::read_dir(path)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    };

    for chart in &charts {
        render::render_chart(chart, dir.path()).unwrap();
    }
    let first = filenames(dir.path());

    // Re-running must overwrite in place, not accumulate or rename.
    for chart in &charts {
        render::render_chart(chart, dir.path()).unwrap();
    }
    let second = filenames(dir.path());

    assert_eq!(first, second);
    assert_eq!(first.len(), 8);
    for name in &first {
        let len = std::fs::metadata(dir.path().join(name)).unwrap().len();
        assert!(len > 0, "empty artifact {}", name);
    }
}

#[test]
fn test_output_directory_is_created_when_absent() {
    let tables = samples::benchmark_tables().unwrap();
    let charts = catalog::chart_catalog(&tables).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join("images");

    render::render_chart(&charts[0], &nested).unwrap();
    assert!(nested.join("mirror-hash-throughput.png").exists());
    assert!(nested.join("mirror-hash-throughput.svg").exists());

    // Creating it again must succeed even though it now exists.
    render::render_chart(&charts[1], &nested).unwrap();
    assert_eq!(std::fs::read_dir(&nested).unwrap().count(), 4);
}
