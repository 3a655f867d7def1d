use anyhow::Result;
use clap::Parser;
use mirror_hash_charts::{catalog, render, samples};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mirror-hash-charts")]
#[command(about = "Generates performance comparison charts for the mirror_hash blog post")]
#[command(
    after_help = "Benchmark tables, chart styling, and output filenames are compiled in; \
                  the output directory is the only runtime knob."
)]
struct Cli {
    /// Output directory for the rendered charts
    #[arg(short, long, default_value = "./images")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let tables = samples::benchmark_tables()?;
    let charts = catalog::chart_catalog(&tables)?;

    println!("Generating blog charts...");
    for chart in &charts {
        render::render_chart(chart, &cli.output)?;
    }

    println!("\nAll charts generated successfully!");
    println!("Output directory: {}", cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_bare_invocation_needs_no_arguments() {
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["mirror-hash-charts"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("./images"));
    }
}
