use crate::chart_spec::{
    format_size, BarLegend, ChartSpec, EfficiencyChart, LatencyChart, LatencyPanel, SpeedupChart,
    ThroughputChart, ZoneSpan,
};
use anyhow::{Context, Result};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use std::path::Path;

// Font sizes
// NOTE: These are intentionally large because SVGs are often viewed scaled down in browsers/docs.
const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 22;
const TICK_LABEL_FONT_SIZE: u32 = 18;
const LEGEND_FONT_SIZE: u32 = 18;
const DATA_LABEL_FONT_SIZE: u32 = 15;
const ANNOTATION_FONT_SIZE: u32 = 16;
const CAPTION_FONT_SIZE: u32 = 16;

// Layout tuning
// Keep enough space for x tick labels + x-axis title, but avoid excessive empty bottom whitespace.
const DEFAULT_MARGIN_BOTTOM: u32 = 40;
const DEFAULT_X_LABEL_AREA_SIZE: u32 = 55;

const SPEEDUP_LABEL_COLOR: RGBColor = RGBColor(0, 100, 0);

/// Label a log-axis tick only if it sits on a power of 10.
fn format_log_tick(value: f64) -> String {
    if value <= 0.0 {
        return String::new();
    }
    let log10 = value.log10();
    let nearest = log10.round();
    if (log10 - nearest).abs() < 1e-6 {
        format!("{:.0}", value)
    } else {
        String::new()
    }
}

/// Render one chart to its two output files: `{output_dir}/{base}.png` and
/// `{output_dir}/{base}.svg`.
///
/// The output directory is created if absent; existing artifacts are
/// overwritten. Both formats go through the same drawing routine so they
/// only differ in encoding.
pub fn render_chart(spec: &ChartSpec, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir).context("Failed to create output directory")?;

    let (width, height) = spec.dimensions();

    let png_path = output_dir.join(format!("{}.png", spec.base_name()));
    {
        let root = BitMapBackend::new(&png_path, (width, height)).into_drawing_area();
        draw_chart(spec, &root)?;
        root.present()
            .with_context(|| format!("Failed to write {}", png_path.display()))?;
    }
    println!("Generated: {}", png_path.display());

    let svg_path = output_dir.join(format!("{}.svg", spec.base_name()));
    {
        let root = SVGBackend::new(&svg_path, (width, height)).into_drawing_area();
        draw_chart(spec, &root)?;
        root.present()
            .with_context(|| format!("Failed to write {}", svg_path.display()))?;
    }
    println!("Generated: {}", svg_path.display());

    Ok(())
}

/// Backend-independent drawing dispatch for the closed chart set.
fn draw_chart<DB: DrawingBackend>(spec: &ChartSpec, root: &DrawingArea<DB, Shift>) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    match spec {
        ChartSpec::Throughput(chart) => draw_throughput(chart, root),
        ChartSpec::Speedup(chart) => draw_speedup(chart, root),
        ChartSpec::Latency(chart) => draw_latency(chart, root),
        ChartSpec::Efficiency(chart) => draw_efficiency(chart, root),
    }
}

/// Log-log line chart of throughput vs input size with shaded territories.
fn draw_throughput<DB: DrawingBackend>(
    spec: &ThroughputChart,
    root: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .margin_bottom(DEFAULT_MARGIN_BOTTOM)
        .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
        .y_label_area_size(80)
        .build_cartesian_2d(
            // Base-2 x scale puts the mesh key points exactly on the
            // power-of-two tick set.
            spec.x_range.clone().log_scale().base(2.0),
            spec.y_range.clone().log_scale(),
        )?;

    chart
        .configure_mesh()
        .x_labels(spec.x_ticks.len())
        .x_label_formatter(&|x| {
            let rounded = x.round() as u64;
            if (x - rounded as f64).abs() < 1e-6 && spec.x_ticks.contains(&rounded) {
                format_size(rounded)
            } else {
                String::new()
            }
        })
        .y_labels(8)
        .y_label_formatter(&|y| format_log_tick(*y))
        .x_desc("Input Size (bytes)")
        .y_desc("Throughput (GB/s)")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    // Shaded territory zones go under the data lines.
    for zone in &spec.zones {
        chart.draw_series(std::iter::once(Rectangle::new(
            [
                (zone.from, spec.y_range.start),
                (zone.to, spec.y_range.end),
            ],
            zone.color.mix(zone.alpha).filled(),
        )))?;
    }

    for line in &spec.lines {
        let color = line.color;
        chart
            .draw_series(LineSeries::new(
                line.points.clone(),
                color.stroke_width(3),
            ))?
            .label(&line.label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            });

        chart.draw_series(PointSeries::of_element(
            line.points.clone(),
            5,
            color.filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))?;
    }

    for zone in &spec.zones {
        if let Some(label) = &zone.label {
            chart.draw_series(std::iter::once(Text::new(
                label.text.clone(),
                label.at,
                ("sans-serif", ANNOTATION_FONT_SIZE)
                    .into_font()
                    .color(&label.color)
                    .pos(Pos::new(HPos::Center, VPos::Bottom)),
            )))?;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;

    Ok(())
}

/// Signed speedup bars, colored by sign, value labels clear of the zero axis.
fn draw_speedup<DB: DrawingBackend>(
    spec: &SpeedupChart,
    root: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let num_bars = spec.bars.len();

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .margin_bottom(DEFAULT_MARGIN_BOTTOM)
        .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..(num_bars as f64 - 0.5), spec.y_range.clone())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(num_bars)
        .x_label_formatter(&|x| {
            let idx = x.round() as usize;
            if idx < num_bars && (x - idx as f64).abs() < 0.3 {
                spec.bars[idx].size_label.clone()
            } else {
                String::new()
            }
        })
        .y_label_formatter(&|y| format!("{:.0}%", y))
        .x_desc("Input Size")
        .y_desc("Speedup (%)")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    // Zero baseline so the sign of each bar reads immediately.
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(-0.5, 0.0), (num_bars as f64 - 0.5, 0.0)],
        BLACK.stroke_width(1),
    )))?;

    let bar_half_width = 0.35;
    let label_offset = (spec.y_range.end - spec.y_range.start) * 0.015;

    for (idx, bar) in spec.bars.iter().enumerate() {
        let x = idx as f64;
        let color = if bar.value > 0.0 {
            spec.positive.color
        } else {
            spec.negative.color
        };

        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - bar_half_width, 0.0), (x + bar_half_width, bar.value)],
            color.filled(),
        )))?;

        // Label above positive bars, below negative ones, so the text never
        // collides with the zero axis.
        let text = if bar.value > 0.0 {
            format!("+{:.0}%", bar.value)
        } else {
            format!("{:.0}%", bar.value)
        };
        let (y, v_pos, offset) = if bar.value > 0.0 {
            (bar.value, VPos::Bottom, label_offset)
        } else {
            (bar.value, VPos::Top, -label_offset)
        };
        chart.draw_series(std::iter::once(Text::new(
            text,
            (x, y + offset),
            ("sans-serif", DATA_LABEL_FONT_SIZE)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, v_pos)),
        )))?;
    }

    for legend in [&spec.positive, &spec.negative] {
        let color = legend.color;
        chart
            .draw_series(std::iter::once(Circle::new(
                (0.0, spec.y_range.end),
                0,
                color.filled(),
            )))?
            .label(&legend.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;

    Ok(())
}

/// Two grouped-bar latency panels side by side.
fn draw_latency<DB: DrawingBackend>(
    spec: &LatencyChart,
    root: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let panels = root.split_evenly((1, spec.panels.len()));
    for (area, panel) in panels.iter().zip(&spec.panels) {
        draw_latency_panel(panel, &spec.baseline, &spec.candidate, area)?;
    }
    Ok(())
}

fn draw_latency_panel<DB: DrawingBackend>(
    panel: &LatencyPanel,
    baseline: &BarLegend,
    candidate: &BarLegend,
    area: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let num_groups = panel.groups.len();

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", TITLE_FONT_SIZE - 2))
        .margin(15)
        .margin_bottom(DEFAULT_MARGIN_BOTTOM)
        .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(num_groups as f64 - 0.5), 0.0..panel.y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(num_groups)
        .x_label_formatter(&|x| {
            let idx = x.round() as usize;
            if idx < num_groups && (x - idx as f64).abs() < 0.3 {
                panel.groups[idx].size_label.clone()
            } else {
                String::new()
            }
        })
        .x_desc("Input Size")
        .y_desc("Latency (ns)")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    if let Some(zone) = &panel.zone {
        draw_zone(&mut chart, zone, panel.y_max)?;
    }

    let bar_width = 0.35;

    for (idx, group) in panel.groups.iter().enumerate() {
        let x = idx as f64;

        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - bar_width, 0.0), (x - 0.01, group.baseline_ns)],
            baseline.color.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x + 0.01, 0.0), (x + bar_width, group.candidate_ns)],
            candidate.color.filled(),
        )))?;

        if let Some(label) = &group.speedup_label {
            chart.draw_series(std::iter::once(Text::new(
                label.clone(),
                (x + bar_width / 2.0, group.candidate_ns + panel.y_max * 0.02),
                ("sans-serif", DATA_LABEL_FONT_SIZE)
                    .into_font()
                    .color(&SPEEDUP_LABEL_COLOR)
                    .pos(Pos::new(HPos::Center, VPos::Bottom)),
            )))?;
        }
    }

    for legend in [baseline, candidate] {
        let color = legend.color;
        chart
            .draw_series(std::iter::once(Circle::new(
                (0.0, panel.y_max),
                0,
                color.filled(),
            )))?
            .label(&legend.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;

    Ok(())
}

/// Shaded zone span plus its anchored label, in the chart's own coordinates.
fn draw_zone<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    zone: &ZoneSpan,
    y_max: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    chart.draw_series(std::iter::once(Rectangle::new(
        [(zone.from, 0.0), (zone.to, y_max)],
        zone.color.mix(zone.alpha).filled(),
    )))?;

    if let Some(label) = &zone.label {
        chart.draw_series(std::iter::once(Text::new(
            label.text.clone(),
            label.at,
            ("sans-serif", ANNOTATION_FONT_SIZE)
                .into_font()
                .style(FontStyle::Italic)
                .color(&label.color)
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        )))?;
    }

    Ok(())
}

/// Grouped efficiency-metric bars for the two algorithms, with a caption
/// line drawn under the axis.
fn draw_efficiency<DB: DrawingBackend>(
    spec: &EfficiencyChart,
    root: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let num_categories = spec.categories.len();
    let num_metrics = spec.metrics.len();

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", TITLE_FONT_SIZE - 4))
        .margin(20)
        // Extra bottom margin leaves room for the caption line.
        .margin_bottom(DEFAULT_MARGIN_BOTTOM + 25)
        .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(num_categories as f64 - 0.5), 0.0..spec.y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(num_categories)
        .x_label_formatter(&|x| {
            let idx = x.round() as usize;
            if idx < num_categories && (x - idx as f64).abs() < 0.3 {
                spec.categories[idx].clone()
            } else {
                String::new()
            }
        })
        .y_desc("Count")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    let bar_width = 0.9 / num_metrics as f64;

    for (metric_idx, metric) in spec.metrics.iter().enumerate() {
        let color = metric.color;

        for (cat_idx, &value) in metric.values.iter().enumerate() {
            let x_center = cat_idx as f64
                + (metric_idx as f64 - (num_metrics as f64 - 1.0) / 2.0) * bar_width;
            let x_left = x_center - bar_width / 2.0 + 0.02;
            let x_right = x_center + bar_width / 2.0 - 0.02;

            chart.draw_series(std::iter::once(Rectangle::new(
                [(x_left, 0.0), (x_right, value)],
                color.filled(),
            )))?;

            let text = if value < 1.0 {
                format!("{:.2}", value)
            } else {
                format!("{:.1}", value)
            };
            chart.draw_series(std::iter::once(Text::new(
                text,
                (x_center, value + spec.y_max * 0.015),
                ("sans-serif", DATA_LABEL_FONT_SIZE)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Bottom)),
            )))?;
        }

        chart
            .draw_series(std::iter::once(Circle::new(
                (0.0, spec.y_max),
                0,
                color.filled(),
            )))?
            .label(&metric.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;

    let (width, height) = root.dim_in_pixel();
    root.draw(&Text::new(
        spec.caption.clone(),
        (width as i32 / 2, height as i32 - 15),
        ("sans-serif", CAPTION_FONT_SIZE)
            .into_font()
            .style(FontStyle::Italic)
            .color(&RGBColor(90, 90, 90))
            .pos(Pos::new(HPos::Center, VPos::Bottom)),
    ))?;

    Ok(())
}
