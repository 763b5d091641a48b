//! PNG charts for each analysis, rendered with `plotters`.

use crate::error::{RefscanError, Result};
use crate::model::ClassificationStats;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;
use std::path::Path;

pub const NORMAL_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xdb);
pub const REFACTORING_COLOR: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
pub const KEYWORD_COLOR: RGBColor = RGBColor(0x9b, 0x59, 0xb6);

const FONT: &str = "sans-serif";

/// Canvas and typography shared by every chart.
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub caption_size: u32,
    pub font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            caption_size: 26,
            font_size: 15,
            margin: 15,
            label_area_size: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A labelled bar chart; bars are drawn in the order given.
pub struct BarChart<'a> {
    pub title: &'a str,
    pub category_desc: &'a str,
    pub value_desc: &'a str,
    pub bars: Vec<(String, usize)>,
    pub color: RGBColor,
    pub orientation: Orientation,
}

fn chart_err<E: std::fmt::Display>(e: E) -> RefscanError {
    RefscanError::Chart(e.to_string())
}

fn prepare(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Upper bound for a count axis, with headroom for value labels.
pub fn axis_max(values: impl IntoIterator<Item = usize>) -> u32 {
    let max = values.into_iter().max().unwrap_or(0) as f64;
    ((max * 1.15).ceil() as u32).max(1)
}

pub fn render_bar_chart(path: &Path, chart: &BarChart<'_>, style: &ChartStyle) -> Result<()> {
    prepare(path)?;
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    match chart.orientation {
        Orientation::Vertical => draw_vertical(&root, chart, style)?,
        Orientation::Horizontal => draw_horizontal(&root, chart, style)?,
    }

    root.present().map_err(chart_err)?;
    tracing::info!(path = %path.display(), "chart saved");
    Ok(())
}

fn draw_vertical(
    root: &DrawingArea<BitMapBackend, Shift>,
    chart: &BarChart<'_>,
    style: &ChartStyle,
) -> Result<()> {
    let n = chart.bars.len().max(1) as u32;
    let y_max = axis_max(chart.bars.iter().map(|(_, v)| *v));
    let labels: Vec<String> = chart.bars.iter().map(|(l, _)| l.clone()).collect();

    let mut ctx = ChartBuilder::on(root)
        .caption(chart.title, (FONT, style.caption_size).into_font())
        .margin(style.margin)
        .x_label_area_size(style.label_area_size)
        .y_label_area_size(style.label_area_size)
        .build_cartesian_2d((0u32..n).into_segmented(), 0u32..y_max)
        .map_err(chart_err)?;

    let label_of = |v: &SegmentValue<u32>| segment_label(&labels, v);
    ctx.configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(BLACK.mix(0.15))
        .x_labels(labels.len().max(1))
        .x_label_formatter(&label_of)
        .x_desc(chart.category_desc)
        .y_desc(chart.value_desc)
        .label_style((FONT, style.font_size).into_font())
        .draw()
        .map_err(chart_err)?;

    ctx.draw_series(
        Histogram::vertical(&ctx)
            .style(chart.color.mix(0.8).filled())
            .margin(8)
            .data(chart.bars.iter().enumerate().map(|(i, (_, v))| (i as u32, *v as u32))),
    )
    .map_err(chart_err)?;

    Ok(())
}

fn draw_horizontal(
    root: &DrawingArea<BitMapBackend, Shift>,
    chart: &BarChart<'_>,
    style: &ChartStyle,
) -> Result<()> {
    let n = chart.bars.len().max(1) as u32;
    let x_max = axis_max(chart.bars.iter().map(|(_, v)| *v));
    // first bar at the top
    let labels: Vec<String> = chart.bars.iter().rev().map(|(l, _)| l.clone()).collect();

    let mut ctx = ChartBuilder::on(root)
        .caption(chart.title, (FONT, style.caption_size).into_font())
        .margin(style.margin)
        .x_label_area_size(style.label_area_size)
        .y_label_area_size(style.label_area_size * 4)
        .build_cartesian_2d(0u32..x_max, (0u32..n).into_segmented())
        .map_err(chart_err)?;

    let label_of = |v: &SegmentValue<u32>| segment_label(&labels, v);
    ctx.configure_mesh()
        .disable_y_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(BLACK.mix(0.15))
        .y_labels(labels.len().max(1))
        .y_label_formatter(&label_of)
        .x_desc(chart.value_desc)
        .y_desc(chart.category_desc)
        .label_style((FONT, style.font_size).into_font())
        .draw()
        .map_err(chart_err)?;

    let last = chart.bars.len().saturating_sub(1) as u32;
    ctx.draw_series(
        Histogram::horizontal(&ctx)
            .style(chart.color.mix(0.8).filled())
            .margin(6)
            .data(chart.bars.iter().enumerate().map(|(i, (_, v))| (last - i as u32, *v as u32))),
    )
    .map_err(chart_err)?;

    Ok(())
}

fn segment_label(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Start and end angles (radians, counter-clockwise from 12 o'clock) of each
/// pie slice.
pub fn pie_angles(values: &[usize]) -> Vec<(f64, f64)> {
    let total: usize = values.iter().sum();
    let mut start = PI / 2.0;
    values
        .iter()
        .map(|&v| {
            let sweep = if total == 0 {
                0.0
            } else {
                v as f64 / total as f64 * 2.0 * PI
            };
            let slice = (start, start + sweep);
            start += sweep;
            slice
        })
        .collect()
}

/// Pie of normal vs refactoring commits next to a bar chart of the counts.
pub fn render_classification(
    path: &Path,
    stats: &ClassificationStats,
    style: &ChartStyle,
) -> Result<()> {
    prepare(path)?;
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let root = root
        .titled(
            &format!("Commit classification (total: {} commits)", stats.total),
            (FONT, style.caption_size).into_font(),
        )
        .map_err(chart_err)?;

    let (left, right) = root.split_horizontally(style.width / 2);
    draw_pie(&left, stats, style)?;
    draw_split_bars(&right, stats, style)?;

    root.present().map_err(chart_err)?;
    tracing::info!(path = %path.display(), "chart saved");
    Ok(())
}

fn draw_pie(
    area: &DrawingArea<BitMapBackend, Shift>,
    stats: &ClassificationStats,
    style: &ChartStyle,
) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let center = (w as f64 / 2.0, h as f64 / 2.0);
    let radius = w.min(h) as f64 * 0.32;

    let slices = [
        ("Normal", stats.normal, stats.normal_percentage(), NORMAL_COLOR, 0.0),
        ("Refactoring/Style", stats.refactoring, stats.percentage, REFACTORING_COLOR, 0.1),
    ];
    let angles = pie_angles(&[stats.normal, stats.refactoring]);
    let label_style = (FONT, style.font_size + 2)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for ((label, count, pct, color, explode), (start, end)) in slices.into_iter().zip(angles) {
        if count == 0 {
            continue;
        }
        let mid = (start + end) / 2.0;
        let offset = (radius * explode * mid.cos(), -radius * explode * mid.sin());
        let cx = center.0 + offset.0;
        let cy = center.1 + offset.1;

        let steps = (((end - start) / (2.0 * PI)) * 360.0).ceil().max(2.0) as usize;
        let mut points = vec![(cx as i32, cy as i32)];
        for s in 0..=steps {
            let a = start + (end - start) * s as f64 / steps as f64;
            points.push(((cx + radius * a.cos()) as i32, (cy - radius * a.sin()) as i32));
        }
        area.draw(&Polygon::new(points, color.filled()))
            .map_err(chart_err)?;

        let outer = (
            (cx + radius * 1.2 * mid.cos()) as i32,
            (cy - radius * 1.2 * mid.sin()) as i32,
        );
        let inner = (
            (cx + radius * 0.6 * mid.cos()) as i32,
            (cy - radius * 0.6 * mid.sin()) as i32,
        );
        area.draw(&Text::new(label.to_string(), outer, label_style.clone()))
            .map_err(chart_err)?;
        area.draw(&Text::new(format!("{pct:.2}%"), inner, label_style.clone()))
            .map_err(chart_err)?;
    }
    Ok(())
}

fn draw_split_bars(
    area: &DrawingArea<BitMapBackend, Shift>,
    stats: &ClassificationStats,
    style: &ChartStyle,
) -> Result<()> {
    let labels = vec!["Normal".to_string(), "Refactoring/Style".to_string()];
    let bars = [
        (stats.normal, stats.normal_percentage(), NORMAL_COLOR),
        (stats.refactoring, stats.percentage, REFACTORING_COLOR),
    ];
    let y_max = axis_max(bars.iter().map(|(v, _, _)| *v));

    let mut ctx = ChartBuilder::on(area)
        .margin(style.margin)
        .x_label_area_size(style.label_area_size / 2)
        .y_label_area_size(style.label_area_size)
        .build_cartesian_2d((0u32..2u32).into_segmented(), 0u32..y_max)
        .map_err(chart_err)?;

    let label_of = |v: &SegmentValue<u32>| segment_label(&labels, v);
    ctx.configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(BLACK.mix(0.15))
        .x_labels(2)
        .x_label_formatter(&label_of)
        .y_desc("Commits")
        .label_style((FONT, style.font_size).into_font())
        .draw()
        .map_err(chart_err)?;

    for (i, (count, _, color)) in bars.iter().enumerate() {
        ctx.draw_series(
            Histogram::vertical(&ctx)
                .style(color.mix(0.8).filled())
                .margin(20)
                .data(std::iter::once((i as u32, *count as u32))),
        )
        .map_err(chart_err)?;
    }

    let value_style = (FONT, style.font_size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    ctx.draw_series(bars.iter().enumerate().map(|(i, (count, pct, _))| {
        Text::new(
            format!("{count} ({pct:.2}%)"),
            (SegmentValue::CenterOf(i as u32), *count as u32),
            value_style.clone(),
        )
    }))
    .map_err(chart_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn axis_max_leaves_headroom() {
        assert_eq!(axis_max(vec![100]), 115);
        assert_eq!(axis_max(vec![1, 3]), 4);
    }

    #[test]
    fn axis_max_of_nothing_is_one() {
        assert_eq!(axis_max(Vec::new()), 1);
        assert_eq!(axis_max(vec![0]), 1);
    }

    #[test]
    fn pie_slices_cover_the_circle() {
        let angles = pie_angles(&[1, 3]);
        assert_eq!(angles.len(), 2);
        assert!((angles[0].0 - PI / 2.0).abs() < 1e-12);
        assert!((angles[0].1 - angles[1].0).abs() < 1e-12);
        assert!((angles[1].1 - angles[0].0 - 2.0 * PI).abs() < 1e-12);
        assert!((angles[0].1 - angles[0].0 - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_pie_has_no_sweep() {
        let angles = pie_angles(&[0, 0]);
        assert!(angles.iter().all(|(s, e)| s == e));
    }

    #[test]
    fn segment_labels_map_centres_only() {
        let labels = vec!["2019".to_string(), "2020".to_string()];
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(1)), "2020");
        assert_eq!(segment_label(&labels, &SegmentValue::Exact(1)), "");
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(5)), "");
    }
}
