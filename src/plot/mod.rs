// src/plot/mod.rs
pub mod fit;

use anyhow::anyhow;
use ndarray::Array2;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

use crate::axes::{Axis, Marker, SCENARIO_AXIS, SSP_COLORS, WARMING_AXIS, WARMING_MARKERS};
use crate::data::IncomeGroup;
use crate::growth::GrowthRateTable;
pub use fit::{linear_fit, spread_labels};

type PlotResult<T = ()> = Result<T, Box<dyn Error>>;
type PanelCoord = Cartesian2d<TickedAxis, TickedAxis>;

const Y_MIN: f64 = -1.0;
const Y_MAX: f64 = 5.5;
const X_MAX_WARMING: f64 = 6.0;
const X_MAX_GROWTH: f64 = 3.0;
const LABEL_SPACING: f64 = 0.25;
const LIGHT_GRAY: RGBColor = RGBColor(211, 211, 211);

/// Left column first.
pub const PANEL_GROUPS: [IncomeGroup; 2] = [IncomeGroup::Low, IncomeGroup::High];

/// How axis ticks and line-end labels are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// %/yr and °C/century values.
    Numeric,
    /// SSP1-5 and RCP2.6-8.5.
    Scenario,
}

/// The two scenario axes a panel plot is drawn against.
#[derive(Debug, Clone, Copy)]
pub struct PanelAxes {
    pub scenario: &'static Axis,
    pub warming: &'static Axis,
}

impl Default for PanelAxes {
    fn default() -> Self {
        Self {
            scenario: &SCENARIO_AXIS,
            warming: &WARMING_AXIS,
        }
    }
}

/// Draw the 2x2 panel to a PNG at `path`, replacing any existing file.
///
/// Top row: growth vs warming, one fitted line per SSP. Bottom row: growth
/// vs baseline growth, one grey fitted line per warming level. Low-income on
/// the left, high-income on the right.
#[tracing::instrument(level = "info", skip(rates, axes, path), fields(path = %path.as_ref().display()))]
pub fn render_panel_plot<P: AsRef<Path>>(
    rates: &GrowthRateTable,
    axes: PanelAxes,
    style: LabelStyle,
    path: P,
    size: (u32, u32),
) -> anyhow::Result<()> {
    let expected = (axes.scenario.len(), axes.warming.len());
    for group in PANEL_GROUPS {
        let dim = rates.scenario_percent(group).dim();
        if dim != expected {
            return Err(anyhow!(
                "{} has {:?} scenario cells, axes describe {:?}",
                group,
                dim,
                expected
            ));
        }
    }
    draw_panels(rates, axes, style, path.as_ref(), size)
        .map_err(|e| anyhow!("drawing panel plot: {}", e))
}

fn draw_panels(
    rates: &GrowthRateTable,
    axes: PanelAxes,
    style: LabelStyle,
    path: &Path,
    size: (u32, u32),
) -> PlotResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 2));

    for (col, group) in PANEL_GROUPS.into_iter().enumerate() {
        let data = rates.scenario_percent(group);
        draw_warming_panel(&panels[col], group, &data, axes, style)?;
        draw_baseline_panel(&panels[2 + col], &data, axes, style)?;
        debug!(group = %group, "panels drawn");
    }

    root.present()?;
    Ok(())
}

/// A linear f64 axis whose ticks sit exactly at the given values.
///
/// Uses the default formatting option so the mesh accepts it; the panels
/// always install their own label formatter.
#[derive(Clone)]
struct TickedAxis {
    coord: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickedAxis {
    fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        let ticks = ticks
            .into_iter()
            .filter(|t| range.contains(t))
            .collect();
        Self {
            coord: range.into(),
            ticks,
        }
    }
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.coord.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.coord.range()
    }
}

fn y_ticks() -> Vec<f64> {
    (-1..=5).map(f64::from).collect()
}

/// Tick text: the number itself, or the scenario name whose value it is.
fn tick_label(x: f64, axis: &Axis, style: LabelStyle) -> String {
    if style == LabelStyle::Scenario {
        if let Some(p) = axis.points().iter().find(|p| (p.value - x).abs() < 1e-9) {
            return p.scenario.to_string();
        }
    }
    if x.fract() == 0.0 {
        format!("{:.0}", x)
    } else {
        format!("{:.2}", x)
    }
}

fn axis_keys(axis: &Axis, style: LabelStyle, numeric: Vec<f64>) -> Vec<f64> {
    match style {
        LabelStyle::Numeric => numeric,
        LabelStyle::Scenario => {
            let mut keys = axis.values();
            keys.sort_by(f64::total_cmp);
            keys
        }
    }
}

fn end_label(value: f64, name: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Numeric => format!("{:.2}", value),
        LabelStyle::Scenario => name.to_string(),
    }
}

fn label_font(size: f64, color: RGBColor, v: VPos) -> TextStyle<'static> {
    ("sans-serif", size)
        .into_font()
        .color(&color)
        .pos(Pos::new(HPos::Left, v))
}

fn draw_zero_line(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, PanelCoord>,
    x_max: f64,
) -> PlotResult {
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, 0.0), (x_max, 0.0)],
        BLACK.stroke_width(1),
    )))?;
    Ok(())
}

fn draw_points(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, PanelCoord>,
    marker: Marker,
    points: Vec<(f64, f64)>,
    color: RGBColor,
) -> PlotResult {
    let style = color.filled();
    match marker {
        Marker::Circle => {
            chart.draw_series(points.into_iter().map(|p| Circle::new(p, 5, style)))?;
        }
        Marker::Square => {
            chart.draw_series(
                points
                    .into_iter()
                    .map(|p| EmptyElement::at(p) + Rectangle::new([(-5, -5), (5, 5)], style)),
            )?;
        }
        Marker::Triangle => {
            chart.draw_series(points.into_iter().map(|p| TriangleMarker::new(p, 6, style)))?;
        }
        Marker::Diamond => {
            chart.draw_series(points.into_iter().map(|p| {
                EmptyElement::at(p) + Polygon::new(vec![(0, -6), (6, 0), (0, 6), (-6, 0)], style)
            }))?;
        }
    }
    Ok(())
}

/// Growth rate against warming; one line per SSP.
fn draw_warming_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    group: IncomeGroup,
    data: &Array2<f64>,
    axes: PanelAxes,
    style: LabelStyle,
) -> PlotResult {
    let warming = axes.warming;
    let x_keys = axis_keys(warming, style, (0..=7).map(f64::from).collect());
    let x_desc = match style {
        LabelStyle::Numeric => "Global mean warming (°C)",
        LabelStyle::Scenario => "Warming scenario",
    };

    let mut chart = ChartBuilder::on(area)
        .caption(group.countries_label(), ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            TickedAxis::new(0.0..X_MAX_WARMING + 1.0, x_keys),
            TickedAxis::new(Y_MIN..Y_MAX, y_ticks()),
        )?;

    let fmt_x = |x: &f64| tick_label(*x, warming, style);
    let fmt_y = |y: &f64| format!("{:.0}", y);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc("GDP growth rate (%/year)")
        .x_label_formatter(&fmt_x)
        .y_label_formatter(&fmt_y)
        .draw()?;
    draw_zero_line(&mut chart, X_MAX_WARMING + 1.0)?;

    let xs = warming.values();
    for (ssp, point) in axes.scenario.points().iter().enumerate() {
        let color = SSP_COLORS[ssp % SSP_COLORS.len()];
        let ys: Vec<f64> = data.row(ssp).to_vec();

        let (slope, intercept) = linear_fit(&xs, &ys).ok_or("degenerate warming fit")?;
        chart.draw_series(LineSeries::new(
            vec![(0.0, intercept), (X_MAX_WARMING, slope * X_MAX_WARMING + intercept)],
            color.stroke_width(1),
        ))?;

        for (w, (&x, &y)) in xs.iter().zip(&ys).enumerate() {
            draw_points(&mut chart, WARMING_MARKERS[w % WARMING_MARKERS.len()], vec![(x, y)], color)?;
        }

        chart.draw_series(std::iter::once(Text::new(
            end_label(point.value, point.scenario, style),
            (X_MAX_WARMING + 0.1, slope * X_MAX_WARMING + intercept),
            label_font(13.0, color, VPos::Center),
        )))?;
    }

    let header = match style {
        LabelStyle::Numeric => axes.scenario.unit,
        LabelStyle::Scenario => "SSP",
    };
    chart.draw_series(std::iter::once(Text::new(
        header,
        (X_MAX_WARMING + 0.1, Y_MAX - 0.15),
        label_font(13.0, BLACK, VPos::Top),
    )))?;
    Ok(())
}

/// Growth rate against baseline growth; one grey line per warming level.
fn draw_baseline_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    data: &Array2<f64>,
    axes: PanelAxes,
    style: LabelStyle,
) -> PlotResult {
    let scenario = axes.scenario;
    let x_keys = axis_keys(scenario, style, (0..=3).map(f64::from).collect());
    let x_desc = match style {
        LabelStyle::Numeric => "Baseline growth rate (%/year)",
        LabelStyle::Scenario => "Economic scenario",
    };

    let mut chart = ChartBuilder::on(area)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            TickedAxis::new(0.0..X_MAX_GROWTH + 1.2, x_keys),
            TickedAxis::new(Y_MIN..Y_MAX, y_ticks()),
        )?;

    let fmt_x = |x: &f64| tick_label(*x, scenario, style);
    let fmt_y = |y: &f64| format!("{:.0}", y);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc("GDP growth rate (%/year)")
        .x_label_formatter(&fmt_x)
        .y_label_formatter(&fmt_y)
        .draw()?;
    draw_zero_line(&mut chart, X_MAX_GROWTH + 1.2)?;

    let xs = scenario.values();
    let mut labels = Vec::with_capacity(axes.warming.len());
    for (w, point) in axes.warming.points().iter().enumerate() {
        let ys: Vec<f64> = data.column(w).to_vec();
        let (slope, intercept) = linear_fit(&xs, &ys).ok_or("degenerate baseline fit")?;
        chart.draw_series(LineSeries::new(
            vec![(0.0, intercept), (X_MAX_GROWTH, slope * X_MAX_GROWTH + intercept)],
            LIGHT_GRAY.stroke_width(1),
        ))?;
        labels.push((
            slope * X_MAX_GROWTH + intercept,
            end_label(point.value, point.scenario, style),
        ));
    }

    for (ssp, &x) in xs.iter().enumerate() {
        let color = SSP_COLORS[ssp % SSP_COLORS.len()];
        for (w, &y) in data.row(ssp).iter().enumerate() {
            draw_points(&mut chart, WARMING_MARKERS[w % WARMING_MARKERS.len()], vec![(x, y)], color)?;
        }
    }

    let labels = spread_labels(labels, LABEL_SPACING);
    let mut top = f64::NEG_INFINITY;
    for (y, text) in labels {
        top = top.max(y);
        chart.draw_series(std::iter::once(Text::new(
            text,
            (X_MAX_GROWTH + 0.05, y),
            label_font(12.0, BLACK, VPos::Center),
        )))?;
    }

    let header = match style {
        LabelStyle::Numeric => axes.warming.unit,
        LabelStyle::Scenario => "RCP",
    };
    chart.draw_series(std::iter::once(Text::new(
        header,
        (X_MAX_GROWTH + 0.05, top + 0.35),
        label_font(12.0, BLACK, VPos::Bottom),
    )))?;
    Ok(())
}
