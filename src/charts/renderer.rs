//! Static Chart Renderer
//! Draws the quiz report figure with plotters.
//!
//! Layout (12 x 5 inch figure, split in half):
//! 1. Left: pie of correct vs incorrect answers under a two-line title
//!    ("{title}" / "{PASSED ✓|FAILED ✗} - {pct}%") coloured by outcome
//! 2. Right: one unit-height bar per question with a check or cross mark,
//!    or a "No Question Data Available" notice when there are no records

use crate::charts::{BarPanel, ChartData, Mark, PieSlice, BAR_PANEL_TITLE, NO_DATA_LINES};
use crate::config::RenderSettings;
use crate::report::RenderError;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const FONT: &str = "sans-serif";
const SHADOW: RGBAColor = RGBAColor(0, 0, 0, 0.25);

/// Bar width in question-number units
const BAR_WIDTH: f64 = 0.8;
const BAR_ALPHA: f64 = 0.8;
const Y_RANGE: (f64, f64) = (-0.1, 1.2);

/// Pie radius as a fraction of the shorter panel side
const PIE_RADIUS: f64 = 0.36;
const PCT_DISTANCE: f64 = 0.6;
const LABEL_DISTANCE: f64 = 1.1;

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render both panels and write the PNG to `path`.
    pub fn render_to_file(
        data: &ChartData,
        settings: &RenderSettings,
        path: &Path,
    ) -> Result<(), RenderError> {
        let (width, height) = settings.image_size();
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(RenderError::plot)?;

        let (left, right) = root.split_horizontally(width / 2);
        Self::draw_pie_panel(&left, data, settings).map_err(RenderError::plot)?;
        Self::draw_bar_panel(&right, data, settings).map_err(RenderError::plot)?;

        root.present()
            .map_err(|e| RenderError::Save(e.to_string()))?;
        Ok(())
    }

    fn text_style(size: f64, bold: bool, color: &RGBColor, pos: Pos) -> TextStyle<'static> {
        let font = (FONT, size).into_font();
        let font = if bold {
            font.style(FontStyle::Bold)
        } else {
            font
        };
        font.color(color).pos(pos)
    }

    fn draw_pie_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        data: &ChartData,
        settings: &RenderSettings,
    ) -> DrawResult<DB> {
        let title_size = settings.points(14.0);
        let title_h = (title_size * 3.0) as u32;
        let (title_area, pie_area) = area.split_vertically(title_h);

        // Title: heading line, then status line, both in the outcome colour
        let (tw, _) = title_area.dim_in_pixel();
        let centered = Pos::new(HPos::Center, VPos::Center);
        let style = Self::text_style(title_size, true, &data.status_color, centered);
        let lines = [data.title.as_str(), data.status_line.as_str()];
        for (i, line) in lines.iter().enumerate() {
            let y = (title_size * (1.0 + 1.2 * i as f64)) as i32;
            title_area.draw(&Text::new(line.to_string(), (tw as i32 / 2, y), style.clone()))?;
        }

        let (pw, ph) = pie_area.dim_in_pixel();
        let center = (pw as f64 / 2.0, ph as f64 / 2.0);
        let radius = pw.min(ph) as f64 * PIE_RADIUS;
        let shadow_shift = radius * 0.02;

        for slice in &data.slices {
            let (cx, cy) = Self::exploded_center(slice, center, radius);
            Self::draw_wedge(
                &pie_area,
                slice,
                (cx + shadow_shift, cy + shadow_shift),
                radius,
                SHADOW.filled(),
            )?;
        }
        for slice in &data.slices {
            let c = Self::exploded_center(slice, center, radius);
            Self::draw_wedge(&pie_area, slice, c, radius, slice.color.filled())?;
        }

        let label_size = settings.points(12.0);
        for slice in &data.slices {
            let c = Self::exploded_center(slice, center, radius);
            let mid = slice.mid_angle().to_radians();

            let name_pos = Self::polar(c, radius * LABEL_DISTANCE, mid);
            let h = if mid.cos() >= 0.0 {
                HPos::Left
            } else {
                HPos::Right
            };
            let name_style = Self::text_style(label_size, true, &BLACK, Pos::new(h, VPos::Center));
            pie_area.draw(&Text::new(slice.label, name_pos, name_style))?;

            let pct_pos = Self::polar(c, radius * PCT_DISTANCE, mid);
            let pct_style = Self::text_style(label_size, true, &BLACK, centered);
            pie_area.draw(&Text::new(slice.percent_label.as_str(), pct_pos, pct_style))?;
        }

        Ok(())
    }

    fn exploded_center(slice: &PieSlice, center: (f64, f64), radius: f64) -> (f64, f64) {
        let mid = slice.mid_angle().to_radians();
        let offset = slice.explode * radius;
        (center.0 + offset * mid.cos(), center.1 - offset * mid.sin())
    }

    /// Pixel position at `angle` radians, y axis pointing down.
    fn polar(center: (f64, f64), r: f64, angle: f64) -> (i32, i32) {
        (
            (center.0 + r * angle.cos()).round() as i32,
            (center.1 - r * angle.sin()).round() as i32,
        )
    }

    fn draw_wedge<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        slice: &PieSlice,
        center: (f64, f64),
        radius: f64,
        style: ShapeStyle,
    ) -> DrawResult<DB> {
        if slice.sweep <= 0.0 {
            return Ok(());
        }
        let origin = (center.0.round() as i32, center.1.round() as i32);
        if slice.sweep >= 360.0 {
            return area.draw(&Circle::new(origin, radius.round() as i32, style));
        }

        let steps = (slice.sweep.ceil() as usize).max(2);
        let mut points = Vec::with_capacity(steps + 2);
        points.push(origin);
        for i in 0..=steps {
            let angle = slice.start_angle + slice.sweep * i as f64 / steps as f64;
            points.push(Self::polar(center, radius, angle.to_radians()));
        }
        area.draw(&Polygon::new(points, style))
    }

    fn draw_bar_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        data: &ChartData,
        settings: &RenderSettings,
    ) -> DrawResult<DB> {
        let (x_range, tick_count) = match &data.bar_panel {
            BarPanel::Bars(bars) => (0.5..bars.len() as f64 + 0.5, bars.len()),
            BarPanel::NoData => (0.0..1.0, 6),
        };

        let title_font = (FONT, settings.points(14.0))
            .into_font()
            .style(FontStyle::Bold);
        let axis_font = (FONT, settings.points(12.0))
            .into_font()
            .style(FontStyle::Bold);
        let tick_font = (FONT, settings.points(10.0)).into_font();

        let mut chart = ChartBuilder::on(area)
            .caption(BAR_PANEL_TITLE, title_font)
            .margin(settings.points(10.0) as u32)
            .x_label_area_size(settings.points(36.0) as u32)
            .y_label_area_size(settings.points(44.0) as u32)
            .build_cartesian_2d(x_range, Y_RANGE.0..Y_RANGE.1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(BLACK.mix(0.3))
            .light_line_style(WHITE.mix(0.0))
            .x_labels(tick_count)
            .x_label_formatter(&|x| match data.bar_panel {
                BarPanel::Bars(_) => Self::question_tick(*x),
                BarPanel::NoData => format!("{x:.1}"),
            })
            .y_label_formatter(&|y| format!("{y:.1}"))
            .x_desc("Question Number")
            .y_desc("Result")
            .axis_desc_style(axis_font)
            .label_style(tick_font)
            .draw()?;

        match &data.bar_panel {
            BarPanel::Bars(bars) => {
                let half = BAR_WIDTH / 2.0;
                let edge = settings.points(2.0) as u32;

                chart.draw_series(bars.iter().map(|bar| {
                    let x = bar.number as f64;
                    Rectangle::new(
                        [(x - half, 0.0), (x + half, bar.height)],
                        bar.color.mix(BAR_ALPHA).filled(),
                    )
                }))?;
                chart.draw_series(bars.iter().map(|bar| {
                    let x = bar.number as f64;
                    Rectangle::new(
                        [(x - half, 0.0), (x + half, bar.height)],
                        WHITE.stroke_width(edge),
                    )
                }))?;

                let size = settings.points(7.0) as i32;
                let mark_style = WHITE.stroke_width(settings.points(2.5) as u32);
                chart.draw_series(bars.iter().map(|bar| {
                    let (first, second) = Self::mark_strokes(bar.mark, size);
                    EmptyElement::at((bar.number as f64, bar.height / 2.0))
                        + PathElement::new(first, mark_style)
                        + PathElement::new(second, mark_style)
                }))?;
            }
            BarPanel::NoData => {
                let centered = Pos::new(HPos::Center, VPos::Center);
                let style = Self::text_style(settings.points(14.0), false, &RED, centered);
                let mid = (Y_RANGE.0 + Y_RANGE.1) / 2.0;
                chart.draw_series(NO_DATA_LINES.iter().enumerate().map(|(i, line)| {
                    let y = mid + 0.08 - i as f64 * 0.16;
                    Text::new(line.to_string(), (0.5, y), style.clone())
                }))?;
            }
        }

        Ok(())
    }

    /// Label for an x tick; only whole question numbers get one.
    fn question_tick(x: f64) -> String {
        let n = x.round();
        if n >= 1.0 && (x - n).abs() < 1e-6 {
            format!("{n:.0}")
        } else {
            String::new()
        }
    }

    /// Two strokes, in pixels relative to the mark centre.
    fn mark_strokes(mark: Mark, s: i32) -> (Vec<(i32, i32)>, Vec<(i32, i32)>) {
        match mark {
            Mark::Check => (
                vec![(-s, 0), (-s / 3, 2 * s / 3)],
                vec![(-s / 3, 2 * s / 3), (s, -2 * s / 3)],
            ),
            Mark::Cross => (vec![(-s, -s), (s, s)], vec![(-s, s), (s, -s)]),
        }
    }
}
