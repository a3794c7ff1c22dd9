use crate::core::{PathPoint, PlotArea, Viewport};
use crate::error::ChartResult;
use crate::ingest::Signal;
use crate::render::{
    Color, LinePrimitive, PathPrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::axis::{
    AXIS_TICK_COUNT, AxisPlacement, AxisSide, horizontal_ticks, vertical_ticks,
};
use super::highlight::{Emphasis, HighlightState};
use super::scale_session::ScaleSession;

const SERIES_PALETTE: [Color; 6] = [
    Color::rgb(0.122, 0.467, 0.706),
    Color::rgb(1.0, 0.498, 0.055),
    Color::rgb(0.173, 0.627, 0.173),
    Color::rgb(0.839, 0.153, 0.157),
    Color::rgb(0.580, 0.404, 0.741),
    Color::rgb(0.549, 0.337, 0.294),
];

/// Visual constants for frame building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStyle {
    pub line_width: f64,
    pub hovered_line_width: f64,
    pub faded_alpha: f64,
    pub axis_color: Color,
    pub axis_width: f64,
    pub tick_size: f64,
    pub tick_padding: f64,
    pub font_size_px: f64,
    pub view_fill: Color,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            line_width: 1.5,
            hovered_line_width: 2.5,
            faded_alpha: 0.2,
            axis_color: Color::rgb(0.2, 0.2, 0.2),
            axis_width: 1.0,
            tick_size: 6.0,
            tick_padding: 3.0,
            font_size_px: 10.0,
            view_fill: Color::rgb(0.97, 0.97, 0.97),
        }
    }
}

/// Assembles one frame from a session, its displayed signals and the hover
/// state. Series paths come first, then the horizontal axis, then one
/// vertical axis per sensor.
pub(super) struct FrameBuilder<'a> {
    pub(super) viewport: Viewport,
    pub(super) session: &'a ScaleSession,
    pub(super) signals: &'a [&'a Signal],
    pub(super) highlight: &'a HighlightState,
    pub(super) style: FrameStyle,
}

impl FrameBuilder<'_> {
    pub(super) fn build(&self) -> ChartResult<RenderFrame> {
        let plot = self.session.plot();
        let mut frame = RenderFrame::new(self.viewport)
            .with_clip(RectPrimitive {
                x: plot.left,
                y: plot.top,
                width: plot.width,
                height: plot.height,
                fill: None,
            })
            .with_rect(RectPrimitive {
                x: plot.left + 0.5,
                y: plot.top + 0.5,
                width: plot.width,
                height: plot.height,
                fill: Some(self.style.view_fill),
            });

        for (index, signal) in self.signals.iter().enumerate() {
            if let Some(path) = self.series_path(index, signal, plot) {
                frame = frame.with_path(path);
            }
        }

        self.push_horizontal_axis(&mut frame, plot);
        for axis in self.session.axes() {
            self.push_vertical_axis(&mut frame, plot, axis);
        }

        frame.validate()?;
        Ok(frame)
    }

    fn series_path(&self, index: usize, signal: &Signal, plot: PlotArea) -> Option<PathPrimitive> {
        let geometry = self.session.line_path(signal)?;
        let emphasis = self.highlight.line_emphasis(signal.name());

        let mut classes = vec![
            "line".to_owned(),
            signal.name().to_owned(),
            format!("line--{}", signal.sensor()),
        ];
        if let Some(suffix) = emphasis.class_suffix() {
            classes.push(format!("line--{suffix}"));
        }

        let base = SERIES_PALETTE[index % SERIES_PALETTE.len()];
        let (color, stroke_width) = match emphasis {
            Emphasis::Normal => (base, self.style.line_width),
            Emphasis::Hovered => (base, self.style.hovered_line_width),
            Emphasis::Faded => (base.with_alpha(self.style.faded_alpha), self.style.line_width),
        };

        let runs = geometry
            .runs
            .into_iter()
            .map(|run| {
                run.into_iter()
                    .map(|point| PathPoint {
                        x: point.x + plot.left,
                        y: point.y + plot.top,
                    })
                    .collect()
            })
            .collect();

        Some(PathPrimitive {
            classes,
            runs,
            stroke_width,
            color,
        })
    }

    fn push_horizontal_axis(&self, frame: &mut RenderFrame, plot: PlotArea) {
        let style = self.style;
        let baseline = plot.top + plot.height;
        frame.lines.push(LinePrimitive::new(
            plot.left,
            baseline,
            plot.left + plot.width,
            baseline,
            style.axis_width,
            style.axis_color,
        ));

        for tick in horizontal_ticks(self.session.x_scale(), AXIS_TICK_COUNT) {
            let x = plot.left + tick.position;
            frame.lines.push(LinePrimitive::new(
                x,
                baseline,
                x,
                baseline + style.tick_size,
                style.axis_width,
                style.axis_color,
            ));
            frame.texts.push(TextPrimitive::new(
                tick.label,
                x,
                baseline + style.tick_size + style.tick_padding + style.font_size_px,
                style.font_size_px,
                style.axis_color,
                TextHAlign::Center,
            ));
        }
    }

    fn push_vertical_axis(&self, frame: &mut RenderFrame, plot: PlotArea, axis: &AxisPlacement) {
        let Some(scale) = self.session.y_scale(&axis.sensor) else {
            return;
        };
        let style = self.style;
        let color = match self.highlight.axis_emphasis(&axis.sensor) {
            Emphasis::Faded => style.axis_color.with_alpha(style.faded_alpha),
            Emphasis::Normal | Emphasis::Hovered => style.axis_color,
        };
        let axis_x = match axis.side {
            AxisSide::Left => plot.left,
            AxisSide::Right => plot.left + plot.width,
        };
        let (direction, align) = match axis.orientation {
            AxisSide::Left => (-1.0, TextHAlign::Right),
            AxisSide::Right => (1.0, TextHAlign::Left),
        };

        frame.lines.push(LinePrimitive::new(
            axis_x,
            plot.top,
            axis_x,
            plot.top + plot.height,
            style.axis_width,
            color,
        ));

        for tick in vertical_ticks(scale, AXIS_TICK_COUNT) {
            let y = plot.top + tick.position;
            frame.lines.push(LinePrimitive::new(
                axis_x,
                y,
                axis_x + direction * style.tick_size,
                y,
                style.axis_width,
                color,
            ));
            frame.texts.push(TextPrimitive::new(
                tick.label,
                axis_x + direction * (style.tick_size + style.tick_padding),
                y + style.font_size_px / 3.0,
                style.font_size_px,
                color,
                align,
            ));
        }
    }
}
