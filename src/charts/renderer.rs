//! Chart Renderer
//! Turns datasets into pixel geometry and draw commands.
//!
//! Layout (line and bar charts):
//! 1. Axes: left and bottom edges of the plot area, inset by `padding`
//! 2. Data: polyline (line chart) or one filled rect per value (bar chart),
//!    scaled so the dataset maximum reaches the top of the plot area
//! 3. Labels: one category label per point below the x axis; bar charts also
//!    print each value above its bar
//!
//! Pie charts fill the surface's inscribed circle (minus `pie_inset`), slices
//! start at angle 0 and run in dataset order.
//!
//! Every command list starts with a `Clear`, so replaying it onto a surface
//! always produces the same pixels.

use super::command::{DrawCommand, Point, Rect, Stroke, TextAlign, TextBaseline};
use super::palette::{Color, Palette};
use crate::config::ChartConfig;
use crate::data::{CategoryDataset, Dataset};
use crate::error::{ChartError, Result};
use crate::surface::{Surface, SurfaceSize};
use std::f64::consts::TAU;
use tracing::debug;

/// One bar of a bar chart. `rect.height` is negative for values below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub rect: Rect,
    pub value: f64,
    pub color: Color,
}

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
    pub color: Color,
    pub label_position: Point,
}

/// Stateless renderer; holds only validated settings.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    palette: Palette,
    padding: f64,
    bar_gap: f64,
    pie_inset: f64,
    label_offset: f64,
    value_label_offset: f64,
    font_size: f32,
    line_width: f64,
    background: Color,
    text_color: Color,
    pie_label_color: Color,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        let config = ChartConfig::default();
        Self {
            palette: Palette::default(),
            padding: config.padding,
            bar_gap: config.bar_gap,
            pie_inset: config.pie_inset,
            label_offset: config.label_offset,
            value_label_offset: config.value_label_offset,
            font_size: config.font_size,
            line_width: config.line_width,
            background: Color::WHITE,
            text_color: Color::BLACK,
            pie_label_color: Color::WHITE,
        }
    }
}

impl ChartRenderer {
    /// Build a renderer from config. Bad settings fail here, never mid-draw.
    pub fn new(config: &ChartConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            palette: config.palette()?,
            padding: config.padding,
            bar_gap: config.bar_gap,
            pie_inset: config.pie_inset,
            label_offset: config.label_offset,
            value_label_offset: config.value_label_offset,
            font_size: config.font_size,
            line_width: config.line_width,
            background: Color::from_hex(&config.background)?,
            text_color: Color::from_hex(&config.text_color)?,
            pie_label_color: Color::from_hex(&config.pie_label_color)?,
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn bar_gap(&self) -> f64 {
        self.bar_gap
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Plot area (width, height) inside the padding.
    fn plot_area(&self, size: SurfaceSize) -> Result<(f64, f64)> {
        let plot_w = size.width as f64 - 2.0 * self.padding;
        let plot_h = size.height as f64 - 2.0 * self.padding;
        if plot_w <= 0.0 || plot_h <= 0.0 {
            return Err(ChartError::validation(format!(
                "{}x{} surface leaves no room inside {} px padding",
                size.width, size.height, self.padding
            )));
        }
        Ok((plot_w, plot_h))
    }

    /// Maximum of a line/bar series, after checking it can be scaled.
    fn series_max(dataset: &Dataset) -> Result<f64> {
        if dataset.len() < 2 {
            return Err(ChartError::validation(format!(
                "need at least 2 points, got {}",
                dataset.len()
            )));
        }
        let max = dataset.max();
        if max <= 0.0 {
            return Err(ChartError::validation(format!(
                "dataset maximum must be positive, got {}",
                max
            )));
        }
        Ok(max)
    }

    fn value_to_y(&self, value: f64, max: f64, size: SurfaceSize, plot_h: f64) -> f64 {
        size.height as f64 - self.padding - (value / max) * plot_h
    }

    fn axes(&self, size: SurfaceSize) -> Vec<Point> {
        let (w, h, p) = (size.width as f64, size.height as f64, self.padding);
        vec![Point::new(p, p), Point::new(p, h - p), Point::new(w - p, h - p)]
    }

    /// Pixel position of every point of a line chart.
    pub fn line_points(&self, size: SurfaceSize, dataset: &Dataset) -> Result<Vec<Point>> {
        let max = Self::series_max(dataset)?;
        let (plot_w, plot_h) = self.plot_area(size)?;
        let steps = (dataset.len() - 1) as f64;

        Ok(dataset
            .values()
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let x = self.padding + (i as f64 * plot_w) / steps;
                Point::new(x, self.value_to_y(value, max, size, plot_h))
            })
            .collect())
    }

    /// Bars laid out left to right with `bar_gap` after each one.
    pub fn bar_layout(&self, size: SurfaceSize, dataset: &Dataset) -> Result<Vec<Bar>> {
        let max = Self::series_max(dataset)?;
        let (plot_w, plot_h) = self.plot_area(size)?;
        let bar_width = plot_w / dataset.len() as f64 - self.bar_gap;
        if bar_width <= 0.0 {
            return Err(ChartError::validation(format!(
                "{} bars do not fit in a {} px wide surface",
                dataset.len(),
                size.width
            )));
        }

        let baseline = size.height as f64 - self.padding;
        Ok(dataset
            .values()
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let x = self.padding + i as f64 * (bar_width + self.bar_gap);
                let y = self.value_to_y(value, max, size, plot_h);
                Bar {
                    rect: Rect {
                        x,
                        y,
                        width: bar_width,
                        height: baseline - y,
                    },
                    value,
                    color: self.palette.color(i),
                }
            })
            .collect())
    }

    /// Slices in dataset order, starting at angle 0.
    pub fn pie_wedges(&self, size: SurfaceSize, dataset: &CategoryDataset) -> Result<Vec<Wedge>> {
        let shares = dataset.shares();
        if shares.iter().any(|s| !s.is_finite()) {
            return Err(ChartError::validation("category values sum to zero"));
        }
        let (w, h) = (size.width as f64, size.height as f64);
        let radius = w.min(h) / 2.0 - self.pie_inset;
        if radius <= 0.0 {
            return Err(ChartError::validation(format!(
                "{}x{} surface is too small for a pie chart",
                size.width, size.height
            )));
        }
        let center = Point::new(w / 2.0, h / 2.0);

        let mut start_angle = 0.0;
        let mut wedges = Vec::with_capacity(dataset.len());
        for (i, share) in shares.into_iter().enumerate() {
            let sweep = TAU * share;
            let middle = start_angle + sweep / 2.0;
            wedges.push(Wedge {
                center,
                radius,
                start_angle,
                sweep,
                color: self.palette.color(i),
                label_position: Point::new(
                    center.x + radius / 2.0 * middle.cos(),
                    center.y + radius / 2.0 * middle.sin(),
                ),
            });
            start_angle += sweep;
        }
        Ok(wedges)
    }

    // ========================================================================
    // Command lists
    // ========================================================================

    fn label(
        &self,
        text: impl Into<String>,
        position: Point,
        baseline: TextBaseline,
        color: Color,
    ) -> DrawCommand {
        DrawCommand::Text {
            text: text.into(),
            position,
            align: TextAlign::Center,
            baseline,
            size: self.font_size,
            color,
        }
    }

    pub fn line_commands(&self, size: SurfaceSize, dataset: &Dataset) -> Result<Vec<DrawCommand>> {
        let points = self.line_points(size, dataset)?;
        let stroke = Stroke::new(self.palette.color(0), self.line_width);
        let label_y = size.height as f64 - self.padding + self.label_offset;

        let labels: Vec<DrawCommand> = points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                self.label(
                    dataset.label(i),
                    Point::new(point.x, label_y),
                    TextBaseline::Alphabetic,
                    self.text_color,
                )
            })
            .collect();

        let mut commands = Vec::with_capacity(labels.len() + 3);
        commands.push(DrawCommand::Clear {
            color: self.background,
        });
        commands.push(DrawCommand::Polyline {
            points: self.axes(size),
            stroke,
        });
        commands.push(DrawCommand::Polyline { points, stroke });
        commands.extend(labels);
        Ok(commands)
    }

    pub fn pie_commands(
        &self,
        size: SurfaceSize,
        dataset: &CategoryDataset,
    ) -> Result<Vec<DrawCommand>> {
        let wedges = self.pie_wedges(size, dataset)?;

        let mut commands = Vec::with_capacity(wedges.len() * 2 + 1);
        commands.push(DrawCommand::Clear {
            color: self.background,
        });
        for (wedge, entry) in wedges.into_iter().zip(dataset.entries()) {
            commands.push(DrawCommand::FillWedge {
                center: wedge.center,
                radius: wedge.radius,
                start_angle: wedge.start_angle,
                sweep: wedge.sweep,
                color: wedge.color,
            });
            commands.push(self.label(
                entry.name.as_str(),
                wedge.label_position,
                TextBaseline::Middle,
                self.pie_label_color,
            ));
        }
        Ok(commands)
    }

    pub fn bar_commands(&self, size: SurfaceSize, dataset: &Dataset) -> Result<Vec<DrawCommand>> {
        let bars = self.bar_layout(size, dataset)?;
        let label_y = size.height as f64 - self.padding + self.label_offset;

        let mut commands = Vec::with_capacity(bars.len() * 3 + 2);
        commands.push(DrawCommand::Clear {
            color: self.background,
        });
        // Bar chart axes keep the canvas default stroke
        commands.push(DrawCommand::Polyline {
            points: self.axes(size),
            stroke: Stroke::new(self.text_color, 1.0),
        });
        for (i, bar) in bars.iter().enumerate() {
            let center_x = bar.rect.x + bar.rect.width / 2.0;
            commands.push(DrawCommand::FillRect {
                rect: bar.rect,
                color: bar.color,
            });
            commands.push(self.label(
                dataset.label(i),
                Point::new(center_x, label_y),
                TextBaseline::Alphabetic,
                self.text_color,
            ));
            commands.push(self.label(
                format_value(bar.value),
                Point::new(center_x, bar.rect.y - self.value_label_offset),
                TextBaseline::Alphabetic,
                self.text_color,
            ));
        }
        Ok(commands)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Draw a line chart. Nothing is drawn if the dataset is rejected.
    pub fn render_line<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        dataset: &Dataset,
    ) -> Result<()> {
        let commands = self.line_commands(surface.size(), dataset)?;
        debug!(points = dataset.len(), commands = commands.len(), "Rendering line chart");
        surface.replay(&commands);
        Ok(())
    }

    /// Draw a pie chart. Nothing is drawn if the dataset is rejected.
    pub fn render_pie<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        dataset: &CategoryDataset,
    ) -> Result<()> {
        let commands = self.pie_commands(surface.size(), dataset)?;
        debug!(slices = dataset.len(), commands = commands.len(), "Rendering pie chart");
        surface.replay(&commands);
        Ok(())
    }

    /// Draw a bar chart. Nothing is drawn if the dataset is rejected.
    pub fn render_bar<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        dataset: &Dataset,
    ) -> Result<()> {
        let commands = self.bar_commands(surface.size(), dataset)?;
        debug!(bars = dataset.len(), commands = commands.len(), "Rendering bar chart");
        surface.replay(&commands);
        Ok(())
    }
}

/// Shortest decimal form: 7000 -> "7000", 12.5 -> "12.5".
fn format_value(value: f64) -> String {
    format!("{}", value)
}
