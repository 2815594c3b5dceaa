//! Drawing Commands
//! The renderer's output: an ordered list of primitives that a surface replays.

use super::palette::Color;

/// Pixel-space point. Origin is top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle. `height` may be negative for bars below the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Same rectangle with non-negative width and height.
    pub fn normalized(&self) -> Rect {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Rect { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Which part of the text sits on the anchor's y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear { color: Color },
    /// Connected line segments through `points`.
    Polyline { points: Vec<Point>, stroke: Stroke },
    FillRect { rect: Rect, color: Color },
    /// Pie slice from `start_angle` sweeping clockwise (in screen space) by `sweep` radians.
    FillWedge {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        color: Color,
    },
    Text {
        text: String,
        position: Point,
        align: TextAlign,
        baseline: TextBaseline,
        size: f32,
        color: Color,
    },
}

impl DrawCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Clear { .. } => "clear",
            DrawCommand::Polyline { .. } => "polyline",
            DrawCommand::FillRect { .. } => "rect",
            DrawCommand::FillWedge { .. } => "wedge",
            DrawCommand::Text { .. } => "text",
        }
    }
}
