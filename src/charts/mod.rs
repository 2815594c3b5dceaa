//! Charts module - Chart geometry and draw commands

mod command;
mod palette;
mod renderer;

pub use command::{DrawCommand, Point, Rect, Stroke, TextAlign, TextBaseline};
pub use palette::{Color, Palette, DEFAULT_PALETTE};
pub use renderer::{Bar, ChartRenderer, Wedge};
