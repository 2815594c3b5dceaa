//! Surface module - Drawing targets that replay chart commands

mod raster;

pub use raster::RasterSurface;

use crate::charts::DrawCommand;

/// Pixel dimensions of a drawing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Anything that can paint the renderer's primitives.
pub trait Surface {
    fn size(&self) -> SurfaceSize;

    fn draw(&mut self, command: &DrawCommand);

    fn replay(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.draw(command);
        }
    }
}

/// Surface that keeps the commands it receives instead of painting them.
/// A `Clear` drops everything recorded before it.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_untouched(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn draw(&mut self, command: &DrawCommand) {
        if matches!(command, DrawCommand::Clear { .. }) {
            self.commands.clear();
        }
        self.commands.push(command.clone());
    }
}
