//! Admin Charts - dashboard chart rendering
//!
//! Computes line, pie and bar chart geometry as draw commands and paints them
//! onto pixel surfaces.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod otp;
pub mod surface;

pub use charts::{ChartRenderer, Color, DrawCommand, Palette};
pub use config::ChartConfig;
pub use data::{CategoryDataset, Dataset};
pub use error::{ChartError, Result};
pub use surface::{RasterSurface, RecordingSurface, Surface, SurfaceSize};
