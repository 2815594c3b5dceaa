//! Error types shared by the chart renderer, its config layer and the PNG exporter.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    /// Input data that cannot be drawn (too few points, zero total, ...).
    /// Always raised before anything reaches the surface.
    #[error("Invalid chart data: {0}")]
    Validation(String),
    /// Renderer settings that cannot be used (empty palette, bad color, ...).
    /// Raised when the renderer is built, never during a draw call.
    #[error("Invalid chart configuration: {0}")]
    Configuration(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

impl ChartError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ChartError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        ChartError::Configuration(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ChartError::Validation(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, ChartError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
