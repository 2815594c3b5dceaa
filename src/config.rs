//! Renderer configuration
//!
//! Defaults reproduce the dashboard's fixed canvas constants (40 px padding,
//! 10 px bar gap, 12 px labels). A JSON file may override any subset of them.

use crate::charts::{Color, Palette, DEFAULT_PALETTE};
use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Inset reserved for axes and labels on line/bar charts.
    pub padding: f64,
    /// Horizontal space between bars.
    pub bar_gap: f64,
    /// Distance between the pie's edge and the nearest surface edge.
    pub pie_inset: f64,
    /// Category labels sit this far below the x axis.
    pub label_offset: f64,
    /// Value labels sit this far above the top of their bar.
    pub value_label_offset: f64,
    pub font_size: f32,
    /// Stroke width of the line chart's axes and data line.
    pub line_width: f64,
    /// Hex colors, cycled by index.
    pub palette: Vec<String>,
    pub background: String,
    pub text_color: String,
    pub pie_label_color: String,
    /// TTF used for labels. Without it labels are laid out but not rasterised.
    pub font_path: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            bar_gap: 10.0,
            pie_inset: 10.0,
            label_offset: 20.0,
            value_label_offset: 10.0,
            font_size: 12.0,
            line_width: 2.0,
            palette: DEFAULT_PALETTE.iter().map(Color::to_string).collect(),
            background: Color::WHITE.to_string(),
            text_color: Color::BLACK.to_string(),
            pie_label_color: Color::WHITE.to_string(),
            font_path: None,
        }
    }
}

impl ChartConfig {
    /// Load config from a JSON file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn palette(&self) -> Result<Palette> {
        Palette::from_hex(&self.palette)
    }

    /// Check every numeric setting and parse every color.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("padding", self.padding),
            ("bar_gap", self.bar_gap),
            ("pie_inset", self.pie_inset),
            ("label_offset", self.label_offset),
            ("value_label_offset", self.value_label_offset),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::configuration(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ChartError::configuration("line_width must be positive"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ChartError::configuration("font_size must be positive"));
        }

        self.palette()?;
        for color in [&self.background, &self.text_color, &self.pie_label_color] {
            Color::from_hex(color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ChartConfig::default();
        config.validate().unwrap();
        assert_eq!(config.padding, 40.0);
        assert_eq!(config.palette[0], "#3498db");
        assert_eq!(config.palette().unwrap().len(), 8);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{"padding": 24, "palette": ["#ff0000"]}}"##).unwrap();

        let config = ChartConfig::load(file.path()).unwrap();
        assert_eq!(config.padding, 24.0);
        assert_eq!(config.bar_gap, 10.0);
        assert_eq!(config.palette().unwrap().color(5), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_invalid_settings() {
        let config = ChartConfig {
            palette: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().is_configuration());

        let config = ChartConfig {
            padding: -1.0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().is_configuration());

        let config = ChartConfig {
            background: "white".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
