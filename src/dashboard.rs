//! Analytics Dashboard Export
//! Renders the dashboard's three charts to PNG files.

use crate::charts::ChartRenderer;
use crate::config::ChartConfig;
use crate::data::{CategoryDataset, Dataset, DataLoader};
use crate::error::Result;
use crate::surface::RasterSurface;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A chart's data together with the canvas it is drawn on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPanel<D> {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub data: D,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub daily_visitors: ChartPanel<Dataset>,
    pub sales_by_product: ChartPanel<CategoryDataset>,
    pub monthly_revenue: ChartPanel<Dataset>,
}

impl Dashboard {
    /// Mock analytics data shown until a real API backs the dashboard.
    pub fn sample() -> Result<Self> {
        Ok(Self {
            daily_visitors: ChartPanel {
                title: "Daily Visitors".into(),
                width: 400,
                height: 200,
                data: Dataset::with_labels(
                    vec![120.0, 150.0, 180.0, 200.0, 160.0, 190.0, 210.0],
                    vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
                )?,
            },
            sales_by_product: ChartPanel {
                title: "Sales by Product".into(),
                width: 300,
                height: 300,
                data: CategoryDataset::from_pairs([
                    ("Product A", 300.0),
                    ("Product B", 200.0),
                    ("Product C", 150.0),
                    ("Product D", 100.0),
                    ("Product E", 50.0),
                ])?,
            },
            monthly_revenue: ChartPanel {
                title: "Monthly Revenue".into(),
                width: 800,
                height: 300,
                data: Dataset::with_labels(
                    vec![5000.0, 6000.0, 4500.0, 7000.0, 6500.0, 8000.0],
                    vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
                )?,
            },
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        DataLoader::load_json(path)
    }
}

/// Renders dashboards onto raster surfaces and writes them as PNG.
pub struct DashboardExporter {
    renderer: ChartRenderer,
    font: Option<Vec<u8>>,
}

impl DashboardExporter {
    pub fn new(config: &ChartConfig) -> Result<Self> {
        let renderer = ChartRenderer::new(config)?;
        let font = match &config.font_path {
            Some(path) => Some(fs::read(path)?),
            None => {
                warn!("No font configured; chart labels will not be drawn");
                None
            }
        };
        Ok(Self { renderer, font })
    }

    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    fn surface<D>(&self, panel: &ChartPanel<D>) -> Result<RasterSurface> {
        let surface = RasterSurface::new(panel.width, panel.height);
        match &self.font {
            Some(bytes) => surface.with_font_bytes(bytes.clone()),
            None => Ok(surface),
        }
    }

    /// Write `daily_visitors.png`, `sales_by_product.png` and
    /// `monthly_revenue.png` into `out_dir`, creating it if needed.
    pub fn export(&self, dashboard: &Dashboard, out_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(out_dir)?;
        let mut png_paths = Vec::with_capacity(3);

        let mut surface = self.surface(&dashboard.daily_visitors)?;
        self.renderer
            .render_line(&mut surface, &dashboard.daily_visitors.data)?;
        png_paths.push(Self::save(&surface, out_dir, "daily_visitors")?);

        let mut surface = self.surface(&dashboard.sales_by_product)?;
        self.renderer
            .render_pie(&mut surface, &dashboard.sales_by_product.data)?;
        png_paths.push(Self::save(&surface, out_dir, "sales_by_product")?);

        let mut surface = self.surface(&dashboard.monthly_revenue)?;
        self.renderer
            .render_bar(&mut surface, &dashboard.monthly_revenue.data)?;
        png_paths.push(Self::save(&surface, out_dir, "monthly_revenue")?);

        Ok(png_paths)
    }

    fn save(surface: &RasterSurface, out_dir: &Path, name: &str) -> Result<PathBuf> {
        let file_path = out_dir.join(format!("{}.png", name));
        surface.save_png(&file_path)?;
        info!(path = %file_path.display(), "Exported chart");
        Ok(file_path)
    }
}
