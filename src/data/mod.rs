//! Data module - Chart datasets and JSON loading

mod dataset;
mod loader;

pub use dataset::{Category, CategoryDataset, Dataset};
pub use loader::DataLoader;
