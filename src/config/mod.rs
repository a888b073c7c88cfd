// Configuration module
pub mod grid_config;

pub use grid_config::{GridConfig, MAX_GRID_DIM};
