// Pattern grid dimensions
use crate::errors::{StitchError, StitchResult};

/// Largest accepted row or column count
pub const MAX_GRID_DIM: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: crate::GRID_ROWS,
            cols: crate::GRID_COLS,
        }
    }
}

impl GridConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Check the dimensions are positive and bounded
    pub fn validate(&self) -> StitchResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(StitchError::ConfigError(
                "Grid dimensions must be positive".to_string(),
            ));
        }

        if self.rows > MAX_GRID_DIM || self.cols > MAX_GRID_DIM {
            return Err(StitchError::ConfigError(format!(
                "Grid dimensions {}x{} exceed {}x{}",
                self.rows, self.cols, MAX_GRID_DIM, MAX_GRID_DIM
            )));
        }

        match self.rows.checked_mul(self.cols) {
            Some(_) => Ok(()),
            None => Err(StitchError::ConfigError("Grid is too large".to_string())),
        }
    }
}
