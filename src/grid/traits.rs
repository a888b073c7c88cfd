// Common traits for the pattern grid and its cells

use crate::config::GridConfig;
use crate::errors::{StitchError, StitchResult};

/// Common trait for grid implementations
pub trait GridTrait {
    /// Get the grid configuration
    fn config(&self) -> &GridConfig;

    /// Remove every stitch from the grid
    fn clear(&mut self);

    /// Get the number of cells carrying a stitch
    fn occupied_cells(&self) -> usize;

    /// Check if a cell carries a stitch
    fn is_cell_occupied(&self, row: usize, col: usize) -> StitchResult<bool>;

    /// Validate coordinates against grid bounds
    fn validate_coordinates(&self, row: usize, col: usize) -> StitchResult<()> {
        let config = self.config();
        if row >= config.rows || col >= config.cols {
            return Err(StitchError::InvalidCoordinates {
                row,
                col,
                max_row: config.rows,
                max_col: config.cols,
            });
        }
        Ok(())
    }

    /// Validate a row-major cell index against grid bounds
    fn validate_index(&self, index: usize) -> StitchResult<()> {
        let cell_count = self.config().cell_count();
        if index >= cell_count {
            return Err(StitchError::InvalidCellIndex { index, cell_count });
        }
        Ok(())
    }
}

/// Trait for displaying grid cells
pub trait CellDisplay {
    /// Get the display string for this cell
    fn display_cell(&self) -> &str;

    /// Check if this cell is the animator's current cell
    fn is_highlighted(&self) -> bool {
        false
    }
}
