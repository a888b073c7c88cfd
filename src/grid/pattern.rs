// Pattern Grid - fixed-size row-major sequence of stitch cells

use crate::config::GridConfig;
use crate::grid::traits::{CellDisplay, GridTrait};
use crate::errors::StitchResult;
use crate::stitch::Stitch;
use log::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternCell {
    pub stitch: Option<Stitch>,
    pub highlighted: bool,
}

impl PatternCell {
    pub fn has_stitch(&self) -> bool {
        self.stitch.is_some()
    }
}

pub struct PatternGrid {
    config: GridConfig,
    cells: Vec<PatternCell>,
}

impl PatternGrid {
    pub fn new(config: GridConfig) -> Self {
        let cells = vec![PatternCell::default(); config.cell_count()];
        Self { config, cells }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[PatternCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> StitchResult<&PatternCell> {
        self.validate_index(index)?;
        Ok(&self.cells[index])
    }

    pub fn index_of(&self, row: usize, col: usize) -> StitchResult<usize> {
        self.validate_coordinates(row, col)?;
        Ok(row * self.config.cols + col)
    }

    pub fn position_of(&self, index: usize) -> StitchResult<(usize, usize)> {
        self.validate_index(index)?;
        Ok((index / self.config.cols, index % self.config.cols))
    }

    /// Replace whatever stitch the cell had with `stitch`
    pub fn apply_stitch(&mut self, index: usize, stitch: Stitch) -> StitchResult<()> {
        self.validate_index(index)?;
        self.cells[index].stitch = Some(stitch);
        debug!("🧶 Applied {} to cell {}", stitch, index);
        Ok(())
    }

    pub fn apply_stitch_at(&mut self, row: usize, col: usize, stitch: Stitch) -> StitchResult<()> {
        let index = self.index_of(row, col)?;
        self.apply_stitch(index, stitch)
    }

    /// Remove every stitch. Highlights are left to the animator.
    pub fn clear_pattern(&mut self) {
        for cell in &mut self.cells {
            cell.stitch = None;
        }
    }

    pub fn stitch_at(&self, index: usize) -> StitchResult<Option<Stitch>> {
        Ok(self.cell(index)?.stitch)
    }

    pub fn is_highlighted(&self, index: usize) -> StitchResult<bool> {
        Ok(self.cell(index)?.highlighted)
    }

    pub fn set_highlight(&mut self, index: usize, highlighted: bool) -> StitchResult<()> {
        self.validate_index(index)?;
        self.cells[index].highlighted = highlighted;
        Ok(())
    }

    pub fn clear_highlights(&mut self) {
        for cell in &mut self.cells {
            cell.highlighted = false;
        }
    }

    pub fn highlighted_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.highlighted)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn stitched_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.has_stitch())
            .map(|(index, _)| index)
            .collect()
    }

    /// Iterate rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[PatternCell]> {
        self.cells.chunks(self.config.cols.max(1))
    }
}

impl GridTrait for PatternGrid {
    fn config(&self) -> &GridConfig {
        &self.config
    }

    fn clear(&mut self) {
        self.clear_pattern();
        self.clear_highlights();
    }

    fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.has_stitch()).count()
    }

    fn is_cell_occupied(&self, row: usize, col: usize) -> StitchResult<bool> {
        let index = self.index_of(row, col)?;
        Ok(self.cells[index].has_stitch())
    }
}

impl CellDisplay for PatternCell {
    fn display_cell(&self) -> &str {
        match self.stitch {
            None => " .",
            Some(Stitch::Sc) => "sc",
            Some(Stitch::Dc) => "dc",
            Some(Stitch::Hdc) => "hd",
        }
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = PatternGrid::new(GridConfig::default());
        assert_eq!(grid.cell_count(), 100);
        assert_eq!(grid.occupied_cells(), 0);
        assert!(grid.highlighted_cells().is_empty());
    }

    #[test]
    fn test_apply_replaces_previous_stitch() {
        let mut grid = PatternGrid::new(GridConfig::default());
        grid.apply_stitch(12, Stitch::Sc).unwrap();
        grid.apply_stitch(12, Stitch::Dc).unwrap();
        assert_eq!(grid.stitch_at(12).unwrap(), Some(Stitch::Dc));
        assert_eq!(grid.occupied_cells(), 1);
    }

    #[test]
    fn test_row_col_mapping() {
        let mut grid = PatternGrid::new(GridConfig::default());
        grid.apply_stitch_at(2, 3, Stitch::Hdc).unwrap();
        assert_eq!(grid.stitch_at(23).unwrap(), Some(Stitch::Hdc));
        assert_eq!(grid.position_of(23).unwrap(), (2, 3));
        assert!(grid.is_cell_occupied(2, 3).unwrap());
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut grid = PatternGrid::new(GridConfig::default());
        assert!(grid.apply_stitch(100, Stitch::Sc).is_err());
        assert!(grid.apply_stitch_at(0, 10, Stitch::Sc).is_err());
        assert!(grid.set_highlight(250, true).is_err());
    }

    #[test]
    fn test_clear_pattern_removes_stitches() {
        let mut grid = PatternGrid::new(GridConfig::default());
        grid.apply_stitch(0, Stitch::Sc).unwrap();
        grid.apply_stitch(99, Stitch::Dc).unwrap();
        grid.clear_pattern();
        assert_eq!(grid.occupied_cells(), 0);
        assert!(grid.stitched_cells().is_empty());
    }

    #[test]
    fn test_display_cell() {
        let cell = PatternCell {
            stitch: Some(Stitch::Dc),
            highlighted: true,
        };
        assert_eq!(cell.display_cell(), "dc");
        assert!(CellDisplay::is_highlighted(&cell));
        assert_eq!(PatternCell::default().display_cell(), " .");
    }
}
