// Plain-text formatting for pattern grids

use crate::grid::{CellDisplay, GridTrait, PatternCell, PatternGrid};
use crate::stitch::Stitch;
use std::fmt::Write;

/// Format a cell for text output; the highlighted cell is bracketed
pub fn format_cell(cell: &PatternCell) -> String {
    if cell.is_highlighted() {
        format!("[{}]", cell.display_cell())
    } else {
        format!(" {} ", cell.display_cell())
    }
}

/// Column headers for a grid
pub fn column_headers(cols: usize) -> String {
    let mut line = String::from("    ");
    for col in 0..cols {
        let _ = write!(line, " {:2} ", col);
    }
    line
}

/// Render the whole grid with row and column labels
pub fn format_pattern_grid(grid: &PatternGrid) -> String {
    let config = grid.config();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "=== PATTERN GRID ({} x {}) - {} stitches ===",
        config.rows,
        config.cols,
        grid.occupied_cells()
    );
    let _ = writeln!(out, "{}", column_headers(config.cols));

    for (row, cells) in grid.rows().enumerate() {
        let _ = write!(out, "{:2}: ", row);
        for cell in cells {
            out.push_str(&format_cell(cell));
        }
        out.push('\n');
    }
    out
}

pub fn print_pattern_grid(grid: &PatternGrid) {
    println!("{}", format_pattern_grid(grid));
}

/// Compact row-separated pattern string (`.` for empty cells)
pub fn pattern_to_string(grid: &PatternGrid) -> String {
    grid.rows()
        .map(|cells| {
            cells
                .iter()
                .map(|cell| cell.stitch.map(|s| s.symbol()).unwrap_or('.'))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Parse a pattern string produced by `pattern_to_string`. Row separators
/// are optional; unknown characters count as empty cells.
pub fn parse_pattern(grid: &mut PatternGrid, pattern: &str) -> usize {
    let symbols = pattern.chars().filter(|c| *c != '/' && !c.is_whitespace());
    let mut painted = 0;
    for (index, symbol) in symbols.take(grid.cell_count()).enumerate() {
        if let Some(stitch) = Stitch::from_symbol(symbol) {
            if grid.apply_stitch(index, stitch).is_ok() {
                painted += 1;
            }
        }
    }
    painted
}
