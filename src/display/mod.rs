// Display module for grid formatting and visualization
pub mod formatters;

// Re-export main functions
pub use formatters::{
    column_headers, format_cell, format_pattern_grid, parse_pattern, pattern_to_string,
    print_pattern_grid,
};
