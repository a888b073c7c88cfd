// Grid module - the pattern grid and the traits it implements

pub mod pattern;
pub mod traits;

pub use pattern::{PatternCell, PatternGrid};
pub use traits::{CellDisplay, GridTrait};

pub use crate::config::GridConfig;
