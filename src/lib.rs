// Crochet pattern workbench: stitch palette, 10x10 pattern grid, highlight
// sweep animation and yarn estimation. The terminal front end lives in the
// binaries; everything here is independent of the terminal.

pub mod animation;
pub mod app_config;
pub mod calculator;
pub mod cards;
pub mod config;
pub mod counter;
pub mod display;
pub mod errors;
pub mod grid;
pub mod stitch;
pub mod ui;
pub mod workbench;

// Grid configuration
pub const GRID_ROWS: usize = 10;
pub const GRID_COLS: usize = 10;

// Animation sweep period
pub const DEFAULT_TICK_MS: u64 = 100;
// How long the result box stays highlighted after a calculation
pub const DEFAULT_RESULT_HIGHLIGHT_MS: u64 = 1000;

pub use animation::{CellAnimator, TickOutcome};
pub use app_config::{AnimationConfig, AppConfig, DisplayConfig};
pub use calculator::{calculate_yarn, result_message, yarn_needed, ProjectType, YarnEstimate};
pub use cards::{Card, CardDeck};
pub use config::GridConfig;
pub use counter::ClickCounter;
pub use errors::{StitchError, StitchResult};
pub use grid::{PatternCell, PatternGrid};
pub use stitch::{Stitch, StitchSelection};
pub use workbench::{Notification, UiEvent, Workbench};
