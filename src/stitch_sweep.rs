// Headless sweep: paint a pattern from the command line and print every
// frame of the highlight animation until it finishes or Ctrl+C is pressed.

use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use stitch_grid::animation::TickOutcome;
use stitch_grid::display::{parse_pattern, pattern_to_string, print_pattern_grid};
use stitch_grid::{AppConfig, CellAnimator, PatternGrid};

const DEFAULT_PATTERN: &str = "s........s/.d......d./..h....h../...s..s.../....dd..../\
                               ....hh..../...s..s.../..d....d../.h......h./s........s";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load()?;
    let pattern = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PATTERN.to_string());

    let mut grid = PatternGrid::new(config.grid.clone());
    let painted = parse_pattern(&mut grid, &pattern);
    info!("🧶 Painted {} cells from pattern", painted);
    println!("Pattern: {}", pattern_to_string(&grid));

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = running.clone();
    ctrlc::set_handler(move || {
        println!("\n🛑 Ctrl+C received - stopping sweep...");
        handler_flag.store(false, Ordering::SeqCst);
    })?;

    let mut animator = CellAnimator::new(config.tick_interval());
    animator.start(&mut grid, Instant::now());

    let mut visits = 0;
    while animator.is_running() {
        if !running.load(Ordering::SeqCst) {
            animator.stop();
            grid.clear_highlights();
            warn!("⏹️ Sweep interrupted");
            break;
        }

        if let Some(deadline) = animator.next_deadline() {
            let wait = deadline.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                thread::sleep(wait);
            }
        }

        match animator.tick(&mut grid)? {
            TickOutcome::Advanced {
                index,
                highlighted: true,
            } => {
                visits += 1;
                println!("Cell {}:", index);
                print_pattern_grid(&grid);
            }
            TickOutcome::Finished => println!("✅ Sweep complete: {} stitches visited", visits),
            _ => {}
        }
    }

    Ok(())
}
