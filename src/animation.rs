// Cell Animator - fixed-period sweep that highlights stitched cells one at a time

use crate::errors::StitchResult;
use crate::grid::PatternGrid;
use log::{debug, info};
use std::time::{Duration, Instant};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No run is active
    Idle,
    /// The cursor moved past `index`; `highlighted` is set when that cell carried a stitch
    Advanced { index: usize, highlighted: bool },
    /// The sweep reached the end and released its timer
    Finished,
}

#[derive(Debug, Clone)]
struct AnimationRun {
    id: u64,
    sequence: Vec<usize>,
    cursor: usize,
    next_tick: Instant,
}

#[derive(Debug)]
pub struct CellAnimator {
    period: Duration,
    run: Option<AnimationRun>,
    runs_started: u64,
}

impl CellAnimator {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            run: None,
            runs_started: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Position of the next cell to visit, if running
    pub fn cursor(&self) -> Option<usize> {
        self.run.as_ref().map(|run| run.cursor)
    }

    /// Identifier of the active run, if any
    pub fn run_id(&self) -> Option<u64> {
        self.run.as_ref().map(|run| run.id)
    }

    /// When the next tick is due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.run.as_ref().map(|run| run.next_tick)
    }

    /// Start a sweep over the grid's cells. Any run in progress is cancelled first.
    pub fn start(&mut self, grid: &mut PatternGrid, now: Instant) -> u64 {
        if self.is_running() {
            self.stop();
        }

        grid.clear_highlights();
        self.runs_started += 1;
        let id = self.runs_started;
        self.run = Some(AnimationRun {
            id,
            sequence: (0..grid.cell_count()).collect(),
            cursor: 0,
            next_tick: now + self.period,
        });

        info!(
            "🎬 Started sweep #{} over {} cells ({}ms per tick)",
            id,
            grid.cell_count(),
            self.period.as_millis()
        );
        id
    }

    /// Cancel the active run. No further ticks fire.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.take() {
            info!("⏹️ Cancelled sweep #{} at cell {}", run.id, run.cursor);
        }
    }

    /// Advance the sweep by one step and schedule the next one
    pub fn tick(&mut self, grid: &mut PatternGrid) -> StitchResult<TickOutcome> {
        let period = self.period;
        let run = match self.run.as_mut() {
            Some(run) => run,
            None => return Ok(TickOutcome::Idle),
        };

        if run.cursor < run.sequence.len() {
            if run.cursor > 0 {
                grid.set_highlight(run.sequence[run.cursor - 1], false)?;
            }

            let index = run.sequence[run.cursor];
            let highlighted = grid.stitch_at(index)?.is_some();
            if highlighted {
                grid.set_highlight(index, true)?;
            }
            run.cursor += 1;
            run.next_tick += period;

            debug!("🎞️ Sweep #{} at cell {} (highlighted: {})", run.id, index, highlighted);
            Ok(TickOutcome::Advanced { index, highlighted })
        } else {
            if let Some(&last) = run.sequence.last() {
                grid.set_highlight(last, false)?;
            }
            let id = run.id;
            self.run = None;

            info!("✅ Sweep #{} complete", id);
            Ok(TickOutcome::Finished)
        }
    }

    /// Fire every tick that is due by `now`. Returns the number of ticks fired.
    pub fn poll(&mut self, grid: &mut PatternGrid, now: Instant) -> StitchResult<usize> {
        let mut fired = 0;

        loop {
            let due = matches!(&self.run, Some(run) if run.next_tick <= now);
            if !due {
                break;
            }

            let outcome = self.tick(grid)?;
            fired += 1;

            if outcome == TickOutcome::Finished {
                break;
            }
        }

        Ok(fired)
    }
}

impl Default for CellAnimator {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::DEFAULT_TICK_MS))
    }
}
