// Workbench - owns the grid, stitch selection, animator, calculator result,
// cards and click counter, and applies UI events to them

use crate::animation::CellAnimator;
use crate::app_config::AppConfig;
use crate::calculator::calculate_yarn;
use crate::cards::CardDeck;
use crate::counter::ClickCounter;
use crate::errors::StitchResult;
use crate::grid::{GridTrait, PatternGrid};
use crate::stitch::{Stitch, StitchSelection};
use log::{info, warn};
use std::time::{Duration, Instant};

/// Input from the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SelectStitch(Stitch),
    PaintCell(usize),
    ClearPattern,
    Animate,
    Calculate {
        project: String,
        size: String,
        gauge: String,
    },
    FlipCard(usize),
}

impl UiEvent {
    /// Events that come from pressing a button (counted by the click counter)
    pub fn is_button(&self) -> bool {
        matches!(
            self,
            UiEvent::ClearPattern | UiEvent::Animate | UiEvent::Calculate { .. } | UiEvent::FlipCard(_)
        )
    }
}

/// Sent to observers after an event has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    StitchSelected(Stitch),
    CellPainted { index: usize, stitch: Stitch },
    PatternCleared,
    AnimationStarted { run_id: u64 },
    AnimationFinished,
    ResultShown { message: String, yards: Option<u64> },
    CardFlipped { index: usize, flipped: bool },
}

type Observer = Box<dyn FnMut(&Notification)>;

/// The calculator's output area
#[derive(Debug, Clone, Default)]
pub struct ResultBox {
    message: Option<String>,
    highlight_until: Option<Instant>,
}

impl ResultBox {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight_until.is_some()
    }

    fn show(&mut self, message: String, now: Instant, highlight: Duration) {
        self.message = Some(message);
        self.highlight_until = Some(now + highlight);
    }

    fn expire(&mut self, now: Instant) {
        if matches!(self.highlight_until, Some(until) if until <= now) {
            self.highlight_until = None;
        }
    }
}

pub struct Workbench {
    config: AppConfig,
    grid: PatternGrid,
    selection: StitchSelection,
    animator: CellAnimator,
    counter: ClickCounter,
    cards: CardDeck,
    result: ResultBox,
    observers: Vec<Observer>,
}

impl Workbench {
    /// Build a workbench from a config, rejecting invalid values
    pub fn new(config: AppConfig) -> StitchResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AppConfig) -> Self {
        let grid = PatternGrid::new(config.grid.clone());
        let animator = CellAnimator::new(config.tick_interval());
        info!(
            "🧶 Workbench ready: {}x{} grid, {}ms sweep",
            config.grid.rows, config.grid.cols, config.animation.tick_ms
        );

        Self {
            config,
            grid,
            selection: StitchSelection::default(),
            animator,
            counter: ClickCounter::new(),
            cards: CardDeck::default(),
            result: ResultBox::default(),
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn grid(&self) -> &PatternGrid {
        &self.grid
    }

    pub fn selection(&self) -> Stitch {
        self.selection.current()
    }

    pub fn animator(&self) -> &CellAnimator {
        &self.animator
    }

    pub fn clicks(&self) -> u64 {
        self.counter.count()
    }

    pub fn cards(&self) -> &CardDeck {
        &self.cards
    }

    pub fn result(&self) -> &ResultBox {
        &self.result
    }

    /// Register an observer for every notification produced from now on
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Notification) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, notification: Notification) {
        for observer in &mut self.observers {
            observer(&notification);
        }
    }

    /// Apply one UI event
    pub fn dispatch(&mut self, event: UiEvent, now: Instant) -> StitchResult<()> {
        if event.is_button() {
            self.counter.increment();
        }

        match event {
            UiEvent::SelectStitch(stitch) => {
                self.selection.select(stitch);
                self.notify(Notification::StitchSelected(stitch));
            }
            UiEvent::PaintCell(index) => {
                let stitch = self.selection.current();
                self.grid.apply_stitch(index, stitch)?;
                self.notify(Notification::CellPainted { index, stitch });
            }
            UiEvent::ClearPattern => {
                self.grid.clear_pattern();
                info!("🧹 Pattern cleared");
                self.notify(Notification::PatternCleared);
            }
            UiEvent::Animate => {
                let run_id = self.animator.start(&mut self.grid, now);
                self.notify(Notification::AnimationStarted { run_id });
            }
            UiEvent::Calculate {
                project,
                size,
                gauge,
            } => {
                let (message, yards) = match calculate_yarn(&project, &size, &gauge) {
                    Ok(estimate) => (estimate.message, Some(estimate.yards)),
                    Err(err) => (err.to_string(), None),
                };
                self.result
                    .show(message.clone(), now, self.config.result_highlight());
                self.notify(Notification::ResultShown { message, yards });
            }
            UiEvent::FlipCard(index) => {
                let flipped = self.cards.flip(index)?;
                self.notify(Notification::CardFlipped { index, flipped });
            }
        }

        Ok(())
    }

    /// Drive time-based state: sweep ticks and the result highlight
    pub fn advance(&mut self, now: Instant) -> StitchResult<()> {
        let was_running = self.animator.is_running();
        self.animator.poll(&mut self.grid, now)?;
        if was_running && !self.animator.is_running() {
            self.notify(Notification::AnimationFinished);
        }

        self.result.expire(now);
        Ok(())
    }

    /// Earliest time `advance` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.animator.next_deadline(), self.result.highlight_until) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Stitched cell count, used by the status panel
    pub fn stitched_count(&self) -> usize {
        self.grid.occupied_cells()
    }

    /// Stop any sweep, e.g. on shutdown
    pub fn stop_animation(&mut self) {
        if self.animator.is_running() {
            warn!("⏹️ Stopping sweep before it finished");
            self.animator.stop();
            self.grid.clear_highlights();
        }
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::build(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_paint_uses_current_selection() {
        let mut bench = Workbench::default();
        let now = Instant::now();

        bench.dispatch(UiEvent::PaintCell(0), now).unwrap();
        bench.dispatch(UiEvent::SelectStitch(Stitch::Dc), now).unwrap();
        bench.dispatch(UiEvent::PaintCell(1), now).unwrap();

        assert_eq!(bench.grid().stitch_at(0).unwrap(), Some(Stitch::Sc));
        assert_eq!(bench.grid().stitch_at(1).unwrap(), Some(Stitch::Dc));
        assert_eq!(bench.stitched_count(), 2);
    }

    #[test]
    fn test_observers_see_events_in_order() {
        let mut bench = Workbench::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bench.subscribe(move |n| sink.borrow_mut().push(n.clone()));

        let now = Instant::now();
        bench.dispatch(UiEvent::SelectStitch(Stitch::Hdc), now).unwrap();
        bench.dispatch(UiEvent::PaintCell(4), now).unwrap();
        bench.dispatch(UiEvent::ClearPattern, now).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                Notification::StitchSelected(Stitch::Hdc),
                Notification::CellPainted {
                    index: 4,
                    stitch: Stitch::Hdc
                },
                Notification::PatternCleared,
            ]
        );
    }

    #[test]
    fn test_only_buttons_are_counted() {
        let mut bench = Workbench::default();
        let now = Instant::now();
        bench.dispatch(UiEvent::SelectStitch(Stitch::Dc), now).unwrap();
        bench.dispatch(UiEvent::PaintCell(3), now).unwrap();
        assert_eq!(bench.clicks(), 0);

        bench.dispatch(UiEvent::ClearPattern, now).unwrap();
        bench.dispatch(UiEvent::FlipCard(0), now).unwrap();
        assert_eq!(bench.clicks(), 2);
    }

    #[test]
    fn test_invalid_calculation_shows_validation_message() {
        let mut bench = Workbench::default();
        let now = Instant::now();
        bench
            .dispatch(
                UiEvent::Calculate {
                    project: "scarf".to_string(),
                    size: "".to_string(),
                    gauge: "5".to_string(),
                },
                now,
            )
            .unwrap();

        assert_eq!(
            bench.result().message(),
            Some("Please enter valid numbers for size and gauge.")
        );
    }

    #[test]
    fn test_result_highlight_expires() {
        let mut bench = Workbench::default();
        let now = Instant::now();
        bench
            .dispatch(
                UiEvent::Calculate {
                    project: "hat".to_string(),
                    size: "8".to_string(),
                    gauge: "4".to_string(),
                },
                now,
            )
            .unwrap();
        assert!(bench.result().is_highlighted());

        bench.advance(now + Duration::from_millis(999)).unwrap();
        assert!(bench.result().is_highlighted());
        bench.advance(now + Duration::from_millis(1000)).unwrap();
        assert!(!bench.result().is_highlighted());
        assert_eq!(
            bench.result().message(),
            Some("Your hat will require about 5 yards of yarn.")
        );
    }

    #[test]
    fn test_animation_finish_is_notified() {
        let mut bench = Workbench::default();
        let finished = Rc::new(RefCell::new(0));
        let sink = finished.clone();
        bench.subscribe(move |n| {
            if *n == Notification::AnimationFinished {
                *sink.borrow_mut() += 1;
            }
        });

        let now = Instant::now();
        bench.dispatch(UiEvent::PaintCell(50), now).unwrap();
        bench.dispatch(UiEvent::Animate, now).unwrap();
        // 100 cells plus the closing tick at 100ms each
        bench.advance(now + Duration::from_millis(101 * 100)).unwrap();

        assert!(!bench.animator().is_running());
        assert_eq!(*finished.borrow(), 1);
        assert!(bench.grid().highlighted_cells().is_empty());
    }
}
