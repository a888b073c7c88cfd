use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    time::{Duration, Instant},
};
use stitch_grid::ui::{self, AppState, LogLevel};
use stitch_grid::AppConfig;

// Upper bound on how long we wait for input between redraws
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Keep log output from scribbling over the alternate screen unless asked for
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "error");
    }
    env_logger::init();

    let config = AppConfig::load()?;
    info!("Loaded configuration: {:?}", config);
    let mut app = AppState::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("❌ Stitch grid exited with error: {}", e);
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Wake up in time for the next sweep tick or highlight expiry
        let timeout = app
            .bench
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = app.handle_key(key, Instant::now()) {
                    app.add_log(LogLevel::Warning, e.to_string());
                }
            }
        }

        app.bench.advance(Instant::now())?;

        if app.should_quit {
            app.bench.stop_animation();
            break;
        }
    }

    Ok(())
}
