// Terminal front end: app state, key handling and ratatui rendering.
// The binary owns the terminal; everything here works against any backend.

use crate::calculator::ProjectType;
use crate::errors::StitchResult;
use crate::grid::{GridTrait, PatternCell};
use crate::stitch::Stitch;
use crate::workbench::{Notification, UiEvent, Workbench};
use crate::AppConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: Instant,
    pub message: String,
    pub level: LogLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Event,
}

impl LogLevel {
    fn color(&self) -> Color {
        match self {
            LogLevel::Info => Color::Green,
            LogLevel::Warning => Color::Yellow,
            LogLevel::Event => Color::Magenta,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Info => "ℹ️ ",
            LogLevel::Warning => "⚠️ ",
            LogLevel::Event => "📡",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Project,
    Size,
    Gauge,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Project => FormField::Size,
            FormField::Size => FormField::Gauge,
            FormField::Gauge => FormField::Project,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormField::Project => FormField::Gauge,
            FormField::Size => FormField::Project,
            FormField::Gauge => FormField::Size,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Pattern,
    Form(FormField),
}

type SharedLog = Rc<RefCell<VecDeque<LogEntry>>>;

pub struct AppState {
    pub bench: Workbench,
    pub cursor: usize,
    pub focus: Focus,
    pub project: String,
    pub size: String,
    pub gauge: String,
    pub selected_card: usize,
    pub show_help: bool,
    pub should_quit: bool,
    logs: SharedLog,
    max_log_entries: usize,
}

fn push_log(logs: &SharedLog, max: usize, level: LogLevel, message: String) {
    let mut logs = logs.borrow_mut();
    logs.push_back(LogEntry {
        timestamp: Instant::now(),
        message,
        level,
    });
    while logs.len() > max {
        logs.pop_front();
    }
}

fn describe(notification: &Notification) -> (LogLevel, String) {
    match notification {
        Notification::StitchSelected(stitch) => {
            (LogLevel::Info, format!("Selected {}", stitch.label()))
        }
        Notification::CellPainted { index, stitch } => {
            (LogLevel::Event, format!("Painted {} on cell {}", stitch, index))
        }
        Notification::PatternCleared => (LogLevel::Info, "Pattern cleared".to_string()),
        Notification::AnimationStarted { run_id } => {
            (LogLevel::Event, format!("Sweep #{} started", run_id))
        }
        Notification::AnimationFinished => (LogLevel::Event, "Sweep finished".to_string()),
        Notification::ResultShown { message, yards } => match yards {
            Some(_) => (LogLevel::Info, message.clone()),
            None => (LogLevel::Warning, message.clone()),
        },
        Notification::CardFlipped { index, flipped } => (
            LogLevel::Info,
            format!(
                "Card {} shows its {}",
                index + 1,
                if *flipped { "back" } else { "front" }
            ),
        ),
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> StitchResult<Self> {
        let max_log_entries = config.display.max_log_entries;
        let show_help = config.display.show_help_on_start;
        let mut bench = Workbench::new(config)?;

        let logs: SharedLog = Rc::new(RefCell::new(VecDeque::new()));
        let sink = logs.clone();
        bench.subscribe(move |notification| {
            let (level, message) = describe(notification);
            push_log(&sink, max_log_entries, level, message);
        });

        let app = Self {
            bench,
            cursor: 0,
            focus: Focus::Pattern,
            project: ProjectType::Scarf.name().to_string(),
            size: String::new(),
            gauge: String::new(),
            selected_card: 0,
            show_help,
            should_quit: false,
            logs,
            max_log_entries,
        };
        app.add_log(LogLevel::Info, "Stitch grid started".to_string());
        app.add_log(LogLevel::Info, "Press 'h' for help, 'q' to quit".to_string());
        Ok(app)
    }

    pub fn add_log(&self, level: LogLevel, message: String) {
        push_log(&self.logs, self.max_log_entries, level, message);
    }

    pub fn last_log(&self) -> Option<String> {
        self.logs.borrow().back().map(|entry| entry.message.clone())
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let config = self.bench.grid().config();
        let (rows, cols) = (config.rows as isize, config.cols as isize);
        let row = (self.cursor as isize / cols + d_row).clamp(0, rows - 1);
        let col = (self.cursor as isize % cols + d_col).clamp(0, cols - 1);
        self.cursor = (row * cols + col) as usize;
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Project => &mut self.project,
            FormField::Size => &mut self.size,
            FormField::Gauge => &mut self.gauge,
        }
    }

    fn cycle_project(&mut self, step: isize) {
        let known = ProjectType::KNOWN;
        let current = known
            .iter()
            .position(|p| p.name() == self.project)
            .map(|i| i as isize)
            .unwrap_or(-1);
        let len = known.len() as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.project = known[next].name().to_string();
    }

    fn calculate_event(&self) -> UiEvent {
        UiEvent::Calculate {
            project: self.project.trim().to_string(),
            size: self.size.clone(),
            gauge: self.gauge.clone(),
        }
    }

    /// Translate a key press into workbench events
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> StitchResult<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('h') | KeyCode::Esc) {
                self.show_help = false;
            } else if key.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return Ok(());
        }

        match self.focus {
            Focus::Pattern => self.handle_pattern_key(key.code, now),
            Focus::Form(field) => self.handle_form_key(field, key.code, now),
        }
    }

    fn handle_pattern_key(&mut self, code: KeyCode, now: Instant) -> StitchResult<()> {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('h') => self.show_help = true,
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.bench.dispatch(UiEvent::PaintCell(self.cursor), now)?
            }
            KeyCode::Char(c @ '1'..='3') => {
                let stitch = Stitch::ALL[c as usize - '1' as usize];
                self.bench.dispatch(UiEvent::SelectStitch(stitch), now)?;
            }
            KeyCode::Char('c') => self.bench.dispatch(UiEvent::ClearPattern, now)?,
            KeyCode::Char('a') => self.bench.dispatch(UiEvent::Animate, now)?,
            KeyCode::Char('f') => self
                .bench
                .dispatch(UiEvent::FlipCard(self.selected_card), now)?,
            KeyCode::Char('[') => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Char(']') => {
                if self.selected_card + 1 < self.bench.cards().len() {
                    self.selected_card += 1;
                }
            }
            KeyCode::Tab => self.focus = Focus::Form(FormField::Project),
            _ => {}
        }
        Ok(())
    }

    fn handle_form_key(&mut self, field: FormField, code: KeyCode, now: Instant) -> StitchResult<()> {
        match code {
            KeyCode::Esc => self.focus = Focus::Pattern,
            KeyCode::Tab => self.focus = Focus::Form(field.next()),
            KeyCode::BackTab => self.focus = Focus::Form(field.previous()),
            KeyCode::Enter => {
                let event = self.calculate_event();
                self.bench.dispatch(event, now)?;
            }
            KeyCode::Up if field == FormField::Project => self.cycle_project(-1),
            KeyCode::Down if field == FormField::Project => self.cycle_project(1),
            KeyCode::Backspace => {
                self.field_mut(field).pop();
            }
            KeyCode::Char(c) => self.field_mut(field).push(c),
            _ => {}
        }
        Ok(())
    }
}

fn stitch_color(stitch: Stitch) -> Color {
    match stitch {
        Stitch::Sc => Color::Cyan,
        Stitch::Dc => Color::Magenta,
        Stitch::Hdc => Color::Green,
    }
}

pub fn render(f: &mut Frame, app: &AppState) {
    if app.show_help {
        render_help(f);
    } else {
        render_main_ui(f, app);
    }
}

fn render_main_ui(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Palette
            Constraint::Min(12),   // Grid + calculator
            Constraint::Length(7), // Logs
        ])
        .split(f.area());

    render_palette(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_grid(f, body[0], app);
    render_side_panel(f, body[1], app);
    render_logs(f, chunks[2], app);
}

fn render_palette(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![Span::styled("Stitch: ", Style::default().fg(Color::White))];
    for (i, stitch) in Stitch::ALL.iter().enumerate() {
        let mut style = Style::default().fg(stitch_color(*stitch));
        if *stitch == app.bench.selection() {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {} {} ", i + 1, stitch.tag()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!(
            "  Stitches: {}  Clicks: {}",
            app.bench.stitched_count(),
            app.bench.clicks()
        ),
        Style::default().fg(Color::Gray),
    ));

    let palette = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Palette"));
    f.render_widget(palette, area);
}

fn cell_span(cell: &PatternCell, is_cursor: bool) -> Span<'static> {
    let (text, mut style) = match cell.stitch {
        Some(stitch) => (format!("{:^4}", stitch.tag()), Style::default().fg(stitch_color(stitch))),
        None => ("  · ".to_string(), Style::default().fg(Color::DarkGray)),
    };
    if cell.highlighted {
        style = style.bg(Color::Yellow).fg(Color::Black).add_modifier(Modifier::BOLD);
    }
    if is_cursor {
        style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
    }
    Span::styled(text, style)
}

fn render_grid(f: &mut Frame, area: Rect, app: &AppState) {
    let grid = app.bench.grid();
    let config = grid.config();
    let title = if app.bench.animator().is_running() {
        format!("Pattern {}x{} - sweeping", config.rows, config.cols)
    } else {
        format!("Pattern {}x{}", config.rows, config.cols)
    };
    let border_style = if app.focus == Focus::Pattern {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let show_cursor = app.focus == Focus::Pattern;
    let lines: Vec<Line> = grid
        .rows()
        .enumerate()
        .map(|(row, cells)| {
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let index = row * config.cols + col;
                    cell_span(cell, show_cursor && index == app.cursor)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
    f.render_widget(widget, area);
}

fn form_line<'a>(label: &'a str, value: &'a str, active: bool) -> Line<'a> {
    let value_style = if active {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{:<8}", label), Style::default().fg(Color::Gray)),
        Span::styled(format!(" {} ", value), value_style),
    ])
}

fn render_side_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Form
            Constraint::Length(4), // Result
            Constraint::Min(3),    // Cards
        ])
        .split(area);

    let active = match app.focus {
        Focus::Form(field) => Some(field),
        Focus::Pattern => None,
    };
    let form = Paragraph::new(vec![
        form_line("Project", &app.project, active == Some(FormField::Project)),
        form_line("Size", &app.size, active == Some(FormField::Size)),
        form_line("Gauge", &app.gauge, active == Some(FormField::Gauge)),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Yarn Calculator")
            .border_style(if active.is_some() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            }),
    );
    f.render_widget(form, chunks[0]);

    let result = app.bench.result();
    let result_style = if result.is_highlighted() {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };
    let result_widget = Paragraph::new(result.message().unwrap_or("").to_string())
        .style(result_style)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Result"));
    f.render_widget(result_widget, chunks[1]);

    let card_lines: Vec<Line> = app
        .bench
        .cards()
        .cards()
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let marker = if i == app.selected_card { "▶ " } else { "  " };
            let style = if card.flipped {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(card.visible_text().to_string(), style),
            ])
        })
        .collect();
    let cards = Paragraph::new(card_lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Stitch Cards"));
    f.render_widget(cards, chunks[2]);
}

fn render_logs(f: &mut Frame, area: Rect, app: &AppState) {
    let logs = app.logs.borrow();
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = logs
        .iter()
        .skip(logs.len().saturating_sub(visible))
        .map(|entry| {
            let time_str = format!("{:.1}s", entry.timestamp.elapsed().as_secs_f32());
            let line = Line::from(vec![
                Span::styled(time_str, Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(entry.level.prefix(), Style::default().fg(entry.level.color())),
                Span::raw(" "),
                Span::raw(entry.message.clone()),
            ]);
            ListItem::new(line)
        })
        .collect();

    let logs_widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Event Log"))
        .style(Style::default().fg(Color::White));
    f.render_widget(logs_widget, area);
}

fn render_help(f: &mut Frame) {
    let area = f.area();
    f.render_widget(Clear, area);

    let help_text = vec![
        Line::from("🧶 Stitch Grid - Help"),
        Line::from(""),
        Line::from("Pattern:"),
        Line::from("  ←↑↓→       - Move the cursor"),
        Line::from("  space/enter - Paint the selected stitch"),
        Line::from("  1 / 2 / 3  - Select sc / dc / hdc"),
        Line::from("  c          - Clear the pattern"),
        Line::from("  a          - Sweep highlight over stitched cells"),
        Line::from("  [ / ]      - Choose a card, f to flip it"),
        Line::from(""),
        Line::from("Yarn calculator:"),
        Line::from("  tab        - Enter the form / next field"),
        Line::from("  ↑/↓        - Cycle project type"),
        Line::from("  enter      - Calculate"),
        Line::from("  esc        - Back to the pattern"),
        Line::from(""),
        Line::from("  h          - Toggle this help screen"),
        Line::from("  q          - Quit"),
    ];

    let help_widget = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White));

    let popup_area = centered_rect(70, 80, area);
    f.render_widget(help_widget, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(app: &mut AppState, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), Instant::now())
            .unwrap();
    }

    fn screen_text(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut app = AppState::new(AppConfig::default()).unwrap();
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor, 0);

        for _ in 0..15 {
            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.cursor, 99);
    }

    #[test]
    fn test_paint_with_selected_stitch() {
        let mut app = AppState::new(AppConfig::default()).unwrap();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));

        assert_eq!(app.bench.grid().stitch_at(1).unwrap(), Some(Stitch::Dc));
        assert_eq!(app.last_log().as_deref(), Some("Painted dc on cell 1"));
    }

    #[test]
    fn test_form_entry_and_calculate() {
        let mut app = AppState::new(AppConfig::default()).unwrap();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Form(FormField::Project));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.bench.result().message(),
            Some("You'll need approximately 10 yards of yarn for your scarf.")
        );

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Pattern);
    }

    #[test]
    fn test_project_cycles_through_known_types() {
        let mut app = AppState::new(AppConfig::default()).unwrap();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.project, "hat");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.project, "scarf");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.project, "blanket");
    }

    #[test]
    fn test_render_shows_panels() {
        let mut app = AppState::new(AppConfig::default()).unwrap();
        press(&mut app, KeyCode::Char(' '));
        let text = screen_text(&app);
        assert!(text.contains("Palette"));
        assert!(text.contains("Pattern 10x10"));
        assert!(text.contains("Yarn Calculator"));
        assert!(text.contains("Event Log"));

        press(&mut app, KeyCode::Char('h'));
        assert!(screen_text(&app).contains("Help"));
    }

    #[test]
    fn test_zero_width_grid_is_rejected() {
        let mut config = AppConfig::default();
        config.grid.cols = 0;
        assert!(AppState::new(config).is_err());
    }
}
