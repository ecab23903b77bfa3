use std::{cmp, io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gamerack_core::{
    composite_score, AppConfig, Criterion, Game, GameDraft, Library, RatingEditor, YearFilter,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::debug;

use crate::score_font;

const TICK_RATE: Duration = Duration::from_millis(250);
/// Ticks a status message stays visible (~4 seconds).
const STATUS_TICKS: u8 = 16;
const MAX_TITLE_LEN: usize = 80;
const MAX_YEAR_LEN: usize = 4;
const MAX_DESCRIPTION_LEN: usize = 200;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
        }
    }
}

impl Theme {
    /// Theme with the accent optionally overridden from configuration.
    fn from_config(config: &AppConfig) -> Self {
        let mut theme = Self::default();
        if let Some(name) = config.accent.as_deref() {
            match accent_color(name) {
                Some(color) => theme.accent = color,
                None => debug!(accent = name, "Unknown accent colour; keeping default"),
            }
        }
        theme
    }
}

fn accent_color(name: &str) -> Option<Color> {
    match name.to_ascii_lowercase().as_str() {
        "cyan" => Some(Color::Cyan),
        "blue" => Some(Color::Blue),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "magenta" => Some(Color::Magenta),
        "red" => Some(Color::Red),
        "white" => Some(Color::White),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    YearSelect,
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Single-line text input with a movable cursor.
#[derive(Debug, Clone)]
struct TextField {
    input: String,
    cursor: usize,
    max_len: usize,
    digits_only: bool,
}

impl TextField {
    fn new(max_len: usize, digits_only: bool) -> Self {
        Self {
            input: String::new(),
            cursor: 0,
            max_len,
            digits_only,
        }
    }

    fn with_value(value: String, max_len: usize, digits_only: bool) -> Self {
        let cursor = value.len();
        Self {
            input: value,
            cursor,
            max_len,
            digits_only,
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.input.len() as isize;
        let mut next = self.cursor as isize + delta;
        if next < 0 {
            next = 0;
        } else if next > len {
            next = len;
        }
        self.cursor = next as usize;
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    fn insert(&mut self, ch: char) {
        if self.input.len() >= self.max_len {
            return;
        }
        let accepted = if self.digits_only {
            ch.is_ascii_digit()
        } else {
            ch.is_ascii() && !ch.is_ascii_control()
        };
        if accepted {
            self.input.insert(self.cursor, ch);
            self.cursor += ch.len_utf8();
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 && self.cursor <= self.input.len() {
            self.cursor -= 1;
            self.input.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
        }
    }

    fn value(&self) -> &str {
        self.input.trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftField {
    Title,
    Year,
    Description,
}

/// Modal state for the "add game" dialog.
#[derive(Debug, Clone)]
struct AddGameModal {
    title: TextField,
    year: TextField,
    description: TextField,
    focus: DraftField,
    default_year: i32,
}

impl AddGameModal {
    fn new(default_year: i32) -> Self {
        Self {
            title: TextField::new(MAX_TITLE_LEN, false),
            year: TextField::with_value(default_year.to_string(), MAX_YEAR_LEN, true),
            description: TextField::new(MAX_DESCRIPTION_LEN, false),
            focus: DraftField::Title,
            default_year,
        }
    }

    fn focused_field_mut(&mut self) -> &mut TextField {
        match self.focus {
            DraftField::Title => &mut self.title,
            DraftField::Year => &mut self.year,
            DraftField::Description => &mut self.description,
        }
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            DraftField::Title => DraftField::Year,
            DraftField::Year => DraftField::Description,
            DraftField::Description => DraftField::Title,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            DraftField::Title => DraftField::Description,
            DraftField::Year => DraftField::Title,
            DraftField::Description => DraftField::Year,
        };
    }

    fn year_value(&self) -> i32 {
        self.year
            .value()
            .parse::<i32>()
            .unwrap_or(self.default_year)
    }

    /// Build the draft, or `None` while the title is still empty.
    /// The image reference is left unset; the library fills in its
    /// placeholder.
    fn draft(&self) -> Option<GameDraft> {
        let title = self.title.value();
        if title.is_empty() {
            return None;
        }
        Some(GameDraft {
            title: title.to_string(),
            year: self.year_value(),
            image_url: None,
            description: self.description.value().to_string(),
        })
    }
}

/// Modal state for the rating editor dialog.
#[derive(Debug, Clone)]
struct RatingModal {
    game_title: String,
    editor: RatingEditor,
    cursor: usize,
}

impl RatingModal {
    fn open(game: &Game) -> Self {
        Self {
            game_title: game.title.clone(),
            editor: RatingEditor::open(game),
            cursor: 0,
        }
    }

    fn current_criterion(&self) -> Criterion {
        Criterion::ALL[self.cursor]
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = Criterion::ALL.len() as isize;
        let mut next = self.cursor as isize + delta;
        if next < 0 {
            next = 0;
        } else if next >= len {
            next = len - 1;
        }
        self.cursor = next as usize;
    }

    fn adjust(&mut self, delta: i8) {
        self.editor.adjust(self.current_criterion(), delta);
    }

    fn set_digit(&mut self, ch: char) {
        // 0 stands for 10, matching the slider's top end.
        let value = match ch {
            '0' => 10,
            other => other.to_digit(10).unwrap_or(5) as u8,
        };
        self.editor.set(self.current_criterion(), value);
    }
}

struct UiState {
    filtered: Vec<Game>,
    cursor: usize,
    offset: usize,
    list_height: usize,
    mode: Mode,
    year_filter: YearFilter,
    year_options: Vec<YearFilter>,
    year_cursor: usize,
    status: String,
    status_ticks: u8,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            filtered: Vec::new(),
            cursor: 0,
            offset: 0,
            list_height: 1,
            mode: Mode::Browse,
            year_filter: YearFilter::All,
            year_options: Vec::new(),
            year_cursor: 0,
            status: String::new(),
            status_ticks: 0,
            should_quit: false,
        }
    }
}

impl UiState {
    fn apply_filter(&mut self, library: &Library) {
        let selected = self.current_game().map(|game| game.id);
        self.filtered = library
            .filter(self.year_filter)
            .into_iter()
            .cloned()
            .collect();
        if let Some(id) = selected {
            if let Some(pos) = self.filtered.iter().position(|game| game.id == id) {
                self.cursor = pos;
                self.ensure_cursor_visible();
                return;
            }
        }
        self.cursor = 0;
        self.offset = 0;
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let len = self.filtered.len() as isize;
        let mut idx = self.cursor as isize + delta;
        if idx < 0 {
            idx = 0;
        } else if idx >= len {
            idx = len - 1;
        }
        self.cursor = idx as usize;
        self.ensure_cursor_visible();
    }

    fn move_to(&mut self, index: usize) {
        if self.filtered.is_empty() {
            return;
        }
        self.cursor = index.min(self.filtered.len() - 1);
        self.ensure_cursor_visible();
    }

    fn move_to_end(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.cursor = self.filtered.len() - 1;
        self.ensure_cursor_visible();
    }

    fn page_down(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            return;
        }
        let delta = self.list_height.min(self.filtered.len());
        self.move_cursor(delta as isize);
    }

    fn page_up(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            return;
        }
        let delta = self.list_height.min(self.filtered.len());
        self.move_cursor(-(delta as isize));
    }

    fn visible_games(&self, height: usize) -> &[Game] {
        if self.filtered.is_empty() {
            return &[];
        }
        let end = (self.offset + height).min(self.filtered.len());
        &self.filtered[self.offset..end]
    }

    fn current_game(&self) -> Option<&Game> {
        self.filtered.get(self.cursor)
    }

    fn set_status(&mut self, message: String) {
        self.status = message;
        self.status_ticks = STATUS_TICKS;
    }

    fn tick(&mut self) {
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status.clear();
            }
        }
    }

    fn clamp_cursor(&mut self) {
        if self.filtered.is_empty() {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= self.filtered.len() {
            self.cursor = self.filtered.len() - 1;
        }
    }

    fn ensure_cursor_visible(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            self.offset = 0;
            return;
        }
        let height = self.list_height;
        let max_offset = self.filtered.len().saturating_sub(height);

        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }

        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }

    fn enter_year_select(&mut self, library: &Library) {
        self.year_options = std::iter::once(YearFilter::All)
            .chain(library.years().into_iter().map(YearFilter::Year))
            .collect();
        self.year_cursor = self
            .year_options
            .iter()
            .position(|option| *option == self.year_filter)
            .unwrap_or(0);
        self.mode = Mode::YearSelect;
    }

    fn move_year_cursor(&mut self, delta: isize) {
        if self.year_options.is_empty() {
            return;
        }
        let len = self.year_options.len() as isize;
        let mut idx = self.year_cursor as isize + delta;
        if idx < 0 {
            idx = 0;
        } else if idx >= len {
            idx = len - 1;
        }
        self.year_cursor = idx as usize;
    }
}

fn filter_label(filter: YearFilter) -> String {
    match filter {
        YearFilter::All => "All years".to_string(),
        YearFilter::Year(year) => year.to_string(),
    }
}

/// High-level application state for the tracker TUI.
pub struct GameRackApp {
    library: Library,
    state: UiState,
    add_modal: Option<AddGameModal>,
    rating_modal: Option<RatingModal>,
    theme: Theme,
}

impl GameRackApp {
    pub fn new(config: &AppConfig, library: Library) -> Self {
        let theme = Theme::from_config(config);
        Self {
            library,
            state: UiState::default(),
            add_modal: None,
            rating_modal: None,
            theme,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.state.apply_filter(&self.library);
        self.state
            .set_status(format!("Loaded {} games", self.state.filtered.len()));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }

            if self.state.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Event::Key(key) = event {
                    if self.add_modal.is_some() {
                        self.handle_add_modal_key(key);
                    } else if self.rating_modal.is_some() {
                        self.handle_rating_modal_key(key);
                    } else {
                        self.handle_key(key);
                    }
                }
                true
            }
            Some(AppEvent::Tick) => {
                self.state.tick();
                true
            }
            None => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.state.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::YearSelect => self.handle_year_select_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => self.state.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_cursor(-1),
            KeyCode::Char('g') if key.modifiers.is_empty() => self.state.move_to(0),
            KeyCode::Char('G') => self.state.move_to_end(),
            KeyCode::Home => self.state.move_to(0),
            KeyCode::End => self.state.move_to_end(),
            KeyCode::PageDown => self.state.page_down(),
            KeyCode::PageUp => self.state.page_up(),
            KeyCode::Char('a') if key.modifiers.is_empty() => {
                let default_year = Local::now().year();
                self.add_modal = Some(AddGameModal::new(default_year));
            }
            KeyCode::Char('y') if key.modifiers.is_empty() => {
                self.state.enter_year_select(&self.library);
            }
            KeyCode::Enter => {
                if let Some(game) = self.state.current_game() {
                    self.rating_modal = Some(RatingModal::open(game));
                } else {
                    self.state.set_status("No game selected".to_string());
                }
            }
            _ => {}
        }
    }

    fn handle_year_select_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.mode = Mode::Browse;
                self.state.set_status("Filter unchanged".to_string());
            }
            KeyCode::Enter => {
                let selected = self
                    .state
                    .year_options
                    .get(self.state.year_cursor)
                    .copied()
                    .unwrap_or(YearFilter::All);
                self.state.year_filter = selected;
                self.state.mode = Mode::Browse;
                self.state.apply_filter(&self.library);
                self.state
                    .set_status(format!("Filter: {}", filter_label(selected)));
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.move_year_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_year_cursor(-1),
            KeyCode::Home => self.state.year_cursor = 0,
            KeyCode::End => {
                self.state.year_cursor = self.state.year_options.len().saturating_sub(1)
            }
            _ => {}
        }
    }

    fn handle_add_modal_key(&mut self, key: KeyEvent) {
        let mut submit = false;
        let mut cancel = false;
        if let Some(modal) = self.add_modal.as_mut() {
            match key.code {
                KeyCode::Esc => cancel = true,
                KeyCode::Enter => submit = true,
                KeyCode::Tab | KeyCode::Down => modal.focus_next(),
                KeyCode::BackTab | KeyCode::Up => modal.focus_prev(),
                KeyCode::Left => modal.focused_field_mut().move_cursor(-1),
                KeyCode::Right => modal.focused_field_mut().move_cursor(1),
                KeyCode::Home => modal.focused_field_mut().move_home(),
                KeyCode::End => modal.focused_field_mut().move_end(),
                KeyCode::Backspace => modal.focused_field_mut().backspace(),
                KeyCode::Delete => modal.focused_field_mut().delete(),
                KeyCode::Char(ch) => {
                    if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                        modal.focused_field_mut().insert(ch);
                    }
                }
                _ => {}
            }
        }

        if cancel {
            self.add_modal = None;
            self.state.set_status("Add game cancelled".to_string());
            return;
        }

        if submit {
            let Some(modal) = self.add_modal.as_ref() else {
                return;
            };
            let Some(draft) = modal.draft() else {
                // The add action stays disabled while the title is empty.
                self.state.set_status("Title is required".to_string());
                return;
            };
            let title = draft.title.clone();
            match self.library.add_game(draft) {
                Some(id) => {
                    self.add_modal = None;
                    self.state.apply_filter(&self.library);
                    if self
                        .state
                        .filtered
                        .last()
                        .map(|game| game.id == id)
                        .unwrap_or(false)
                    {
                        self.state.move_to_end();
                    }
                    self.state
                        .set_status(format!("{title} added to your library"));
                }
                None => {
                    self.state.set_status("Title is required".to_string());
                }
            }
        }
    }

    fn handle_rating_modal_key(&mut self, key: KeyEvent) {
        let mut save = false;
        let mut cancel = false;
        if let Some(modal) = self.rating_modal.as_mut() {
            match key.code {
                KeyCode::Esc => cancel = true,
                KeyCode::Enter => save = true,
                KeyCode::Char('j') | KeyCode::Down => modal.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => modal.move_cursor(-1),
                KeyCode::Char('h') | KeyCode::Left => modal.adjust(-1),
                KeyCode::Char('l') | KeyCode::Right => modal.adjust(1),
                KeyCode::Char(ch) if ch.is_ascii_digit() => modal.set_digit(ch),
                _ => {}
            }
        }

        if cancel {
            self.rating_modal = None;
            self.state.set_status("Rating discarded".to_string());
            return;
        }

        if save {
            let Some(modal) = self.rating_modal.take() else {
                return;
            };
            let id = modal.editor.game_id();
            let rating = modal.editor.into_rating();
            match self.library.save_rating(id, rating) {
                Ok(()) => {
                    let score = composite_score(&rating);
                    self.state.apply_filter(&self.library);
                    self.state
                        .set_status(format!("Rating saved: {score}/100"));
                }
                Err(err) => {
                    self.state.set_status(format!("Save failed: {err}"));
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(size);

        self.render_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);
        self.render_game_list(frame, body[0]);
        self.render_game_details(frame, body[1]);
        self.render_status(frame, chunks[2]);

        if self.state.mode == Mode::YearSelect {
            self.render_year_select(frame);
        }
        if let Some(modal) = &self.add_modal {
            self.render_add_modal(frame, modal);
        }
        if let Some(modal) = &self.rating_modal {
            self.render_rating_modal(frame, modal);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let counts = self.library.counts();
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let stats = [
            ("Library", counts.total.to_string(), self.theme.accent),
            ("Rated", counts.rated.to_string(), self.theme.success),
            ("Unrated", counts.unrated.to_string(), self.theme.warning),
            (
                "Filter",
                filter_label(self.state.year_filter),
                self.theme.primary_fg,
            ),
        ];

        for ((title, value, color), cell) in stats.into_iter().zip(cells.iter()) {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, *cell);
        }
    }

    fn render_game_list(&mut self, frame: &mut Frame, area: Rect) {
        self.state.list_height = area.height.saturating_sub(2) as usize;
        self.state.clamp_cursor();
        self.state.ensure_cursor_visible();

        let mut list_state = ListState::default();
        let height = self.state.list_height;
        let offset = self.state.offset;
        let cursor = self.state.cursor;
        let games = self.state.visible_games(height);
        if !games.is_empty() {
            let selected = cursor
                .saturating_sub(offset)
                .min(games.len().saturating_sub(1));
            list_state.select(Some(selected));
        }

        let items: Vec<ListItem> = games
            .iter()
            .enumerate()
            .map(|(idx, game)| {
                let is_selected = cursor == offset + idx;
                let marker = if is_selected {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                let title = Span::styled(
                    game.title.clone(),
                    Style::default()
                        .fg(self.theme.primary_fg)
                        .add_modifier(Modifier::BOLD),
                );
                let year = Span::styled(
                    format!(" · {}", game.year),
                    Style::default().fg(self.theme.muted),
                );
                let verdict = match game.rating.as_ref() {
                    Some(rating) => Span::styled(
                        format!("  {}/100", composite_score(rating)),
                        Style::default()
                            .fg(self.theme.success)
                            .add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled("  unrated", Style::default().fg(self.theme.muted)),
                };
                ListItem::new(Line::from(vec![marker, title, year, verdict]))
            })
            .collect();

        let block = Block::default().borders(Borders::ALL).title("Games");
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_game_details(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Details");
        let Some(game) = self.state.current_game() else {
            let message = if self.library.games().is_empty() {
                "Library is empty. Press 'a' to add your first game."
            } else {
                "No games match the current filter."
            };
            frame.render_widget(Paragraph::new(message).block(block), area);
            return;
        };

        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            game.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("Released {}", game.year),
            Style::default().fg(self.theme.muted),
        )));
        if !game.description.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(game.description.clone()));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Cover: {}", game.image_url),
            Style::default().fg(self.theme.muted),
        )));
        lines.push(Line::from(Span::styled(
            format!("Added: {}", game.added_at.format("%Y-%m-%d %H:%M UTC")),
            Style::default().fg(self.theme.muted),
        )));
        lines.push(Line::from(""));

        match game.rating.as_ref() {
            Some(rating) => {
                for criterion in Criterion::ALL {
                    let weight = (criterion.weight() * 100.0).round() as u8;
                    lines.push(Line::from(vec![
                        Span::raw(format!("{:<22}", criterion.label())),
                        Span::styled(
                            format!("{:>3}%  ", weight),
                            Style::default().fg(self.theme.muted),
                        ),
                        Span::styled(
                            format!("{:>2}", rating.get(criterion)),
                            Style::default().fg(self.theme.accent),
                        ),
                    ]));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::raw("Composite score: "),
                    Span::styled(
                        format!("{}/100", composite_score(rating)),
                        Style::default()
                            .fg(self.theme.success)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "Not rated yet. Press Enter to rate.",
                    Style::default().fg(self.theme.warning),
                )));
            }
        }

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let primary = if self.state.status.is_empty() {
            "Ready".to_string()
        } else {
            self.state.status.clone()
        };
        let help = "a add  Enter rate  y filter  j/k move  q quit";
        let paragraph = Paragraph::new(vec![
            Line::from(primary),
            Line::from(Span::styled(help, Style::default().fg(self.theme.muted))),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_year_select(&self, frame: &mut Frame) {
        let options = &self.state.year_options;
        let height = (options.len() as u16).saturating_add(2).clamp(3, 14);
        let area = centered_rect(24, height, frame.size());
        frame.render_widget(Clear, area);

        let lines: Vec<Line> = options
            .iter()
            .enumerate()
            .map(|(idx, option)| {
                if idx == self.state.year_cursor {
                    Line::from(Span::styled(
                        format!("▶ {}", filter_label(*option)),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {}", filter_label(*option)))
                }
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Filter by year"))
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, area);
    }

    fn render_add_modal(&self, frame: &mut Frame, modal: &AddGameModal) {
        let frame_area = frame.size();
        let width = cmp::min(64, frame_area.width.saturating_sub(4)).max(30);
        let height = 11_u16.min(frame_area.height.saturating_sub(2)).max(9);
        let area = centered_rect(width, height, frame_area);
        frame.render_widget(Clear, area);

        let field_line = |label: &str, field: &TextField, focused: bool| -> Vec<Line<'static>> {
            let label_style = if focused {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted)
            };
            vec![
                Line::from(Span::styled(label.to_string(), label_style)),
                Line::from(vec![
                    Span::styled("> ", Style::default().fg(self.theme.accent)),
                    Span::raw(field.input.clone()),
                ]),
            ]
        };

        let mut lines = Vec::new();
        lines.extend(field_line(
            "Title",
            &modal.title,
            modal.focus == DraftField::Title,
        ));
        lines.extend(field_line(
            "Year",
            &modal.year,
            modal.focus == DraftField::Year,
        ));
        lines.extend(field_line(
            "Description",
            &modal.description,
            modal.focus == DraftField::Description,
        ));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" next field  "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" add  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Add game"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);

        // Place the terminal cursor inside the focused input line.
        let (field, row) = match modal.focus {
            DraftField::Title => (&modal.title, 1),
            DraftField::Year => (&modal.year, 3),
            DraftField::Description => (&modal.description, 5),
        };
        let cursor_x =
            (area.x + 3 + field.cursor as u16).min(area.x + area.width.saturating_sub(2));
        let cursor_y = area.y + 1 + row;
        frame.set_cursor(cursor_x, cursor_y);
    }

    fn render_rating_modal(&self, frame: &mut Frame, modal: &RatingModal) {
        let frame_area = frame.size();
        let width = cmp::min(66, frame_area.width.saturating_sub(4)).max(44);
        let score = composite_score(modal.editor.buffer());
        let score_text = score.to_string();
        let show_block_score = frame_area.height >= 28;
        let mut height = Criterion::ALL.len() as u16 + 6;
        if show_block_score {
            height += score_font::height() as u16 + 1;
        }
        let height = height.min(frame_area.height.saturating_sub(2));
        let area = centered_rect(width, height, frame_area);
        frame.render_widget(Clear, area);

        let mut lines: Vec<Line> = Vec::new();
        for (idx, criterion) in Criterion::ALL.into_iter().enumerate() {
            let value = modal.editor.buffer().get(criterion);
            let selected = idx == modal.cursor;
            let marker = if selected {
                Span::styled(
                    "▶ ",
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            };
            let label_style = if selected {
                Style::default()
                    .fg(self.theme.primary_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.primary_fg)
            };
            let bar: String = (0..10)
                .map(|step| if step < value { '█' } else { '░' })
                .collect();
            lines.push(Line::from(vec![
                marker,
                Span::styled(format!("{:<22}", criterion.label()), label_style),
                Span::styled(
                    format!("{:>3}%  ", (criterion.weight() * 100.0).round() as u8),
                    Style::default().fg(self.theme.muted),
                ),
                Span::styled(bar, Style::default().fg(self.theme.accent)),
                Span::styled(
                    format!(" {:>2}", value),
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        lines.push(Line::from(""));
        if show_block_score {
            for glyph_line in score_font::render(&score_text) {
                lines.push(Line::from(Span::styled(
                    glyph_line,
                    Style::default()
                        .fg(self.theme.success)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            lines.push(Line::from(Span::styled(
                "out of 100",
                Style::default().fg(self.theme.muted),
            )));
        } else {
            lines.push(Line::from(vec![
                Span::raw("Final score: "),
                Span::styled(
                    format!("{score}/100"),
                    Style::default()
                        .fg(self.theme.success)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("h/l", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" adjust  "),
            Span::styled("j/k", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" criterion  "),
            Span::styled("1-9,0", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" set  "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" save  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]));

        let title = format!("Rate - {}", modal.game_title);
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, area);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}
