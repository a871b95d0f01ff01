//! Application struct and event loop.
//!
//! Owns the terminal, state, collectors, and the weather channel. All
//! state mutation happens here, on the event loop; the only background
//! work is the weather fetch, whose result comes back over the channel.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::assistant;
use crate::calculator;
use crate::config::Config;
use crate::constants::*;
use crate::models::Weather;
use crate::notes::NotesStore;
use crate::stats::StatsCollector;
use crate::ui::{self, AppId, AppState};
use crate::weather::WeatherClient;

/// Main application struct.
///
/// Owns all runtime resources: terminal session, state, stats collector,
/// weather client, and the notes store.
pub struct App {
    state: AppState,
    collector: StatsCollector,
    weather_client: WeatherClient,
    notes: NotesStore,
    city: Option<String>,
    refresh_interval: Duration,

    // Channel delivering background weather results to the loop
    weather_tx: mpsc::UnboundedSender<Weather>,
    weather_rx: mpsc::UnboundedReceiver<Weather>,

    last_refresh: Instant,
}

impl App {
    /// Create a new App, initializing all subsystems.
    pub fn new(config: &Config, offline: bool) -> Self {
        let collector = StatsCollector::new();
        let weather_client = WeatherClient::new(&config.weather, offline);
        let notes = NotesStore::new();

        let theme = ui::Theme::by_name(&config.theme).unwrap_or_default();
        let location = config
            .city
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());
        let state = AppState::new(theme, location);

        let (weather_tx, weather_rx) = mpsc::unbounded_channel::<Weather>();

        Self {
            state,
            collector,
            weather_client,
            notes,
            city: config.city.clone(),
            refresh_interval: Duration::from_millis(config.refresh_interval_ms),
            weather_tx,
            weather_rx,
            last_refresh: Instant::now(),
        }
    }

    /// Run the main event loop. Returns when the user quits.
    pub async fn run(&mut self) -> Result<()> {
        // Terminal init
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Initial dashboard snapshot
        self.state.stats = Some(self.collector.snapshot());
        self.last_refresh = Instant::now();

        let result = self.event_loop(&mut terminal);

        // Restore the terminal even if the loop errored
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            self.drain_weather_events();

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key)? {
                            return Ok(()); // quit requested
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse)?,
                    _ => {}
                }
            }

            self.tick();
        }
    }

    // ── Channel draining ─────────────────────────────────────────

    /// Apply any weather results the background task has delivered.
    /// A stale result simply overwrites the slot; only one fetch is in
    /// flight per selection, so no ordering bookkeeping is needed.
    fn drain_weather_events(&mut self) {
        while let Ok(weather) = self.weather_rx.try_recv() {
            self.state.weather = Some(weather);
            self.state.weather_loading = false;
        }
    }

    // ── App selection ────────────────────────────────────────────

    /// Switch the active app and apply its entry behavior.
    fn select_app(&mut self, app: AppId) -> Result<()> {
        self.state.select(app);
        match app {
            AppId::Dashboard => {
                self.state.stats = Some(self.collector.snapshot());
                self.last_refresh = Instant::now();
            }
            AppId::Weather => {
                self.state.weather_loading = true;
                self.dispatch_weather_fetch();
            }
            AppId::Notes => {
                // Pre-fill the input with the persisted notes
                let content = self.notes.load()?;
                self.state.notes_buffer = content.clone();
                self.state.set_input(content);
                self.state.typing = true;
            }
            AppId::Music => {}
            AppId::Calculator | AppId::Assistant => {
                self.state.typing = true;
            }
        }
        Ok(())
    }

    /// Spawn the single background weather fetch; its result lands in
    /// the channel and is picked up by `drain_weather_events`.
    fn dispatch_weather_fetch(&self) {
        let client = self.weather_client.clone();
        let city = self.city.clone();
        let tx = self.weather_tx.clone();

        tokio::spawn(async move {
            let weather = client.fetch(city.as_deref()).await;
            let _ = tx.send(weather);
        });
    }

    // ── Text submission routing ──────────────────────────────────

    /// Route the submitted input by the active app id.
    fn submit_input(&mut self) -> Result<()> {
        match self.state.active {
            AppId::Notes => {
                // The submitted text becomes the new buffer, even if empty
                let content = self.state.input.clone();
                self.notes.save(&content)?;
                self.state.notes_buffer = content;
                self.state.submission_output = Some("Notes saved.".to_string());
                self.state.set_status("Notes saved.".to_string());
            }
            AppId::Assistant => {
                let prompt = self.state.take_input();
                let prompt = prompt.trim();
                if !prompt.is_empty() {
                    self.state.submission_output = Some(assistant::reply(prompt));
                }
            }
            AppId::Calculator => {
                let expression = self.state.take_input();
                if !expression.trim().is_empty() {
                    self.state.submission_output = Some(calculator::evaluate(&expression));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Persist the current input value unconditionally (Ctrl+S, notes only).
    fn save_notes(&mut self) -> Result<()> {
        self.notes.save(&self.state.input)?;
        self.state.notes_buffer = self.state.input.clone();
        self.state.submission_output = Some("Notes saved.".to_string());
        self.state.set_status("Notes saved.".to_string());
        Ok(())
    }

    // ── Mouse handling ───────────────────────────────────────────

    fn handle_mouse(&mut self, mouse: crossterm::event::MouseEvent) -> Result<()> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
            // Dock rows sit directly above the hint line
            let dock_top = height.saturating_sub(1 + DOCK_HEIGHT);
            if mouse.row >= dock_top && mouse.row < height.saturating_sub(1) {
                let inner_x = mouse.column.saturating_sub(1);
                if let Some(app) = ui::app_at(inner_x, width.saturating_sub(2)) {
                    self.select_app(app)?;
                }
            }
        }
        Ok(())
    }

    // ── Keyboard handling ────────────────────────────────────────

    /// Handle a key event. Returns `true` if the app should quit.
    fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> Result<bool> {
        // Quit works from any mode
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            return Ok(true);
        }

        // Ctrl+S: save notes from any mode, only while notes is active
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if self.state.active == AppId::Notes {
                self.save_notes()?;
            }
            return Ok(false);
        }

        // App cycling works from any mode
        match key.code {
            KeyCode::Tab => {
                let next = self.state.active.next();
                self.select_app(next)?;
                return Ok(false);
            }
            KeyCode::BackTab => {
                let prev = self.state.active.prev();
                self.select_app(prev)?;
                return Ok(false);
            }
            _ => {}
        }

        if self.state.typing {
            self.handle_key_typing(key)
        } else {
            self.handle_key_normal(key)
        }
    }

    /// Keys while the input buffer has focus.
    fn handle_key_typing(&mut self, key: crossterm::event::KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Esc => {
                self.state.typing = false;
            }
            KeyCode::Enter => {
                self.submit_input()?;
            }
            KeyCode::Backspace => {
                self.state.input_backspace();
            }
            KeyCode::Left => {
                self.state.input_cursor_left();
            }
            KeyCode::Right => {
                self.state.input_cursor_right();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.input_char(c);
            }
            _ => {}
        }
        Ok(false)
    }

    /// Keys in normal mode. Returns `true` if the app should quit.
    fn handle_key_normal(&mut self, key: crossterm::event::KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

            // Dock bindings: digits 1-6
            KeyCode::Char(c @ '1'..='6') => {
                if let Some(app) = AppId::from_digit(c) {
                    self.select_app(app)?;
                }
            }

            // Enter (or any printable char) starts typing where text is accepted
            KeyCode::Enter if self.state.active.accepts_text() => {
                self.state.typing = true;
            }
            KeyCode::Char(c)
                if self.state.active.accepts_text()
                    && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.state.typing = true;
                self.state.input_char(c);
            }

            KeyCode::Esc => {
                if self.state.active != AppId::Dashboard {
                    self.select_app(AppId::Dashboard)?;
                }
            }

            _ => {}
        }
        Ok(false)
    }

    // ── Periodic work ────────────────────────────────────────────

    fn tick(&mut self) {
        self.state.tick_count = self.state.tick_count.wrapping_add(1);

        // Dashboard stats are regenerated on every refresh while visible
        if self.state.active == AppId::Dashboard
            && self.last_refresh.elapsed() >= self.refresh_interval
        {
            self.state.stats = Some(self.collector.snapshot());
            self.last_refresh = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn offline_app() -> App {
        let config = Config::default();
        App::new(&config, true)
    }

    /// App with its notes store rooted in a temp dir so tests never
    /// touch the real per-user path.
    fn offline_app_with_notes(dir: &std::path::Path) -> App {
        let mut app = offline_app();
        app.notes = NotesStore::with_root(dir);
        app
    }

    // ── Selection side effects ────────────────────────────────────

    #[test]
    fn starts_on_dashboard_with_no_stats_yet() {
        let app = offline_app();
        assert_eq!(app.state.active, AppId::Dashboard);
        assert!(app.state.stats.is_none());
    }

    #[test]
    fn selecting_dashboard_takes_a_snapshot() {
        let mut app = offline_app();
        app.select_app(AppId::Dashboard).unwrap();
        let stats = app.state.stats.as_ref().unwrap();
        assert_eq!(stats.time.len(), 8);
    }

    #[test]
    fn selecting_notes_prefills_input_from_disk() {
        let dir = tempdir().unwrap();
        let mut app = offline_app_with_notes(dir.path());
        app.notes.save("persisted note").unwrap();

        app.select_app(AppId::Notes).unwrap();
        assert_eq!(app.state.input, "persisted note");
        assert_eq!(app.state.notes_buffer, "persisted note");
        assert!(app.state.typing);
    }

    #[test]
    fn selecting_notes_on_fresh_store_gives_empty_input() {
        let dir = tempdir().unwrap();
        let mut app = offline_app_with_notes(dir.path());

        app.select_app(AppId::Notes).unwrap();
        assert_eq!(app.state.input, "");
    }

    #[test]
    fn switching_apps_clears_submission_output() {
        let mut app = offline_app();
        app.select_app(AppId::Calculator).unwrap();
        app.state.set_input("1+1".to_string());
        app.submit_input().unwrap();
        assert!(app.state.submission_output.is_some());

        app.select_app(AppId::Music).unwrap();
        assert!(app.state.submission_output.is_none());
    }

    #[tokio::test]
    async fn selecting_weather_dispatches_a_fetch() {
        let mut app = offline_app();
        app.select_app(AppId::Weather).unwrap();
        assert!(app.state.weather_loading);

        // Offline client resolves immediately with the static fallback
        let weather = app.weather_rx.recv().await.unwrap();
        assert_eq!(weather, Weather::offline_fallback());
    }

    #[tokio::test]
    async fn stale_weather_result_overwrites_the_slot() {
        let mut app = offline_app();
        app.select_app(AppId::Weather).unwrap();
        let w = app.weather_rx.recv().await.unwrap();
        app.weather_tx.send(w.clone()).unwrap();
        app.weather_tx.send(w).unwrap();

        app.drain_weather_events();
        assert!(!app.state.weather_loading);
        assert!(app.state.weather.is_some());
    }

    // ── Submission routing ────────────────────────────────────────

    #[test]
    fn calculator_submission_evaluates() {
        let mut app = offline_app();
        app.select_app(AppId::Calculator).unwrap();
        app.state.set_input("2 + 3 * 4".to_string());
        app.submit_input().unwrap();
        assert_eq!(app.state.submission_output.as_deref(), Some("14.0"));
        assert!(app.state.input.is_empty());
    }

    #[test]
    fn calculator_submission_surfaces_errors_inline() {
        let mut app = offline_app();
        app.select_app(AppId::Calculator).unwrap();
        app.state.set_input("10 / 0".to_string());
        app.submit_input().unwrap();
        assert!(app
            .state
            .submission_output
            .as_deref()
            .unwrap()
            .starts_with("Error:"));
    }

    #[test]
    fn assistant_submission_gets_a_reply() {
        let mut app = offline_app();
        app.select_app(AppId::Assistant).unwrap();
        app.state.set_input("hello".to_string());
        app.submit_input().unwrap();
        assert!(app.state.submission_output.as_deref().unwrap().len() > 0);
    }

    #[test]
    fn blank_assistant_submission_is_ignored() {
        let mut app = offline_app();
        app.select_app(AppId::Assistant).unwrap();
        app.state.set_input("   ".to_string());
        app.submit_input().unwrap();
        assert!(app.state.submission_output.is_none());
    }

    #[test]
    fn notes_submission_persists_and_confirms() {
        let dir = tempdir().unwrap();
        let mut app = offline_app_with_notes(dir.path());
        app.select_app(AppId::Notes).unwrap();
        app.state.set_input("groceries: eggs".to_string());
        app.submit_input().unwrap();

        assert_eq!(app.notes.load().unwrap(), "groceries: eggs");
        assert_eq!(app.state.notes_buffer, "groceries: eggs");
        assert_eq!(app.state.submission_output.as_deref(), Some("Notes saved."));
        // The notes input keeps its contents after saving
        assert_eq!(app.state.input, "groceries: eggs");
    }

    #[test]
    fn ctrl_s_saves_current_input_unconditionally() {
        let dir = tempdir().unwrap();
        let mut app = offline_app_with_notes(dir.path());
        app.select_app(AppId::Notes).unwrap();
        app.state.set_input(String::new());
        app.save_notes().unwrap();
        assert_eq!(app.notes.load().unwrap(), "");
    }

    #[test]
    fn submission_on_inputless_apps_is_a_no_op() {
        let mut app = offline_app();
        for target in [AppId::Dashboard, AppId::Music] {
            app.select_app(target).unwrap();
            app.state.set_input("ignored".to_string());
            app.submit_input().unwrap();
            assert!(app.state.submission_output.is_none());
        }
    }
}
