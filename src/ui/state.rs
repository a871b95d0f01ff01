use std::time::Instant;

use crate::constants::*;
use crate::models::{DashboardStats, Weather};

use super::theme::Theme;

/// The six fixed app identifiers selectable from the dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppId {
    Dashboard,
    Weather,
    Notes,
    Music,
    Calculator,
    Assistant,
}

/// Which dedicated input widget an app shows, if any.
///
/// The calculator deliberately has no entry here: it reuses the generic
/// text buffer, rendered as a prompt line inside its body pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Notes,
    Assistant,
}

impl InputKind {
    pub fn placeholder(&self) -> &'static str {
        match self {
            InputKind::Notes => "Type notes here; press Ctrl+S to save",
            InputKind::Assistant => "Ask me anything",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            InputKind::Notes => "Notes",
            InputKind::Assistant => "Prompt",
        }
    }
}

impl AppId {
    pub fn all() -> &'static [AppId] {
        &[
            AppId::Dashboard,
            AppId::Weather,
            AppId::Notes,
            AppId::Music,
            AppId::Calculator,
            AppId::Assistant,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppId::Dashboard => "Dashboard",
            AppId::Weather => "Weather",
            AppId::Notes => "Notes",
            AppId::Music => "Music",
            AppId::Calculator => "Calculator",
            AppId::Assistant => "Assistant",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AppId::Dashboard => 0,
            AppId::Weather => 1,
            AppId::Notes => 2,
            AppId::Music => 3,
            AppId::Calculator => 4,
            AppId::Assistant => 5,
        }
    }

    /// The dock key for this app, '1' through '6'.
    pub fn key(&self) -> char {
        (b'1' + self.index() as u8) as char
    }

    /// Map a digit key to its app, the dock's key bindings.
    pub fn from_digit(c: char) -> Option<AppId> {
        match c {
            '1' => Some(AppId::Dashboard),
            '2' => Some(AppId::Weather),
            '3' => Some(AppId::Notes),
            '4' => Some(AppId::Music),
            '5' => Some(AppId::Calculator),
            '6' => Some(AppId::Assistant),
            _ => None,
        }
    }

    pub fn next(&self) -> AppId {
        AppId::all()[(self.index() + 1) % AppId::all().len()]
    }

    pub fn prev(&self) -> AppId {
        let all = AppId::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    /// Which dedicated input widget is visible for this app.
    /// At most one is ever visible; four apps show none.
    pub fn visible_input(&self) -> Option<InputKind> {
        match self {
            AppId::Notes => Some(InputKind::Notes),
            AppId::Assistant => Some(InputKind::Assistant),
            _ => None,
        }
    }

    /// Whether text submission is routed to this app at all.
    pub fn accepts_text(&self) -> bool {
        matches!(self, AppId::Notes | AppId::Assistant | AppId::Calculator)
    }
}

/// Central application state - the single source of truth.
///
/// Touched only from the event loop; the background weather fetch talks
/// to it exclusively through the channel drained there.
pub struct AppState {
    /// The selected app. Always one of the six fixed ids.
    pub active: AppId,
    /// Mirror of the persisted notes content.
    pub notes_buffer: String,

    // ── Generic text input (notes / assistant / calculator) ────
    pub input: String,
    pub cursor_pos: usize,
    /// Whether keystrokes currently go into the input buffer.
    pub typing: bool,

    // ── Per-app render slots ───────────────────────────────────
    /// Result of the last text submission (reply, calc result, save confirmation).
    pub submission_output: Option<String>,
    pub stats: Option<DashboardStats>,
    pub weather: Option<Weather>,
    pub weather_loading: bool,

    // ── Chrome ─────────────────────────────────────────────────
    pub status_message: Option<(String, Instant)>,
    /// Location label shown in the status bar.
    pub location: String,
    pub theme: Theme,
    pub tick_count: u64,
}

impl AppState {
    pub fn new(theme: Theme, location: String) -> Self {
        Self {
            active: AppId::Dashboard,
            notes_buffer: String::new(),
            input: String::new(),
            cursor_pos: 0,
            typing: false,
            submission_output: None,
            stats: None,
            weather: None,
            weather_loading: false,
            status_message: None,
            location,
            theme,
            tick_count: 0,
        }
    }

    /// Switch the active app. Transient submission output never carries
    /// over from one app to another.
    pub fn select(&mut self, app: AppId) {
        self.active = app;
        self.submission_output = None;
        self.typing = false;
        if app != AppId::Notes {
            self.input.clear();
            self.cursor_pos = 0;
        }
    }

    // ── Input editing ──────────────────────────────────────────

    pub fn input_char(&mut self, c: char) {
        if self.input.chars().count() >= MAX_INPUT_LEN {
            return;
        }
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn input_backspace(&mut self) {
        if self.cursor_pos > 0 {
            let prev = self.input[..self.cursor_pos]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.input.remove(prev);
            self.cursor_pos = prev;
        }
    }

    pub fn input_cursor_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos = self.input[..self.cursor_pos]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn input_cursor_right(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.cursor_pos = self.input[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.input.len());
        }
    }

    /// Take the input buffer, leaving it empty with the cursor reset.
    pub fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    /// Replace the input buffer and park the cursor at the end.
    pub fn set_input(&mut self, content: String) {
        self.cursor_pos = content.len();
        self.input = content;
    }

    // ── Status message ─────────────────────────────────────────

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// The current status message, if it hasn't timed out yet.
    pub fn status_line(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, at)) if at.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS => {
                Some(msg.as_str())
            }
            _ => None,
        }
    }
}
