use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::constants::{DOCK_HEIGHT, INPUT_HEIGHT};
use crate::utils::{loading_dots, spinner_char, truncate_str};

use super::{
    state::{AppId, AppState},
    theme::Theme,
    widgets::Dock,
};

/// Top-level render function: status bar, body pane, optional input,
/// dock, and hint line.
pub fn render(frame: &mut Frame, state: &AppState) {
    let size = frame.area();
    let input_height = if state.active.visible_input().is_some() {
        INPUT_HEIGHT
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Status bar
            Constraint::Min(5),               // Body / output pane
            Constraint::Length(input_height), // Text input (notes / assistant)
            Constraint::Length(DOCK_HEIGHT),  // Dock
            Constraint::Length(1),            // Hints / status message
        ])
        .split(size);

    render_status_bar(frame, chunks[0], state);
    render_body(frame, chunks[1], state);
    if input_height > 0 {
        render_input(frame, chunks[2], state);
    }
    render_dock(frame, chunks[3], state);
    render_hints(frame, chunks[4], state);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Status bar
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let pulse = if state.tick_count % 20 < 10 { "●" } else { "○" };
    let sep = Span::styled(" │ ", t.hint_style());

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(pulse, t.header_style()),
        Span::raw(" "),
        Span::styled(Local::now().format("%H:%M").to_string(), t.output_style()),
        sep.clone(),
        Span::styled(state.location.clone(), t.output_style()),
        sep,
        Span::styled("Holo", t.header_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Body / output pane
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style())
        .title(format!(" {} ", state.active.label()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = body_lines(state);
    let paragraph = Paragraph::new(lines)
        .style(t.output_style())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// What the output pane shows for the active app.
fn body_lines(state: &AppState) -> Vec<Line<'static>> {
    let t = &state.theme;
    match state.active {
        AppId::Dashboard => match &state.stats {
            Some(stats) => vec![
                Line::styled("Dashboard", t.header_style()),
                Line::raw(format!("Time: {} | OS: {}", stats.time, stats.os)),
                Line::raw(format!(
                    "CPU: {} | MEM: {} | Disk: {}",
                    stats.cpu, stats.mem, stats.disk
                )),
            ],
            None => vec![Line::raw("Collecting stats...")],
        },
        AppId::Weather => match &state.weather {
            Some(w) if !state.weather_loading => {
                // An offline reading is clearly labeled, never an error
                let location_style = if w.location.ends_with("(offline)") {
                    ratatui::style::Style::default().fg(t.warning)
                } else {
                    t.output_style()
                };
                vec![
                    Line::styled("Weather", t.header_style()),
                    Line::styled(format!("Location: {}", w.location), location_style),
                    Line::raw(format!("Temp: {:.1}°C", w.temperature)),
                    Line::raw(w.description.clone()),
                ]
            }
            _ => vec![Line::raw(format!(
                "{} Loading weather{}",
                spinner_char(state.tick_count),
                loading_dots(state.tick_count / 4)
            ))],
        },
        AppId::Notes => vec![Line::raw(
            state
                .submission_output
                .clone()
                .unwrap_or_else(|| "Notes: edit below, Ctrl+S to save".to_string()),
        )],
        AppId::Music => vec![
            Line::styled("Music", t.header_style()),
            Line::raw("Nothing is wired to the speakers yet."),
        ],
        AppId::Calculator => {
            let mut lines = vec![
                Line::raw("Calculator: type an expression and press Enter"),
                Line::raw(""),
                prompt_line(state),
            ];
            if let Some(result) = &state.submission_output {
                let style = if result.starts_with("Error:") {
                    ratatui::style::Style::default().fg(t.danger)
                } else {
                    t.header_style()
                };
                lines.push(Line::styled(result.clone(), style));
            }
            lines
        }
        AppId::Assistant => match &state.submission_output {
            Some(reply) => vec![Line::styled(
                reply.clone(),
                ratatui::style::Style::default().fg(t.accent_secondary),
            )],
            None => vec![Line::raw("Assistant: type a prompt and press Enter")],
        },
    }
}

/// The calculator's inline prompt: the generic input buffer rendered
/// inside the body pane (this app has no dedicated input widget).
fn prompt_line(state: &AppState) -> Line<'static> {
    let t = &state.theme;
    let mut spans = vec![Span::styled("> ", t.hint_style())];
    spans.extend(editable_spans(
        &state.input,
        state.cursor_pos,
        state.typing,
        t,
    ));
    Line::from(spans)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Text input (notes / assistant)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn render_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let kind = match state.active.visible_input() {
        Some(kind) => kind,
        None => return,
    };

    let border = if state.typing {
        ratatui::style::Style::default().fg(t.accent)
    } else {
        t.border_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", kind.title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.input.is_empty() && !state.typing {
        let placeholder = Paragraph::new(kind.placeholder()).style(t.placeholder_style());
        frame.render_widget(placeholder, inner);
        return;
    }

    let visible = windowed_input(&state.input, state.cursor_pos, inner.width as usize);
    let spans = editable_spans(&visible.text, visible.cursor, state.typing, t);
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

struct WindowedInput {
    text: String,
    cursor: usize,
}

/// Trim the front of the input until the cursor fits in `width` columns,
/// so long lines scroll horizontally instead of hiding the cursor.
fn windowed_input(input: &str, cursor_pos: usize, width: usize) -> WindowedInput {
    let mut start = 0;
    while UnicodeWidthStr::width(&input[start..cursor_pos]) + 1 > width.max(2) {
        let mut indices = input[start..].char_indices();
        indices.next();
        match indices.next() {
            Some((offset, _)) => start += offset,
            None => break,
        }
    }
    WindowedInput {
        text: input[start..].to_string(),
        cursor: cursor_pos - start,
    }
}

/// Render a text buffer with a block cursor at `cursor_pos` (shown only
/// while typing).
fn editable_spans(
    input: &str,
    cursor_pos: usize,
    typing: bool,
    t: &Theme,
) -> Vec<Span<'static>> {
    let before = input[..cursor_pos].to_string();
    let cursor_char = input[cursor_pos..].chars().next();
    let after = match cursor_char {
        Some(c) => input[cursor_pos + c.len_utf8()..].to_string(),
        None => String::new(),
    };

    let mut spans = vec![Span::styled(before, t.input_style())];
    if typing {
        let under_cursor = cursor_char.map(String::from).unwrap_or_else(|| " ".to_string());
        spans.push(Span::styled(
            under_cursor,
            t.input_style().add_modifier(Modifier::REVERSED),
        ));
    } else if let Some(c) = cursor_char {
        spans.push(Span::styled(String::from(c), t.input_style()));
    }
    spans.push(Span::styled(after, t.input_style()));
    spans
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Dock + hints
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn render_dock(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Dock::new(state.active, t), inner);
}

fn render_hints(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    if let Some(message) = state.status_line() {
        let message = truncate_str(message, area.width.saturating_sub(2) as usize);
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(message, ratatui::style::Style::default().fg(t.success)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let mut hints = String::from(" 1-6 apps │ Tab cycle");
    if state.typing {
        hints.push_str(" │ Enter submit │ Esc done");
    } else if state.active.accepts_text() {
        hints.push_str(" │ Enter to type");
    }
    if state.active == AppId::Notes {
        hints.push_str(" │ Ctrl+S save");
    }
    hints.push_str(if state.typing {
        " │ Ctrl+Q quit"
    } else {
        " │ q quit"
    });

    let hints = truncate_str(&hints, area.width as usize);
    frame.render_widget(Paragraph::new(hints).style(t.hint_style()), area);
}
