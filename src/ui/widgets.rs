use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::state::AppId;
use super::theme::Theme;

/// The dock: six app-switch buttons in a single row of equal-width cells.
/// Cell geometry is shared with [`app_at`] so mouse hit-testing matches
/// what was drawn.
pub struct Dock<'a> {
    pub active: AppId,
    pub theme: &'a Theme,
}

impl<'a> Dock<'a> {
    pub fn new(active: AppId, theme: &'a Theme) -> Self {
        Self { active, theme }
    }
}

impl Widget for Dock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < AppId::all().len() as u16 || area.height < 1 {
            return;
        }

        let cell_width = area.width / AppId::all().len() as u16;
        for &app in AppId::all() {
            let cell_x = area.x + app.index() as u16 * cell_width;
            let label = format!("{} {}", app.key(), app.label());
            let label = if label.len() as u16 > cell_width {
                label[..cell_width as usize].to_string()
            } else {
                label
            };

            let style = if app == self.active {
                self.theme.dock_active_style()
            } else {
                self.theme.dock_inactive_style()
            };

            // Paint the full cell so the active background reads as a button
            for i in 0..cell_width {
                buf.set_string(cell_x + i, area.y, " ", style);
            }
            let pad = (cell_width.saturating_sub(label.len() as u16)) / 2;
            buf.set_string(cell_x + pad, area.y, &label, style);
        }
    }
}

/// Map a column within a dock of `width` columns to the app whose cell
/// contains it. Mirrors the equal-cell layout used by [`Dock`].
pub fn app_at(x: u16, width: u16) -> Option<AppId> {
    let count = AppId::all().len() as u16;
    if width < count {
        return None;
    }
    let cell_width = width / count;
    let index = (x / cell_width).min(count - 1) as usize;
    Some(AppId::all()[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_at_covers_the_whole_row() {
        let width = 84;
        assert_eq!(app_at(0, width), Some(AppId::Dashboard));
        assert_eq!(app_at(width - 1, width), Some(AppId::Assistant));
    }

    #[test]
    fn app_at_maps_each_cell_to_its_app() {
        let width = 60; // 10 columns per cell
        for &app in AppId::all() {
            let mid = app.index() as u16 * 10 + 5;
            assert_eq!(app_at(mid, width), Some(app));
        }
    }

    #[test]
    fn app_at_clamps_the_remainder_columns() {
        // 64 / 6 = 10 with 4 leftover columns; they belong to the last cell.
        assert_eq!(app_at(63, 64), Some(AppId::Assistant));
    }

    #[test]
    fn app_at_rejects_degenerate_widths() {
        assert_eq!(app_at(0, 3), None);
    }
}
