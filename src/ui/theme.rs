use ratatui::style::{Color, Modifier, Style};

/// All available built-in theme names.
pub const BUILTIN_THEME_NAMES: &[&str] = &["default", "nord", "dracula"];

/// Data-driven theme: every color in one struct.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ── Brand / Primary ──────────────────────────────────────
    pub accent: Color,
    pub accent_secondary: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,
    pub text_muted: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub danger: Color,

    // ── Chrome ───────────────────────────────────────────────
    pub border: Color,
    pub dock_selected_bg: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────

    /// Default dark theme (the Holo palette).
    pub fn default_dark() -> Self {
        Self {
            name: "default".to_string(),
            accent: Color::Rgb(99, 179, 237),
            accent_secondary: Color::Rgb(217, 143, 255),
            text_primary: Color::Rgb(220, 220, 235),
            text_dim: Color::Rgb(120, 120, 145),
            text_muted: Color::Rgb(80, 80, 100),
            success: Color::Rgb(72, 199, 142),
            warning: Color::Rgb(255, 193, 69),
            danger: Color::Rgb(255, 85, 85),
            border: Color::Rgb(55, 55, 75),
            dock_selected_bg: Color::Rgb(40, 40, 60),
        }
    }

    /// Nord palette.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),           // nord8 frost
            accent_secondary: Color::Rgb(180, 142, 173), // nord15
            text_primary: Color::Rgb(229, 233, 240),     // nord5
            text_dim: Color::Rgb(182, 191, 204),
            text_muted: Color::Rgb(107, 112, 127),
            success: Color::Rgb(163, 190, 140), // nord14
            warning: Color::Rgb(235, 203, 139), // nord13
            danger: Color::Rgb(191, 97, 106),   // nord11
            border: Color::Rgb(76, 86, 106),    // nord3
            dock_selected_bg: Color::Rgb(67, 76, 94), // nord2
        }
    }

    /// Dracula palette.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            accent: Color::Rgb(139, 233, 253),           // cyan
            accent_secondary: Color::Rgb(189, 147, 249), // purple
            text_primary: Color::Rgb(248, 248, 242),
            text_dim: Color::Rgb(188, 188, 172),
            text_muted: Color::Rgb(98, 114, 164), // comment
            success: Color::Rgb(80, 250, 123),
            warning: Color::Rgb(241, 250, 140),
            danger: Color::Rgb(255, 85, 85),
            border: Color::Rgb(98, 114, 164),
            dock_selected_bg: Color::Rgb(68, 71, 90), // selection
        }
    }

    /// Look up a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_dark()),
            "nord" => Some(Self::nord()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    // ── Style helpers ────────────────────────────────────────

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn output_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn input_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn placeholder_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn dock_active_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.dock_selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dock_inactive_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_finds_all_builtins() {
        for name in BUILTIN_THEME_NAMES {
            let theme = Theme::by_name(name).unwrap();
            assert_eq!(&theme.name, name);
        }
    }

    #[test]
    fn by_name_is_case_insensitive() {
        assert!(Theme::by_name("Nord").is_some());
        assert!(Theme::by_name("DRACULA").is_some());
    }

    #[test]
    fn by_name_unknown_is_none() {
        assert!(Theme::by_name("solarized-unicorn").is_none());
    }

    #[test]
    fn default_is_the_default_palette() {
        assert_eq!(Theme::default().name, "default");
    }
}
