mod renderer;
mod state;
pub mod theme;
mod widgets;

pub use renderer::render;
pub use state::{AppId, AppState, InputKind};
pub use theme::Theme;
pub use widgets::app_at;
