//! TUI widgets.

mod detail;
mod form;
mod header;
mod help;
mod modal;
mod reports;
mod style;
mod table;
mod toast;

pub use detail::render_detail;
pub use form::render_form;
pub use header::render_header;
pub use help::render_help;
pub use modal::render_modal;
pub use reports::render_reports;
pub use style::Styles;
pub use table::render_table;
pub use toast::render_toasts;

use ratatui::layout::Rect;

/// Centered popup area: `percent` of the frame width, clamped, with a
/// fixed height.
pub(crate) fn centered_rect(area: Rect, percent: u16, height: u16) -> Rect {
    let width = (area.width * percent / 100).clamp(30.min(area.width), area.width);
    let height = height.min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x + x, area.y + y, width, height)
}
