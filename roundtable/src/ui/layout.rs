//! Screen layout for the gallery TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the main screen
///
/// ```text
/// +------------------------------------------+
/// | title + category tabs                    |
/// +--------------------+---------------------+
/// | gallery            | details             |
/// |                    +---------------------+
/// |                    | comments            |
/// +--------------------+---------------------+
/// | status bar                               |
/// | hotkeys                                  |
/// | input                                    |
/// +------------------------------------------+
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub title_area: Rect,
    pub gallery_area: Rect,
    pub details_area: Rect,
    pub comments_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
    pub input_area: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        Self {
            title_area: rows[0],
            gallery_area: columns[0],
            details_area: right[0],
            comments_area: right[1],
            status_bar: rows[2],
            hotkey_bar: rows[3],
            input_area: rows[4],
        }
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
