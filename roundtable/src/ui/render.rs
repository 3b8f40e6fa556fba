//! Render orchestration for the gallery TUI

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};
use roundtable_core::Selection;

use crate::app::{App, InputMode};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{
    CommentsWidget, DetailsWidget, GalleryWidget, HotkeyBarWidget, InputWidget, StatusBarWidget,
};

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    #[default]
    Gallery,
    Comments,
}

/// Overlay types
#[derive(Debug, Clone)]
pub enum Overlay {
    Help,
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let category = app.page.selected().as_str();
    let gallery = GalleryWidget::new(&app.page.gallery, &app.theme)
        .category(category)
        .focused(app.focused_panel == FocusedPanel::Gallery);
    frame.render_widget(gallery, layout.gallery_area);

    frame.render_widget(
        DetailsWidget::new(&app.page.details, &app.theme),
        layout.details_area,
    );

    let comments = CommentsWidget::new(&app.page.comments, &app.theme)
        .focused(app.focused_panel == FocusedPanel::Comments);
    frame.render_widget(comments, layout.comments_area);

    let status = StatusBarWidget::new(app.input_mode, &app.theme)
        .in_flight(app.in_flight)
        .message(app.status_message());
    frame.render_widget(status, layout.status_bar);

    frame.render_widget(
        HotkeyBarWidget::new(app.input_mode, &app.theme),
        layout.hotkey_bar,
    );

    render_input(frame, app, layout.input_area);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

/// Title bar with the category selector
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let options = Selection::options();
    let selected = options
        .iter()
        .position(|s| s == app.page.selected())
        .unwrap_or(0);

    let titles: Vec<Line> = options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let name = option.as_str();
            Line::from(vec![
                Span::styled(format!("{} ", i + 1), app.theme.system_style()),
                Span::styled(
                    name.to_string(),
                    Style::default().fg(app.theme.category_color(name)),
                ),
            ])
        })
        .collect();

    let [name_area, tabs_area] =
        Layout::horizontal([Constraint::Length(14), Constraint::Min(0)]).areas(area);

    let name = Line::from(Span::styled(
        " Round Table ",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(name), name_area);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .divider("|");

    frame.render_widget(tabs, tabs_area);
}

/// Render the comment input area
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = matches!(app.input_mode, InputMode::Insert);
    let placeholder = format!("Press i to comment on {}...", app.page.selected());

    let input_widget = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .active(is_active)
        .placeholder(&placeholder);

    frame.render_widget(input_widget, area);
}

fn render_overlay(frame: &mut Frame, app: &App, overlay: &Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(56, 24, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::UNDERLINED),
        ))
    };

    let help_text = vec![
        Line::from(Span::styled(
            " Round Table - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Categories:"),
        Line::from("  1-4            All/Historical/Legendary/Fictional"),
        Line::from("  c/C or ←/→     Next/previous category"),
        Line::from("  r              Refresh the current category"),
        Line::from(""),
        section("Navigation:"),
        Line::from("  j/k or ↑/↓     Move the cursor"),
        Line::from("  Tab            Switch gallery/comments focus"),
        Line::from("  Enter          Show details for a knight"),
        Line::from("  Mouse wheel    Move the cursor"),
        Line::from(""),
        section("Comments:"),
        Line::from("  i              Write a comment"),
        Line::from("  Enter          Post it (INSERT mode)"),
        Line::from("  Esc            Back to NORMAL mode"),
        Line::from("  d/Del          Delete the selected comment"),
        Line::from(""),
        Line::from("  q              Quit"),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_full_screen() {
        let (tx, _requests) = mpsc::channel(4);
        let (_responses, rx) = mpsc::channel(4);
        let mut app = App::new(tx, rx);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

        terminal.draw(|f| render(f, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Legendary"));
        assert!(text.contains("No comments for this category yet."));
        assert!(!text.contains("Round Table - Help"));

        app.toggle_help();
        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(screen_text(&terminal).contains("Round Table - Help"));
    }
}
