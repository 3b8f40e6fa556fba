//! Event handling for the gallery TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, InputMode};
use crate::ui::FocusedPanel;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.move_cursor(-1);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.move_cursor(1);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Handle overlay keys first
    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Insert => handle_insert_mode(app, key),
    }
}

/// Handle keys in NORMAL mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('i') => {
            app.input_mode = InputMode::Insert;
            EventResult::NeedsRedraw
        }

        // Help
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }

        KeyCode::Char('q') => EventResult::Quit,

        // Category selector
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            app.select_option(index);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('c') | KeyCode::Right => {
            app.cycle_category(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('C') | KeyCode::Left => {
            app.cycle_category(-1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('r') => {
            app.refresh();
            EventResult::NeedsRedraw
        }

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_cursor(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_cursor(-1);
            EventResult::NeedsRedraw
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.cycle_focus();
            EventResult::NeedsRedraw
        }

        // Panel actions
        KeyCode::Enter if app.focused_panel == FocusedPanel::Gallery => {
            app.activate_selected_knight();
            EventResult::NeedsRedraw
        }
        // The delete affordance belongs to the comment list only
        KeyCode::Char('d') | KeyCode::Delete if app.focused_panel == FocusedPanel::Comments => {
            app.delete_selected_comment();
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

/// Handle keys in INSERT mode (comment input)
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            EventResult::NeedsRedraw
        }

        KeyCode::Enter => {
            app.submit_comment();
            EventResult::NeedsRedraw
        }

        // Input editing
        KeyCode::Left => {
            app.cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.cursor_end();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            app.delete();
            EventResult::NeedsRedraw
        }

        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

/// Handle key when overlay is open
fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use roundtable_core::{Category, Selection};
    use tokio::sync::mpsc;

    /// An app whose worker never answers; requests just queue up.
    fn idle_app() -> (App, mpsc::Receiver<crate::worker::WorkerRequest>) {
        let (tx, requests) = mpsc::channel(16);
        let (_responses_tx, rx) = mpsc::channel(16);
        (App::new(tx, rx), requests)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _requests) = idle_app();
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('q'))), EventResult::Quit);

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&mut app, ctrl_c), EventResult::Quit);
    }

    #[test]
    fn test_number_keys_select_category() {
        let (mut app, mut requests) = idle_app();
        handle_event(&mut app, key(KeyCode::Char('3')));

        assert_eq!(app.page.selected(), &Selection::from(Category::Legendary));
        assert!(requests.try_recv().is_ok(), "a refresh was dispatched");
    }

    #[test]
    fn test_insert_mode_types_instead_of_hotkeys() {
        let (mut app, mut requests) = idle_app();
        handle_event(&mut app, key(KeyCode::Char('i')));
        for c in ['q', 'r', '1'] {
            handle_event(&mut app, key(KeyCode::Char(c)));
        }

        assert_eq!(app.input_buffer(), "qr1");
        assert_eq!(app.page.selected(), &Selection::All);
        assert!(requests.try_recv().is_err());

        handle_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_delete_key_only_acts_on_comment_panel() {
        let (mut app, mut requests) = idle_app();
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('d'))), EventResult::Continue);
        assert!(requests.try_recv().is_err());

        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focused_panel, FocusedPanel::Comments);
        handle_event(&mut app, key(KeyCode::Char('d')));
        // Empty list: nothing to delete, nothing sent
        assert!(requests.try_recv().is_err());
        assert_eq!(app.status_message(), Some("No comment selected"));
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let (mut app, _requests) = idle_app();
        handle_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.has_overlay());

        assert_eq!(handle_event(&mut app, key(KeyCode::Char('r'))), EventResult::Continue);
        handle_event(&mut app, key(KeyCode::Esc));
        assert!(!app.has_overlay());
    }
}
