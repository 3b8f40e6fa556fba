//! Status and hotkey bars

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::InputMode;
use crate::ui::theme::Theme;

/// Mode indicator, pending request count and the last status message
pub struct StatusBarWidget<'a> {
    input_mode: InputMode,
    in_flight: usize,
    message: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(input_mode: InputMode, theme: &'a Theme) -> Self {
        Self {
            input_mode,
            in_flight: 0,
            message: None,
            theme,
        }
    }

    pub fn in_flight(mut self, in_flight: usize) -> Self {
        self.in_flight = in_flight;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (mode, color) = match self.input_mode {
            InputMode::Normal => (" NORMAL ", Color::Blue),
            InputMode::Insert => (" INSERT ", Color::Green),
        };

        let mut spans = vec![Span::styled(
            mode,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )];

        if self.in_flight > 0 {
            spans.push(Span::styled(
                format!(" {} pending ", self.in_flight),
                self.theme.system_style(),
            ));
        }

        if let Some(message) = self.message {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(message, self.theme.text_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Key hints for the current input mode
pub struct HotkeyBarWidget<'a> {
    input_mode: InputMode,
    theme: &'a Theme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(input_mode: InputMode, theme: &'a Theme) -> Self {
        Self { input_mode, theme }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hints: &[(&str, &str)] = match self.input_mode {
            InputMode::Normal => &[
                ("1-4", "category"),
                ("c", "next"),
                ("r", "refresh"),
                ("Enter", "details"),
                ("Tab", "focus"),
                ("i", "comment"),
                ("?", "help"),
                ("q", "quit"),
            ],
            InputMode::Insert => &[("Enter", "post"), ("Esc", "done")],
        };

        let key_style = self.theme.input_style().add_modifier(Modifier::BOLD);
        let spans: Vec<Span> = hints
            .iter()
            .flat_map(|(key, action)| {
                [
                    Span::styled(format!(" {key}"), key_style),
                    Span::styled(format!(" {action} "), self.theme.system_style()),
                ]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
