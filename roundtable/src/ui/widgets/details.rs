//! Knight details widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use roundtable_core::view::DetailsContent;
use roundtable_core::Details;

use crate::ui::theme::Theme;

/// Widget showing the summary of the last activated knight
pub struct DetailsWidget<'a> {
    details: &'a Details,
    theme: &'a Theme,
}

impl<'a> DetailsWidget<'a> {
    pub fn new(details: &'a Details, theme: &'a Theme) -> Self {
        Self { details, theme }
    }
}

impl Widget for DetailsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Details ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let (heading, body) = self.details.text();
        let body_style = match self.details.content() {
            DetailsContent::Summary(_) => self.theme.text_style(),
            DetailsContent::Error { .. } => self.theme.notice_style(),
            _ => self.theme.system_style(),
        };

        let mut lines = Vec::new();
        if let Some(heading) = heading {
            lines.push(Line::from(Span::styled(heading, self.theme.heading_style())));
            lines.push(Line::from(""));
        }
        lines.extend(
            body.lines()
                .map(|line| Line::from(Span::styled(line.to_string(), body_style))),
        );

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
