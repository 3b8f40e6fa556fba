//! Comment list widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};
use roundtable_core::CommentPanel;

use crate::ui::theme::Theme;

/// Widget listing the comments for the active category
pub struct CommentsWidget<'a> {
    panel: &'a CommentPanel,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> CommentsWidget<'a> {
    pub fn new(panel: &'a CommentPanel, theme: &'a Theme) -> Self {
        Self {
            panel,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for CommentsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.focused {
            " Comments [d delete] "
        } else {
            " Comments "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut list_area = inner;
        if let Some(notice) = self.panel.notice() {
            let notice_height = 2.min(inner.height);
            Paragraph::new(Span::styled(notice, self.theme.notice_style()))
                .wrap(Wrap { trim: true })
                .render(Rect { height: notice_height, ..inner }, buf);
            list_area.y += notice_height;
            list_area.height -= notice_height;
        }

        if let Some(placeholder) = self.panel.placeholder() {
            Paragraph::new(Span::styled(placeholder, self.theme.system_style()))
                .render(list_area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .panel
            .rows()
            .iter()
            .map(|row| {
                ListItem::new(Line::from(vec![
                    Span::styled("[x] ", self.theme.system_style()),
                    Span::styled(row.text.as_str(), self.theme.text_style()),
                ]))
            })
            .collect();

        let list = List::new(items).highlight_style(self.theme.highlight_style(self.focused));
        let mut state = ListState::default().with_selected(Some(self.panel.cursor()));
        StatefulWidget::render(list, list_area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_core::{Comment, NO_COMMENTS};

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_placeholder_when_empty() {
        let panel = CommentPanel::new();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);

        CommentsWidget::new(&panel, &theme).render(area, &mut buf);
        assert!(buffer_text(&buf).contains(NO_COMMENTS));
    }

    #[test]
    fn test_rows_have_delete_affordance() {
        let mut panel = CommentPanel::new();
        panel.render(vec![Comment {
            id: "1".into(),
            category: "Historical".into(),
            comment: "Agincourt".into(),
        }]);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);

        CommentsWidget::new(&panel, &theme)
            .focused(true)
            .render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("[x] Agincourt"));
        assert!(text.contains("[d delete]"));
    }
}
