//! Knight card gallery widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};
use roundtable_core::Gallery;

use crate::ui::theme::Theme;

/// Widget listing one card per knight
pub struct GalleryWidget<'a> {
    gallery: &'a Gallery,
    theme: &'a Theme,
    category: &'a str,
    focused: bool,
}

impl<'a> GalleryWidget<'a> {
    pub fn new(gallery: &'a Gallery, theme: &'a Theme) -> Self {
        Self {
            gallery,
            theme,
            category: "",
            focused: false,
        }
    }

    pub fn category(mut self, category: &'a str) -> Self {
        self.category = category;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for GalleryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.gallery.is_loading() {
            format!(" Knights - {} (loading) ", self.category)
        } else {
            format!(" Knights - {} ({}) ", self.category, self.gallery.cards().len())
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        // Notice line sits above the cards
        let mut list_area = inner;
        if let Some(notice) = self.gallery.notice() {
            let notice_height = 2.min(inner.height);
            Paragraph::new(Span::styled(notice, self.theme.notice_style()))
                .wrap(Wrap { trim: true })
                .render(Rect { height: notice_height, ..inner }, buf);
            list_area.y += notice_height;
            list_area.height -= notice_height;
        }

        if self.gallery.cards().is_empty() {
            let text = if self.gallery.is_loading() {
                "Summoning knights..."
            } else {
                "No knights in this category."
            };
            Paragraph::new(Span::styled(text, self.theme.system_style())).render(list_area, buf);
            return;
        }

        let accent = self.theme.category_color(self.category);
        let items: Vec<ListItem> = self
            .gallery
            .cards()
            .iter()
            .map(|card| {
                ListItem::new(vec![
                    Line::from(Span::styled(card.name.as_str(), self.theme.text_style().fg(accent))),
                    Line::from(Span::styled(format!("  {}", card.title), self.theme.title_style())),
                ])
            })
            .collect();

        let list = List::new(items)
            .highlight_style(self.theme.highlight_style(self.focused))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.gallery.cursor()));
        StatefulWidget::render(list, list_area, buf, &mut state);
    }
}
