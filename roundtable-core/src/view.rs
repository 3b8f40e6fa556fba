//! Display regions: gallery cards, knight details, and the comment list.
//!
//! Each region is re-rendered wholesale from fresh data. A failed round trip
//! leaves the last content in place and attaches an inline notice, which the
//! next successful render clears.

use crate::error::{RetrievalError, SummaryError};
use crate::model::{Comment, Knight, Summary};
use crate::summary::SummaryOutcome;

/// Placeholder shown when the active category has no comments.
pub const NO_COMMENTS: &str = "No comments for this category yet.";

/// The message shown when a lookup finds nothing.
pub fn not_found_message(name: &str) -> String {
    format!("Details not found for {name}.")
}

/// A clickable knight card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnightCard {
    pub name: String,
    pub title: String,
}

impl KnightCard {
    /// The lookup key sent when the card is activated.
    pub fn activation_key(&self) -> &str {
        &self.name
    }
}

/// Move a list cursor by `delta`, clamped to `len`.
fn step(cursor: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}

/// The knight gallery.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    cards: Vec<KnightCard>,
    cursor: usize,
    notice: Option<String>,
    loading: bool,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every card with one per knight, in order.
    pub fn render(&mut self, knights: Vec<Knight>) {
        self.cards = knights
            .into_iter()
            .map(|k| KnightCard {
                name: k.name,
                title: k.title,
            })
            .collect();
        self.cursor = self.cursor.min(self.cards.len().saturating_sub(1));
        self.notice = None;
        self.loading = false;
    }

    pub fn show_error(&mut self, error: &RetrievalError) {
        self.notice = Some(format!("Could not load knights: {error}"));
        self.loading = false;
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cards(&self) -> &[KnightCard] {
        &self.cards
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&KnightCard> {
        self.cards.get(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = step(self.cursor, self.cards.len(), delta);
    }
}

/// What the details region currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailsContent {
    #[default]
    Empty,
    Loading { name: String },
    Summary(Summary),
    NotFound { name: String },
    Error { name: String, message: String },
}

/// The knight-detail region.
#[derive(Debug, Clone, Default)]
pub struct Details {
    content: DetailsContent,
}

impl Details {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&mut self, name: &str) {
        self.content = DetailsContent::Loading {
            name: name.to_string(),
        };
    }

    pub fn render(&mut self, name: &str, result: Result<SummaryOutcome, SummaryError>) {
        self.content = match result {
            Ok(SummaryOutcome::Found(summary)) => DetailsContent::Summary(summary),
            Ok(SummaryOutcome::NotFound) => DetailsContent::NotFound {
                name: name.to_string(),
            },
            Err(error) => DetailsContent::Error {
                name: name.to_string(),
                message: error.to_string(),
            },
        };
    }

    pub fn content(&self) -> &DetailsContent {
        &self.content
    }

    /// Heading and body lines as displayed.
    pub fn text(&self) -> (Option<String>, String) {
        match &self.content {
            DetailsContent::Empty => (None, "Select a knight to see their story.".to_string()),
            DetailsContent::Loading { name } => (None, format!("Looking up {name}...")),
            DetailsContent::Summary(summary) => (Some(summary.title.clone()), summary.extract.clone()),
            DetailsContent::NotFound { name } => (None, not_found_message(name)),
            DetailsContent::Error { name, message } => {
                (None, format!("Could not load details for {name}: {message}"))
            }
        }
    }
}

/// One rendered comment with its delete affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    /// Id the delete affordance is tagged with.
    pub id: String,
    pub text: String,
}

/// The comment list for the active category.
#[derive(Debug, Clone, Default)]
pub struct CommentPanel {
    rows: Vec<CommentRow>,
    cursor: usize,
    notice: Option<String>,
}

impl CommentPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every row, one per comment, in order.
    pub fn render(&mut self, comments: Vec<Comment>) {
        self.rows = comments
            .into_iter()
            .map(|c| CommentRow {
                id: c.id,
                text: c.comment,
            })
            .collect();
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        self.notice = None;
    }

    pub fn show_error(&mut self, action: &str, error: &RetrievalError) {
        self.notice = Some(format!("Could not {action}: {error}"));
    }

    pub fn rows(&self) -> &[CommentRow] {
        &self.rows
    }

    /// The placeholder, when there is nothing to list.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(NO_COMMENTS)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&CommentRow> {
        self.rows.get(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = step(self.cursor, self.rows.len(), delta);
    }
}

/// Trimmed-text check applied before any comment is posted.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_render_replaces_cards() {
        let mut gallery = Gallery::new();
        gallery.render(vec![Knight::new("Arthur", "King"), Knight::new("Kay", "Sir")]);
        gallery.move_cursor(1);
        assert_eq!(gallery.selected().map(|c| c.name.as_str()), Some("Kay"));

        gallery.render(vec![Knight::new("Tristan", "Sir")]);
        assert_eq!(gallery.cards().len(), 1);
        assert_eq!(gallery.cursor(), 0);
        assert_eq!(gallery.selected().unwrap().activation_key(), "Tristan");
    }

    #[test]
    fn test_gallery_error_keeps_cards() {
        let mut gallery = Gallery::new();
        gallery.render(vec![Knight::new("Arthur", "King")]);
        gallery.show_error(&RetrievalError::Status {
            url: "http://localhost:3000/knights".into(),
            status: 503,
        });
        assert_eq!(gallery.cards().len(), 1);
        assert!(gallery.notice().unwrap().contains("503"));

        gallery.render(vec![]);
        assert!(gallery.notice().is_none());
    }

    #[test]
    fn test_cursor_clamps() {
        let mut gallery = Gallery::new();
        gallery.move_cursor(-1);
        assert_eq!(gallery.cursor(), 0);
        gallery.render(vec![Knight::new("A", "a"), Knight::new("B", "b")]);
        gallery.move_cursor(5);
        assert_eq!(gallery.cursor(), 1);
        gallery.move_cursor(-3);
        assert_eq!(gallery.cursor(), 0);
    }

    #[test]
    fn test_comment_placeholder() {
        let mut panel = CommentPanel::new();
        assert_eq!(panel.placeholder(), Some(NO_COMMENTS));

        panel.render(vec![Comment {
            id: "9".into(),
            category: "Legendary".into(),
            comment: "Excalibur!".into(),
        }]);
        assert!(panel.placeholder().is_none());
        assert_eq!(panel.selected().unwrap().id, "9");
    }

    #[test]
    fn test_details_not_found_text() {
        let mut details = Details::new();
        details.render("Sir Nobody", Ok(SummaryOutcome::NotFound));
        assert_eq!(details.text(), (None, "Details not found for Sir Nobody.".to_string()));
    }

    #[test]
    fn test_blank_text() {
        assert!(is_blank(""));
        assert!(is_blank("  \t\n"));
        assert!(!is_blank(" hi "));
    }
}
