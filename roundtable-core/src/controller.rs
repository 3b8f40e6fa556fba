//! Controller: the page state and every user-facing transition.
//!
//! Work is split into three steps so the page can be driven either inline
//! ([`Controller`]) or from a background worker:
//! 1. `Page::begin_*` issues a ticket tagged with a fresh generation
//! 2. a `fetch_*` / `lookup` function performs the network round trip
//! 3. `Page::apply_*` renders the result only if its generation is still current
//!
//! Step 3 is what makes the last-issued request win when round trips overlap.

use crate::data::{CommentStore, KnightSource};
use crate::error::{RetrievalError, SummaryError};
use crate::filter::{filter_comments, select_by_category};
use crate::model::{Comment, Knight, Selection};
use crate::summary::{lookup_summary, Encyclopedia, SummaryOutcome};
use crate::view::{is_blank, CommentPanel, Details, Gallery};

/// The only shared state: the selected category plus request generations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub selected: Selection,
    gallery_generation: u64,
    comments_generation: u64,
    details_generation: u64,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Permission to render a gallery + comments refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    pub gallery_generation: u64,
    pub comments_generation: u64,
    pub selection: Selection,
}

/// Permission to re-render the comment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentsTicket {
    pub generation: u64,
    pub selection: Selection,
}

/// Permission to render a knight's details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub generation: u64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct RefreshResult {
    pub ticket: RefreshTicket,
    pub knights: Result<Vec<Knight>, RetrievalError>,
    pub comments: Result<Vec<Comment>, RetrievalError>,
}

/// Which comment operation produced a [`CommentsResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Load,
    Post,
    Delete,
}

impl CommentAction {
    fn verb(&self) -> &'static str {
        match self {
            CommentAction::Load => "load comments",
            CommentAction::Post => "post comment",
            CommentAction::Delete => "delete comment",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentsResult {
    pub ticket: CommentsTicket,
    pub action: CommentAction,
    pub comments: Result<Vec<Comment>, RetrievalError>,
}

#[derive(Debug)]
pub struct LookupResult {
    pub ticket: LookupTicket,
    pub outcome: Result<SummaryOutcome, SummaryError>,
}

/// A comment ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComment {
    pub ticket: CommentsTicket,
    pub category: String,
    pub text: String,
}

/// Outcome of [`Page::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank text; nothing is sent.
    Skip,
    Post(PendingComment),
}

/// Every display region plus the state that drives them.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub state: PageState,
    pub gallery: Gallery,
    pub details: Details,
    pub comments: CommentPanel,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &Selection {
        &self.state.selected
    }

    /// Change the selection without fetching. Pending results for the old
    /// selection are invalidated by the next [`Page::begin_refresh`].
    pub fn select(&mut self, selection: Selection) {
        self.state.selected = selection;
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.state.gallery_generation += 1;
        self.state.comments_generation += 1;
        self.gallery.set_loading();
        RefreshTicket {
            gallery_generation: self.state.gallery_generation,
            comments_generation: self.state.comments_generation,
            selection: self.state.selected.clone(),
        }
    }

    /// Render a refresh. Returns `false` when a newer refresh superseded it.
    ///
    /// The comment half is dropped independently if a later comment
    /// operation has already been issued.
    pub fn apply_refresh(&mut self, result: RefreshResult) -> bool {
        if result.ticket.gallery_generation != self.state.gallery_generation {
            tracing::debug!(
                generation = result.ticket.gallery_generation,
                current = self.state.gallery_generation,
                "discarding stale refresh"
            );
            return false;
        }

        match result.knights {
            Ok(knights) => self.gallery.render(knights),
            Err(error) => self.gallery.show_error(&error),
        }

        if result.ticket.comments_generation == self.state.comments_generation {
            self.render_comments(&result.ticket.selection, CommentAction::Load, result.comments);
        }
        true
    }

    pub fn begin_comments_reload(&mut self) -> CommentsTicket {
        self.state.comments_generation += 1;
        CommentsTicket {
            generation: self.state.comments_generation,
            selection: self.state.selected.clone(),
        }
    }

    /// Validate comment text for the selected category.
    ///
    /// Whitespace-only text is skipped. Accepted text is posted verbatim.
    pub fn begin_submit(&mut self, text: &str) -> Submission {
        if is_blank(text) {
            return Submission::Skip;
        }
        let ticket = self.begin_comments_reload();
        Submission::Post(PendingComment {
            category: ticket.selection.as_str().to_string(),
            text: text.to_string(),
            ticket,
        })
    }

    pub fn begin_delete(&mut self) -> CommentsTicket {
        self.begin_comments_reload()
    }

    /// Render a comment reload. Returns `false` if superseded.
    pub fn apply_comments(&mut self, result: CommentsResult) -> bool {
        if result.ticket.generation != self.state.comments_generation {
            tracing::debug!(generation = result.ticket.generation, "discarding stale comments");
            return false;
        }
        self.render_comments(&result.ticket.selection, result.action, result.comments);
        true
    }

    fn render_comments(
        &mut self,
        selection: &Selection,
        action: CommentAction,
        comments: Result<Vec<Comment>, RetrievalError>,
    ) {
        match comments {
            Ok(all) => self.comments.render(filter_comments(&all, selection)),
            Err(error) => self.comments.show_error(action.verb(), &error),
        }
    }

    pub fn begin_lookup(&mut self, name: &str) -> LookupTicket {
        self.state.details_generation += 1;
        self.details.set_loading(name);
        LookupTicket {
            generation: self.state.details_generation,
            name: name.to_string(),
        }
    }

    /// Render a lookup. Returns `false` if a later card activation superseded it.
    pub fn apply_lookup(&mut self, result: LookupResult) -> bool {
        if result.ticket.generation != self.state.details_generation {
            return false;
        }
        self.details.render(&result.ticket.name, result.outcome);
        true
    }
}

/// Fetch the catalog, then the comments, for a refresh ticket.
pub async fn fetch_refresh<D>(data: &D, ticket: RefreshTicket) -> RefreshResult
where
    D: KnightSource + CommentStore + ?Sized,
{
    let knights = data
        .list_knights()
        .await
        .map(|catalog| select_by_category(&catalog, &ticket.selection));
    let comments = data.list_comments().await;
    RefreshResult {
        ticket,
        knights,
        comments,
    }
}

pub async fn fetch_comments<D>(data: &D, ticket: CommentsTicket) -> CommentsResult
where
    D: CommentStore + ?Sized,
{
    let comments = data.list_comments().await;
    CommentsResult {
        ticket,
        action: CommentAction::Load,
        comments,
    }
}

/// Create the comment, then reload the list. A failed create skips the reload.
pub async fn post_comment<D>(data: &D, pending: PendingComment) -> CommentsResult
where
    D: CommentStore + ?Sized,
{
    let comments = match data.create_comment(&pending.category, &pending.text).await {
        Ok(comment) => {
            tracing::info!(id = %comment.id, category = %comment.category, "comment posted");
            data.list_comments().await
        }
        Err(error) => Err(error),
    };
    CommentsResult {
        ticket: pending.ticket,
        action: CommentAction::Post,
        comments,
    }
}

/// Delete the comment, then reload the list. A failed delete skips the reload.
pub async fn remove_comment<D>(data: &D, ticket: CommentsTicket, id: &str) -> CommentsResult
where
    D: CommentStore + ?Sized,
{
    let comments = match data.delete_comment(id).await {
        Ok(()) => {
            tracing::info!(%id, "comment deleted");
            data.list_comments().await
        }
        Err(error) => Err(error),
    };
    CommentsResult {
        ticket,
        action: CommentAction::Delete,
        comments,
    }
}

pub async fn lookup<E>(encyclopedia: &E, ticket: LookupTicket) -> LookupResult
where
    E: Encyclopedia + ?Sized,
{
    let outcome = lookup_summary(encyclopedia, &ticket.name).await;
    if let Err(error) = &outcome {
        tracing::warn!(name = %ticket.name, stage = error.stage(), %error, "summary lookup failed");
    }
    LookupResult { ticket, outcome }
}

/// Drives a [`Page`] inline, one transition at a time.
pub struct Controller<D, E> {
    page: Page,
    data: D,
    encyclopedia: E,
}

impl<D, E> Controller<D, E>
where
    D: KnightSource + CommentStore,
    E: Encyclopedia,
{
    pub fn new(data: D, encyclopedia: E) -> Self {
        Self {
            page: Page::new(),
            data,
            encyclopedia,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn encyclopedia(&self) -> &E {
        &self.encyclopedia
    }

    /// Initial load: select `All` and refresh.
    pub async fn load(&mut self) {
        self.category_changed(Selection::All).await;
    }

    pub async fn category_changed(&mut self, selection: Selection) {
        tracing::info!(category = %selection, "category changed");
        self.page.select(selection);
        self.refresh().await;
    }

    /// Re-fetch catalog and comments for the current selection.
    pub async fn refresh(&mut self) {
        let ticket = self.page.begin_refresh();
        let result = fetch_refresh(&self.data, ticket).await;
        self.page.apply_refresh(result);
    }

    /// Post a comment for the selected category. Returns `false` if skipped.
    pub async fn submit_comment(&mut self, text: &str) -> bool {
        match self.page.begin_submit(text) {
            Submission::Skip => false,
            Submission::Post(pending) => {
                let result = post_comment(&self.data, pending).await;
                self.page.apply_comments(result);
                true
            }
        }
    }

    pub async fn delete_comment(&mut self, id: &str) {
        let ticket = self.page.begin_delete();
        let result = remove_comment(&self.data, ticket, id).await;
        self.page.apply_comments(result);
    }

    /// Look up a knight's summary. Only the details region changes.
    pub async fn knight_activated(&mut self, name: &str) {
        let ticket = self.page.begin_lookup(name);
        let result = lookup(&self.encyclopedia, ticket).await;
        self.page.apply_lookup(result);
    }

    /// Activate the card under the gallery cursor, if any.
    pub async fn activate_selected(&mut self) -> bool {
        let Some(name) = self
            .page
            .gallery
            .selected()
            .map(|card| card.activation_key().to_string())
        else {
            return false;
        };
        self.knight_activated(&name).await;
        true
    }

    pub fn move_gallery_cursor(&mut self, delta: isize) {
        self.page.gallery.move_cursor(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Catalog, Category};
    use crate::testing::MemoryBackend;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_knight("Historical", "a", Knight::new("Arthur", "King"))
            .with_knight("Legendary", "l", Knight::new("Lancelot", "Sir"))
            .with_group("Fictional")
    }

    #[tokio::test]
    async fn test_stale_refresh_is_discarded() {
        let backend = MemoryBackend::new(catalog());
        let mut page = Page::new();

        page.select(Selection::from(Category::Historical));
        let first = page.begin_refresh();
        page.select(Selection::from(Category::Legendary));
        let second = page.begin_refresh();

        let late = fetch_refresh(&backend, first).await;
        let early = fetch_refresh(&backend, second).await;

        assert!(page.apply_refresh(early));
        assert!(!page.apply_refresh(late));
        assert_eq!(page.gallery.cards()[0].name, "Lancelot");
    }

    #[tokio::test]
    async fn test_refresh_drops_comment_half_after_newer_comment_op() {
        let backend = MemoryBackend::new(catalog());
        backend.seed_comment("Historical", "old");
        let mut page = Page::new();
        page.select(Selection::from(Category::Historical));

        let refresh = page.begin_refresh();
        let refreshed = fetch_refresh(&backend, refresh).await;

        let reload = page.begin_comments_reload();
        backend.seed_comment("Historical", "new");
        let reloaded = fetch_comments(&backend, reload).await;

        assert!(page.apply_comments(reloaded));
        assert_eq!(page.comments.rows().len(), 2);

        // Gallery half still renders, the older comment half does not
        assert!(page.apply_refresh(refreshed));
        assert_eq!(page.gallery.cards().len(), 1);
        assert_eq!(page.comments.rows().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_lookup_is_discarded() {
        let mut page = Page::new();
        let first = page.begin_lookup("Arthur");
        let second = page.begin_lookup("Lancelot");

        assert!(page.apply_lookup(LookupResult {
            ticket: second,
            outcome: Ok(SummaryOutcome::NotFound),
        }));
        assert!(!page.apply_lookup(LookupResult {
            ticket: first,
            outcome: Ok(SummaryOutcome::NotFound),
        }));
        assert_eq!(page.details.text().1, "Details not found for Lancelot.");
    }

    #[test]
    fn test_blank_submission_is_skipped() {
        let mut page = Page::new();
        let before = page.state.clone();
        assert_eq!(page.begin_submit("   "), Submission::Skip);
        assert_eq!(page.state, before);
    }

    #[test]
    fn test_submission_uses_selected_category() {
        let mut page = Page::new();
        page.select(Selection::from(Category::Fictional));
        match page.begin_submit(" Rocinante ") {
            Submission::Post(pending) => {
                assert_eq!(pending.category, "Fictional");
                assert_eq!(pending.text, " Rocinante ");
            }
            Submission::Skip => panic!("expected a post"),
        }
    }
}
